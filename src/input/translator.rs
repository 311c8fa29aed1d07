// Input translator - key edges to per-frame button events
//
// Once per frame the caller polls the translator with the device that owns
// the key state (normally the display surface, whose render call pumps the
// window events). Hotkeys are acted on directly; every other bound key
// becomes a press or release event for the emulation core.

use super::key_state::KeyState;
use super::keymap::{Hotkeys, InputError, KeyMap};
use super::ButtonInputBatch;

/// Source of key edges plus the frontend actions hotkeys can trigger
///
/// Implemented by the display surface. Events must have been pumped (by
/// `render` or `pump_events`) before polling, or edges arrive a frame late.
pub trait InputDevice {
    /// Key state accumulated since the last poll
    fn key_state(&mut self) -> &mut KeyState;

    /// Restore the window to its base size
    fn toggle_fullscreen(&mut self);

    /// Save a screenshot of the displayed image
    fn request_screenshot(&mut self);
}

/// Translates key edges into `ButtonInputBatch`es
#[derive(Debug, Clone)]
pub struct InputTranslator {
    keymap: KeyMap,
    hotkeys: Hotkeys,
}

impl InputTranslator {
    /// Create a translator
    ///
    /// # Returns
    /// `InputError::DuplicateKey` if both hotkeys are the same key, or
    /// `InputError::ReservedKey` if a hotkey is also bound in `keymap`
    pub fn new(keymap: KeyMap, hotkeys: Hotkeys) -> Result<Self, InputError> {
        if hotkeys.toggle_fullscreen == hotkeys.screenshot {
            return Err(InputError::DuplicateKey(hotkeys.screenshot));
        }
        if let Some(key) = hotkeys.keys().into_iter().find(|&k| keymap.contains_key(k)) {
            return Err(InputError::ReservedKey(key));
        }

        Ok(Self { keymap, hotkeys })
    }

    /// The key map in use
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// The hotkeys in use
    pub fn hotkeys(&self) -> Hotkeys {
        self.hotkeys
    }

    /// Collect this frame's button events
    ///
    /// Hotkeys fire first and never appear in the batch. Pending edges are
    /// consumed, so a key held across polls is pressed exactly once.
    pub fn poll_button_events<D: InputDevice>(&self, device: &mut D) -> ButtonInputBatch {
        if device.key_state().just_pressed(self.hotkeys.toggle_fullscreen) {
            device.toggle_fullscreen();
        }
        if device.key_state().just_pressed(self.hotkeys.screenshot) {
            device.request_screenshot();
        }

        let keys = device.key_state();
        let mut batch = ButtonInputBatch::default();

        for &(key, button) in self.keymap.iter() {
            if keys.just_pressed(key) {
                batch.pressed.push(button);
            }
            if keys.just_released(key) {
                batch.released.push(button);
            }
        }
        keys.clear_edges();

        if !batch.is_empty() {
            log::trace!(
                "Buttons pressed: {:?}, released: {:?}",
                batch.pressed,
                batch.released
            );
        }

        batch
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self {
            keymap: KeyMap::default(),
            hotkeys: Hotkeys::default(),
        }
    }
}
