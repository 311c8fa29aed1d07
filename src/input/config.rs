// Input configuration module
//
// Serializable form of the key map and hotkeys. Keys are stored by their
// winit `KeyCode` name (e.g. "KeyZ", "ArrowUp", "Numpad1") through winit's
// serde support, so every key that can be bound can also be saved and loaded.

use super::keymap::{Hotkeys, InputError, KeyMap};
use super::translator::InputTranslator;
use super::Button;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// One key-to-button binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Physical key, e.g. "KeyZ"
    pub key: KeyCode,
    /// Button the key drives
    pub button: Button,
}

/// Ordered list of key bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub bindings: Vec<KeyBinding>,
}

impl InputConfig {
    /// Create from a runtime key map
    pub fn from_keymap(keymap: &KeyMap) -> Self {
        Self {
            bindings: keymap
                .iter()
                .map(|&(key, button)| KeyBinding { key, button })
                .collect(),
        }
    }

    /// Convert to a runtime key map
    pub fn to_keymap(&self) -> Result<KeyMap, InputError> {
        KeyMap::new(
            self.bindings
                .iter()
                .map(|binding| (binding.key, binding.button))
                .collect(),
        )
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_keymap(&KeyMap::default())
    }
}

/// Hotkey configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Restore window to base size (default: KeyF)
    pub toggle_fullscreen: KeyCode,

    /// Screenshot (default: KeyT)
    pub screenshot: KeyCode,
}

impl HotkeyConfig {
    /// Convert to runtime hotkeys
    pub fn to_hotkeys(&self) -> Hotkeys {
        Hotkeys {
            toggle_fullscreen: self.toggle_fullscreen,
            screenshot: self.screenshot,
        }
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        let hotkeys = Hotkeys::default();
        Self {
            toggle_fullscreen: hotkeys.toggle_fullscreen,
            screenshot: hotkeys.screenshot,
        }
    }
}

/// Build a translator from the input and hotkey sections
pub fn build_translator(
    input: &InputConfig,
    hotkeys: &HotkeyConfig,
) -> Result<InputTranslator, InputError> {
    InputTranslator::new(input.to_keymap()?, hotkeys.to_hotkeys())
}
