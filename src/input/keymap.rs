// Keyboard mapping module
//
// This module provides the keyboard-to-button table and the hotkeys the
// frontend handles itself. The table is an ordered list of pairs, so events
// within one poll always come out in the same order.

use super::Button;
use winit::keyboard::KeyCode;

/// Errors raised while building a key map or translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The same physical key was bound twice
    DuplicateKey(KeyCode),

    /// A hotkey is also bound to a button
    ReservedKey(KeyCode),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::DuplicateKey(key) => write!(f, "Key {:?} is bound more than once", key),
            InputError::ReservedKey(key) => {
                write!(f, "Key {:?} is a hotkey and cannot be bound to a button", key)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Immutable, ordered key-to-button table
///
/// Each physical key maps to at most one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    entries: Vec<(KeyCode, Button)>,
}

impl KeyMap {
    /// Build a key map from `(key, button)` pairs, keeping their order
    ///
    /// # Returns
    /// The key map, or `InputError::DuplicateKey` if a key repeats
    pub fn new(entries: Vec<(KeyCode, Button)>) -> Result<Self, InputError> {
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == key) {
                return Err(InputError::DuplicateKey(*key));
            }
        }

        Ok(Self { entries })
    }

    /// Default bindings
    ///
    /// # Default Mappings
    /// - Z / X: A / B
    /// - Backspace / Enter: Select / Start
    /// - Arrow keys: D-pad
    /// - Escape: Pause
    /// - `=`: Change palette
    /// - Q / W / E / D: Background, sprites, opcode output, BG map dump
    /// - 7 / 8 / 9 / 0: Sound channels 1-4
    pub fn default_bindings() -> Vec<(KeyCode, Button)> {
        vec![
            (KeyCode::KeyZ, Button::A),
            (KeyCode::KeyX, Button::B),
            (KeyCode::Backspace, Button::Select),
            (KeyCode::Enter, Button::Start),
            (KeyCode::ArrowRight, Button::Right),
            (KeyCode::ArrowLeft, Button::Left),
            (KeyCode::ArrowUp, Button::Up),
            (KeyCode::ArrowDown, Button::Down),
            (KeyCode::Escape, Button::Pause),
            (KeyCode::Equal, Button::ChangePalette),
            (KeyCode::KeyQ, Button::ToggleBackground),
            (KeyCode::KeyW, Button::ToggleSprites),
            (KeyCode::KeyE, Button::ToggleOpcodeOutput),
            (KeyCode::KeyD, Button::PrintBackgroundMap),
            (KeyCode::Digit7, Button::ToggleSoundChannel1),
            (KeyCode::Digit8, Button::ToggleSoundChannel2),
            (KeyCode::Digit9, Button::ToggleSoundChannel3),
            (KeyCode::Digit0, Button::ToggleSoundChannel4),
        ]
    }

    /// Get the button for a given key code
    pub fn button_for(&self, key: KeyCode) -> Option<Button> {
        self.entries
            .iter()
            .find(|(mapped, _)| *mapped == key)
            .map(|&(_, button)| button)
    }

    /// Whether `key` is bound to any button
    pub fn contains_key(&self, key: KeyCode) -> bool {
        self.button_for(key).is_some()
    }

    /// Iterate the bindings in order
    pub fn iter(&self) -> impl Iterator<Item = &(KeyCode, Button)> {
        self.entries.iter()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no bindings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            entries: Self::default_bindings(),
        }
    }
}

/// Keys handled by the frontend rather than forwarded as buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkeys {
    /// Restore the window to its base size (default: F)
    pub toggle_fullscreen: KeyCode,
    /// Save a PNG screenshot (default: T)
    pub screenshot: KeyCode,
}

impl Hotkeys {
    /// Both hotkeys, fullscreen first
    pub fn keys(&self) -> [KeyCode; 2] {
        [self.toggle_fullscreen, self.screenshot]
    }
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            toggle_fullscreen: KeyCode::KeyF,
            screenshot: KeyCode::KeyT,
        }
    }
}
