// Input module - Keyboard edges to emulator button events
//
// This module provides:
// - The button vocabulary understood by the emulation core
// - Edge-triggered key state fed from window events
// - An ordered key map plus frontend hotkeys
// - The per-frame translator producing press/release batches
// - TOML-serializable bindings

pub mod button;
pub mod config;
pub mod key_state;
pub mod keymap;
pub mod translator;

pub use button::{Button, ButtonInputBatch};
pub use config::{build_translator, HotkeyConfig, InputConfig, KeyBinding};
pub use key_state::KeyState;
pub use keymap::{Hotkeys, InputError, KeyMap};
pub use translator::{InputDevice, InputTranslator};
