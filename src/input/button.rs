// Button vocabulary understood by the emulation core
//
// These are opaque tokens to the frontend: the joypad buttons plus the
// debugging and presentation toggles the core reacts to.

use serde::{Deserialize, Serialize};

/// Abstract button identifier delivered to the emulation core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// A button
    A,
    /// B button
    B,
    /// Select button
    Select,
    /// Start button
    Start,
    /// Up on D-pad
    Up,
    /// Down on D-pad
    Down,
    /// Left on D-pad
    Left,
    /// Right on D-pad
    Right,
    /// Pause or resume emulation
    Pause,
    /// Cycle the display palette
    ChangePalette,
    /// Toggle background layer rendering
    ToggleBackground,
    /// Toggle sprite rendering
    ToggleSprites,
    /// Toggle opcode trace output
    ToggleOpcodeOutput,
    /// Dump the background tile map
    PrintBackgroundMap,
    ToggleSoundChannel1,
    ToggleSoundChannel2,
    ToggleSoundChannel3,
    ToggleSoundChannel4,
}

impl Button {
    /// Every button, joypad first
    pub const ALL: [Button; 18] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Pause,
        Button::ChangePalette,
        Button::ToggleBackground,
        Button::ToggleSprites,
        Button::ToggleOpcodeOutput,
        Button::PrintBackgroundMap,
        Button::ToggleSoundChannel1,
        Button::ToggleSoundChannel2,
        Button::ToggleSoundChannel3,
        Button::ToggleSoundChannel4,
    ];

    /// Whether this is one of the eight physical joypad buttons
    pub fn is_joypad(self) -> bool {
        matches!(
            self,
            Button::A
                | Button::B
                | Button::Select
                | Button::Start
                | Button::Up
                | Button::Down
                | Button::Left
                | Button::Right
        )
    }
}

/// Button events for one poll
///
/// Both sequences follow key-map order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonInputBatch {
    /// Buttons newly pressed since the previous poll
    pub pressed: Vec<Button>,
    /// Buttons newly released since the previous poll
    pub released: Vec<Button>,
}

impl ButtonInputBatch {
    /// Whether the batch carries no events
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }
}
