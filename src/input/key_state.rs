// Edge-triggered key state
//
// Tracks which physical keys are held now and which were held at the last
// poll. An edge is the difference between those two levels, so a batch never
// contradicts the final key state. A press that is also released before the
// poll (a tap) still reports both edges.

use std::collections::HashSet;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held keys plus what the last poll saw
#[derive(Debug, Default)]
pub struct KeyState {
    held: HashSet<KeyCode>,
    held_at_last_poll: HashSet<KeyCode>,
    /// Keys that went down at least once since the last poll
    tapped: HashSet<KeyCode>,
}

impl KeyState {
    /// Create an empty key state
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press event
    ///
    /// OS auto-repeat and presses of a key that is already held are ignored.
    pub fn handle_key_press(&mut self, physical_key: PhysicalKey, repeat: bool) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if !repeat && self.held.insert(key_code) {
                self.tapped.insert(key_code);
            }
        }
    }

    /// Handle a key release event
    pub fn handle_key_release(&mut self, physical_key: PhysicalKey) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.held.remove(&key_code);
        }
    }

    /// Release every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Whether `key` should be reported as pressed this poll
    ///
    /// Up at the last poll, and either down now or tapped in between.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        !self.held_at_last_poll.contains(&key)
            && (self.held.contains(&key) || self.tapped.contains(&key))
    }

    /// Whether `key` should be reported as released this poll
    ///
    /// Up now, and either down at the last poll or tapped in between.
    pub fn just_released(&self, key: KeyCode) -> bool {
        !self.held.contains(&key)
            && (self.held_at_last_poll.contains(&key) || self.tapped.contains(&key))
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Mark the current levels as seen by a poll
    pub fn clear_edges(&mut self) {
        self.held_at_last_poll.clone_from(&self.held);
        self.tapped.clear();
    }
}
