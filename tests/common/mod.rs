// Common test utilities for frontend integration tests
//
// Provides a headless input device so the translator can be exercised
// without opening a window.

#![allow(dead_code)]

use gb_frontend::display::{filled_framebuffer, Framebuffer};
use gb_frontend::input::{InputDevice, KeyState};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input device backed only by a `KeyState`
#[derive(Default)]
pub struct HeadlessDevice {
    pub keys: KeyState,
    pub fullscreen_toggles: u32,
    pub screenshot_requests: u32,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the window delivering a key-down event
    pub fn press(&mut self, key: KeyCode) {
        self.keys.handle_key_press(PhysicalKey::Code(key), false);
    }

    /// Simulate an OS auto-repeat event for a held key
    pub fn repeat(&mut self, key: KeyCode) {
        self.keys.handle_key_press(PhysicalKey::Code(key), true);
    }

    /// Simulate the window delivering a key-up event
    pub fn release(&mut self, key: KeyCode) {
        self.keys.handle_key_release(PhysicalKey::Code(key));
    }
}

impl InputDevice for HeadlessDevice {
    fn key_state(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen_toggles += 1;
    }

    fn request_screenshot(&mut self) {
        self.screenshot_requests += 1;
    }
}

/// Framebuffer where every cell encodes its own coordinates
pub fn coordinate_framebuffer() -> Box<Framebuffer> {
    let mut frame = filled_framebuffer([0, 0, 0]);
    for (x, column) in frame.iter_mut().enumerate() {
        for (y, cell) in column.iter_mut().enumerate() {
            *cell = [x as u8, y as u8, 0x80];
        }
    }
    frame
}
