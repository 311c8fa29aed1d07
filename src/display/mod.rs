// Display module - Handles window creation and frame presentation
//
// This module provides:
// - The 160×144 source framebuffer type and the flipped display pixel buffer
// - DMG palettes and the palette lookup used for the background colour
// - The letterbox camera and compositor
// - The winit + pixels surface that owns the window
// - PNG screenshots of the displayed image

pub mod camera;
pub mod framebuffer;
pub mod palette;
pub mod screenshot;
pub mod window;

pub use camera::{composite, Camera, Viewport};
pub use framebuffer::{
    filled_framebuffer, test_pattern, Framebuffer, PixelBuffer, SCREEN_HEIGHT, SCREEN_SIZE,
    SCREEN_WIDTH,
};
pub use palette::{Palette, PaletteSource, BACKGROUND_PALETTE_INDEX};
pub use screenshot::{save_screenshot, screenshot_path, ScreenshotError};
pub use window::{DisplayError, Lifecycle, Surface, WindowConfig};
