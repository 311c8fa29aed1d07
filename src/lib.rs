// Game Boy Frontend Library
// Window, display and keyboard input for a Game Boy emulator core

// Public modules
pub mod config;
pub mod display;
pub mod input;

// Re-export main types for convenience
pub use config::{ConfigError, FrontendConfig};
pub use display::{
    Camera, DisplayError, Framebuffer, Palette, PaletteSource, PixelBuffer, ScreenshotError,
    Surface, WindowConfig, SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use input::{Button, ButtonInputBatch, InputDevice, InputTranslator, KeyMap};
