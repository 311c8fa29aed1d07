// Window module - Owns the display window and presents frames
//
// The surface is driven synchronously by the caller: `render` blits the
// framebuffer, composites it into the window-sized pixels buffer under the
// letterbox camera, presents, and then pumps pending window events. Key
// edges collected during that pump are what `InputTranslator` reads next.
//
// Everything here must stay on the thread that created the surface (the
// main thread on macOS); winit does not allow the event loop to move.

use super::camera::{composite, Camera};
use super::framebuffer::{Framebuffer, PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::palette::{PaletteSource, BACKGROUND_PALETTE_INDEX};
use super::screenshot::{save_screenshot, screenshot_path, ScreenshotError};
use crate::input::{InputDevice, KeyState};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// How many times `initialize` pumps the event loop waiting for the window
const INIT_PUMP_ATTEMPTS: u32 = 10;

/// Errors raised while creating or presenting to the window
#[derive(Debug)]
pub enum DisplayError {
    /// The event loop could not be created
    EventLoop(winit::error::EventLoopError),

    /// The OS refused to create the window
    Window(winit::error::OsError),

    /// GPU surface creation or presentation failed
    Pixels(pixels::Error),

    /// The pixels buffer could not be resized
    Texture(pixels::TextureError),

    /// The event loop never delivered the window creation callback
    WindowNotCreated,
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            DisplayError::Window(e) => write!(f, "Failed to create window: {}", e),
            DisplayError::Pixels(e) => write!(f, "Pixels error: {}", e),
            DisplayError::Texture(e) => write!(f, "Failed to resize pixel buffer: {}", e),
            DisplayError::WindowNotCreated => write!(f, "Window was never created"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<winit::error::EventLoopError> for DisplayError {
    fn from(e: winit::error::EventLoopError) -> Self {
        DisplayError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for DisplayError {
    fn from(e: winit::error::OsError) -> Self {
        DisplayError::Window(e)
    }
}

impl From<pixels::Error> for DisplayError {
    fn from(e: pixels::Error) -> Self {
        DisplayError::Pixels(e)
    }
}

impl From<pixels::TextureError> for DisplayError {
    fn from(e: pixels::TextureError) -> Self {
        DisplayError::Texture(e)
    }
}

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Whether to enable VSync
    pub vsync: bool,
    /// Initial window title
    pub title: String,
    /// Where hotkey screenshots are written
    pub screenshot_directory: PathBuf,
    /// Timestamp hotkey screenshot names instead of overwriting one file
    pub include_timestamp: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: VSync enabled, screenshots timestamped under `screenshots/`
    pub fn new() -> Self {
        Self {
            vsync: true,
            title: "gb-frontend".to_string(),
            screenshot_directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the initial title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the hotkey screenshot destination
    pub fn with_screenshots(mut self, directory: &Path, include_timestamp: bool) -> Self {
        self.screenshot_directory = directory.to_path_buf();
        self.include_timestamp = include_timestamp;
        self
    }

    /// Base window width in logical pixels (the LCD width)
    pub fn base_width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    /// Base window height in logical pixels (the LCD height)
    pub fn base_height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Window lifecycle
///
/// `Closed` is terminal: once the user closes the window the surface never
/// runs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
    Closed,
}

impl Lifecycle {
    /// Move to `Running` after the window exists; no effect once closed
    pub fn start(&mut self) {
        if *self == Lifecycle::Uninitialized {
            *self = Lifecycle::Running;
        }
    }

    /// Move to the terminal `Closed` state
    pub fn close(&mut self) {
        *self = Lifecycle::Closed;
    }

    pub fn is_running(self) -> bool {
        self == Lifecycle::Running
    }
}

/// Display surface for rendering Game Boy output
///
/// Field order matters: `pixels` must drop before `window`, and both before
/// `event_loop`.
pub struct Surface {
    pixels: Option<Pixels<'static>>,
    window: Option<Arc<Window>>,
    event_loop: Option<EventLoop<()>>,
    config: WindowConfig,
    picture: PixelBuffer,
    keys: KeyState,
    lifecycle: Lifecycle,
    /// Physical size the pixels buffer currently has
    buffer_size: (u32, u32),
    init_error: Option<DisplayError>,
}

impl Surface {
    /// Create the window and its pixel surface
    ///
    /// The window starts at the LCD resolution, undecorated and not
    /// resizable by dragging.
    ///
    /// # Returns
    /// The running surface, or the error that prevented window creation.
    /// There is no fallback renderer.
    pub fn initialize(config: WindowConfig) -> Result<Self, DisplayError> {
        let mut event_loop = EventLoop::new()?;

        let mut surface = Self {
            pixels: None,
            window: None,
            event_loop: None,
            config,
            picture: PixelBuffer::new(),
            keys: KeyState::new(),
            lifecycle: Lifecycle::Uninitialized,
            buffer_size: (0, 0),
            init_error: None,
        };

        // Windows can only be created from `resumed`, which fires on the first pumps
        for _ in 0..INIT_PUMP_ATTEMPTS {
            let status = event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut surface);
            if surface.window.is_some()
                || surface.init_error.is_some()
                || matches!(status, PumpStatus::Exit(_))
            {
                break;
            }
        }
        surface.event_loop = Some(event_loop);

        if let Some(err) = surface.init_error.take() {
            return Err(err);
        }
        if surface.window.is_none() {
            return Err(DisplayError::WindowNotCreated);
        }

        Ok(surface)
    }

    /// Render a framebuffer and pump window events
    ///
    /// Blits `framebuffer` into the pixel buffer with a vertical flip, clears
    /// the window to palette colour 3, draws the buffer under a camera fitted
    /// to the current window size, presents, and pumps events. Call this
    /// before polling input each frame.
    ///
    /// After the window closed only the pixel buffer is updated.
    pub fn render<P: PaletteSource>(
        &mut self,
        framebuffer: &Framebuffer,
        palette: &P,
    ) -> Result<(), DisplayError> {
        self.picture.blit(framebuffer);

        if !self.lifecycle.is_running() {
            return Ok(());
        }

        let background = palette.colour(BACKGROUND_PALETTE_INDEX);
        self.present(background)?;
        self.pump_events();

        Ok(())
    }

    /// Deliver pending window, resize, close and key events
    ///
    /// `render` already does this; call it directly when a frame is skipped
    /// but input should still be read.
    pub fn pump_events(&mut self) {
        if !self.lifecycle.is_running() {
            return;
        }

        // Take the loop out so `self` can be the handler
        let Some(mut event_loop) = self.event_loop.take() else {
            return;
        };
        let status = event_loop.pump_app_events(Some(Duration::ZERO), self);
        self.event_loop = Some(event_loop);

        if let PumpStatus::Exit(code) = status {
            log::debug!("Event loop exited with code {}", code);
            self.close();
        }
    }

    /// Set the window title
    pub fn set_title(&self, title: &str) {
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }

    /// Restore the window to the base 160×144 size
    ///
    /// Despite the name this does not enter OS fullscreen; it only resets the
    /// window bounds.
    pub fn toggle_fullscreen(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.request_inner_size(LogicalSize::new(
                self.config.base_width(),
                self.config.base_height(),
            ));
            log::debug!("Window restored to base size");
        }
    }

    /// Whether the window is still open
    ///
    /// Becomes false once the close request is seen and stays false.
    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Save the displayed 160×144 image as a PNG at `path`
    pub fn capture_screenshot(&self, path: &Path) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(&self.picture, path)
    }

    /// Composite the pixel buffer into the window and present it
    fn present(&mut self, background: [u8; 3]) -> Result<(), DisplayError> {
        let (Some(window), Some(pixels)) = (&self.window, &mut self.pixels) else {
            return Ok(());
        };

        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            // Minimized
            return Ok(());
        }

        let camera = Camera::fit(size.width, size.height);
        if self.buffer_size != (size.width, size.height) {
            pixels.resize_surface(size.width, size.height)?;
            pixels.resize_buffer(size.width, size.height)?;
            self.buffer_size = (size.width, size.height);
            let viewport = camera.viewport();
            log::debug!(
                "Window {}x{}, camera scale {:.3}, image at ({:.1}, {:.1}) size {:.1}x{:.1}",
                size.width,
                size.height,
                camera.scale(),
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height
            );
        }

        let [r, g, b] = background;
        pixels.clear_color(pixels::wgpu::Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        });
        composite(&self.picture, &camera, background, pixels.frame_mut());
        pixels.render()?;

        Ok(())
    }

    /// Create the window and pixels surface from inside `resumed`
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DisplayError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.base_width(),
                self.config.base_height(),
            ))
            .with_resizable(false)
            .with_decorations(false);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        nudge_position(&window);

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let surface_texture = SurfaceTexture::new(width, height, window.clone());
        let pixels = PixelsBuilder::new(width, height, surface_texture)
            .enable_vsync(self.config.vsync)
            .build()?;

        log::info!(
            "Window created: {}x{} physical, vsync {}",
            width,
            height,
            self.config.vsync
        );

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.buffer_size = (width, height);
        self.lifecycle.start();
        Ok(())
    }

    /// Release the window and enter the terminal closed state
    fn close(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.lifecycle.close();
        self.pixels = None;
        self.window = None;
        log::info!("Window closed");
    }
}

/// Move a freshly created window by one pixel
///
/// macOS can leave a new undecorated window unpainted until it moves.
/// Elsewhere the shift is not noticeable. Platforms that cannot report a
/// position (Wayland) are left alone.
fn nudge_position(window: &Window) {
    if let Ok(position) = window.outer_position() {
        window.set_outer_position(PhysicalPosition::new(position.x, position.y + 1));
    }
}

impl ApplicationHandler for Surface {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            log::error!("{}", err);
            self.init_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Close requested");
                self.close();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                // The buffer follows on the next render
                log::debug!("Resized to {}x{}", size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.keys.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.keys.handle_key_press(physical_key, repeat),
                ElementState::Released => self.keys.handle_key_release(physical_key),
            },
            _ => {}
        }
    }
}

impl InputDevice for Surface {
    fn key_state(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    fn toggle_fullscreen(&mut self) {
        Surface::toggle_fullscreen(self);
    }

    /// Save into the configured directory; failures are logged, not fatal
    fn request_screenshot(&mut self) {
        let path = screenshot_path(
            &self.config.screenshot_directory,
            self.config.include_timestamp,
        );
        if let Err(e) = self.capture_screenshot(&path) {
            log::warn!("Screenshot to {} failed: {}", path.display(), e);
        }
    }
}
