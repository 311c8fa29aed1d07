// Game Boy Frontend - Main Entry Point
//
// Drives the display and input translator with a stand-in core that draws a
// test pattern. A real emulator replaces `DemoCore` with its own frame loop.

use gb_frontend::display::{filled_framebuffer, test_pattern, Framebuffer, Palette, Surface};
use gb_frontend::{Button, ButtonInputBatch, FrontendConfig};

/// Config file read at startup (created with defaults if missing)
const CONFIG_PATH: &str = gb_frontend::config::CONFIG_FILE;

/// Minimal core: a test pattern, a palette, and a movable cursor
struct DemoCore {
    frame: Box<Framebuffer>,
    palette: Palette,
    cursor: (usize, usize),
    paused: bool,
}

impl DemoCore {
    fn new() -> Self {
        Self {
            frame: filled_framebuffer([0, 0, 0]),
            palette: Palette::new(),
            cursor: (80, 72),
            paused: false,
        }
    }

    fn handle_input(&mut self, batch: &ButtonInputBatch) {
        for &button in &batch.pressed {
            if button.is_joypad() {
                log::debug!("Joypad {:?} pressed", button);
            } else {
                log::info!("Frontend control {:?}", button);
            }
            match button {
                Button::ChangePalette => self.palette.cycle(),
                Button::Pause => self.paused = !self.paused,
                Button::Up => self.cursor.1 = self.cursor.1.saturating_sub(4),
                Button::Down => self.cursor.1 = (self.cursor.1 + 4).min(143),
                Button::Left => self.cursor.0 = self.cursor.0.saturating_sub(4),
                Button::Right => self.cursor.0 = (self.cursor.0 + 4).min(159),
                _ => {}
            }
        }
        for &button in &batch.released {
            if button.is_joypad() {
                log::debug!("Joypad {:?} released", button);
            }
        }
    }

    fn run_frame(&mut self) {
        if self.paused {
            return;
        }
        let shades = self.palette.shades();
        test_pattern(&mut self.frame, &shades);

        let (cx, cy) = self.cursor;
        for x in cx.saturating_sub(2)..=(cx + 2).min(159) {
            for y in cy.saturating_sub(2)..=(cy + 2).min(143) {
                self.frame[x][y] = shades[3];
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("gb-frontend v{}", env!("CARGO_PKG_VERSION"));

    let config = FrontendConfig::load_or_default(CONFIG_PATH);
    let translator = config.translator()?;

    let mut surface = Surface::initialize(config.window_config())?;
    surface.set_title(&config.video.title);

    let mut core = DemoCore::new();

    // Render before polling: render pumps the events the translator reads
    while surface.is_running() {
        core.run_frame();
        surface.render(&core.frame, &core.palette)?;

        let batch = translator.poll_button_events(&mut surface);
        core.handle_input(&batch);
    }

    log::info!("Display window closed.");
    Ok(())
}
