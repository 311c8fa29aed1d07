// Frame Buffer - Source framebuffer type and the display-side pixel buffer
//
// The Game Boy LCD is 160×144 pixels. The emulation core hands us an RGB
// matrix indexed [x][y] with y growing downward; the display keeps its own
// RGBA copy whose rows are stored bottom-up (row 0 is the last LCD line).

/// Game Boy screen width in pixels
pub const SCREEN_WIDTH: usize = 160;

/// Game Boy screen height in pixels
pub const SCREEN_HEIGHT: usize = 144;

/// Total number of pixels on screen
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Framebuffer produced by the emulation core, indexed `[x][y]`
///
/// Each cell is an 8-bit-per-channel RGB triple. The display only borrows
/// it for the duration of a single render call.
pub type Framebuffer = [[[u8; 3]; SCREEN_HEIGHT]; SCREEN_WIDTH];

/// Create a framebuffer filled with a single colour
pub fn filled_framebuffer(rgb: [u8; 3]) -> Box<Framebuffer> {
    Box::new([[rgb; SCREEN_HEIGHT]; SCREEN_WIDTH])
}

/// Fill a framebuffer with a test pattern for debugging
///
/// Draws vertical bands of the four palette shades with a one-pixel border,
/// which makes both the flip and the letterbox easy to check by eye.
pub fn test_pattern(frame: &mut Framebuffer, shades: &[[u8; 3]; 4]) {
    for (x, column) in frame.iter_mut().enumerate() {
        for (y, cell) in column.iter_mut().enumerate() {
            let border = x == 0 || y == 0 || x == SCREEN_WIDTH - 1 || y == SCREEN_HEIGHT - 1;
            *cell = if border {
                shades[3]
            } else {
                shades[(x * 4 / SCREEN_WIDTH) % 4]
            };
        }
    }

    // Top-left marker so an upside-down image is obvious
    for column in frame.iter_mut().take(8) {
        for cell in column.iter_mut().take(8) {
            *cell = shades[3];
        }
    }
}

/// Display pixel buffer
///
/// Holds 160×144 RGBA cells in row-major order with a vertically flipped
/// origin: buffer row `r` holds framebuffer row `SCREEN_HEIGHT - 1 - r`.
/// Alpha is always opaque.
pub struct PixelBuffer {
    pixels: Vec<[u8; 4]>,
}

impl PixelBuffer {
    /// Create a new pixel buffer initialized to opaque black
    pub fn new() -> Self {
        Self {
            pixels: vec![[0, 0, 0, 0xFF]; SCREEN_SIZE],
        }
    }

    /// Copy a framebuffer into this buffer, flipping it vertically
    ///
    /// Writes `frame[x][y]` to row `SCREEN_HEIGHT - 1 - y`, column `x`.
    pub fn blit(&mut self, frame: &Framebuffer) {
        for y in 0..SCREEN_HEIGHT {
            let row = (SCREEN_HEIGHT - 1 - y) * SCREEN_WIDTH;
            for (x, column) in frame.iter().enumerate() {
                let [r, g, b] = column[y];
                self.pixels[row + x] = [r, g, b, 0xFF];
            }
        }
    }

    /// Get the cell stored at buffer column `x`, buffer row `row`
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: usize, row: usize) -> [u8; 4] {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(row < SCREEN_HEIGHT, "Row {} out of bounds", row);

        self.pixels[row * SCREEN_WIDTH + x]
    }

    /// Get the raw cells in buffer order
    pub fn as_slice(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Width of the buffer in pixels
    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    /// Height of the buffer in pixels
    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Convert the buffer back to top-down RGBA bytes, as displayed
    ///
    /// The first output row is the top line of the screen.
    pub fn to_rgba_top_down(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(SCREEN_SIZE * 4);
        for row in self.pixels.chunks_exact(SCREEN_WIDTH).rev() {
            for cell in row {
                output.extend_from_slice(cell);
            }
        }
        output
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}
