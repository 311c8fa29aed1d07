// Camera - letterbox transform from the pixel buffer to the window
//
// The pixel buffer is drawn as one sprite centred on the world origin,
// covering [-W/2, W/2] × [-H/2, H/2] with y pointing up (buffer row 0 is
// the bottom edge). The camera scales it uniformly by the largest factor
// that fits the window and moves the origin to the window centre.

use super::framebuffer::{PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Screen-space rectangle in window pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Letterbox camera for one frame
///
/// Recomputed from the window size every frame; never cached across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    scale: f64,
    window_width: u32,
    window_height: u32,
}

impl Camera {
    /// Fit the fixed source resolution into a window of the given size
    ///
    /// `scale = min(window_width / 160, window_height / 144)`
    pub fn fit(window_width: u32, window_height: u32) -> Self {
        let x_scale = window_width as f64 / SCREEN_WIDTH as f64;
        let y_scale = window_height as f64 / SCREEN_HEIGHT as f64;

        Self {
            scale: x_scale.min(y_scale),
            window_width,
            window_height,
        }
    }

    /// Uniform scale factor applied to the sprite
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Translation applied after scaling (half the window size)
    pub fn translation(&self) -> (f64, f64) {
        (
            self.window_width as f64 / 2.0,
            self.window_height as f64 / 2.0,
        )
    }

    /// Window size this camera was fitted to
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Area of the window covered by the image
    pub fn viewport(&self) -> Viewport {
        let width = SCREEN_WIDTH as f64 * self.scale;
        let height = SCREEN_HEIGHT as f64 * self.scale;
        let (cx, cy) = self.translation();

        Viewport {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Map a window pixel to the pixel buffer cell drawn there
    ///
    /// Samples at the pixel centre. Returns `(column, row)` in buffer
    /// coordinates, or `None` for the letterbox margins.
    pub fn sample(&self, screen_x: u32, screen_y: u32) -> Option<(usize, usize)> {
        if self.scale <= 0.0 {
            return None;
        }

        let (cx, cy) = self.translation();
        // Window space with y up, then undo the camera
        let up_y = self.window_height as f64 - (screen_y as f64 + 0.5);
        let world_x = (screen_x as f64 + 0.5 - cx) / self.scale;
        let world_y = (up_y - cy) / self.scale;

        let column = (world_x + SCREEN_WIDTH as f64 / 2.0).floor();
        let row = (world_y + SCREEN_HEIGHT as f64 / 2.0).floor();

        if column < 0.0 || row < 0.0 {
            return None;
        }

        let (column, row) = (column as usize, row as usize);
        if column < SCREEN_WIDTH && row < SCREEN_HEIGHT {
            Some((column, row))
        } else {
            None
        }
    }
}

/// Draw the pixel buffer into a window-sized RGBA frame
///
/// Every pixel outside the viewport is set to `background`; pixels inside
/// take the nearest buffer cell under `camera`.
///
/// # Panics
/// Panics if `output` is smaller than the camera's window size × 4 bytes
pub fn composite(picture: &PixelBuffer, camera: &Camera, background: [u8; 3], output: &mut [u8]) {
    let (width, height) = camera.window_size();
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 {
        return;
    }
    assert!(
        output.len() >= width * height * 4,
        "Output buffer too small for composite"
    );

    let [r, g, b] = background;
    let clear = [r, g, b, 0xFF];
    let cells = picture.as_slice();

    for (screen_y, line) in output.chunks_exact_mut(width * 4).take(height).enumerate() {
        for (screen_x, pixel) in line.chunks_exact_mut(4).enumerate() {
            let rgba = match camera.sample(screen_x as u32, screen_y as u32) {
                Some((column, row)) => cells[row * SCREEN_WIDTH + column],
                None => clear,
            };
            pixel.copy_from_slice(&rgba);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::filled_framebuffer;

    #[test]
    fn test_scale_exact_double() {
        assert_eq!(Camera::fit(320, 288).scale(), 2.0);
    }

    #[test]
    fn test_scale_takes_smaller_axis() {
        assert_eq!(Camera::fit(320, 144).scale(), 1.0);
        assert_eq!(Camera::fit(160, 288).scale(), 1.0);
    }

    #[test]
    fn test_scale_fractional() {
        let camera = Camera::fit(240, 216);
        assert_eq!(camera.scale(), 1.5);
    }

    #[test]
    fn test_translation_is_half_window() {
        assert_eq!(Camera::fit(480, 300).translation(), (240.0, 150.0));
    }

    #[test]
    fn test_viewport_is_centred() {
        // 480 / 160 = 3, 288 / 144 = 2 → height-limited
        let camera = Camera::fit(480, 288);
        let viewport = camera.viewport();
        assert_eq!(viewport.width, 320.0);
        assert_eq!(viewport.height, 288.0);
        assert_eq!(viewport.x, 80.0);
        assert_eq!(viewport.y, 0.0);
    }

    #[test]
    fn test_sample_base_size_is_identity_with_flip() {
        let camera = Camera::fit(160, 144);
        // Top-left of the window shows the last buffer row
        assert_eq!(camera.sample(0, 0), Some((0, SCREEN_HEIGHT - 1)));
        assert_eq!(camera.sample(159, 143), Some((159, 0)));
    }

    #[test]
    fn test_sample_letterbox_margin() {
        let camera = Camera::fit(320, 144);
        assert_eq!(camera.sample(0, 0), None);
        assert_eq!(camera.sample(79, 10), None);
        assert_eq!(camera.sample(80, 0), Some((0, SCREEN_HEIGHT - 1)));
        assert_eq!(camera.sample(240, 0), None);
    }

    #[test]
    fn test_sample_zero_window() {
        assert_eq!(Camera::fit(0, 0).sample(0, 0), None);
    }

    #[test]
    fn test_composite_draws_background_and_image() {
        let mut frame = filled_framebuffer([1, 2, 3]);
        frame[0][0] = [9, 9, 9];
        let mut picture = PixelBuffer::new();
        picture.blit(&frame);

        let camera = Camera::fit(320, 144);
        let mut output = vec![0u8; 320 * 144 * 4];
        composite(&picture, &camera, [50, 60, 70], &mut output);

        // Left margin
        assert_eq!(&output[0..4], &[50, 60, 70, 0xFF]);
        // Framebuffer (0, 0) lands top-left of the viewport, upright
        let offset = 80 * 4;
        assert_eq!(&output[offset..offset + 4], &[9, 9, 9, 0xFF]);
        assert_eq!(&output[offset + 4..offset + 8], &[1, 2, 3, 0xFF]);
    }

    #[test]
    fn test_composite_upscale_repeats_cells() {
        let mut frame = filled_framebuffer([0, 0, 0]);
        frame[0][0] = [255, 0, 0];
        let mut picture = PixelBuffer::new();
        picture.blit(&frame);

        let camera = Camera::fit(320, 288);
        let mut output = vec![0u8; 320 * 288 * 4];
        composite(&picture, &camera, [0, 0, 0], &mut output);

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let offset = (y * 320 + x) * 4;
            assert_eq!(&output[offset..offset + 4], &[255, 0, 0, 0xFF]);
        }
        let offset = (2 * 320 + 2) * 4;
        assert_eq!(&output[offset..offset + 4], &[0, 0, 0, 0xFF]);
    }

    #[test]
    #[should_panic]
    fn test_composite_output_too_small() {
        let picture = PixelBuffer::new();
        let camera = Camera::fit(320, 288);
        let mut output = vec![0u8; 16];
        composite(&picture, &camera, [0, 0, 0], &mut output);
    }
}
