// Screenshot functionality
//
// Encodes the displayed 160×144 image as a PNG file. The colour model is
// chosen from the pixels: greyscale palettes are written as 8-bit grey,
// opaque images as RGB. Failures are reported to the caller instead of
// aborting.

use super::framebuffer::PixelBuffer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Human-readable name of a PNG colour model, for diagnostics
pub fn color_model_name(color: png::ColorType) -> &'static str {
    match color {
        png::ColorType::Rgba => "RGBA",
        png::ColorType::Rgb => "RGB",
        png::ColorType::Grayscale => "Gray",
        png::ColorType::GrayscaleAlpha => "GrayAlpha",
        png::ColorType::Indexed => "Indexed",
    }
}

/// Pick the smallest PNG colour model that stores top-down RGBA data losslessly
pub fn classify_color_model(rgba: &[u8]) -> png::ColorType {
    let mut pixels = rgba.chunks_exact(4);
    if !pixels.all(|p| p[3] == 0xFF) {
        return png::ColorType::Rgba;
    }

    if rgba.chunks_exact(4).all(|p| p[0] == p[1] && p[1] == p[2]) {
        png::ColorType::Grayscale
    } else {
        png::ColorType::Rgb
    }
}

/// Repack RGBA bytes into the sample layout of `color`
fn pack_samples(rgba: &[u8], color: png::ColorType) -> Vec<u8> {
    match color {
        png::ColorType::Grayscale => rgba.chunks_exact(4).map(|p| p[0]).collect(),
        png::ColorType::Rgb => rgba
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        _ => rgba.to_vec(),
    }
}

/// Save the displayed image as a PNG file at `path`
///
/// The image is written top row first, so it appears upright in any viewer.
///
/// # Arguments
///
/// * `picture` - The display pixel buffer (bottom-up rows)
/// * `path` - Destination file
///
/// # Returns
///
/// The path that was written, or an error
pub fn save_screenshot(picture: &PixelBuffer, path: &Path) -> Result<PathBuf, ScreenshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let rgba = picture.to_rgba_top_down();
    let color = classify_color_model(&rgba);
    log::debug!("Encoding screenshot as {}", color_model_name(color));

    let data = pack_samples(&rgba, color);
    save_png(
        path,
        &data,
        picture.width() as u32,
        picture.height() as u32,
        color,
    )?;

    log::info!("Screenshot saved to {}", path.display());
    Ok(path.to_path_buf())
}

/// Build the destination path for a hotkey-triggered screenshot
///
/// With `include_timestamp` the name is `screenshot_YYYYmmdd_HHMMSS.png`,
/// otherwise a fixed `screenshot.png` that is overwritten each time.
pub fn screenshot_path(directory: &Path, include_timestamp: bool) -> PathBuf {
    if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        directory.join(format!("screenshot_{}.png", timestamp))
    } else {
        directory.join("screenshot.png")
    }
}

/// Save pixel data as a PNG file
fn save_png(
    path: &Path,
    data: &[u8],
    width: u32,
    height: u32,
    color: png::ColorType,
) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;
    writer.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::{filled_framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gb_frontend_screenshot_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_color_model_name() {
        assert_eq!(color_model_name(png::ColorType::Rgba), "RGBA");
        assert_eq!(color_model_name(png::ColorType::Grayscale), "Gray");
    }

    #[test]
    fn test_screenshot_path_fixed_name() {
        let path = screenshot_path(Path::new("shots"), false);
        assert_eq!(path, PathBuf::from("shots").join("screenshot.png"));
    }

    #[test]
    fn test_screenshot_path_timestamped() {
        let path = screenshot_path(Path::new("shots"), true);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("screenshot_"));
        assert!(name.ends_with(".png"));
        // screenshot_ + 8 date digits + _ + 6 time digits + .png
        assert_eq!(name.len(), "screenshot_".len() + 15 + ".png".len());
    }

    #[test]
    fn test_classify_color_model() {
        assert_eq!(
            classify_color_model(&[10, 20, 30, 0xFF, 0, 0, 0, 0xFF]),
            png::ColorType::Rgb
        );
        assert_eq!(
            classify_color_model(&[0x55, 0x55, 0x55, 0xFF, 0, 0, 0, 0xFF]),
            png::ColorType::Grayscale
        );
        assert_eq!(
            classify_color_model(&[0x55, 0x55, 0x55, 0x80]),
            png::ColorType::Rgba
        );
    }

    #[test]
    fn test_pack_samples() {
        let rgba = [1, 2, 3, 0xFF, 4, 5, 6, 0xFF];
        assert_eq!(pack_samples(&rgba, png::ColorType::Rgb), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pack_samples(&rgba, png::ColorType::Grayscale), vec![1, 4]);
        assert_eq!(pack_samples(&rgba, png::ColorType::Rgba), rgba.to_vec());
    }

    /// Decode a PNG written by `save_screenshot`
    fn decode(path: &Path) -> (png::ColorType, u32, u32, Vec<u8>) {
        let file = fs::File::open(path).unwrap();
        let decoder = png::Decoder::new(io::BufReader::new(file));
        let mut reader = decoder.read_info().unwrap();
        let mut data = vec![0u8; reader.output_buffer_size().unwrap()];
        let info = reader.next_frame(&mut data).unwrap();
        data.truncate(info.buffer_size());
        (info.color_type, info.width, info.height, data)
    }

    #[test]
    fn test_save_screenshot_round_trip() {
        let mut frame = filled_framebuffer([10, 20, 30]);
        frame[0][0] = [255, 0, 0];
        let mut picture = PixelBuffer::new();
        picture.blit(&frame);

        let path = temp_path("round_trip.png");
        let written = save_screenshot(&picture, &path).unwrap();
        assert_eq!(written, path);

        let (color, width, height, data) = decode(&path);
        assert_eq!(color, png::ColorType::Rgb);
        assert_eq!(width, SCREEN_WIDTH as u32);
        assert_eq!(height, SCREEN_HEIGHT as u32);
        assert_eq!(data.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        // Upright: framebuffer (0, 0) is the first pixel of the file
        assert_eq!(&data[0..3], &[255, 0, 0]);
        assert_eq!(&data[3..6], &[10, 20, 30]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_greyscale_screenshot() {
        let mut frame = filled_framebuffer([0x55, 0x55, 0x55]);
        frame[0][0] = [0xFF, 0xFF, 0xFF];
        let mut picture = PixelBuffer::new();
        picture.blit(&frame);

        let path = temp_path("greyscale.png");
        save_screenshot(&picture, &path).unwrap();

        let (color, width, height, data) = decode(&path);
        assert_eq!(color, png::ColorType::Grayscale);
        assert_eq!((width, height), (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
        assert_eq!(data.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
        assert_eq!(data[0], 0xFF);
        assert!(data[1..].iter().all(|&v| v == 0x55));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_screenshot_unwritable_path_is_recoverable() {
        let blocker = temp_path("not_a_directory");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, b"file").unwrap();

        let picture = PixelBuffer::new();
        let result = save_screenshot(&picture, &blocker.join("shot.png"));
        assert!(matches!(result, Err(ScreenshotError::Io(_))));

        let _ = fs::remove_file(&blocker);
    }
}
