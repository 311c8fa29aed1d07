// Integration tests for the frontend pipeline
// These tests drive the public API the way an emulator loop does, minus the window

mod common;

use common::{coordinate_framebuffer, HeadlessDevice};
use gb_frontend::display::{
    composite, save_screenshot, Camera, Palette, PaletteSource, PixelBuffer,
    BACKGROUND_PALETTE_INDEX, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use gb_frontend::input::{Button, InputTranslator};
use gb_frontend::FrontendConfig;
use std::fs;
use winit::keyboard::KeyCode;

#[test]
fn test_flip_invariant_over_whole_frame() {
    let frame = coordinate_framebuffer();
    let mut buffer = PixelBuffer::new();
    buffer.blit(&frame);

    let cells = buffer.as_slice();
    for x in 0..SCREEN_WIDTH {
        for y in 0..SCREEN_HEIGHT {
            let [r, g, b] = frame[x][y];
            assert_eq!(cells[(SCREEN_HEIGHT - 1 - y) * SCREEN_WIDTH + x], [r, g, b, 255]);
        }
    }
}

#[test]
fn test_render_pipeline_is_upright_and_letterboxed() {
    // Wide window: 400x144 → scale 1, 120px margins each side
    let frame = coordinate_framebuffer();
    let mut buffer = PixelBuffer::new();
    buffer.blit(&frame);

    let palette = Palette::new();
    let background = palette.colour(BACKGROUND_PALETTE_INDEX);
    let camera = Camera::fit(400, 144);
    assert_eq!(camera.scale(), 1.0);

    let mut output = vec![0u8; 400 * 144 * 4];
    composite(&buffer, &camera, background, &mut output);

    let pixel = |x: usize, y: usize| {
        let offset = (y * 400 + x) * 4;
        [output[offset], output[offset + 1], output[offset + 2], output[offset + 3]]
    };

    let [r, g, b] = background;
    assert_eq!(pixel(0, 0), [r, g, b, 255]);
    assert_eq!(pixel(399, 143), [r, g, b, 255]);
    // Screen pixel (120 + x, y) shows framebuffer (x, y)
    assert_eq!(pixel(120, 0), [0, 0, 0x80, 255]);
    assert_eq!(pixel(120 + 37, 99), [37, 99, 0x80, 255]);
    assert_eq!(pixel(279, 143), [159, 143, 0x80, 255]);
}

#[test]
fn test_camera_recomputed_per_size() {
    assert_eq!(Camera::fit(320, 288).scale(), 2.0);
    assert_eq!(Camera::fit(320, 144).scale(), 1.0);
    assert_eq!(Camera::fit(800, 720).scale(), 5.0);
}

#[test]
fn test_frame_loop_press_hold_release() {
    let translator = InputTranslator::default();
    let mut device = HeadlessDevice::new();

    device.press(KeyCode::KeyZ);
    let mut pressed = 0;
    let mut released = 0;

    for frame in 0..30 {
        if frame > 0 && frame < 20 {
            device.repeat(KeyCode::KeyZ);
        }
        if frame == 20 {
            device.release(KeyCode::KeyZ);
        }

        let batch = translator.poll_button_events(&mut device);
        pressed += batch.pressed.iter().filter(|&&b| b == Button::A).count();
        released += batch.released.iter().filter(|&&b| b == Button::A).count();
    }

    assert_eq!(pressed, 1);
    assert_eq!(released, 1);
}

#[test]
fn test_batches_track_key_level() {
    let translator = InputTranslator::default();
    let mut device = HeadlessDevice::new();
    let mut a_down = false;

    let mut apply = |batch: &gb_frontend::ButtonInputBatch| {
        if batch.pressed.contains(&Button::A) {
            a_down = true;
        }
        if batch.released.contains(&Button::A) {
            a_down = false;
        }
        a_down
    };

    device.press(KeyCode::KeyZ);
    assert!(apply(&translator.poll_button_events(&mut device)));

    // Bounce between polls while the key ends up held
    device.release(KeyCode::KeyZ);
    device.press(KeyCode::KeyZ);
    assert!(apply(&translator.poll_button_events(&mut device)));
    assert!(device.keys.is_held(KeyCode::KeyZ));

    device.release(KeyCode::KeyZ);
    assert!(!apply(&translator.poll_button_events(&mut device)));
}

#[test]
fn test_hotkeys_never_reach_core() {
    let translator = InputTranslator::default();
    let mut device = HeadlessDevice::new();

    device.press(KeyCode::KeyF);
    device.press(KeyCode::KeyT);
    let batch = translator.poll_button_events(&mut device);
    device.release(KeyCode::KeyF);
    device.release(KeyCode::KeyT);
    let after = translator.poll_button_events(&mut device);

    assert!(batch.is_empty());
    assert!(after.is_empty());
    assert_eq!(device.fullscreen_toggles, 1);
    assert_eq!(device.screenshot_requests, 1);
}

#[test]
fn test_every_default_binding_reaches_core() {
    let translator = FrontendConfig::default().translator().unwrap();
    let mut device = HeadlessDevice::new();

    let keys: Vec<KeyCode> = translator.keymap().iter().map(|&(k, _)| k).collect();
    for &key in &keys {
        device.press(key);
    }
    let batch = translator.poll_button_events(&mut device);
    let expected: Vec<Button> = translator.keymap().iter().map(|&(_, b)| b).collect();
    assert_eq!(batch.pressed, expected);
    assert_eq!(batch.pressed.len(), Button::ALL.len());
}

#[test]
fn test_screenshot_round_trip_dimensions() {
    let frame = coordinate_framebuffer();
    let mut buffer = PixelBuffer::new();
    buffer.blit(&frame);

    let dir = std::env::temp_dir().join(format!("gb_frontend_it_{}", std::process::id()));
    let path = dir.join("frame.png");
    save_screenshot(&buffer, &path).unwrap();

    let file = fs::File::open(&path).unwrap();
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let reader = decoder.read_info().unwrap();
    assert_eq!(reader.info().width, SCREEN_WIDTH as u32);
    assert_eq!(reader.info().height, SCREEN_HEIGHT as u32);

    let _ = fs::remove_dir_all(&dir);
}
