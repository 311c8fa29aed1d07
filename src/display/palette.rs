// DMG Colour Palette - four shades used for the LCD and the window background
//
// The DMG Game Boy has four shades of grey-green, indexed 0 (lightest)
// to 3 (darkest). The emulation core owns which palette is active; the
// display only asks it for colours through `PaletteSource`.

/// Palette index used for the window background around the letterboxed image
pub const BACKGROUND_PALETTE_INDEX: u8 = 3;

/// Colour lookup supplied by the emulation core
///
/// Takes a small palette index and returns an RGB triple.
pub trait PaletteSource {
    /// Look up the RGB colour for a palette index
    fn colour(&self, index: u8) -> [u8; 3];
}

impl<F> PaletteSource for F
where
    F: Fn(u8) -> [u8; 3],
{
    fn colour(&self, index: u8) -> [u8; 3] {
        self(index)
    }
}

/// Classic DMG green shades, lightest first
pub const DMG_GREEN: [u32; 4] = [0xE0F8D0, 0x88C070, 0x346856, 0x081820];

/// Neutral grey shades, lightest first
pub const GREYSCALE: [u32; 4] = [0xFFFFFF, 0xAAAAAA, 0x555555, 0x000000];

/// Game Boy Pocket style shades, lightest first
pub const POCKET: [u32; 4] = [0xC4CFA1, 0x8B956D, 0x4D533C, 0x1F1F1F];

/// All built-in palettes in cycling order
pub const PALETTES: [[u32; 4]; 3] = [DMG_GREEN, GREYSCALE, POCKET];

/// Convert a 0xRRGGBB colour to an RGB triple
#[inline]
pub fn rgb_components(rgb: u32) -> [u8; 3] {
    [
        ((rgb >> 16) & 0xFF) as u8, // Red
        ((rgb >> 8) & 0xFF) as u8,  // Green
        (rgb & 0xFF) as u8,         // Blue
    ]
}

/// Four-shade palette with a selectable built-in preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    index: usize,
}

impl Palette {
    /// Create the default (DMG green) palette
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Switch to the next built-in palette, wrapping around
    pub fn cycle(&mut self) {
        self.index = (self.index + 1) % PALETTES.len();
    }

    /// All four shades of the active palette as RGB triples
    pub fn shades(&self) -> [[u8; 3]; 4] {
        PALETTES[self.index].map(rgb_components)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteSource for Palette {
    /// Indices wrap modulo 4
    fn colour(&self, index: u8) -> [u8; 3] {
        rgb_components(PALETTES[self.index][(index & 0x03) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_components() {
        assert_eq!(rgb_components(0x346856), [0x34, 0x68, 0x56]);
        assert_eq!(rgb_components(0x000000), [0, 0, 0]);
    }

    #[test]
    fn test_default_background_is_darkest_shade() {
        let palette = Palette::new();
        assert_eq!(palette.colour(BACKGROUND_PALETTE_INDEX), [0x08, 0x18, 0x20]);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut palette = Palette::new();
        palette.cycle();
        assert_eq!(palette.colour(0), [0xFF, 0xFF, 0xFF]);
        palette.cycle();
        palette.cycle();
        assert_eq!(palette, Palette::new());
    }

    #[test]
    fn test_index_wraps() {
        let palette = Palette::new();
        assert_eq!(palette.colour(7), palette.colour(3));
    }

    #[test]
    fn test_closure_palette_source() {
        let source = |index: u8| [index, index, index];
        assert_eq!(source.colour(3), [3, 3, 3]);
    }
}
