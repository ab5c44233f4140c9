use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Mapping from facelet codes to sticker colors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// Color for faces that are not visible and for unknown facelet codes.
    pub hidden: Rgb,
    /// Color for each known facelet code.
    pub stickers: Vec<StickerColor>,
}
impl Default for ColorScheme {
    fn default() -> Self {
        let sticker = |code, packed| StickerColor {
            code,
            color: Rgb::from_u32(packed),
        };
        Self {
            hidden: Rgb::from_u32(0x111111),
            stickers: vec![
                sticker('W', 0xffffff),
                sticker('R', 0xff0000),
                sticker('G', 0x00ff00),
                sticker('Y', 0xffff00),
                sticker('O', 0xffa500),
                sticker('B', 0x0000ff),
                sticker('_', 0xcccccc),
            ],
        }
    }
}
impl ColorScheme {
    /// Returns the color for a facelet code, or `None` if the code is unknown.
    pub fn get(&self, code: char) -> Option<Rgb> {
        self.stickers
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.color)
    }
    /// Returns the color for a facelet code, or the hidden color if the code
    /// is unknown.
    pub fn color_for(&self, code: char) -> Rgb {
        self.get(code).unwrap_or(self.hidden)
    }
}

/// Color assigned to one facelet code.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct StickerColor {
    /// Facelet code, such as `W`.
    pub code: char,
    /// Color to display.
    pub color: Rgb,
}
