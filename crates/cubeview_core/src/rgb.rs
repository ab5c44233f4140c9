use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sticker color in 8-bit sRGB. Stored in preferences as `"#rrggbb"`, and
/// also accepts the `"#rgb"` shorthand when parsing.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red, green, and blue channels.
    pub rgb: [u8; 3],
}
impl Rgb {
    /// Pure black
    pub const BLACK: Rgb = Rgb { rgb: [0; 3] };
    /// Pure white
    pub const WHITE: Rgb = Rgb { rgb: [255; 3] };

    /// Constructs a color from a packed `0xRRGGBB` integer.
    pub const fn from_u32(packed: u32) -> Self {
        let [_, r, g, b] = packed.to_be_bytes();
        Rgb { rgb: [r, g, b] }
    }
    /// Returns the color as a packed `0xRRGGBB` integer.
    pub const fn to_u32(self) -> u32 {
        let [r, g, b] = self.rgb;
        u32::from_be_bytes([0, r, g, b])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.rgb))
    }
}

impl FromStr for Rgb {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let mut rgb = [0_u8; 3];
        if digits.len() == 3 {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            hex::decode_to_slice(doubled, &mut rgb)?;
        } else {
            hex::decode_to_slice(digits, &mut rgb)?;
        }
        Ok(Rgb { rgb })
    }
}

impl TryFrom<String> for Rgb {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
