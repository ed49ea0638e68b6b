use std::borrow::Cow;
use std::fmt;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// A stroke color written as an RGB hex string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
///
/// The string is stored as given. Nothing is validated until a surface
/// actually needs the channels, see [`HexColor::to_rgba`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(Cow<'static, str>);

impl HexColor {
    pub const BLACK: HexColor = HexColor(Cow::Borrowed("#000000"));
    pub const WHITE: HexColor = HexColor(Cow::Borrowed("#FFFFFF"));

    pub fn new(hex: impl Into<String>) -> Self {
        Self(Cow::Owned(hex.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the hex string into straight (non-premultiplied) RGBA channels.
    pub fn to_rgba(&self) -> Option<[u8; 4]> {
        let digits = self.0.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 | 4 => {
                // Short form: every digit is doubled, "#f80" == "#ff8800".
                let mut rgba = [255u8; 4];
                for (slot, i) in rgba.iter_mut().zip(0..digits.len()) {
                    let nibble = channel(&digits[i..=i])?;
                    *slot = nibble * 17;
                }
                Some(rgba)
            }
            6 | 8 => {
                let mut rgba = [255u8; 4];
                for (slot, i) in rgba.iter_mut().zip((0..digits.len()).step_by(2)) {
                    *slot = channel(&digits[i..i + 2])?;
                }
                Some(rgba)
            }
            _ => None,
        }
    }

    pub fn to_color32(&self) -> Option<Color32> {
        self.to_rgba()
            .map(|[r, g, b, a]| Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HexColor {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}

impl From<String> for HexColor {
    fn from(hex: String) -> Self {
        Self::new(hex)
    }
}

impl From<Color32> for HexColor {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            Self::new(format!("#{r:02X}{g:02X}{b:02X}"))
        } else {
            Self::new(format!("#{r:02X}{g:02X}{b:02X}{a:02X}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(HexColor::from("#FF0000").to_rgba(), Some([255, 0, 0, 255]));
        assert_eq!(HexColor::from("#00ff7f").to_rgba(), Some([0, 255, 127, 255]));
        assert_eq!(HexColor::from("#11223344").to_rgba(), Some([0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(HexColor::from("#f80").to_rgba(), Some([255, 136, 0, 255]));
        assert_eq!(HexColor::from("#0008").to_rgba(), Some([0, 0, 0, 136]));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "FF0000", "#", "#12345", "#GG0000", "#ÿÿÿ", "red"] {
            assert_eq!(HexColor::from(bad).to_rgba(), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_stores_string_verbatim() {
        let color = HexColor::from("not a color");
        assert_eq!(color.as_str(), "not a color");
    }

    #[test]
    fn test_from_color32() {
        assert_eq!(HexColor::from(Color32::from_rgb(255, 0, 16)).as_str(), "#FF0010");
        assert_eq!(HexColor::from(Color32::WHITE), HexColor::WHITE);
    }
}
