use crate::error::HandwritingError;

/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// RGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// Gray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style hex colour: `#rrggbb` or the short `#rgb` form. The
    /// leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Colour, HandwritingError> {
        let invalid = || HandwritingError::InvalidColour(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Colour::new_rgb_bytes(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Colour::new_rgb_bytes(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }

    /// The colour as 8-bit RGBA, fully opaque
    pub fn to_rgba8(&self) -> [u8; 4] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match *self {
            Colour::RGB { r, g, b } => [byte(r), byte(g), byte(b), 255],
            Colour::Grey { g } => {
                let g = byte(g);
                [g, g, g, 255]
            }
        }
    }
}

/// Pre-defined ink, paper and guide-line colours
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };

    pub const INK_BLACK: Colour = Colour::new_rgb_bytes(0x00, 0x00, 0x00);
    pub const INK_BLUE: Colour = Colour::new_rgb_bytes(0x00, 0x46, 0xb5);
    pub const INK_RED: Colour = Colour::new_rgb_bytes(0xcb, 0x00, 0x00);
    pub const INK_GREEN: Colour = Colour::new_rgb_bytes(0x00, 0x7d, 0x1b);
    pub const INK_PURPLE: Colour = Colour::new_rgb_bytes(0x6b, 0x08, 0xa5);

    pub const PAPER_WHITE: Colour = Colour::new_rgb_bytes(0xff, 0xff, 0xff);
    pub const PAPER_CREAM: Colour = Colour::new_rgb_bytes(0xf8, 0xf5, 0xe6);
    pub const PAPER_BLUE: Colour = Colour::new_rgb_bytes(0xf5, 0xf9, 0xff);
    pub const PAPER_YELLOW: Colour = Colour::new_rgb_bytes(0xff, 0xfa, 0xec);
    pub const PAPER_GREEN: Colour = Colour::new_rgb_bytes(0xf0, 0xff, 0xf0);

    /// Horizontal rules on ruled paper
    pub const RULE: Colour = Colour::new_rgb_bytes(0xa0, 0xbc, 0xe0);
    /// Grid lines on graph paper
    pub const GRAPH: Colour = Colour::new_rgb_bytes(0xc8, 0xd8, 0xe8);
    /// The left margin guide
    pub const MARGIN: Colour = Colour::new_rgb_bytes(0xd0, 0xd0, 0xd0);
    /// The right and top margin guides
    pub const MARGIN_FAINT: Colour = Colour::new_rgb_bytes(0xf0, 0xf0, 0xf0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Colour::from_hex("#0046b5").unwrap(), colours::INK_BLUE);
        assert_eq!(Colour::from_hex("cb0000").unwrap(), colours::INK_RED);
        assert_eq!(
            Colour::from_hex("#fff").unwrap().to_rgba8(),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12345", "#gggggg", "blue", "#1234567"] {
            assert!(
                matches!(Colour::from_hex(bad), Err(HandwritingError::InvalidColour(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn grey_expands_to_equal_channels() {
        assert_eq!(colours::BLACK.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(Colour::new_grey(1.0).to_rgba8(), [255, 255, 255, 255]);
    }
}
