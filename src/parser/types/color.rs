use core::fmt;

/// A packed `COLOR` value.
///
/// Bit layout: bit 31 transparent, bits 28-30 colour system, bits 16-23 red,
/// bits 8-15 green, bits 0-7 blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub transparent: bool,
    pub system: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        return Color {
            transparent: false,
            system: 1,
            r,
            g,
            b,
        };
    }

    pub fn from_packed(v: u32) -> Color {
        return Color {
            transparent: v & 0x8000_0000 != 0,
            system: ((v >> 28) & 0x7) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        };
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.transparent {
            return f.write_str("transparent");
        }
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod test {
    use super::Color;

    extern crate std;
    use std::string::ToString;

    #[test]
    fn packed_layout() {
        let c = Color::from_packed(0x10FF_8000);
        assert_eq!(c, Color::rgb(0xFF, 0x80, 0x00));
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn transparent_bit() {
        let c = Color::from_packed(0x8000_0000);
        assert!(c.transparent);
        assert_eq!(c.to_string(), "transparent");
    }
}
