// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a "#rrggbb" / "#rrggbbaa" hex string

use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' is not hexadecimal")]
    NotHex(String),
    #[error("color '{0}' must be #rrggbb or #rrggbbaa")]
    BadLength(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    // Canvas style string, e.g. "rgba(52, 211, 153, 0.149)"
    pub fn to_css(&self) -> String {
        let alpha = (self.alpha() * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_owned()))?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorError::BadLength(s.to_owned()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(s.to_owned()));
        }
        let num = u32::from_str_radix(hex, 16).map_err(|_| ColorError::NotHex(s.to_owned()))?;
        if hex.len() == 6 {
            Ok(Color::from_u32((num << 8) | 0xff))
        } else {
            Ok(Color::from_u32(num))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rrggbbaa() {
        let c = Color::from_u32(0x34d39926);
        assert_eq!((c.r, c.g, c.b, c.a), (52, 211, 153, 38));
    }

    #[test]
    fn css_uses_fractional_alpha() {
        assert_eq!(Color::from_u32(0x10b98126).to_css(), "rgba(16, 185, 129, 0.149)");
        assert_eq!(Color::from_u32(0xffffffff).to_css(), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn parses_hex_strings() {
        assert_eq!("#34d399".parse::<Color>(), Ok(Color::from_u32(0x34d399ff)));
        assert_eq!("#34D3990d".parse::<Color>(), Ok(Color::from_u32(0x34d3990d)));
        assert_eq!("34d399".parse::<Color>(), Err(ColorError::MissingHash("34d399".into())));
        assert_eq!("#34d39".parse::<Color>(), Err(ColorError::BadLength("#34d39".into())));
        assert_eq!("#+4d399".parse::<Color>(), Err(ColorError::NotHex("#+4d399".into())));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Color::from_u32(0x10b9810d);
        assert_eq!(c.to_string().parse::<Color>(), Ok(c));
    }
}
