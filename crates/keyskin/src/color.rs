//! Color literal parsing.
//!
//! Scheme values arrive in several shapes and all of them normalize to a
//! signed 32-bit ARGB integer ([`Argb`]):
//!
//! - Integers: the low 32 bits are reinterpreted as ARGB, so `0xFF000000`
//!   written as a YAML integer comes out negative, exactly like a platform
//!   color int.
//! - Hex strings with a `#` or `0x` prefix. Short forms are expanded before
//!   parsing:
//!
//!   | Input        | Normalized    | Meaning                       |
//!   |--------------|---------------|-------------------------------|
//!   | `0xA`        | `#aa000000`   | one digit: replicated alpha   |
//!   | `#12`        | `#12000000`   | two digits: alpha only        |
//!   | `0xFFF`      | `#000fff`     | 3-5 digits: opaque `RRGGBB`   |
//!   | `#1FFFFF`    | `#1FFFFF`     | 6 digits: opaque `RRGGBB`     |
//!   | `0x1234567`  | `#01234567`   | 7 digits: missing leading `0` |
//!   | `#80FF0000`  | `#80FF0000`   | 8 digits: `AARRGGBB`          |
//!
//! - Color names (`red`, `navy`, `lightgrey`, ...), case-insensitive.
//!
//! Anything containing a `.` is an image reference, not a color.
//!
//! # Example
//!
//! ```rust
//! use keyskin::color::{parse_color_str, Argb};
//!
//! assert_eq!(parse_color_str("#ff0000"), Some(Argb::from_u32(0xFFFF_0000)));
//! assert_eq!(parse_color_str("0xA"), Some(Argb::from_u32(0xAA00_0000)));
//! assert_eq!(parse_color_str("navy"), Some(Argb::from_u32(0xFF00_0080)));
//! assert_eq!(parse_color_str("key_back.png"), None);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value::ConfigValue;

/// A canonical ARGB color, stored as a signed 32-bit integer.
///
/// The signed representation matches how platform color ints are passed
/// around; use [`Argb::to_u32`] for bit manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Argb(pub i32);

impl Argb {
    /// Builds a color from its unsigned bit pattern.
    pub const fn from_u32(bits: u32) -> Self {
        Argb(bits as i32)
    }

    /// Builds a color from individual channels.
    pub const fn from_channels(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Argb::from_u32(
            (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32,
        )
    }

    /// Returns the unsigned bit pattern.
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    pub const fn alpha(self) -> u8 {
        (self.to_u32() >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.to_u32() >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.to_u32() >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.to_u32() as u8
    }

    /// Returns the same color with a different alpha channel.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Argb::from_u32(self.to_u32() & 0x00FF_FFFF | (alpha as u32) << 24)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_u32())
    }
}

impl From<Argb> for i32 {
    fn from(color: Argb) -> Self {
        color.0
    }
}

/// Why a literal did not produce a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The literal names an image file, not a color.
    #[error("'{0}' is an image reference")]
    ImageReference(String),

    /// The literal has a hex prefix but invalid digits.
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    /// The normalized hex form has neither 6 nor 8 digits.
    #[error("hex color '{0}' must have 6 or 8 digits")]
    InvalidLength(String),

    /// The literal is not a known color name.
    #[error("unknown color name '{0}'")]
    UnknownName(String),

    /// The value kind cannot hold a color (float, bool, collection, null).
    #[error("{0} is not a color literal")]
    NotALiteral(String),
}

/// Color names understood by the parser, with their ARGB values.
pub const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

/// Parses a scheme literal, logging failures.
///
/// Image references are expected and logged at `debug`; every other failure
/// is a malformed literal and logged at `warn`.
pub fn parse_color(value: &ConfigValue) -> Option<Argb> {
    log_failure(try_parse_color(value))
}

/// Parses a string literal, logging failures. See [`parse_color`].
pub fn parse_color_str(literal: &str) -> Option<Argb> {
    log_failure(try_parse_color_str(literal))
}

fn log_failure(result: Result<Argb, ColorError>) -> Option<Argb> {
    match result {
        Ok(color) => Some(color),
        Err(ColorError::ImageReference(value)) => {
            tracing::debug!(value = %value, "literal is an image reference");
            None
        }
        Err(err) => {
            tracing::warn!("Error on parsing color: {}", err);
            None
        }
    }
}

/// Parses a scheme literal into a color.
pub fn try_parse_color(value: &ConfigValue) -> Result<Argb, ColorError> {
    match value {
        // Truncation to the low 32 bits is the platform color encoding.
        ConfigValue::Integer(i) => Ok(Argb(*i as i32)),
        ConfigValue::String(s) => try_parse_color_str(s),
        other => Err(ColorError::NotALiteral(other.to_string())),
    }
}

/// Parses a string literal into a color.
pub fn try_parse_color_str(literal: &str) -> Result<Argb, ColorError> {
    if literal.contains('.') {
        return Err(ColorError::ImageReference(literal.to_string()));
    }

    let hex = match literal.strip_prefix('#') {
        Some(rest) => format!("0x{}", rest),
        None => literal.to_string(),
    };

    let completed = match hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")) {
        Some(digits) => normalize_hex(literal, hex.len(), digits)?,
        None => hex,
    };

    parse_normalized(literal, &completed)
}

/// Expands a prefixed hex literal to `#RRGGBB` or `#AARRGGBB` form.
///
/// `prefixed_len` counts the `0x` prefix, which is what the length table
/// is keyed on.
fn normalize_hex(literal: &str, prefixed_len: usize, digits: &str) -> Result<String, ColorError> {
    match prefixed_len {
        3 | 4 => {
            let value = decode_hex(literal, digits)?;
            let alpha = if digits.len() == 1 { value * 0x11 } else { value };
            Ok(format!("#{:02x}000000", alpha))
        }
        n if n < 8 => Ok(format!("#{:06x}", decode_hex(literal, digits)?)),
        9 => Ok(format!("#0{}", digits)),
        _ => Ok(format!("#{}", digits)),
    }
}

fn decode_hex(literal: &str, digits: &str) -> Result<u32, ColorError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(literal.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(literal.to_string()))
}

fn parse_normalized(literal: &str, completed: &str) -> Result<Argb, ColorError> {
    match completed.strip_prefix('#') {
        Some(digits) => match digits.len() {
            6 => Ok(Argb::from_u32(0xFF00_0000 | decode_hex(literal, digits)?)),
            8 => Ok(Argb::from_u32(decode_hex(literal, digits)?)),
            _ => Err(ColorError::InvalidLength(literal.to_string())),
        },
        None => {
            let lower = completed.to_ascii_lowercase();
            NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == lower)
                .map(|(_, bits)| Argb::from_u32(*bits))
                .ok_or_else(|| ColorError::UnknownName(literal.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<u32> {
        try_parse_color_str(s).ok().map(Argb::to_u32)
    }

    // =========================================================================
    // Integer literals
    // =========================================================================

    #[test]
    fn test_integer_literal_passes_through() {
        let value = ConfigValue::Integer(0x1234_5678);
        assert_eq!(try_parse_color(&value), Ok(Argb(0x1234_5678)));
    }

    #[test]
    fn test_integer_beyond_i32_is_truncated_negative() {
        let value = ConfigValue::Integer(0xFF00_0000);
        let color = try_parse_color(&value).unwrap();
        assert!(color.0 < 0);
        assert_eq!(color.to_u32(), 0xFF00_0000);
    }

    #[test]
    fn test_integer_beyond_u32_keeps_low_bits() {
        let value = ConfigValue::Integer(0x1_FF00_00FF);
        assert_eq!(try_parse_color(&value).unwrap().to_u32(), 0xFF00_00FF);
    }

    #[test]
    fn test_non_literal_values_are_not_colors() {
        assert!(matches!(
            try_parse_color(&ConfigValue::Bool(true)),
            Err(ColorError::NotALiteral(_))
        ));
        assert!(try_parse_color(&ConfigValue::Null).is_err());
        assert!(try_parse_color(&ConfigValue::Float(1.0)).is_err());
    }

    // =========================================================================
    // Hex normalization table
    // =========================================================================

    #[test]
    fn test_one_digit_fills_alpha() {
        assert_eq!(parse("0xA"), Some(0xAA00_0000));
        assert_eq!(parse("#f"), Some(0xFF00_0000));
    }

    #[test]
    fn test_two_digits_fill_alpha() {
        assert_eq!(parse("#12"), Some(0x1200_0000));
        assert_eq!(parse("0x80"), Some(0x8000_0000));
    }

    #[test]
    fn test_three_to_five_digits_are_opaque_rgb() {
        assert_eq!(parse("0xFFF"), Some(0xFF00_0FFF));
        assert_eq!(parse("#1234"), Some(0xFF00_1234));
        assert_eq!(parse("#FFFFF"), Some(0xFF0F_FFFF));
    }

    #[test]
    fn test_six_digits_are_opaque_rgb() {
        assert_eq!(parse("0x1FFFFF"), Some(0xFF1F_FFFF));
        assert_eq!(parse("#ff6b35"), Some(0xFFFF_6B35));
    }

    #[test]
    fn test_seven_digits_get_leading_zero() {
        assert_eq!(parse("0x1234567"), Some(0x0123_4567));
        assert_eq!(parse("#FFFFFFF"), Some(0x0FFF_FFFF));
    }

    #[test]
    fn test_eight_digits_are_argb() {
        assert_eq!(parse("#80FF0000"), Some(0x80FF_0000));
        assert_eq!(parse("0X00000000"), Some(0));
    }

    #[test]
    fn test_nine_digits_are_rejected() {
        assert_eq!(
            try_parse_color_str("0x123456789"),
            Err(ColorError::InvalidLength("0x123456789".into()))
        );
    }

    #[test]
    fn test_empty_prefix_is_invalid() {
        assert!(matches!(
            try_parse_color_str("#"),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(try_parse_color_str("0x").is_err());
    }

    #[test]
    fn test_bad_hex_digits() {
        assert!(matches!(
            try_parse_color_str("#gggggg"),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(try_parse_color_str("0x+f").is_err());
        assert!(try_parse_color_str("#zz").is_err());
    }

    // =========================================================================
    // Names and image references
    // =========================================================================

    #[test]
    fn test_named_colors() {
        assert_eq!(parse("red"), Some(0xFFFF_0000));
        assert_eq!(parse("RED"), Some(0xFFFF_0000));
        assert_eq!(parse("LightGrey"), Some(0xFFCC_CCCC));
        assert_eq!(parse("teal"), Some(0xFF00_8080));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            try_parse_color_str("orange"),
            Err(ColorError::UnknownName("orange".into()))
        );
    }

    #[test]
    fn test_bare_hex_without_prefix_is_a_name_lookup() {
        assert!(matches!(
            try_parse_color_str("ff0000"),
            Err(ColorError::UnknownName(_))
        ));
    }

    #[test]
    fn test_dot_means_image() {
        assert_eq!(
            try_parse_color_str("bg.9.png"),
            Err(ColorError::ImageReference("bg.9.png".into()))
        );
        assert_eq!(parse_color_str("#ff.0000"), None);
    }

    #[test]
    fn test_parse_color_logs_and_returns_none() {
        assert_eq!(parse_color(&ConfigValue::from("nope")), None);
        assert_eq!(
            parse_color(&ConfigValue::from("#000000")),
            Some(Argb::from_u32(0xFF00_0000))
        );
    }

    // =========================================================================
    // Argb
    // =========================================================================

    #[test]
    fn test_argb_channels() {
        let c = Argb::from_channels(0x80, 0x11, 0x22, 0x33);
        assert_eq!(c.to_u32(), 0x8011_2233);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x11);
        assert_eq!(c.green(), 0x22);
        assert_eq!(c.blue(), 0x33);
    }

    #[test]
    fn test_argb_with_alpha() {
        let c = Argb::from_u32(0xFF11_2233).with_alpha(0x40);
        assert_eq!(c.to_u32(), 0x4011_2233);
    }

    #[test]
    fn test_argb_display() {
        assert_eq!(Argb::from_u32(0xFF00_80FF).to_string(), "#FF0080FF");
    }
}
