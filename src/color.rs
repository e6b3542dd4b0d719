//! Hex color parsing and formatting for yarn colors
//!
//! The swatch-editing collaborator exchanges colors as hex strings
//! (`#RGB` or `#RRGGBB`); everything else in the engine works with the
//! `Rgb` triple defined here.

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An opaque RGB triple, one byte per channel.
///
/// Yarn has no alpha channel; pixels arriving with one are flattened via
/// [`Rgb::from_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Drop the alpha channel of an RGBA pixel.
    pub fn from_rgba(rgba: Rgba<u8>) -> Self {
        Self { r: rgba[0], g: rgba[1], b: rgba[2] }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance to another color in RGB space.
    ///
    /// Maximum value is `3 * 255^2 = 195075`, well within `u32`.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`).
///
/// # Examples
///
/// ```
/// use knitchart::color::{parse_hex, Rgb};
///
/// let red = parse_hex("#F00").unwrap();
/// assert_eq!(red, Rgb::new(255, 0, 0));
///
/// let teal = parse_hex("#008080").unwrap();
/// assert_eq!(teal, Rgb::new(0, 128, 128));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_hex(s: &str) -> Result<Rgb, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let Some(hex) = s.strip_prefix('#') else {
        return Err(ColorError::MissingHash);
    };

    match hex.len() {
        3 => {
            // #RGB -> #RRGGBB (doubled digits)
            let mut chars = hex.chars();
            let r = parse_hex_digit(next_digit(&mut chars))? * 17;
            let g = parse_hex_digit(next_digit(&mut chars))? * 17;
            let b = parse_hex_digit(next_digit(&mut chars))? * 17;
            Ok(Rgb { r, g, b })
        }
        6 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            Ok(Rgb { r, g, b })
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

// Length is checked before the digits are consumed, so the iterator cannot
// run dry; the NUL placeholder still fails cleanly through InvalidHex.
fn next_digit(chars: &mut std::str::Chars<'_>) -> char {
    chars.next().unwrap_or('\0')
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = parse_hex_digit(next_digit(&mut chars))?;
    let low = parse_hex_digit(next_digit(&mut chars))?;
    Ok(high * 16 + low)
}
