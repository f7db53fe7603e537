//! Colors, HSL conversion and tint masks
//!
//! A [`Color`] is either a plain RGB triple or a packed game color code. Both
//! resolve to the same canonical RGB triple; tinting works in HSL so that the
//! shading baked into sprite art survives a recolor.
//!
//! Supported string forms (see [`parse_color`]):
//! - Hex: `#RGB`, `#RRGGBB`
//! - Triple: `r,g,b`
//! - Game code: `code:6619008` or a bare integer

use std::fmt;

use image::Rgba;
use thiserror::Error;

/// Lightness of a game color code with lightness bits set to zero.
const DARKEST_LIGHTNESS: f32 = 0.5;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid hex length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// `r,g,b` triple with a bad component
    #[error("invalid color component '{0}', expected 0-255")]
    InvalidComponent(String),
    /// Game color code is not a 24-bit integer
    #[error("invalid color code '{0}'")]
    InvalidCode(String),
}

/// A color given either as RGB or as a packed game color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Plain 8-bit RGB triple
    Rgb(u8, u8, u8),
    /// Packed HSL code as stored in game settings (`0xHHSSLL`)
    Code(u32),
}

impl Color {
    /// Shorthand for [`Color::Rgb`].
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Shorthand for [`Color::Code`].
    pub const fn code(code: u32) -> Self {
        Color::Code(code)
    }

    /// The canonical RGB triple.
    ///
    /// ```
    /// use teesheet::color::Color;
    ///
    /// assert_eq!(Color::rgb(1, 2, 3).to_rgb(), [1, 2, 3]);
    /// // Zero saturation code: grey at the darkest allowed lightness
    /// assert_eq!(Color::code(0).to_rgb(), [128, 128, 128]);
    /// ```
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            Color::Rgb(r, g, b) => [r, g, b],
            Color::Code(_) => self.to_hsl().to_rgb(),
        }
    }

    /// The color in HSL space.
    pub fn to_hsl(self) -> Hsl {
        match self {
            Color::Rgb(r, g, b) => Hsl::from_rgb([r, g, b]),
            Color::Code(code) => {
                let h = ((code >> 16) & 0xff) as f32 / 255.0;
                let s = ((code >> 8) & 0xff) as f32 / 255.0;
                let l = (code & 0xff) as f32 / 255.0;
                Hsl { h, s, l: DARKEST_LIGHTNESS + l * (1.0 - DARKEST_LIGHTNESS) }
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "rgb({}, {}, {})", r, g, b),
            Color::Code(code) => write!(f, "code({})", code),
        }
    }
}

/// A color in HSL space, every component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    /// Convert an RGB triple to HSL.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let r = rgb[0] as f32 / 255.0;
        let g = rgb[1] as f32 / 255.0;
        let b = rgb[2] as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }

    /// Convert back to an RGB triple.
    pub fn to_rgb(self) -> [u8; 3] {
        if self.s == 0.0 {
            let v = to_channel(self.l);
            return [v, v, v];
        }

        let q = if self.l < 0.5 { self.l * (1.0 + self.s) } else { self.l + self.s - self.l * self.s };
        let p = 2.0 * self.l - q;

        [
            to_channel(hue_to_channel(p, q, self.h + 1.0 / 3.0)),
            to_channel(hue_to_channel(p, q, self.h)),
            to_channel(hue_to_channel(p, q, self.h - 1.0 / 3.0)),
        ]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Recolor one pixel, keeping its lightness and alpha.
///
/// Hue and saturation come from `tint`; the pixel's own HSL lightness is
/// kept so highlights and shadows in the art stay visible.
pub fn tint_pixel(pixel: Rgba<u8>, tint: Hsl) -> Rgba<u8> {
    if pixel[3] == 0 {
        return pixel;
    }
    let own = Hsl::from_rgb([pixel[0], pixel[1], pixel[2]]);
    let [r, g, b] = Hsl { h: tint.h, s: tint.s, l: own.l }.to_rgb();
    Rgba([r, g, b, pixel[3]])
}

/// Overwrite the color of one pixel, keeping its alpha.
pub fn flat_pixel(pixel: Rgba<u8>, rgb: [u8; 3]) -> Rgba<u8> {
    if pixel[3] == 0 {
        return pixel;
    }
    Rgba([rgb[0], rgb[1], rgb[2], pixel[3]])
}

/// Parse a color string.
///
/// # Examples
///
/// ```
/// use teesheet::color::{parse_color, Color};
///
/// assert_eq!(parse_color("#F00").unwrap(), Color::rgb(255, 0, 0));
/// assert_eq!(parse_color("136,113,255").unwrap(), Color::rgb(136, 113, 255));
/// assert_eq!(parse_color("code:6619008").unwrap(), Color::code(6619008));
/// assert_eq!(parse_color("6619008").unwrap(), Color::code(6619008));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ColorError::InvalidComponent(s.to_string()));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| ColorError::InvalidComponent(part.to_string()))?;
        }
        return Ok(Color::Rgb(rgb[0], rgb[1], rgb[2]));
    }

    let digits = s.strip_prefix("code:").unwrap_or(s);
    match digits.parse::<u32>() {
        Ok(code) if code <= 0xff_ffff => Ok(Color::Code(code)),
        _ => Err(ColorError::InvalidCode(s.to_string())),
    }
}

/// Parse a hex color string (#RGB, #RRGGBB)
fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let hex = &s[1..];

    // Validate all characters are hex
    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    let digits: Vec<u8> = hex.chars().map(parse_hex_digit).collect::<Result<_, _>>()?;
    match digits.len() {
        // #RGB -> #RRGGBB (doubled digits)
        3 => Ok(Color::Rgb(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
        6 => Ok(Color::Rgb(
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
        )),
        len => Err(ColorError::InvalidLength(len)),
    }
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
