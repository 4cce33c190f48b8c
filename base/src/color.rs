use std::str::FromStr;
use std::{error, fmt};

/// Color expressed with 8-bit red, green, blue and alpha components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);

impl ColorU8 {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// Build a color from `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` notation.
    ///
    /// Panics on invalid input, which makes it suitable for constants.
    pub const fn from_html(hex: &[u8]) -> Self {
        match try_from_html(hex) {
            Some(c) => c,
            None => panic!("Invalid hex color"),
        }
    }

    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// The opacity of the color, or `None` if fully opaque
    pub const fn opacity(&self) -> Option<f32> {
        if self.a == 255 {
            None
        } else {
            Some(self.a as f32 / 255.0)
        }
    }

    /// Relative luminance, between 0 and 1
    pub fn luminance(&self) -> f32 {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        ColorU8 { a, ..self }
    }

    /// Multiply the alpha component by `opacity` (between 0 and 1)
    pub const fn with_opacity(self, opacity: f32) -> Self {
        assert!(0.0 <= opacity && opacity <= 1.0);
        ColorU8 {
            a: (self.a as f32 * opacity) as u8,
            ..self
        }
    }
}

const fn try_from_html(hex: &[u8]) -> Option<ColorU8> {
    if hex.is_empty() || hex[0] != b'#' {
        return None;
    }
    let mut digits = [0u8; 8];
    let mut i = 1;
    while i < hex.len() {
        if i > 8 {
            return None;
        }
        digits[i - 1] = match hex_to_u8(hex[i]) {
            Some(d) => d,
            None => return None,
        };
        i += 1;
    }
    let d = digits;
    match hex.len() {
        4 => Some(ColorU8::from_rgb(d[0] << 4 | d[0], d[1] << 4 | d[1], d[2] << 4 | d[2])),
        5 => Some(ColorU8::from_rgba(
            d[0] << 4 | d[0],
            d[1] << 4 | d[1],
            d[2] << 4 | d[2],
            d[3] << 4 | d[3],
        )),
        7 => Some(ColorU8::from_rgb(d[0] << 4 | d[1], d[2] << 4 | d[3], d[4] << 4 | d[5])),
        9 => Some(ColorU8::from_rgba(
            d[0] << 4 | d[1],
            d[2] << 4 | d[3],
            d[4] << 4 | d[5],
            d[6] << 4 | d[7],
        )),
        _ => None,
    }
}

const fn hex_to_u8(hex: u8) -> Option<u8> {
    match hex {
        b'0'..=b'9' => Some(hex - b'0'),
        b'a'..=b'f' => Some(hex - b'a' + 10),
        b'A'..=b'F' => Some(hex - b'A' + 10),
        _ => None,
    }
}

/// Error returned when parsing a color from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color")
    }
}

impl error::Error for ParseError {}

impl FromStr for ColorU8 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_from_html(s.trim().as_bytes()).ok_or(ParseError)
    }
}
