//! Text measurement for expedite.
//!
//! Widgets are laid out from text extents only: the width of a label and the
//! vertical metrics of the font at a given size.
//! Those are obtained synchronously through the [`Measure`] trait.
//! Two implementations are provided:
//!  - [`ShapingMeasure`]: shapes the text with rustybuzz using a font database,
//!  - [`FixedMeasure`]: a fixed advance per character, independent of any font file.
use std::fmt;

use ttf_parser as ttf;

pub mod font;
mod measure;

pub use font::{Family, Font};
pub use measure::{FixedMeasure, ShapingMeasure};

/// Re-export of the font database crate
pub use fontdb;

#[derive(Debug, Clone)]
pub enum Error {
    NoSuchFont(font::Font),
    FaceParsingError(ttf::FaceParsingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoSuchFont(font) => write!(f, "Could not find a face for {:?}", font),
            Error::FaceParsingError(err) => err.fmt(f),
        }
    }
}

impl From<ttf::FaceParsingError> for Error {
    fn from(err: ttf::FaceParsingError) -> Self {
        Error::FaceParsingError(err)
    }
}

impl std::error::Error for Error {}

/// Script direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDir {
    /// Left to right
    LeftToRight,
    /// Right to left
    RightToLeft,
}

impl From<ScriptDir> for rustybuzz::Direction {
    fn from(dir: ScriptDir) -> Self {
        match dir {
            ScriptDir::LeftToRight => rustybuzz::Direction::LeftToRight,
            ScriptDir::RightToLeft => rustybuzz::Direction::RightToLeft,
        }
    }
}

/// Extents of a single line of text.
///
/// `ascent` is the distance from the baseline to the top of the line (positive upwards),
/// `descent` the distance from the baseline to the bottom (positive downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    pub const fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Synchronous text measurement
pub trait Measure {
    /// Measure `text` rendered with `font` at `font_size`
    fn measure(&self, text: &str, font: &Font, font_size: f32) -> Result<TextMetrics, Error>;
}

impl<M> Measure for &M
where
    M: Measure + ?Sized,
{
    fn measure(&self, text: &str, font: &Font, font_size: f32) -> Result<TextMetrics, Error> {
        (**self).measure(text, font, font_size)
    }
}

/// Main direction of the text, or `None` if it has no strong direction
fn script_dir(text: &str) -> Option<ScriptDir> {
    use unicode_bidi::{BidiClass, bidi_class};
    let mut in_doubt_rtl = false;
    for c in text.chars() {
        match bidi_class(c) {
            BidiClass::L | BidiClass::LRE | BidiClass::LRO | BidiClass::LRI => {
                return Some(ScriptDir::LeftToRight);
            }
            BidiClass::R | BidiClass::AL | BidiClass::RLE | BidiClass::RLO | BidiClass::RLI => {
                return Some(ScriptDir::RightToLeft);
            }
            BidiClass::AN => {
                // arabic number, can be in both contexts, but if we have only those, we chose RTL
                in_doubt_rtl = true;
            }
            _ => (),
        }
    }
    in_doubt_rtl.then_some(ScriptDir::RightToLeft)
}
