//! Drawing module
//!
//! This module contains all the logic to convert a widget design into an interactive widget
//! and to draw it on a rendering surface.
//! It is the bridge between the [`des`] module and the [`render`] module.
//!
//! Preparation runs in a single synchronous pass:
//!  - the expression is validated into a [`des::ExprTree`],
//!  - its maximum depth is computed ([`max_depth`]),
//!  - every node is rendered into a [`Fragment`], bound to the tree slot it displays,
//!  - fragments are laid out on a common baseline using a [`text::Measure`].
//!
//! Later edits operate on the prepared structure and only re-run the layout.
use std::fmt;

use crate::{des, geom, text};

mod build;
mod chooser;
mod depth;
mod fragment;
mod layout;
mod number;
mod widget;

pub use chooser::{Choice, Phase, Popup, TRANSITION};
pub use depth::max_depth;
pub use fragment::{FragId, Fragment, Fragments, Side};
pub use hit_test::Hit;
pub use number::NumberField;
pub use widget::{Change, Widget};

/// Class names given to the drawn elements.
///
/// Surfaces supporting classes (e.g. SVG) emit them, so that the output can be styled
/// or inspected like the elements of the original widget.
pub mod class {
    /// The widget root
    pub const ROOT: &str = "expedite";
    /// A parenthesis
    pub const PAREN: &str = "expedite-paren";
    /// A parenthesis of the hovered group
    pub const PAREN_HIGHLIGHT: &str = "expedite-paren expedite-outer-highlight";
    /// The inner part of the hovered group
    pub const INNER_HIGHLIGHT: &str = "expedite-inner-highlight";
    /// An operator label, in the expression or in the chooser
    pub const OPERATOR: &str = "expedite-operator";
    /// A numeric field
    pub const NUMBER: &str = "expedite-number";
    /// A symbol label
    pub const VARIABLE: &str = "expedite-variable";
    /// The operator chooser
    pub const POPUP: &str = "expedite expedite-popup";
}

/// Errors that can occur during widget preparation and interaction
#[derive(Debug, Clone)]
pub enum Error {
    /// The design is invalid
    Design(des::Error),
    /// Font or text related error, e.g. font not found
    FontOrText(text::Error),
    /// The committed text is not a finite number
    InvalidNumber(String),
    /// The fragment is not a numeric field
    NotANumberField(FragId),
    /// The fragment is not an operator label
    NotAnOperator(FragId),
    /// The fragment does not exist
    UnknownFragment(FragId),
    /// No chooser is open, or it is closing
    NoChooser,
    /// The chooser has no such choice
    UnknownChoice(usize),
}

impl From<des::Error> for Error {
    fn from(err: des::Error) -> Self {
        Error::Design(err)
    }
}

impl From<text::Error> for Error {
    fn from(err: text::Error) -> Self {
        Error::FontOrText(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Design(err) => err.fmt(f),
            Error::FontOrText(err) => err.fmt(f),
            Error::InvalidNumber(text) => write!(f, "Invalid number: {:?}", text),
            Error::NotANumberField(id) => write!(f, "Fragment {} is not a numeric field", id),
            Error::NotAnOperator(id) => write!(f, "Fragment {} is not an operator", id),
            Error::UnknownFragment(id) => write!(f, "Unknown fragment: {}", id),
            Error::NoChooser => write!(f, "No operator chooser is open"),
            Error::UnknownChoice(idx) => write!(f, "Unknown choice: {}", idx),
        }
    }
}

impl std::error::Error for Error {}

/// Extension trait to prepare a widget design
pub trait Prepare {
    /// Prepare the widget for interaction and drawing.
    /// The expression is validated, rendered to fragments and laid out using `measure`.
    ///
    /// Theme colors are not used at this stage, they will be resolved at draw time.
    /// So the same prepared widget can be drawn with different styles.
    fn prepare<M>(&self, measure: M) -> Result<Widget<M>, Error>
    where
        M: text::Measure;
}

impl Prepare for des::Widget {
    fn prepare<M>(&self, measure: M) -> Result<Widget<M>, Error>
    where
        M: text::Measure,
    {
        Widget::prepare(self, measure)
    }
}

/// Widget parameters kept after preparation
#[derive(Debug, Clone)]
struct Config {
    operators: des::Operators,
    font: text::Font,
    font_size: f32,
    padding: geom::Padding,
    number_min_width: f32,
    paren_scale: f32,
}

impl From<&des::Widget> for Config {
    fn from(design: &des::Widget) -> Self {
        Config {
            operators: design.operators().clone(),
            font: design.font().clone(),
            font_size: design.font_size(),
            padding: *design.padding(),
            number_min_width: design.number_min_width(),
            paren_scale: design.paren_scale(),
        }
    }
}

#[derive(Debug)]
struct Ctx<'a, M> {
    measure: &'a M,
    config: &'a Config,
}

impl<'a, M> Ctx<'a, M>
where
    M: text::Measure,
{
    fn new(measure: &'a M, config: &'a Config) -> Self {
        Ctx { measure, config }
    }

    fn config(&self) -> &Config {
        self.config
    }

    fn measure(&self, text: &str, font_size: f32) -> Result<text::TextMetrics, Error> {
        Ok(self.measure.measure(text, &self.config.font, font_size)?)
    }
}
