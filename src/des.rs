/*!
 * # Declarative design module for expedite
 *
 * This module contains the data structures describing a widget before it is prepared:
 * the expression supplied by the caller and the widget configuration.
 */
use std::fmt;

use crate::style::defaults;
use crate::{geom, text};

pub mod expr;
pub mod operators;

pub use expr::{ExprTree, Node, NodeId, NodePath, Sexpr, Slot};
pub use operators::{Fixity, Operators};

/// Errors raised while validating a design or mutating an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A sequence node has a length other than 2 (unary) or 3 (binary)
    MalformedNode {
        /// Path of the node from the root
        path: NodePath,
        /// Length of the sequence
        len: usize,
    },
    /// The first item of a sequence node is not an operator symbol
    MalformedOperator {
        /// Path of the node from the root
        path: NodePath,
    },
    /// The node has no operator (it is a leaf)
    NotAnOperator(NodeId),
    /// The node is not a numeric leaf
    NotANumber(NodeId),
    /// The slot does not refer to a node of the tree
    InvalidSlot(Slot),
    /// The parenthesis scale is not a finite positive number
    InvalidParenScale(f32),
    /// The chooser grid must have at least one column
    InvalidGrid,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedNode { path, len } => {
                write!(f, "Malformed node at {}: sequence of length {}", path, len)
            }
            Error::MalformedOperator { path } => {
                write!(f, "Malformed node at {}: operator must be a symbol", path)
            }
            Error::NotAnOperator(id) => write!(f, "Node {} has no operator", id),
            Error::NotANumber(id) => write!(f, "Node {} is not a number", id),
            Error::InvalidSlot(slot) => write!(f, "Invalid slot: {:?}", slot),
            Error::InvalidParenScale(scale) => write!(f, "Invalid parenthesis scale: {}", scale),
            Error::InvalidGrid => write!(f, "Chooser grid must have at least one column"),
        }
    }
}

impl std::error::Error for Error {}

/// Widget design. This is the top-level structure describing a widget to be prepared.
#[derive(Debug, Clone)]
pub struct Widget {
    expression: Sexpr,
    paren_scale: f32,
    operators: Operators,
    font: text::Font,
    font_size: f32,
    padding: geom::Padding,
    number_min_width: f32,
}

impl Widget {
    /// Create a new widget design for the given expression
    pub fn new(expression: Sexpr) -> Self {
        Widget {
            expression,
            paren_scale: defaults::PAREN_SCALE,
            operators: Operators::default(),
            font: text::Font::default(),
            font_size: defaults::FONT_SIZE,
            padding: defaults::PADDING,
            number_min_width: defaults::NUMBER_MIN_WIDTH,
        }
    }

    /// The expression to display
    pub fn expression(&self) -> &Sexpr {
        &self.expression
    }

    /// Size increase of the parentheses per nesting level, in percent of the font size
    pub fn paren_scale(&self) -> f32 {
        self.paren_scale
    }

    /// The operator vocabularies offered by the chooser
    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// The font used for all labels
    pub fn font(&self) -> &text::Font {
        &self.font
    }

    /// The base font size
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// The padding around the expression
    pub fn padding(&self) -> &geom::Padding {
        &self.padding
    }

    /// The minimum width of numeric fields
    pub fn number_min_width(&self) -> f32 {
        self.number_min_width
    }

    /// Set the parenthesis scale and return self for chaining
    pub fn with_paren_scale(self, paren_scale: f32) -> Self {
        Self {
            paren_scale,
            ..self
        }
    }

    /// Set the operator vocabularies and return self for chaining
    pub fn with_operators(self, operators: Operators) -> Self {
        Self { operators, ..self }
    }

    /// Set the font and return self for chaining
    pub fn with_font(self, font: text::Font) -> Self {
        Self { font, ..self }
    }

    /// Set the base font size and return self for chaining
    pub fn with_font_size(self, font_size: f32) -> Self {
        Self { font_size, ..self }
    }

    /// Set the padding and return self for chaining
    pub fn with_padding(self, padding: geom::Padding) -> Self {
        Self { padding, ..self }
    }

    /// Set the minimum width of numeric fields and return self for chaining
    pub fn with_number_min_width(self, number_min_width: f32) -> Self {
        Self {
            number_min_width,
            ..self
        }
    }

    /// Validate the design and build the expression tree.
    ///
    /// Operators outside of the configured vocabularies are accepted, but reported in the logs.
    pub fn validate(&self) -> Result<ExprTree, Error> {
        if !self.paren_scale.is_finite() || self.paren_scale < 0.0 {
            return Err(Error::InvalidParenScale(self.paren_scale));
        }
        if self.operators.grid() == 0 {
            return Err(Error::InvalidGrid);
        }

        let tree = ExprTree::from_sexpr(&self.expression)?;

        for (id, node) in tree.iter() {
            if let Some((op, fixity)) = node.operator() {
                if !self.operators.contains(fixity, op) {
                    log::warn!(
                        "operator '{}' of node {} is not in the {:?} vocabulary",
                        op,
                        id,
                        fixity
                    );
                }
            }
        }

        Ok(tree)
    }
}

impl From<Sexpr> for Widget {
    fn from(expression: Sexpr) -> Self {
        Widget::new(expression)
    }
}
