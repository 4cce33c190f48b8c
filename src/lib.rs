#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
/*!
 * # expedite
 * _editable expressions_. An interactive widget that displays a symbolic expression tree
 * and lets the user edit its operators and numeric leaves in place.
 *
 * Expressions are nested prefix/infix operator trees such as `["+", 1, ["×", 2, 3]]`.
 * Binary nodes are displayed in infix notation between parentheses whose size grows with
 * nesting, unary nodes in prefix notation, numbers as editable fields and symbols as labels.
 * Clicking an operator opens a chooser offering the other operators of the same fixity.
 *
 * ## Get started
 *
 * ```
 * use expedite::des::{self, Sexpr};
 * use expedite::text::FixedMeasure;
 * use expedite::Prepare;
 *
 * // The widget design: the expression and its configuration.
 * let expr = Sexpr::seq(vec!["+".into(), 1.into(), Sexpr::seq(vec!["×".into(), 2.into(), 3.into()])]);
 * let design = des::Widget::new(expr).with_paren_scale(25.0);
 *
 * // Preparation validates the expression, renders it to fragments and lays them out.
 * let mut widget = design.prepare(FixedMeasure::default()).unwrap();
 * assert_eq!(widget.max_depth(), 2);
 *
 * // The tree is owned by the widget and reflects all the edits.
 * assert_eq!(widget.expr().to_sexpr().to_string(), r#"["+", 1, ["×", 2, 3]]"#);
 * # let _ = &mut widget;
 * ```
 *
 * ## Notes about expedite's design
 *
 * The widget design lies in the [`des`] module. It holds the expression as supplied by the caller
 * ([`des::Sexpr`]) and the configuration (parenthesis scale, operator vocabularies, font).
 * During preparation the expression is validated once and converted into an arena of tagged nodes
 * ([`des::ExprTree`]).
 *
 * The [`drawing`] module turns the tree into a [`drawing::Widget`]: a tree of visual fragments,
 * each bound to the tree slot it displays, laid out with a [`text::Measure`] implementation.
 * The prepared widget receives the host events (pointer moves, clicks, number edits, animation ticks)
 * and writes the user edits back into the tree.
 *
 * Rendering surfaces implement the [`render::Surface`] trait and live in separate crates
 * (see `expedite-svg`). They ignore everything about expressions and focus on primitives:
 * rects, paths and text.
 */
// Expedite is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Rémi Thebault

pub mod des;
pub mod drawing;
pub mod render;
pub mod style;

pub use drawing::Prepare;
pub use style::Style;

/// Rexports of [`expedite_base::color`]` items
pub mod color {
    pub use expedite_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`expedite_base::geom`]` items
pub mod geom {
    pub use expedite_base::geom::*;
}

/// Rexports of [`expedite_text`]` items
pub mod text {
    pub use expedite_text::*;
}

/// Module containing missing configuration values
/// Basically we put here all magic values that would require proper parameters
mod missing_params {
    pub const OPERATOR_PADDING: f32 = 4.0;
    pub const NUMBER_PADDING: f32 = 2.0;
    pub const NUMBER_BORDER_WIDTH: f32 = 1.0;
    pub const FOCUS_DASH: [f32; 2] = [2.0, 2.0];

    pub const CHOICE_PADDING: f32 = 4.0;
    pub const POPUP_BORDER_WIDTH: f32 = 1.0;
}

#[cfg(test)]
pub(crate) mod tests {
    pub trait Near {
        fn near_abs(&self, other: &Self, tol: f64) -> bool;
        fn near_rel(&self, other: &Self, err: f64) -> bool;
    }

    impl Near for f64 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs();
            let largest = self.abs().max(other.abs());
            diff <= largest * err
        }
    }

    impl Near for f32 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() as f64 <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs() as f64;
            let largest = self.abs().max(other.abs()) as f64;
            diff <= largest * err
        }
    }

    macro_rules! assert_near {
        (abs, $a:expr, $b:expr, $tol:expr) => {
            assert!($a.near_abs(&$b, $tol), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nTolerance: {}", $a, $b, $tol);
        };
        (abs, $a:expr, $b:expr) => {
            assert_near!(abs, $a, $b, 1e-6);
        };
        (rel, $a:expr, $b:expr, $err:expr) => {
            assert!($a.near_rel(&$b, $err), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nRelative error: {}", $a, $b, $err);
        };
        (rel, $a:expr, $b:expr) => {
            assert_near!(rel, $a, $b, 1e-6);
        };
    }

    pub(crate) use assert_near;

    #[test]
    fn test_close_to() {
        let a = 1.0;
        let b = 1.0 + 1e-9;
        assert_near!(abs, a, b);
        assert!(!a.near_abs(&b, 1e-10));
        assert_near!(rel, a, b);
        assert!(!a.near_rel(&b, 1e-10));
    }
}
