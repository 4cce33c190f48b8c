//! Style definitions for the widget: the theme colors resolved at draw time.
pub(crate) mod defaults;
pub mod theme;

pub use crate::style::theme::{Col, Theme, ThemePalette};
use crate::{ColorU8, render};

/// Overall style definition for widgets
///
/// Only colors are defined by the style. Sizes are part of the widget design.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    /// Theme used for the widget
    pub theme: Theme,
}

impl Style {
    /// Create a new style from the given theme
    pub const fn new(theme: Theme) -> Self {
        Style { theme }
    }

    /// The light built-in style
    pub const fn light() -> Self {
        Style::new(Theme::Light)
    }

    /// The dark built-in style
    pub const fn dark() -> Self {
        Style::new(Theme::Dark)
    }

    /// A style with a custom palette
    pub const fn custom(palette: ThemePalette) -> Self {
        Style::new(Theme::Custom(palette))
    }

    /// Resolve a theme color
    pub const fn color(&self, col: Col) -> ColorU8 {
        self.theme.color(col)
    }

    /// A solid paint of a theme color, faded by `opacity`
    pub(crate) fn paint(&self, col: Col, opacity: f32) -> render::Paint {
        render::Paint::Solid(fade(self.color(col), opacity))
    }

    /// A stroke of a theme color, faded by `opacity`
    pub(crate) fn stroke<'a>(
        &self,
        col: Col,
        width: f32,
        pattern: render::LinePattern<'a>,
        opacity: f32,
    ) -> render::Stroke<'a> {
        render::Stroke {
            color: fade(self.color(col), opacity),
            width,
            pattern,
        }
    }
}

fn fade(color: ColorU8, opacity: f32) -> ColorU8 {
    if opacity >= 1.0 {
        color
    } else {
        color.with_opacity(opacity.clamp(0.0, 1.0))
    }
}
