//! Theme definitions and implementations

use crate::color::{self, ColorU8};

/// A theme, for styling widgets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Theme {
    #[default]
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// A custom theme
    Custom(ThemePalette),
}

impl Theme {
    /// Get the background color of the theme
    pub const fn background(&self) -> ColorU8 {
        self.palette().background
    }

    /// Get the foreground color of the theme
    pub const fn foreground(&self) -> ColorU8 {
        self.palette().foreground
    }

    /// Get the theme palette
    pub const fn palette(&self) -> &ThemePalette {
        match self {
            Theme::Light => &ThemePalette::LIGHT,
            Theme::Dark => &ThemePalette::DARK,
            Theme::Custom(palette) => palette,
        }
    }

    /// Resolve a theme color
    pub const fn color(&self, col: Col) -> ColorU8 {
        let p = self.palette();
        match col {
            Col::Background => p.background,
            Col::Foreground => p.foreground,
            Col::Operator => p.operator,
            Col::NumberFill => p.number_fill,
            Col::NumberBorder => p.number_border,
            Col::OuterHighlight => p.outer_highlight,
            Col::InnerHighlight => p.inner_highlight,
            Col::PopupFill => p.popup_fill,
            Col::PopupBorder => p.popup_border,
            Col::ChoiceHover => p.choice_hover,
        }
    }

    /// Check whether the theme is dark or light
    /// A theme is considered dark if its background color has a luminance < 0.5
    pub fn is_dark(&self) -> bool {
        self.background().luminance() < 0.5
    }
}

/// The colors used in a theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    /// Background color
    pub background: ColorU8,
    /// Foreground color, used for parentheses and symbols
    pub foreground: ColorU8,
    /// Operator labels color
    pub operator: ColorU8,
    /// Numeric fields background
    pub number_fill: ColorU8,
    /// Numeric fields border
    pub number_border: ColorU8,
    /// Parentheses of the hovered group
    pub outer_highlight: ColorU8,
    /// Background of the hovered group
    pub inner_highlight: ColorU8,
    /// Chooser background
    pub popup_fill: ColorU8,
    /// Chooser border
    pub popup_border: ColorU8,
    /// Background of the hovered choice
    pub choice_hover: ColorU8,
}

impl ThemePalette {
    /// The light built-in theme palette
    pub const LIGHT: Self = Self {
        background: color::WHITE,
        foreground: color::BLACK,
        operator: ColorU8::from_html(b"#1f4e9c"),
        number_fill: ColorU8::from_html(b"#f4f4f4"),
        number_border: ColorU8::from_html(b"#a0a0a0"),
        outer_highlight: ColorU8::from_html(b"#d62728"),
        inner_highlight: ColorU8::from_html(b"#ffd54f").with_opacity(0.4),
        popup_fill: color::WHITE,
        popup_border: ColorU8::from_html(b"#808080"),
        choice_hover: ColorU8::from_html(b"#1f4e9c").with_opacity(0.2),
    };

    /// The dark built-in theme palette
    pub const DARK: Self = Self {
        background: ColorU8::from_html(b"#1e1e2e"),
        foreground: color::WHITE,
        operator: ColorU8::from_html(b"#89b4fa"),
        number_fill: ColorU8::from_html(b"#313244"),
        number_border: ColorU8::from_html(b"#6c7086"),
        outer_highlight: ColorU8::from_html(b"#f38ba8"),
        inner_highlight: ColorU8::from_html(b"#f9e2af").with_opacity(0.25),
        popup_fill: ColorU8::from_html(b"#181825"),
        popup_border: ColorU8::from_html(b"#c0c0c0"),
        choice_hover: ColorU8::from_html(b"#89b4fa").with_opacity(0.3),
    };

    /// Create a new custom theme from background and foreground colors
    /// The other colors are derived automatically.
    pub fn new_back_and_fore(background: ColorU8, foreground: ColorU8) -> Self {
        let number_border = if background.luminance() < 0.5 {
            // Dark background
            ColorU8::from_rgb(192, 192, 192)
        } else {
            // Light background
            ColorU8::from_rgb(128, 128, 128)
        };

        Self {
            background,
            foreground,
            operator: foreground,
            number_fill: background,
            number_border,
            outer_highlight: foreground,
            inner_highlight: foreground.with_opacity(0.15),
            popup_fill: background,
            popup_border: number_border,
            choice_hover: foreground.with_opacity(0.2),
        }
    }
}

/// Predefined colors for theme elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Col {
    /// Background color
    Background,
    /// Foreground color
    Foreground,
    /// Operator labels color
    Operator,
    /// Numeric fields background
    NumberFill,
    /// Numeric fields border
    NumberBorder,
    /// Parentheses of the hovered group
    OuterHighlight,
    /// Background of the hovered group
    InnerHighlight,
    /// Chooser background
    PopupFill,
    /// Chooser border
    PopupBorder,
    /// Background of the hovered choice
    ChoiceHover,
}

impl std::str::FromStr for Col {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "background" => Ok(Col::Background),
            "foreground" => Ok(Col::Foreground),
            "operator" => Ok(Col::Operator),
            "number_fill" => Ok(Col::NumberFill),
            "number_border" => Ok(Col::NumberBorder),
            "outer_highlight" => Ok(Col::OuterHighlight),
            "inner_highlight" => Ok(Col::InnerHighlight),
            "popup_fill" => Ok(Col::PopupFill),
            "popup_border" => Ok(Col::PopupBorder),
            "choice_hover" => Ok(Col::ChoiceHover),
            _ => Err(()),
        }
    }
}
