//! Render module: provides abstraction over rendering surfaces, like SVG or GUI canvases.
//!
//! All rendering surfaces must implement the `Surface` trait.
//! See the `expedite-svg` crate for an example.
//!
//! Primitives may carry a class name, which mirrors the CSS classes of the widget elements
//! (e.g. `expedite-operator`). Surfaces without such a concept simply ignore it.

use crate::{ColorU8, geom, text};

/// Surface trait: defines the rendering surface API
pub trait Surface {
    /// Prepare the surface for drawing, with the given size in widget units
    fn prepare(&mut self, size: geom::Size);

    /// Draw a rectangle
    ///
    /// Default implementation converts the rectangle to a path and call [`draw_path`](Surface::draw_path)
    fn draw_rect(&mut self, rect: &Rect) {
        let Some(path) = rect.rect.to_path() else {
            return;
        };
        let rpath = self::Path {
            path: &path,
            fill: rect.fill,
            stroke: rect.stroke,
            transform: rect.transform,
            class: rect.class,
        };
        self.draw_path(&rpath);
    }

    /// Draw a path
    fn draw_path(&mut self, path: &Path);

    /// Draw a single line of text
    fn draw_text(&mut self, text: &Text);

    /// Push a clipping rect
    /// Subsequent draw operations will be clipped to this rect,
    /// until a matching [`pop_clip`](Surface::pop_clip) is called
    fn push_clip(&mut self, clip: &Clip);

    /// Pop a clipping rect that was pushed previously with [`push_clip`](Surface::push_clip)
    fn pop_clip(&mut self);
}

/// Paint pattern, used for fill operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color fill
    Solid(ColorU8),
}

impl From<ColorU8> for Paint {
    fn from(value: ColorU8) -> Self {
        Paint::Solid(value)
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LinePattern<'a> {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(&'a [f32]),
}

/// Stroke style definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Line color
    pub color: ColorU8,
    /// Line width in widget units
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern<'a>,
}

/// Rectangle to draw
#[derive(Debug, Clone)]
pub struct Rect<'a> {
    /// Rectangle geometry
    pub rect: geom::Rect,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the rectangle
    pub transform: Option<&'a geom::Transform>,
    /// Class of the element
    pub class: Option<&'a str>,
}

/// Path to draw
#[derive(Debug, Clone)]
pub struct Path<'a> {
    /// Path geometry
    pub path: &'a geom::Path,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the path
    pub transform: Option<&'a geom::Transform>,
    /// Class of the element
    pub class: Option<&'a str>,
}

/// A single line of text to draw
#[derive(Debug, Clone)]
pub struct Text<'a> {
    /// The text content
    pub text: &'a str,
    /// Start of the baseline
    pub origin: geom::Point,
    /// Font of the text
    pub font: &'a text::Font,
    /// Font size in widget units
    pub font_size: f32,
    /// Fill style
    pub fill: Paint,
    /// Class of the element
    pub class: Option<&'a str>,
}

/// Clipping rectangle
#[derive(Debug, Clone)]
pub struct Clip<'a> {
    /// Clipping rectangle
    pub rect: &'a geom::Rect,
    /// Optional transform to apply to the clipping rectangle
    pub transform: Option<&'a geom::Transform>,
}
