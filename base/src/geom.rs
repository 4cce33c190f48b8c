/*!
 * Geometric primitives used for widget layout.
 *
 * Paths, points and transforms are publicly imported from tiny-skia-path.
 *
 * Y low coordinates are at the top.
 */

use strict_num::{FiniteF32, PositiveF32};
pub use tiny_skia_path::{Path, PathBuilder, PathSegment, Point, Transform};

/// A size in 2D space reprensented by width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    /// Build a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// The width
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height
    pub const fn height(&self) -> f32 {
        self.h
    }

}

/// A rectangle in 2D space reprensented by x, y, width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: FiniteF32,
    y: FiniteF32,
    w: PositiveF32,
    h: PositiveF32,
}

impl Rect {
    /// Build a rectangle from x, y, width and height
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect {
            x: FiniteF32::new(x).unwrap(),
            y: FiniteF32::new(y).unwrap(),
            w: PositiveF32::new(w).unwrap(),
            h: PositiveF32::new(h).unwrap(),
        }
    }

    /// Build a rectangle from top left point and size
    pub fn from_ps(top_left: Point, size: Size) -> Self {
        Rect::from_xywh(top_left.x, top_left.y, size.w, size.h)
    }

    /// The top-left point of the rectangle
    pub const fn top_left(&self) -> Point {
        Point {
            x: self.left(),
            y: self.top(),
        }
    }

    /// The size of the rectangle
    pub const fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// The X coordinate of the left side
    pub const fn x(&self) -> f32 {
        self.x.get()
    }

    /// The Y coordinate of the top side
    pub const fn y(&self) -> f32 {
        self.y.get()
    }

    /// The horizontal center X coordinate
    pub const fn center_x(&self) -> f32 {
        self.x() + self.width() / 2.0
    }

    /// The width of the rectangle
    pub const fn width(&self) -> f32 {
        self.w.get()
    }

    /// The height of the rectangle
    pub const fn height(&self) -> f32 {
        self.h.get()
    }

    /// The top Y coordinate
    pub const fn top(&self) -> f32 {
        self.y.get()
    }

    /// The right X coordinate
    pub const fn right(&self) -> f32 {
        self.x.get() + self.w.get()
    }

    /// The bottom Y coordinate
    pub const fn bottom(&self) -> f32 {
        self.y.get() + self.h.get()
    }

    /// The left X coordinate
    pub const fn left(&self) -> f32 {
        self.x.get()
    }

    /// Build a copy of the rect with a new height, keeping the top side
    pub fn with_height(self, height: f32) -> Rect {
        Rect {
            h: PositiveF32::new(height).unwrap(),
            ..self
        }
    }

    /// Test if the rectangle contains a point
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Build a path from the rectangle
    pub fn to_path(&self) -> Option<Path> {
        tiny_skia_path::Rect::from_xywh(self.x.get(), self.y.get(), self.w.get(), self.h.get())
            .map(PathBuilder::from_rect)
    }
}

/// Padding around a graphical element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Padding {
    /// Uniform padding in all directions
    Even(f32),
    /// Vertical and horizontal padding
    Center {
        /// Vertical padding
        v: f32,
        /// Horizontal padding
        h: f32,
    },
}

impl Padding {
    /// The top padding
    pub const fn top(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { v, .. } => *v,
        }
    }

    /// The right padding
    pub const fn right(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { h, .. } => *h,
        }
    }

    /// The bottom padding
    pub const fn bottom(&self) -> f32 {
        self.top()
    }

    /// The left padding
    pub const fn left(&self) -> f32 {
        self.right()
    }

    /// The total vertical padding
    pub const fn sum_ver(&self) -> f32 {
        self.top() * 2.0
    }

    /// The total horizontal padding
    pub const fn sum_hor(&self) -> f32 {
        self.right() * 2.0
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Padding::Even(value)
    }
}

impl From<(f32, f32)> for Padding {
    fn from((v, h): (f32, f32)) -> Self {
        Padding::Center { v, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_point() {
        let r = Rect::from_xywh(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains_point(&Point { x: 10.0, y: 20.0 }));
        assert!(r.contains_point(&Point { x: 30.0, y: 10.0 }));
        assert!(!r.contains_point(&Point { x: 9.0, y: 20.0 }));
        assert!(!r.contains_point(&Point { x: 20.0, y: 20.5 }));
    }

    #[test]
    fn rect_with_height() {
        let r = Rect::from_xywh(10.0, 10.0, 20.0, 10.0).with_height(4.0);
        assert_eq!(r.top_left(), Point { x: 10.0, y: 10.0 });
        assert_eq!(r.size(), Size::new(20.0, 4.0));

        let empty = r.with_height(0.0);
        assert!(empty.contains_point(&Point { x: 15.0, y: 10.0 }));
        assert!(!empty.contains_point(&Point { x: 15.0, y: 11.0 }));
    }

    #[test]
    fn padding_sums() {
        let p: Padding = (2.0, 4.0).into();
        assert_eq!(p.top(), 2.0);
        assert_eq!(p.left(), 4.0);
        assert_eq!(p.sum_ver(), 4.0);
        assert_eq!(p.sum_hor(), 8.0);
    }

    #[test]
    fn rect_path_bounds() {
        let path = Rect::from_xywh(1.0, 2.0, 4.0, 2.0).to_path().unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 1.0);
        assert_eq!(bounds.bottom(), 4.0);
    }
}
