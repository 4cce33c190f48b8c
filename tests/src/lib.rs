#![cfg(test)]

use expedite::des::{self, NodeId, Sexpr};
use expedite::drawing::{FragId, Widget};
use expedite::text::FixedMeasure;
use expedite::{Prepare, Style, geom};
use expedite_svg::{DrawingParams, SaveSvg};

mod tests;

/// `["+", 1, ["×", 2, 3]]`
fn nested() -> Sexpr {
    Sexpr::seq(vec![
        "+".into(),
        1.into(),
        Sexpr::seq(vec!["×".into(), 2.into(), 3.into()]),
    ])
}

fn prepare(expr: Sexpr) -> Widget<FixedMeasure> {
    des::Widget::new(expr)
        .prepare(FixedMeasure::default())
        .unwrap()
}

fn widget_to_svg(widget: &Widget<FixedMeasure>, style: Style) -> String {
    let params = DrawingParams { style, scale: 1.0 };
    let mut buf = Vec::new();
    widget.to_svg(&params).write(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn node_at(widget: &Widget<FixedMeasure>, path: &[usize]) -> NodeId {
    let tree = widget.expr();
    path.iter()
        .fold(tree.root(), |id, idx| tree.node(id).operand(*idx).unwrap())
}

fn center_of(widget: &Widget<FixedMeasure>, id: FragId) -> geom::Point {
    let r = widget.rect(id).unwrap();
    geom::Point {
        x: r.center_x(),
        y: r.y() + r.height() / 2.0,
    }
}

/// Outside of the widget and of any chooser
fn outside() -> geom::Point {
    geom::Point { x: -10.0, y: -10.0 }
}

/// Whether a text element displays `label`
fn has_label(svg: &str, label: &str) -> bool {
    svg.contains(&format!(">{label}</text>")) || svg.contains(&format!(">\n{label}\n</text>"))
}

fn count(svg: &str, pattern: &str) -> usize {
    svg.matches(pattern).count()
}

macro_rules! assert_svg_eq {
    ($actual:expr, $expected:expr) => {
        let actual: &str = &$actual;
        let expected: &str = &$expected;
        if actual != expected {
            let diff = similar::TextDiff::from_lines(expected, actual);
            panic!(
                "SVG assertion failed\n{}",
                diff.unified_diff().header("expected", "actual")
            );
        }
    };
}

pub(crate) use assert_svg_eq;
