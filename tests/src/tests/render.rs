use expedite::{Prepare, Style};
use expedite::des::Sexpr;
use expedite::drawing::{Fragment, class};

use crate::{count, has_label, nested, prepare, widget_to_svg};

#[test]
fn render_classes() {
    let widget = prepare(nested());
    let svg = widget_to_svg(&widget, Style::light());

    assert_eq!(count(&svg, "class=\"expedite\""), 1);
    assert_eq!(count(&svg, "class=\"expedite-paren\""), 4);
    assert_eq!(count(&svg, "class=\"expedite-operator\""), 2);
    assert_eq!(count(&svg, "class=\"expedite-number\""), 3);
    assert_eq!(count(&svg, "class=\"expedite-variable\""), 0);
    assert!(!svg.contains("highlight"));
    assert!(!svg.contains("expedite-popup"));
}

#[test]
fn render_paren_sizes() {
    let widget = prepare(nested());
    let svg = widget_to_svg(&widget, Style::light());

    // outer group at 150% of 16, inner group at 125%
    assert_eq!(count(&svg, "font-size=\"24\""), 2);
    assert_eq!(count(&svg, "font-size=\"20\""), 2);
    // operators and numbers at the base size
    assert_eq!(count(&svg, "font-size=\"16\""), 5);
}

#[test]
fn render_custom_paren_scale() {
    let widget = expedite::des::Widget::new(nested())
        .with_paren_scale(50.0)
        .prepare(expedite::text::FixedMeasure::default())
        .unwrap();
    let svg = widget_to_svg(&widget, Style::light());

    // 200% and 150% of 16
    assert_eq!(count(&svg, "font-size=\"32\""), 2);
    assert_eq!(count(&svg, "font-size=\"24\""), 2);
}

#[test]
fn render_unary() {
    let widget = prepare(Sexpr::seq(vec![
        "not".into(),
        Sexpr::seq(vec!["=".into(), "a".into(), "b".into()]),
    ]));
    let svg = widget_to_svg(&widget, Style::light());

    // the prefix node has no parentheses
    assert_eq!(count(&svg, "class=\"expedite-paren\""), 2);
    assert_eq!(count(&svg, "class=\"expedite-variable\""), 2);
    assert!(has_label(&svg, "not"));
    assert!(has_label(&svg, "a"));
    assert!(has_label(&svg, "b"));
}

#[test]
fn render_single_leaf() {
    let widget = prepare(Sexpr::from(42));
    assert!(matches!(
        widget.fragment(widget.fragments().root()),
        Some(Fragment::Number(_))
    ));
    let svg = widget_to_svg(&widget, Style::light());

    assert!(has_label(&svg, "42"));
    assert_eq!(count(&svg, &format!("class=\"{}\"", class::PAREN)), 0);
}

#[test]
fn render_themes() {
    let widget = prepare(nested());
    let light = widget_to_svg(&widget, Style::light());
    let dark = widget_to_svg(&widget, Style::dark());

    assert!(light.contains("fill=\"#ffffff\""));
    assert_ne!(light, dark);
}

#[test]
fn render_is_deterministic() {
    let widget = prepare(nested());
    let first = widget_to_svg(&widget, Style::light());
    let second = widget_to_svg(&prepare(nested()), Style::light());
    crate::assert_svg_eq!(second, first);
}
