use expedite::{Prepare, Style};
use expedite::des::{Operators, Sexpr};
use expedite::drawing::{Change, Error, Fragment, TRANSITION};

use crate::{
    assert_svg_eq, center_of, count, has_label, nested, node_at, outside, prepare, widget_to_svg,
};

#[test]
fn interact_paren_highlight() {
    let mut widget = prepare(nested());
    let initial = widget_to_svg(&widget, Style::light());

    let Some(Fragment::Group { open, .. }) = widget.fragment(widget.fragments().root()) else {
        panic!("root is not a group");
    };
    let open = *open;
    assert!(widget.pointer_move(center_of(&widget, open)));

    let svg = widget_to_svg(&widget, Style::light());
    assert_eq!(
        count(&svg, "class=\"expedite-paren expedite-outer-highlight\""),
        2
    );
    assert_eq!(count(&svg, "class=\"expedite-paren\""), 2);
    assert_eq!(count(&svg, "class=\"expedite-inner-highlight\""), 1);

    assert!(widget.pointer_leave());
    assert_svg_eq!(widget_to_svg(&widget, Style::light()), initial);
}

#[test]
fn interact_number_commit() {
    let mut widget = prepare(nested());
    let one = widget.fragment_of(node_at(&widget, &[1])).unwrap();

    let changes = widget.click(center_of(&widget, one)).unwrap();
    assert!(changes.is_empty());
    assert_eq!(widget.focused(), Some(one));
    let svg = widget_to_svg(&widget, Style::light());
    assert_eq!(count(&svg, "stroke-dasharray"), 1);

    widget.edit_number(one, "4.5").unwrap();
    let changes = widget.click(outside()).unwrap();
    assert_eq!(
        changes,
        vec![Change::Number {
            node: node_at(&widget, &[1]),
            slot: widget.number_field(one).unwrap().slot(),
            previous: 1.0,
            current: 4.5,
        }]
    );
    assert_eq!(widget.focused(), None);
    assert_eq!(
        widget.expr().to_sexpr().to_string(),
        r#"["+", 4.5, ["×", 2, 3]]"#
    );

    let svg = widget_to_svg(&widget, Style::light());
    assert!(has_label(&svg, "4.5"));
    assert_eq!(count(&svg, "stroke-dasharray"), 0);
}

#[test]
fn interact_number_invalid() {
    let mut widget = prepare(nested());
    let initial = widget_to_svg(&widget, Style::light());
    let one = widget.fragment_of(node_at(&widget, &[1])).unwrap();

    widget.click(center_of(&widget, one)).unwrap();
    widget.edit_number(one, "twelve").unwrap();
    let svg = widget_to_svg(&widget, Style::light());
    assert!(has_label(&svg, "twelve"));

    let changes = widget.click(outside()).unwrap();
    assert!(changes.is_empty());
    assert_eq!(
        widget.expr().to_sexpr().to_string(),
        r#"["+", 1, ["×", 2, 3]]"#
    );
    assert_svg_eq!(widget_to_svg(&widget, Style::light()), initial);
}

#[test]
fn interact_chooser_select() {
    let mut widget = prepare(nested());
    let plus = widget.fragment_of(widget.expr().root()).unwrap();

    widget.click(center_of(&widget, plus)).unwrap();
    assert!(widget.chooser().is_some());

    // nothing visible before the animation runs
    let svg = widget_to_svg(&widget, Style::light());
    assert!(!svg.contains("expedite-popup"));

    assert!(widget.tick(TRANSITION));
    let svg = widget_to_svg(&widget, Style::light());
    assert_eq!(count(&svg, "class=\"expedite expedite-popup\""), 1);
    assert!(svg.contains("clip-path"));
    // 2 in the expression, every other infix operator in the chooser
    assert_eq!(count(&svg, "class=\"expedite-operator\""), 2 + 12);

    let minus = widget
        .chooser()
        .unwrap()
        .choices()
        .iter()
        .find(|c| c.label() == "-")
        .map(|c| expedite::geom::Point {
            x: c.rect().center_x(),
            y: c.rect().y() + c.rect().height() / 2.0,
        })
        .unwrap();
    let changes = widget.click(minus).unwrap();
    assert_eq!(
        changes,
        vec![Change::Operator {
            node: widget.expr().root(),
            previous: "+".to_string(),
            current: "-".to_string(),
        }]
    );
    assert!(widget.chooser().unwrap().is_closing());

    widget.tick(TRANSITION);
    assert!(widget.chooser().is_none());

    let expected = prepare(Sexpr::seq(vec![
        "-".into(),
        1.into(),
        Sexpr::seq(vec!["×".into(), 2.into(), 3.into()]),
    ]));
    assert_svg_eq!(
        widget_to_svg(&widget, Style::light()),
        widget_to_svg(&expected, Style::light())
    );
}

#[test]
fn interact_chooser_pointer_leave() {
    let mut widget = prepare(nested());
    let plus = widget.fragment_of(widget.expr().root()).unwrap();

    widget.click(center_of(&widget, plus)).unwrap();
    widget.tick(TRANSITION);

    // leaving before entering keeps the chooser open
    widget.pointer_move(outside());
    assert!(!widget.chooser().unwrap().is_closing());

    let first = widget.chooser().unwrap().choices()[0].rect().top_left();
    let inside = expedite::geom::Point {
        x: first.x + 1.0,
        y: first.y + 1.0,
    };
    assert!(widget.pointer_move(inside));
    assert_eq!(widget.chooser().unwrap().hovered(), Some(0));

    assert!(widget.pointer_move(outside()));
    assert!(widget.chooser().unwrap().is_closing());

    widget.tick(TRANSITION);
    assert!(widget.chooser().is_none());
    let svg = widget_to_svg(&widget, Style::light());
    assert!(!svg.contains("expedite-popup"));
}

#[test]
fn interact_set_operator_out_of_vocabulary() {
    let mut widget = prepare(nested());
    let times = node_at(&widget, &[2]);

    widget.set_operator(times, "mod").unwrap();
    let svg = widget_to_svg(&widget, Style::light());
    assert!(has_label(&svg, "mod"));
    assert_eq!(
        widget.expr().to_sexpr().to_string(),
        r#"["+", 1, ["mod", 2, 3]]"#
    );
}

#[test]
fn interact_set_operator_closes_chooser() {
    let expr = Sexpr::seq(vec!["=".into(), "a".into(), "b".into()]);
    let mut widget = expedite::des::Widget::new(expr)
        .with_operators(Operators::new(["=", "≠", ">"], ["not"]))
        .prepare(expedite::text::FixedMeasure::default())
        .unwrap();
    let root = widget.expr().root();
    let eq = widget.fragment_of(root).unwrap();

    assert!(widget.open_chooser(eq).unwrap());
    widget.tick(TRANSITION);
    let labels: Vec<&str> = widget
        .chooser()
        .unwrap()
        .choices()
        .iter()
        .map(|c| c.label())
        .collect();
    assert_eq!(labels, vec!["≠", ">"]);

    widget.set_operator(root, ">").unwrap();
    assert!(widget.chooser().unwrap().is_closing());
    assert!(matches!(widget.select_operator(1), Err(Error::NoChooser)));
    assert_eq!(widget.expr().to_sexpr().to_string(), r#"[">", "a", "b"]"#);

    widget.tick(TRANSITION);
    assert!(widget.chooser().is_none());
}

#[test]
fn interact_chooser_select_commits_number() {
    let mut widget = prepare(nested());
    let plus = widget.fragment_of(widget.expr().root()).unwrap();
    let one = widget.fragment_of(node_at(&widget, &[1])).unwrap();

    widget.click(center_of(&widget, plus)).unwrap();
    widget.tick(TRANSITION);
    widget.edit_number(one, "7").unwrap();
    assert_eq!(widget.focused(), Some(one));

    let minus = widget
        .chooser()
        .unwrap()
        .choices()
        .iter()
        .find(|c| c.label() == "-")
        .map(|c| expedite::geom::Point {
            x: c.rect().center_x(),
            y: c.rect().y() + c.rect().height() / 2.0,
        })
        .unwrap();
    let changes = widget.click(minus).unwrap();

    assert_eq!(changes.len(), 2);
    assert!(matches!(
        &changes[0],
        Change::Number { previous, current, .. } if *previous == 1.0 && *current == 7.0
    ));
    assert!(matches!(&changes[1], Change::Operator { current, .. } if current == "-"));
    assert_eq!(widget.focused(), None);
    assert_eq!(
        widget.expr().to_sexpr().to_string(),
        r#"["-", 7, ["×", 2, 3]]"#
    );
}
