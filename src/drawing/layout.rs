//! Horizontal layout of the fragments on a common baseline
use crate::drawing::{Ctx, Error, FragId, Fragment, Fragments};
use crate::{geom, missing_params, text};

/// Result of the layout of a fragment tree
#[derive(Debug, Clone)]
pub(super) struct Layout {
    rects: Vec<geom::Rect>,
    baseline: f32,
    size: geom::Size,
}

impl Layout {
    /// Rectangle of a fragment, in widget coordinates
    pub(super) fn rect(&self, id: FragId) -> Option<&geom::Rect> {
        self.rects.get(id.0)
    }

    /// Vertical position of the baseline shared by all labels
    pub(super) fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Size of the widget, padding included
    pub(super) fn size(&self) -> geom::Size {
        self.size
    }
}

/// Horizontal extent of a fragment relative to the baseline
#[derive(Debug, Clone, Copy, Default)]
struct Extent {
    x: f32,
    width: f32,
    ascent: f32,
    descent: f32,
}

impl Extent {
    fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Lay the fragments out from left to right.
///
/// Parentheses are measured at their scaled font size, all other labels at the base font size.
pub(super) fn layout<M>(frags: &Fragments, ctx: &Ctx<M>) -> Result<Layout, Error>
where
    M: text::Measure,
{
    let mut extents = vec![Extent::default(); frags.len()];
    if frags.is_empty() {
        return Ok(Layout {
            rects: Vec::new(),
            baseline: 0.0,
            size: geom::Size::new(0.0, 0.0),
        });
    }

    let root = place(frags, ctx, &mut extents, frags.root(), 1.0, 0.0)?;

    let padding = &ctx.config().padding;
    let baseline = padding.top() + root.ascent;
    let rects = extents
        .iter()
        .map(|e| {
            geom::Rect::from_xywh(
                padding.left() + e.x,
                baseline - e.ascent,
                e.width,
                e.ascent + e.descent,
            )
        })
        .collect();
    let size = geom::Size::new(
        root.width + padding.sum_hor(),
        root.ascent + root.descent + padding.sum_ver(),
    );

    log::trace!("layout of {} fragments: {:?}", frags.len(), size);

    Ok(Layout {
        rects,
        baseline,
        size,
    })
}

fn place<M>(
    frags: &Fragments,
    ctx: &Ctx<M>,
    extents: &mut [Extent],
    id: FragId,
    paren_scale: f32,
    x: f32,
) -> Result<Extent, Error>
where
    M: text::Measure,
{
    let font_size = ctx.config().font_size;
    let Some(frag) = frags.get(id) else {
        return Err(Error::UnknownFragment(id));
    };

    let ext = match frag {
        Fragment::Group { scale, .. } => {
            let scale = *scale / 100.0;
            place_row(frags, ctx, extents, &frag.children(), scale, x)?
        }
        Fragment::Inner { .. } | Fragment::Prefix { .. } => {
            place_row(frags, ctx, extents, &frag.children(), paren_scale, x)?
        }
        Fragment::Paren(side) => {
            let tm = ctx.measure(side.text(), font_size * paren_scale)?;
            Extent {
                x,
                width: tm.width,
                ascent: tm.ascent,
                descent: tm.descent,
            }
        }
        Fragment::Operator { label, .. } => {
            let tm = ctx.measure(label, font_size)?;
            Extent {
                x,
                width: tm.width + 2.0 * missing_params::OPERATOR_PADDING,
                ascent: tm.ascent,
                descent: tm.descent,
            }
        }
        Fragment::Number(field) => {
            let tm = ctx.measure("", font_size)?;
            let pad = missing_params::NUMBER_PADDING;
            Extent {
                x,
                width: field.width() + 2.0 * pad,
                ascent: tm.ascent + pad,
                descent: tm.descent + pad,
            }
        }
        Fragment::Symbol { label, .. } => {
            let tm = ctx.measure(label, font_size)?;
            Extent {
                x,
                width: tm.width,
                ascent: tm.ascent,
                descent: tm.descent,
            }
        }
    };

    extents[id.0] = ext;
    Ok(ext)
}

fn place_row<M>(
    frags: &Fragments,
    ctx: &Ctx<M>,
    extents: &mut [Extent],
    children: &[FragId],
    paren_scale: f32,
    x: f32,
) -> Result<Extent, Error>
where
    M: text::Measure,
{
    let mut row = Extent {
        x,
        ..Default::default()
    };
    let mut cursor = x;
    for child in children {
        let ext = place(frags, ctx, extents, *child, paren_scale, cursor)?;
        cursor = ext.right();
        row.ascent = row.ascent.max(ext.ascent);
        row.descent = row.descent.max(ext.descent);
    }
    row.width = cursor - x;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::{self, ExprTree, Sexpr};
    use crate::drawing::{Config, build, max_depth};
    use crate::tests::{Near, assert_near};
    use crate::text::FixedMeasure;

    fn layout_expr(expr: Sexpr) -> (Fragments, Layout) {
        let design = des::Widget::new(expr.clone());
        let config = Config::from(&design);
        let measure = FixedMeasure::default();
        let ctx = Ctx::new(&measure, &config);

        let tree = ExprTree::from_sexpr(&expr).unwrap();
        let mut frags = build::build(&tree, max_depth(&tree, tree.root()), config.paren_scale);
        let ids: Vec<FragId> = frags.iter().map(|(id, _)| id).collect();
        for id in ids {
            if let Some(field) = frags.number_mut(id) {
                field.update_width(&ctx).unwrap();
            }
        }
        let layout = layout(&frags, &ctx).unwrap();
        (frags, layout)
    }

    #[test]
    fn test_single_number() {
        let (frags, layout) = layout_expr(Sexpr::from(42));
        let rect = layout.rect(frags.root()).unwrap();

        // "42" is 16 wide, plus 2 of padding on each side
        assert_near!(abs, rect.width(), 20.0);
        // ascent 12.8 + descent 3.2 + 2 * 2 of padding
        assert_near!(abs, rect.height(), 20.0, 1e-5);
        assert_near!(abs, rect.x(), 4.0);
        assert_near!(abs, rect.y(), 4.0, 1e-5);
        assert_near!(abs, layout.baseline(), 18.8, 1e-5);
        assert_near!(abs, layout.size().width(), 28.0);
        assert_near!(abs, layout.size().height(), 28.0, 1e-5);
    }

    #[test]
    fn test_row_is_contiguous() {
        let (frags, layout) = layout_expr(Sexpr::seq(vec!["+".into(), "a".into(), "b".into()]));
        let Some(Fragment::Group {
            open, inner, close, ..
        }) = frags.get(frags.root())
        else {
            panic!("root is not a group");
        };
        let open = layout.rect(*open).unwrap();
        let inner = layout.rect(*inner).unwrap();
        let close = layout.rect(*close).unwrap();

        assert_near!(abs, open.right(), inner.left());
        assert_near!(abs, inner.right(), close.left());

        // "a" (8) + "+" (8 + 2 * 4) + "b" (8)
        assert_near!(abs, inner.width(), 32.0);

        // parens are drawn at 125%: 10 wide, taller than the labels
        assert_near!(abs, open.width(), 10.0);
        assert!(open.height() > inner.height());
        assert_near!(abs, open.bottom() - layout.baseline(), 0.2 * 20.0, 1e-5);
    }
}
