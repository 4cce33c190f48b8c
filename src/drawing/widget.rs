use std::time::Duration;

use crate::des::{self, ExprTree, NodeId, Slot};
use crate::drawing::{
    Config, Ctx, Error, FragId, Fragment, Fragments, Hit, NumberField, Phase, Popup, Side, build,
    chooser, class, depth, layout,
};
use crate::style::{Col, Style};
use crate::{geom, missing_params, render, text};

/// An edit written into the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// The operator of a node was substituted
    Operator {
        /// The edited node
        node: NodeId,
        /// The replaced token
        previous: String,
        /// The new token
        current: String,
    },
    /// The value of a numeric leaf was committed
    Number {
        /// The edited leaf
        node: NodeId,
        /// The slot of the leaf in its parent
        slot: Slot,
        /// The replaced value
        previous: f64,
        /// The new value
        current: f64,
    },
}

/// A prepared widget, ready to receive events and to be drawn.
///
/// The widget owns the expression tree for its whole lifetime.
/// Every edit is written into the tree, which can be read back at any time with [`Widget::expr`].
/// The shape of the tree never changes: only operator tokens and numeric values do.
#[derive(Debug)]
pub struct Widget<M> {
    tree: ExprTree,
    config: Config,
    max_depth: u32,
    pub(super) frags: Fragments,
    pub(super) layout: layout::Layout,
    pub(super) chooser: Option<Popup>,
    hovered: Option<FragId>,
    focused: Option<FragId>,
    measure: M,
}

impl<M> Widget<M>
where
    M: text::Measure,
{
    pub(super) fn prepare(design: &des::Widget, measure: M) -> Result<Self, Error> {
        let tree = design.validate()?;
        let config = Config::from(design);
        let max_depth = depth::max_depth(&tree, tree.root());
        let mut frags = build::build(&tree, max_depth, config.paren_scale);

        let ctx = Ctx::new(&measure, &config);
        let fields: Vec<FragId> = frags
            .iter()
            .filter(|(_, f)| matches!(f, Fragment::Number(_)))
            .map(|(id, _)| id)
            .collect();
        for id in fields {
            if let Some(field) = frags.number_mut(id) {
                field.update_width(&ctx)?;
            }
        }
        let layout = layout::layout(&frags, &ctx)?;

        log::debug!(
            "prepared widget of {} nodes and {} fragments, max depth {}, size {}x{}",
            tree.len(),
            frags.len(),
            max_depth,
            layout.size().width(),
            layout.size().height()
        );

        Ok(Widget {
            tree,
            config,
            max_depth,
            frags,
            layout,
            chooser: None,
            hovered: None,
            focused: None,
            measure,
        })
    }

    /// Handle a click at `point`, in widget coordinates.
    ///
    /// - A click outside of the focused numeric field commits it, including a click on the chooser.
    ///   Invalid text is reverted and reported in the logs only.
    /// - A click on a choice substitutes the operator and closes the chooser.
    /// - A click on an operator opens the chooser, replacing any open one.
    /// - A click on a numeric field focuses it.
    /// - A click elsewhere closes the chooser.
    ///
    /// Returns the edits written into the tree.
    pub fn click(&mut self, point: geom::Point) -> Result<Vec<Change>, Error> {
        let hit = self.hit_test(point);
        let mut changes = Vec::new();

        let target = match hit {
            Some(Hit::Fragment(id)) => Some(id),
            _ => None,
        };

        if let Some(focused) = self.focused.filter(|f| Some(*f) != target) {
            match self.commit_number(focused) {
                Ok(change) => changes.push(change),
                Err(Error::InvalidNumber(text)) => {
                    log::warn!("discarded invalid number {:?}", text);
                }
                Err(err) => return Err(err),
            }
        }

        match hit {
            Some(Hit::Choice(idx)) => {
                changes.push(self.select_operator(idx)?);
                return Ok(changes);
            }
            Some(Hit::Popup) => return Ok(changes),
            _ => (),
        }

        match target.and_then(|id| self.frags.get(id).map(|f| (id, f))) {
            Some((id, Fragment::Operator { .. })) => {
                self.open_chooser(id)?;
            }
            Some((id, Fragment::Number(_))) => {
                self.close_chooser();
                self.focus(id)?;
            }
            _ => {
                self.close_chooser();
            }
        }

        Ok(changes)
    }

    /// Replace the text of a numeric field, as typed by the user, and resize it.
    ///
    /// The field gets the focus. The uncommitted text of a previously focused field is reverted.
    /// The tree is not modified until [`commit_number`](Widget::commit_number) is called.
    pub fn edit_number(&mut self, id: FragId, text: impl Into<String>) -> Result<(), Error> {
        self.focus(id)?;

        let ctx = Ctx::new(&self.measure, &self.config);
        let field = self
            .frags
            .number_mut(id)
            .ok_or(Error::NotANumberField(id))?;
        field.set_text(text.into());
        let resized = field.update_width(&ctx)?;

        if resized {
            self.relayout()?;
        }
        Ok(())
    }

    /// Commit the text of a numeric field into the tree, and blur the field.
    ///
    /// If the text is not a finite number, the tree is left untouched,
    /// the field text reverts to the value of the tree and [`Error::InvalidNumber`] is returned.
    pub fn commit_number(&mut self, id: FragId) -> Result<Change, Error> {
        let field = self
            .frags
            .number(id)
            .ok_or_else(|| self.field_error(id))?;
        let (node, slot) = (field.node(), field.slot());

        let current = match NumberField::parse(field.text()) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("rejected text {:?} for node {}", field.text(), node);
                self.revert(id)?;
                return Err(err);
            }
        };

        let previous = self.tree.set_number(node, current)?;
        self.blur(id);

        log::debug!("number {} changed from {} to {}", node, previous, current);
        Ok(Change::Number {
            node,
            slot,
            previous,
            current,
        })
    }

    /// Open the chooser for the operator fragment `id`.
    ///
    /// The chooser offers every operator of the vocabulary of the same fixity,
    /// except the current one. If there is nothing to offer, the chooser is not opened
    /// and `false` is returned.
    pub fn open_chooser(&mut self, id: FragId) -> Result<bool, Error> {
        let (slot, fixity) = match self.frags.get(id) {
            Some(Fragment::Operator { slot, fixity, .. }) => (*slot, *fixity),
            Some(_) => return Err(Error::NotAnOperator(id)),
            None => return Err(Error::UnknownFragment(id)),
        };
        let node = self.tree.resolve(slot)?;
        let current = self
            .tree
            .node(node)
            .operator()
            .map(|(op, _)| op)
            .unwrap_or_default();

        let labels = chooser::choices(current, self.config.operators.vocabulary(fixity));
        if labels.is_empty() {
            log::debug!("no substitute for operator {:?}, chooser not opened", current);
            return Ok(false);
        }

        let at = self
            .layout
            .rect(id)
            .map(|r| r.top_left())
            .ok_or(Error::UnknownFragment(id))?;
        let ctx = Ctx::new(&self.measure, &self.config);
        let popup = ctx.setup_popup(id, node, fixity, at, &labels)?;

        log::debug!(
            "opening chooser of node {} with {} choices",
            node,
            popup.choices().len()
        );
        if let Some(prev) = self.chooser.replace(popup) {
            log::debug!("replaced chooser of node {}", prev.node());
        }
        Ok(true)
    }

    /// Select the choice `index` of the open chooser.
    ///
    /// The operator of the node is substituted, and the chooser closes.
    /// A closing chooser does not accept selection.
    pub fn select_operator(&mut self, index: usize) -> Result<Change, Error> {
        let popup = self
            .chooser
            .as_ref()
            .filter(|p| !p.is_closing())
            .ok_or(Error::NoChooser)?;
        let choice = popup
            .choices()
            .get(index)
            .ok_or(Error::UnknownChoice(index))?;
        let node = popup.node();
        let token = choice.label().to_string();

        if let Some(popup) = self.chooser.as_mut() {
            popup.close();
        }
        self.set_operator(node, token)
    }

    /// Substitute the operator of `node` programmatically.
    ///
    /// The token is not required to belong to the vocabulary.
    /// A chooser open on `node` is closed, as its choices no longer exclude the shown operator.
    pub fn set_operator(&mut self, node: NodeId, token: impl Into<String>) -> Result<Change, Error> {
        let current = token.into();
        let previous = self.tree.set_operator(node, current.clone())?;

        if let Some(popup) = self
            .chooser
            .as_mut()
            .filter(|p| p.node() == node && !p.is_closing())
        {
            log::debug!("closing stale chooser of node {}", node);
            popup.close();
        }

        for (_, frag) in self.frags.iter_mut() {
            if let Fragment::Operator { slot, label, .. } = frag {
                if *slot == Slot::Operator(node) {
                    *label = current.clone();
                }
            }
        }
        self.relayout()?;

        log::debug!(
            "operator of node {} changed from {:?} to {:?}",
            node,
            previous,
            current
        );
        Ok(Change::Operator {
            node,
            previous,
            current,
        })
    }

    /// Set the value of a numeric leaf programmatically.
    ///
    /// Uncommitted text of the corresponding field is discarded.
    pub fn set_number(&mut self, node: NodeId, value: f64) -> Result<Change, Error> {
        if !value.is_finite() {
            return Err(Error::InvalidNumber(des::expr::format_number(value)));
        }
        let previous = self.tree.set_number(node, value)?;
        let field = self
            .frags
            .iter()
            .find(|(_, f)| matches!(f, Fragment::Number(n) if n.node() == node))
            .map(|(id, _)| id);

        let mut slot = Slot::Root;
        if let Some(id) = field {
            if let Some(f) = self.frags.number(id) {
                slot = f.slot();
            }
            self.revert(id)?;
        }

        Ok(Change::Number {
            node,
            slot,
            previous,
            current: value,
        })
    }

    fn focus(&mut self, id: FragId) -> Result<(), Error> {
        if self.frags.number(id).is_none() {
            return Err(self.field_error(id));
        }
        if self.focused == Some(id) {
            return Ok(());
        }
        if let Some(prev) = self.focused {
            log::debug!("focus moved from {} to {}, reverting {}", prev, id, prev);
            self.revert(prev)?;
        }
        if let Some(field) = self.frags.number_mut(id) {
            field.set_focused(true);
        }
        self.focused = Some(id);
        Ok(())
    }

    /// Reset the text of a field to the value of the tree, and blur it
    fn revert(&mut self, id: FragId) -> Result<(), Error> {
        let ctx = Ctx::new(&self.measure, &self.config);
        let field = self
            .frags
            .number_mut(id)
            .ok_or(Error::NotANumberField(id))?;
        let value = self
            .tree
            .node(field.node())
            .number()
            .ok_or(des::Error::NotANumber(field.node()))?;
        field.set_text(des::expr::format_number(value));
        field.set_focused(false);
        let resized = field.update_width(&ctx)?;

        if self.focused == Some(id) {
            self.focused = None;
        }
        if resized {
            self.relayout()?;
        }
        Ok(())
    }

    fn relayout(&mut self) -> Result<(), Error> {
        let ctx = Ctx::new(&self.measure, &self.config);
        self.layout = layout::layout(&self.frags, &ctx)?;
        Ok(())
    }
}

impl<M> Widget<M> {
    /// The expression tree, reflecting all the edits
    pub fn expr(&self) -> &ExprTree {
        &self.tree
    }

    /// Size of the widget, without the chooser
    pub fn size(&self) -> geom::Size {
        self.layout.size()
    }

    /// Size of the area covered by the widget and its chooser
    pub fn bounds(&self) -> geom::Size {
        let size = self.size();
        match &self.chooser {
            Some(popup) => geom::Size::new(
                size.width().max(popup.rect().right()),
                size.height().max(popup.rect().bottom()),
            ),
            None => size,
        }
    }

    /// Maximum depth of the tree, the reference depth for parenthesis sizes
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The fragment arena
    pub fn fragments(&self) -> &Fragments {
        &self.frags
    }

    /// The fragment identified by `id`
    pub fn fragment(&self, id: FragId) -> Option<&Fragment> {
        self.frags.get(id)
    }

    /// The fragment displaying `node`: the operator label of interior nodes, the leaf itself otherwise
    pub fn fragment_of(&self, node: NodeId) -> Option<FragId> {
        self.frags
            .iter()
            .find(|(_, f)| match f {
                Fragment::Operator { slot, .. } => *slot == Slot::Operator(node),
                Fragment::Number(field) => field.node() == node,
                Fragment::Symbol { node: n, .. } => *n == node,
                _ => false,
            })
            .map(|(id, _)| id)
    }

    /// Rectangle of a fragment, in widget coordinates
    pub fn rect(&self, id: FragId) -> Option<&geom::Rect> {
        self.layout.rect(id)
    }

    /// Size of the parentheses of a group, in percent of the font size.
    /// Accepts the group or one of its parentheses.
    pub fn paren_scale_of(&self, id: FragId) -> Option<f32> {
        let group = self.frags.paren_group(id).unwrap_or(id);
        match self.frags.get(group)? {
            Fragment::Group { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    /// Whether a group is highlighted.
    /// Accepts the group, one of its parentheses or its inner part.
    pub fn is_highlighted(&self, id: FragId) -> bool {
        let group = match self.frags.get(id) {
            Some(Fragment::Paren(_)) | Some(Fragment::Inner { .. }) => self.frags.parent(id),
            Some(_) => Some(id),
            None => None,
        };
        matches!(
            group.and_then(|g| self.frags.get(g)),
            Some(Fragment::Group {
                highlighted: true,
                ..
            })
        )
    }

    /// The numeric field of a fragment
    pub fn number_field(&self, id: FragId) -> Option<&NumberField> {
        self.frags.number(id)
    }

    /// The node and token of a symbol fragment
    pub fn symbol_at(&self, id: FragId) -> Option<(NodeId, &str)> {
        match self.frags.get(id)? {
            Fragment::Symbol { node, label } => Some((*node, label.as_str())),
            _ => None,
        }
    }

    /// The operator chooser, while open or closing
    pub fn chooser(&self) -> Option<&Popup> {
        self.chooser.as_ref()
    }

    /// The fragment under the pointer
    pub fn hovered(&self) -> Option<FragId> {
        self.hovered
    }

    /// The focused numeric field
    pub fn focused(&self) -> Option<FragId> {
        self.focused
    }

    /// Handle a pointer move to `point`, in widget coordinates.
    ///
    /// Hovering a parenthesis highlights its group.
    /// Leaving the chooser after having entered it closes the chooser.
    /// Returns whether the widget needs to be redrawn.
    pub fn pointer_move(&mut self, point: geom::Point) -> bool {
        let mut dirty = false;
        let mut over_popup = false;

        if let Some(popup) = self.chooser.as_mut().filter(|p| !p.is_closing()) {
            if popup.visible_rect().contains_point(&point) {
                over_popup = true;
                popup.entered = true;
                let hovered = popup.choice_at(&point);
                if hovered != popup.hovered {
                    popup.hovered = hovered;
                    dirty = true;
                }
            } else if popup.entered {
                log::debug!("pointer left the chooser of node {}", popup.node);
                popup.close();
                dirty = true;
            }
        }

        let hovered = if over_popup {
            None
        } else {
            self.fragment_at(&point)
        };
        self.set_hovered(hovered) || dirty
    }

    /// Handle the pointer leaving the widget.
    /// Returns whether the widget needs to be redrawn.
    pub fn pointer_leave(&mut self) -> bool {
        let mut dirty = self.set_hovered(None);
        if let Some(popup) = self
            .chooser
            .as_mut()
            .filter(|p| p.entered && !p.is_closing())
        {
            popup.close();
            dirty = true;
        }
        dirty
    }

    /// Start closing the chooser, if any.
    /// Returns whether a chooser started closing.
    pub fn close_chooser(&mut self) -> bool {
        match self.chooser.as_mut().filter(|p| !p.is_closing()) {
            Some(popup) => {
                popup.close();
                true
            }
            None => false,
        }
    }

    /// Advance the chooser animation by `dt`.
    /// The chooser is removed once its close animation is complete.
    /// Returns whether the widget needs to be redrawn.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(popup) = self.chooser.as_mut() else {
            return false;
        };
        let animating = popup.phase() != Phase::Open;
        if !popup.advance(dt) {
            log::debug!("chooser of node {} closed", popup.node);
            self.chooser = None;
        }
        animating
    }

    fn set_hovered(&mut self, hovered: Option<FragId>) -> bool {
        if hovered == self.hovered {
            return false;
        }
        let prev_group = self.hovered.and_then(|id| self.frags.paren_group(id));
        let next_group = hovered.and_then(|id| self.frags.paren_group(id));
        if prev_group != next_group {
            if let Some(group) = prev_group {
                self.frags.set_highlighted(group, false);
            }
            if let Some(group) = next_group {
                self.frags.set_highlighted(group, true);
            }
        }
        self.hovered = hovered;
        true
    }

    fn blur(&mut self, id: FragId) {
        if let Some(field) = self.frags.number_mut(id) {
            field.set_focused(false);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn field_error(&self, id: FragId) -> Error {
        if self.frags.get(id).is_some() {
            Error::NotANumberField(id)
        } else {
            Error::UnknownFragment(id)
        }
    }

    /// Draw the widget on `surface`, resolving colors with `style`
    pub fn draw<S>(&self, surface: &mut S, style: &Style)
    where
        S: render::Surface,
    {
        surface.prepare(self.bounds());

        let root = geom::Rect::from_ps(geom::Point { x: 0.0, y: 0.0 }, self.size());
        surface.draw_rect(&render::Rect {
            rect: root,
            fill: Some(style.paint(Col::Background, 1.0)),
            stroke: None,
            transform: None,
            class: Some(class::ROOT),
        });

        self.draw_fragment(surface, style, self.frags.root());

        if let Some(popup) = &self.chooser {
            self.draw_popup(surface, style, popup);
        }
    }

    fn draw_fragment<S>(&self, surface: &mut S, style: &Style, id: FragId)
    where
        S: render::Surface,
    {
        let (Some(frag), Some(rect)) = (self.frags.get(id), self.layout.rect(id)) else {
            return;
        };
        let baseline = self.layout.baseline();

        match frag {
            Fragment::Group {
                open,
                inner,
                close,
                scale,
                highlighted,
                ..
            } => {
                if *highlighted {
                    if let Some(inner_rect) = self.layout.rect(*inner) {
                        surface.draw_rect(&render::Rect {
                            rect: *inner_rect,
                            fill: Some(style.paint(Col::InnerHighlight, 1.0)),
                            stroke: None,
                            transform: None,
                            class: Some(class::INNER_HIGHLIGHT),
                        });
                    }
                }
                self.draw_paren(surface, style, *open, Side::Open, *scale, *highlighted);
                self.draw_fragment(surface, style, *inner);
                self.draw_paren(surface, style, *close, Side::Close, *scale, *highlighted);
            }
            // drawn with their group
            Fragment::Paren(_) => (),
            Fragment::Inner { .. } | Fragment::Prefix { .. } => {
                for child in frag.children() {
                    self.draw_fragment(surface, style, child);
                }
            }
            Fragment::Operator { label, .. } => {
                let origin = geom::Point {
                    x: rect.x() + missing_params::OPERATOR_PADDING,
                    y: baseline,
                };
                self.draw_label(
                    surface,
                    label,
                    origin,
                    self.config.font_size,
                    style.paint(Col::Operator, 1.0),
                    class::OPERATOR,
                );
            }
            Fragment::Number(field) => {
                let pattern = if field.is_focused() {
                    render::LinePattern::Dash(&missing_params::FOCUS_DASH)
                } else {
                    render::LinePattern::Solid
                };
                surface.draw_rect(&render::Rect {
                    rect: *rect,
                    fill: Some(style.paint(Col::NumberFill, 1.0)),
                    stroke: Some(style.stroke(
                        Col::NumberBorder,
                        missing_params::NUMBER_BORDER_WIDTH,
                        pattern,
                        1.0,
                    )),
                    transform: None,
                    class: None,
                });
                let origin = geom::Point {
                    x: rect.x() + missing_params::NUMBER_PADDING,
                    y: baseline,
                };
                self.draw_label(
                    surface,
                    field.text(),
                    origin,
                    self.config.font_size,
                    style.paint(Col::Foreground, 1.0),
                    class::NUMBER,
                );
            }
            Fragment::Symbol { label, .. } => {
                let origin = geom::Point {
                    x: rect.x(),
                    y: baseline,
                };
                self.draw_label(
                    surface,
                    label,
                    origin,
                    self.config.font_size,
                    style.paint(Col::Foreground, 1.0),
                    class::VARIABLE,
                );
            }
        }
    }

    fn draw_paren<S>(
        &self,
        surface: &mut S,
        style: &Style,
        id: FragId,
        side: Side,
        scale: f32,
        highlighted: bool,
    ) where
        S: render::Surface,
    {
        let Some(rect) = self.layout.rect(id) else {
            return;
        };
        let (col, cls) = if highlighted {
            (Col::OuterHighlight, class::PAREN_HIGHLIGHT)
        } else {
            (Col::Foreground, class::PAREN)
        };
        let origin = geom::Point {
            x: rect.x(),
            y: self.layout.baseline(),
        };
        self.draw_label(
            surface,
            side.text(),
            origin,
            self.config.font_size * scale / 100.0,
            style.paint(col, 1.0),
            cls,
        );
    }

    fn draw_popup<S>(&self, surface: &mut S, style: &Style, popup: &Popup)
    where
        S: render::Surface,
    {
        let opacity = popup.opacity();
        if opacity <= 0.0 {
            return;
        }
        let visible = popup.visible_rect();
        surface.push_clip(&render::Clip {
            rect: &visible,
            transform: None,
        });

        surface.draw_rect(&render::Rect {
            rect: *popup.rect(),
            fill: Some(style.paint(Col::PopupFill, opacity)),
            stroke: Some(style.stroke(
                Col::PopupBorder,
                missing_params::POPUP_BORDER_WIDTH,
                render::LinePattern::Solid,
                opacity,
            )),
            transform: None,
            class: Some(class::POPUP),
        });

        for (i, choice) in popup.choices().iter().enumerate() {
            if popup.hovered() == Some(i) {
                surface.draw_rect(&render::Rect {
                    rect: *choice.rect(),
                    fill: Some(style.paint(Col::ChoiceHover, opacity)),
                    stroke: None,
                    transform: None,
                    class: None,
                });
            }
            self.draw_label(
                surface,
                choice.label(),
                choice.origin(),
                self.config.font_size,
                style.paint(Col::Operator, opacity),
                class::OPERATOR,
            );
        }

        surface.pop_clip();
    }

    fn draw_label<S>(
        &self,
        surface: &mut S,
        text: &str,
        origin: geom::Point,
        font_size: f32,
        fill: render::Paint,
        class: &str,
    ) where
        S: render::Surface,
    {
        surface.draw_text(&render::Text {
            text,
            origin,
            font: &self.config.font,
            font_size,
            fill,
            class: Some(class),
        });
    }
}
