//! The operator chooser: a transient overlay offering substitutes for an operator
use std::f32::consts::PI;
use std::time::Duration;

use crate::des::{Fixity, NodeId};
use crate::drawing::{Ctx, Error, FragId};
use crate::{geom, missing_params, text};

/// Duration of the open and close animations
pub const TRANSITION: Duration = Duration::from_millis(200);

/// Animation phase of the chooser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fading in, with the elapsed time
    Opening(Duration),
    /// Fully visible
    Open,
    /// Fading out, with the elapsed time. Selection is no longer possible.
    Closing(Duration),
}

/// A choice of the chooser
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    label: String,
    rect: geom::Rect,
    origin: geom::Point,
}

impl Choice {
    /// The operator token
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The cell of the choice, in widget coordinates
    pub fn rect(&self) -> &geom::Rect {
        &self.rect
    }

    /// Start of the label baseline
    pub fn origin(&self) -> geom::Point {
        self.origin
    }
}

/// An open operator chooser
#[derive(Debug, Clone)]
pub struct Popup {
    pub(super) anchor: FragId,
    pub(super) node: NodeId,
    pub(super) fixity: Fixity,
    pub(super) choices: Vec<Choice>,
    pub(super) rect: geom::Rect,
    pub(super) phase: Phase,
    pub(super) entered: bool,
    pub(super) hovered: Option<usize>,
}

impl Popup {
    /// The operator fragment that opened the chooser
    pub fn anchor(&self) -> FragId {
        self.anchor
    }

    /// The node whose operator is substituted
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Fixity of the substituted operator
    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    /// The offered choices
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Bounds of the chooser, fully opened
    pub fn rect(&self) -> &geom::Rect {
        &self.rect
    }

    /// Animation phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the choice under the pointer
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether the close animation is running
    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing(_))
    }

    /// Current opacity, between 0 and 1
    pub fn opacity(&self) -> f32 {
        match self.phase {
            Phase::Opening(elapsed) => swing(elapsed),
            Phase::Open => 1.0,
            Phase::Closing(elapsed) => (1.0 - swing(elapsed)).max(0.0),
        }
    }

    /// Current height, relative to the full height.
    /// Height and opacity are animated together.
    pub fn height_factor(&self) -> f32 {
        self.opacity()
    }

    /// Visible part of the chooser
    pub fn visible_rect(&self) -> geom::Rect {
        self.rect
            .with_height(self.rect.height() * self.height_factor())
    }

    /// The choice at `point`
    pub fn choice_at(&self, point: &geom::Point) -> Option<usize> {
        if !self.visible_rect().contains_point(point) {
            return None;
        }
        self.choices
            .iter()
            .position(|c| c.rect.contains_point(point))
    }

    /// Start closing. A chooser still opening closes from its current state.
    pub(super) fn close(&mut self) {
        self.phase = match self.phase {
            Phase::Opening(elapsed) => Phase::Closing(TRANSITION.saturating_sub(elapsed)),
            Phase::Open => Phase::Closing(Duration::ZERO),
            closing => closing,
        };
        self.hovered = None;
    }

    /// Advance the animation.
    /// Returns `false` once the close animation is complete.
    pub(super) fn advance(&mut self, dt: Duration) -> bool {
        match self.phase {
            Phase::Opening(elapsed) => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed >= TRANSITION {
                    Phase::Open
                } else {
                    Phase::Opening(elapsed)
                };
                true
            }
            Phase::Open => true,
            Phase::Closing(elapsed) => {
                let elapsed = elapsed + dt;
                self.phase = Phase::Closing(elapsed.min(TRANSITION));
                elapsed < TRANSITION
            }
        }
    }
}

/// Animation easing, as the default easing of jQuery
fn swing(elapsed: Duration) -> f32 {
    let p = (elapsed.as_secs_f32() / TRANSITION.as_secs_f32()).clamp(0.0, 1.0);
    0.5 - (p * PI).cos() / 2.0
}

/// The operators offered in place of `current`: the vocabulary without `current`
pub fn choices<'a>(current: &str, vocabulary: &'a [String]) -> Vec<&'a str> {
    vocabulary
        .iter()
        .map(String::as_str)
        .filter(|op| *op != current)
        .collect()
}

/// Number of rows of a grid of `count` choices with `grid` choices per row
pub fn grid_rows(count: usize, grid: usize) -> usize {
    count.div_ceil(grid.max(1))
}

impl<M> Ctx<'_, M>
where
    M: text::Measure,
{
    /// Lay the choices out in a grid whose top-left corner is `at`
    pub(super) fn setup_popup(
        &self,
        anchor: FragId,
        node: NodeId,
        fixity: Fixity,
        at: geom::Point,
        labels: &[&str],
    ) -> Result<Popup, Error> {
        let font_size = self.config().font_size;
        let grid = self.config().operators.grid().max(1);
        let pad = missing_params::CHOICE_PADDING;

        let mut label_width: f32 = 0.0;
        let mut widths = Vec::with_capacity(labels.len());
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        for label in labels {
            let tm = self.measure(label, font_size)?;
            label_width = label_width.max(tm.width);
            ascent = ascent.max(tm.ascent);
            descent = descent.max(tm.descent);
            widths.push(tm.width);
        }

        let cell = geom::Size::new(label_width + 2.0 * pad, ascent + descent + 2.0 * pad);
        let choices = labels
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (label, width))| {
                let x = at.x + (i % grid) as f32 * cell.width();
                let y = at.y + (i / grid) as f32 * cell.height();
                Choice {
                    label: label.to_string(),
                    rect: geom::Rect::from_xywh(x, y, cell.width(), cell.height()),
                    origin: geom::Point {
                        x: x + (cell.width() - width) / 2.0,
                        y: y + pad + ascent,
                    },
                }
            })
            .collect();

        let cols = labels.len().min(grid);
        let rows = grid_rows(labels.len(), grid);
        let rect = geom::Rect::from_xywh(
            at.x,
            at.y,
            cols as f32 * cell.width(),
            rows as f32 * cell.height(),
        );

        Ok(Popup {
            anchor,
            node,
            fixity,
            choices,
            rect,
            phase: Phase::Opening(Duration::ZERO),
            entered: false,
            hovered: None,
        })
    }
}
