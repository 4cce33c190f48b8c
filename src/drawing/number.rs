use crate::des::{self, NodeId, Slot};
use crate::drawing::{Ctx, Error};
use crate::text;

/// Editable text state of a numeric leaf
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    node: NodeId,
    slot: Slot,
    text: String,
    width: f32,
    focused: bool,
}

impl NumberField {
    pub(super) fn new(node: NodeId, slot: Slot, value: f64) -> Self {
        NumberField {
            node,
            slot,
            text: des::expr::format_number(value),
            width: 0.0,
            focused: false,
        }
    }

    /// The numeric leaf edited by this field
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The slot of the leaf in its parent
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// The current text, possibly not committed yet
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width of the text area, never below the configured minimum
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Whether the field has the keyboard focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(super) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(super) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Measure the current text and update the width.
    /// Returns whether the width changed.
    pub(super) fn update_width<M>(&mut self, ctx: &Ctx<M>) -> Result<bool, Error>
    where
        M: text::Measure,
    {
        let config = ctx.config();
        let measured = ctx.measure(&self.text, config.font_size)?.width;
        let width = measured.max(config.number_min_width);
        let changed = width != self.width;
        self.width = width;
        Ok(changed)
    }

    /// Parse the text of a field.
    ///
    /// Surrounding whitespace is ignored, only finite values are accepted.
    pub fn parse(text: &str) -> Result<f64, Error> {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(Error::InvalidNumber(text.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::{ExprTree, Sexpr};
    use crate::drawing::Config;
    use crate::text::FixedMeasure;

    #[test]
    fn test_parse() {
        assert_eq!(NumberField::parse("42").unwrap(), 42.0);
        assert_eq!(NumberField::parse(" -2.5 ").unwrap(), -2.5);
        assert_eq!(NumberField::parse("1e3").unwrap(), 1000.0);
        assert!(matches!(NumberField::parse("abc"), Err(Error::InvalidNumber(t)) if t == "abc"));
        assert!(NumberField::parse("").is_err());
        assert!(NumberField::parse("inf").is_err());
        assert!(NumberField::parse("NaN").is_err());
    }

    #[test]
    fn test_auto_width() {
        let tree = ExprTree::from_sexpr(&Sexpr::from(1)).unwrap();
        let config = Config::from(&des::Widget::new(Sexpr::from(1)));
        let measure = FixedMeasure::default();
        let ctx = Ctx::new(&measure, &config);

        let mut field = NumberField::new(tree.root(), Slot::Root, 1.0);
        assert_eq!(field.text(), "1");

        // a single char is 8 wide at 16, which is also the minimum
        assert!(field.update_width(&ctx).unwrap());
        assert_eq!(field.width(), 8.0);

        field.set_text(String::new());
        assert!(!field.update_width(&ctx).unwrap());
        assert_eq!(field.width(), 8.0);

        field.set_text("12345".to_string());
        assert!(field.update_width(&ctx).unwrap());
        assert_eq!(field.width(), 40.0);
    }
}
