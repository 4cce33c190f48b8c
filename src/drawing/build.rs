use crate::des::{ExprTree, Fixity, Node, NodeId, Slot};
use crate::drawing::{FragId, Fragment, Fragments, NumberField, Side};

/// Render the whole tree into fragments.
///
/// `max_depth` is the reference depth of the tree, used with `paren_scale` to size parentheses.
pub(super) fn build(tree: &ExprTree, max_depth: u32, paren_scale: f32) -> Fragments {
    let mut builder = Builder {
        tree,
        max_depth,
        paren_scale,
        frags: Fragments::default(),
    };
    builder.render(Slot::Root, tree.root(), 0);
    builder.frags
}

/// Size of the parentheses of a binary node at `depth`, in percent of the font size
pub(super) fn paren_scale(depth: u32, max_depth: u32, paren_scale: f32) -> f32 {
    100.0 + max_depth.saturating_sub(depth) as f32 * paren_scale
}

struct Builder<'a> {
    tree: &'a ExprTree,
    max_depth: u32,
    paren_scale: f32,
    frags: Fragments,
}

impl Builder<'_> {
    fn render(&mut self, slot: Slot, id: NodeId, depth: u32) -> FragId {
        match self.tree.node(id) {
            Node::Binary { op, left, right } => {
                let (op, left, right) = (op.clone(), *left, *right);
                self.render_binary(id, op, left, right, depth)
            }
            Node::Unary { op, operand } => {
                let (op, operand) = (op.clone(), *operand);
                self.render_unary(id, op, operand, depth)
            }
            Node::Number(value) => {
                let field = NumberField::new(id, slot, *value);
                self.frags.push(Fragment::Number(field))
            }
            Node::Symbol(label) => {
                let label = label.clone();
                self.frags.push(Fragment::Symbol { node: id, label })
            }
        }
    }

    fn render_binary(
        &mut self,
        id: NodeId,
        op: String,
        left: NodeId,
        right: NodeId,
        depth: u32,
    ) -> FragId {
        let scale = paren_scale(depth, self.max_depth, self.paren_scale);

        let open = self.frags.push(Fragment::Paren(Side::Open));
        let left = self.render(Slot::Operand(id, 1), left, depth + 1);
        let op = self.frags.push(Fragment::Operator {
            slot: Slot::Operator(id),
            fixity: Fixity::Infix,
            label: op,
        });
        let right = self.render(Slot::Operand(id, 2), right, depth + 1);
        let inner = self.frags.push(Fragment::Inner { left, op, right });
        let close = self.frags.push(Fragment::Paren(Side::Close));

        self.frags.push(Fragment::Group {
            node: id,
            open,
            inner,
            close,
            scale,
            highlighted: false,
        })
    }

    fn render_unary(&mut self, id: NodeId, op: String, operand: NodeId, depth: u32) -> FragId {
        let op = self.frags.push(Fragment::Operator {
            slot: Slot::Operator(id),
            fixity: Fixity::Prefix,
            label: op,
        });
        let operand = self.render(Slot::Operand(id, 1), operand, depth + 1);
        self.frags.push(Fragment::Prefix {
            node: id,
            op,
            operand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::Sexpr;
    use crate::drawing::max_depth;

    fn build_expr(expr: Sexpr) -> (ExprTree, Fragments) {
        let tree = ExprTree::from_sexpr(&expr).unwrap();
        let depth = max_depth(&tree, tree.root());
        let frags = build(&tree, depth, 25.0);
        (tree, frags)
    }

    fn group_scales(frags: &Fragments) -> Vec<(NodeId, f32)> {
        frags
            .iter()
            .filter_map(|(_, f)| match f {
                Fragment::Group { node, scale, .. } => Some((*node, *scale)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_paren_scale() {
        assert_eq!(paren_scale(0, 2, 25.0), 150.0);
        assert_eq!(paren_scale(1, 2, 25.0), 125.0);
        assert_eq!(paren_scale(2, 2, 25.0), 100.0);
        assert_eq!(paren_scale(0, 3, 10.0), 130.0);
    }

    #[test]
    fn test_nested_binary() {
        let (tree, frags) = build_expr(Sexpr::seq(vec![
            "+".into(),
            1.into(),
            Sexpr::seq(vec!["×".into(), 2.into(), 3.into()]),
        ]));
        let root = tree.root();
        let inner = tree.node(root).operand(2).unwrap();

        // the inner group is completed first
        assert_eq!(group_scales(&frags), vec![(inner, 125.0), (root, 150.0)]);

        let numbers: Vec<&str> = frags
            .iter()
            .filter_map(|(id, _)| frags.number(id).map(|n| n.text()))
            .collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);

        let Some(Fragment::Group { open, close, .. }) = frags.get(frags.root()) else {
            panic!("root is not a group");
        };
        assert_eq!(frags.paren_group(*open), Some(frags.root()));
        assert_eq!(frags.paren_group(*close), Some(frags.root()));
    }

    #[test]
    fn test_unary_has_no_parens() {
        let (tree, frags) = build_expr(Sexpr::seq(vec![
            "not".into(),
            Sexpr::seq(vec!["=".into(), "a".into(), "b".into()]),
        ]));
        let child = tree.node(tree.root()).operand(1).unwrap();

        let Some(Fragment::Prefix { op, operand, .. }) = frags.get(frags.root()) else {
            panic!("root is not a prefix");
        };
        assert!(matches!(
            frags.get(*op),
            Some(Fragment::Operator { fixity: Fixity::Prefix, label, .. }) if label == "not"
        ));
        assert!(matches!(frags.get(*operand), Some(Fragment::Group { .. })));

        // the binary child lies at depth 1 of a tree of depth 2
        assert_eq!(group_scales(&frags), vec![(child, 125.0)]);

        let parens = frags
            .iter()
            .filter(|(_, f)| matches!(f, Fragment::Paren(_)))
            .count();
        assert_eq!(parens, 2);
    }

    #[test]
    fn test_slots() {
        let (tree, frags) = build_expr(Sexpr::seq(vec!["-".into(), 7.into(), "x".into()]));
        let root = tree.root();
        let field = frags
            .iter()
            .find_map(|(id, _)| frags.number(id))
            .unwrap();
        assert_eq!(field.slot(), Slot::Operand(root, 1));
        assert_eq!(tree.resolve(field.slot()), Ok(field.node()));

        let (tree, frags) = build_expr(Sexpr::from(3));
        let field = frags.number(frags.root()).unwrap();
        assert_eq!(field.slot(), Slot::Root);
        assert_eq!(field.node(), tree.root());
    }
}
