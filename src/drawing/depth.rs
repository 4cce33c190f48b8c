use crate::des::{ExprTree, NodeId};

/// Maximum nesting depth below `node`.
///
/// Leaves have depth 0, interior nodes are one level deeper than their deepest operand.
/// The result only depends on the shape of the tree, so it is not affected by edits.
pub fn max_depth(tree: &ExprTree, node: NodeId) -> u32 {
    tree.node(node)
        .operands()
        .map(|child| max_depth(tree, child) + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::Sexpr;

    fn tree(expr: Sexpr) -> ExprTree {
        ExprTree::from_sexpr(&expr).unwrap()
    }

    #[test]
    fn test_leaves() {
        let t = tree(1.into());
        assert_eq!(max_depth(&t, t.root()), 0);
        let t = tree("x".into());
        assert_eq!(max_depth(&t, t.root()), 0);
    }

    #[test]
    fn test_nested() {
        let t = tree(Sexpr::seq(vec![
            "+".into(),
            1.into(),
            Sexpr::seq(vec!["×".into(), 2.into(), 3.into()]),
        ]));
        assert_eq!(max_depth(&t, t.root()), 2);

        let right = t.node(t.root()).operand(2).unwrap();
        assert_eq!(max_depth(&t, right), 1);

        let t = tree(Sexpr::seq(vec![
            "not".into(),
            Sexpr::seq(vec![
                "-".into(),
                Sexpr::seq(vec!["-".into(), "a".into()]),
            ]),
        ]));
        assert_eq!(max_depth(&t, t.root()), 3);
    }

    #[test]
    fn test_invariant_under_edits() {
        let mut t = tree(Sexpr::seq(vec![
            "=".into(),
            Sexpr::seq(vec!["+".into(), 1.into(), 2.into()]),
            "b".into(),
        ]));
        let root = t.root();
        let before = max_depth(&t, root);

        t.set_operator(root, "≠").unwrap();
        let sum = t.node(root).operand(1).unwrap();
        let one = t.node(sum).operand(1).unwrap();
        t.set_number(one, 42.0).unwrap();

        assert_eq!(max_depth(&t, root), before);
    }
}
