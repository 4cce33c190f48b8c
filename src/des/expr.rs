//! Expression input form and the tagged expression tree built from it
use std::fmt;

use super::{Error, Fixity};

/// An expression as supplied by the caller.
///
/// A sequence holds an operator symbol at position 0 followed by its operands:
/// 3 items make a binary infix node, 2 items a unary prefix node.
/// Bare numbers and symbols are leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// A numeric leaf
    Number(f64),
    /// A symbolic leaf, or the operator token of a sequence
    Symbol(String),
    /// An operator followed by its operands
    Seq(Vec<Sexpr>),
}

impl Sexpr {
    /// Build a sequence node
    pub fn seq(items: Vec<Sexpr>) -> Self {
        Sexpr::Seq(items)
    }

    /// Build a symbol
    pub fn sym(name: impl Into<String>) -> Self {
        Sexpr::Symbol(name.into())
    }
}

impl From<f64> for Sexpr {
    fn from(value: f64) -> Self {
        Sexpr::Number(value)
    }
}

impl From<i32> for Sexpr {
    fn from(value: i32) -> Self {
        Sexpr::Number(value as f64)
    }
}

impl From<&str> for Sexpr {
    fn from(value: &str) -> Self {
        Sexpr::Symbol(value.to_string())
    }
}

impl From<String> for Sexpr {
    fn from(value: String) -> Self {
        Sexpr::Symbol(value)
    }
}

impl From<Vec<Sexpr>> for Sexpr {
    fn from(items: Vec<Sexpr>) -> Self {
        Sexpr::Seq(items)
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Number(v) => f.write_str(&format_number(*v)),
            Sexpr::Symbol(s) => write!(f, "{:?}", s),
            Sexpr::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Display text of a number: shortest representation that parses back to the same value.
/// Integers are written without fraction.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Index of a node in an [`ExprTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The index of the node in the tree
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a node in the input expression, as the list of sequence indices from the root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The indices from the root
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        NodePath(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for idx in &self.0 {
            write!(f, "/{}", idx)?;
        }
        Ok(())
    }
}

/// A node of the expression tree, tagged by arity
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Editable numeric leaf
    Number(f64),
    /// Static symbolic leaf
    Symbol(String),
    /// Prefix operator with one operand
    Unary {
        /// Operator token
        op: String,
        /// The operand
        operand: NodeId,
    },
    /// Infix operator with two operands
    Binary {
        /// Operator token
        op: String,
        /// Left operand
        left: NodeId,
        /// Right operand
        right: NodeId,
    },
}

impl Node {
    /// The operator token and its fixity, or `None` for leaves
    pub fn operator(&self) -> Option<(&str, Fixity)> {
        match self {
            Node::Unary { op, .. } => Some((op, Fixity::Prefix)),
            Node::Binary { op, .. } => Some((op, Fixity::Infix)),
            _ => None,
        }
    }

    /// The operand at `index`, counted as in the sequence form (1 or 2)
    pub fn operand(&self, index: usize) -> Option<NodeId> {
        match (self, index) {
            (Node::Unary { operand, .. }, 1) => Some(*operand),
            (Node::Binary { left, .. }, 1) => Some(*left),
            (Node::Binary { right, .. }, 2) => Some(*right),
            _ => None,
        }
    }

    /// The operands of this node, in order
    pub fn operands(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..=2).filter_map(|idx| self.operand(idx))
    }

    /// Whether this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Symbol(_))
    }

    /// The value of a numeric leaf
    pub fn number(&self) -> Option<f64> {
        match self {
            Node::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// A reference from a visual element to the place of the tree it displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The root of the tree
    Root,
    /// The operator token of an interior node
    Operator(NodeId),
    /// The operand `index` (1 or 2) of an interior node
    Operand(NodeId, usize),
}

/// Expression tree stored as an arena of tagged nodes.
///
/// The tree is built once from a [`Sexpr`] and its shape never changes afterwards:
/// only operator tokens and numeric values can be modified.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ExprTree {
    /// Validate `expr` and build the tree
    pub fn from_sexpr(expr: &Sexpr) -> Result<Self, Error> {
        let mut nodes = Vec::new();
        let root = build_node(&mut nodes, expr, NodePath::default())?;
        Ok(ExprTree { nodes, root })
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node identified by `id`
    ///
    /// # Panics
    /// If `id` does not belong to this tree
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The node identified by `id`, or `None` if it does not belong to this tree
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a tree has at least a root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes, children before their parent
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Resolve a slot to the node it designates
    pub fn resolve(&self, slot: Slot) -> Result<NodeId, Error> {
        match slot {
            Slot::Root => Ok(self.root),
            Slot::Operator(id) => match self.get(id) {
                Some(node) if !node.is_leaf() => Ok(id),
                _ => Err(Error::InvalidSlot(slot)),
            },
            Slot::Operand(id, idx) => self
                .get(id)
                .and_then(|node| node.operand(idx))
                .ok_or(Error::InvalidSlot(slot)),
        }
    }

    /// Replace the operator token of an interior node and return the previous one.
    /// The arity of the node is preserved.
    pub fn set_operator(&mut self, id: NodeId, token: impl Into<String>) -> Result<String, Error> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Unary { op, .. }) | Some(Node::Binary { op, .. }) => {
                Ok(std::mem::replace(op, token.into()))
            }
            _ => Err(Error::NotAnOperator(id)),
        }
    }

    /// Replace the value of a numeric leaf and return the previous one
    pub fn set_number(&mut self, id: NodeId, value: f64) -> Result<f64, Error> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Number(v)) => Ok(std::mem::replace(v, value)),
            _ => Err(Error::NotANumber(id)),
        }
    }

    /// Convert the whole tree back to the input form
    pub fn to_sexpr(&self) -> Sexpr {
        self.sexpr_of(self.root)
    }

    /// Convert the subtree rooted at `id` back to the input form
    pub fn sexpr_of(&self, id: NodeId) -> Sexpr {
        match self.node(id) {
            Node::Number(v) => Sexpr::Number(*v),
            Node::Symbol(s) => Sexpr::Symbol(s.clone()),
            Node::Unary { op, operand } => {
                Sexpr::Seq(vec![Sexpr::Symbol(op.clone()), self.sexpr_of(*operand)])
            }
            Node::Binary { op, left, right } => Sexpr::Seq(vec![
                Sexpr::Symbol(op.clone()),
                self.sexpr_of(*left),
                self.sexpr_of(*right),
            ]),
        }
    }
}

fn build_node(nodes: &mut Vec<Node>, expr: &Sexpr, path: NodePath) -> Result<NodeId, Error> {
    let node = match expr {
        Sexpr::Seq(items) if items.len() == 3 => {
            let op = operator_token(&items[0], &path)?;
            let left = build_node(nodes, &items[1], path.child(1))?;
            let right = build_node(nodes, &items[2], path.child(2))?;
            Node::Binary { op, left, right }
        }
        Sexpr::Seq(items) if items.len() == 2 => {
            let op = operator_token(&items[0], &path)?;
            let operand = build_node(nodes, &items[1], path.child(1))?;
            Node::Unary { op, operand }
        }
        Sexpr::Seq(items) => {
            return Err(Error::MalformedNode {
                path,
                len: items.len(),
            });
        }
        Sexpr::Number(v) => Node::Number(*v),
        Sexpr::Symbol(s) => Node::Symbol(s.clone()),
    };
    nodes.push(node);
    Ok(NodeId(nodes.len() - 1))
}

fn operator_token(item: &Sexpr, path: &NodePath) -> Result<String, Error> {
    match item {
        Sexpr::Symbol(s) => Ok(s.clone()),
        _ => Err(Error::MalformedOperator { path: path.clone() }),
    }
}
