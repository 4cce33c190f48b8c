//! Visual fragments of a prepared widget
use std::fmt;

use crate::des::{Fixity, NodeId, Slot};
use crate::drawing::NumberField;

/// Index of a fragment in the [`Fragments`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragId(pub(super) usize);

impl fmt::Display for FragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Side of a parenthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Opening parenthesis
    Open,
    /// Closing parenthesis
    Close,
}

impl Side {
    /// The parenthesis character
    pub const fn text(&self) -> &'static str {
        match self {
            Side::Open => "(",
            Side::Close => ")",
        }
    }
}

/// A visual fragment of the widget
#[derive(Debug, Clone)]
pub enum Fragment {
    /// A binary node: parentheses around the inner group
    Group {
        /// The displayed node
        node: NodeId,
        /// Opening parenthesis
        open: FragId,
        /// Inner group
        inner: FragId,
        /// Closing parenthesis
        close: FragId,
        /// Size of both parentheses, in percent of the font size
        scale: f32,
        /// Whether the group is highlighted. Both parentheses share this state.
        highlighted: bool,
    },
    /// The content of a binary group
    Inner {
        /// Left operand
        left: FragId,
        /// Operator label
        op: FragId,
        /// Right operand
        right: FragId,
    },
    /// A parenthesis of a binary group
    Paren(Side),
    /// A unary node: operator label followed by the operand
    Prefix {
        /// The displayed node
        node: NodeId,
        /// Operator label
        op: FragId,
        /// The operand
        operand: FragId,
    },
    /// An operator label, opening the chooser when clicked
    Operator {
        /// The slot of the operator in the tree
        slot: Slot,
        /// Fixity of the operator
        fixity: Fixity,
        /// The displayed token
        label: String,
    },
    /// An editable numeric leaf
    Number(NumberField),
    /// A static symbolic leaf
    Symbol {
        /// The displayed node
        node: NodeId,
        /// The displayed token
        label: String,
    },
}

impl Fragment {
    /// The child fragments, in display order
    pub fn children(&self) -> Vec<FragId> {
        match self {
            Fragment::Group {
                open, inner, close, ..
            } => vec![*open, *inner, *close],
            Fragment::Inner { left, op, right } => vec![*left, *op, *right],
            Fragment::Prefix { op, operand, .. } => vec![*op, *operand],
            _ => Vec::new(),
        }
    }
}

/// Arena of fragments.
///
/// Children are always stored before their parent, the root is the last fragment.
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    frags: Vec<Fragment>,
    parents: Vec<Option<FragId>>,
}

impl Fragments {
    /// The root fragment
    pub fn root(&self) -> FragId {
        FragId(self.frags.len().saturating_sub(1))
    }

    /// Number of fragments
    pub fn len(&self) -> usize {
        self.frags.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.frags.is_empty()
    }

    /// The fragment identified by `id`
    pub fn get(&self, id: FragId) -> Option<&Fragment> {
        self.frags.get(id.0)
    }

    /// The parent of a fragment
    pub fn parent(&self, id: FragId) -> Option<FragId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// Iterate over all fragments, children before their parent
    pub fn iter(&self) -> impl Iterator<Item = (FragId, &Fragment)> + '_ {
        self.frags.iter().enumerate().map(|(i, f)| (FragId(i), f))
    }

    /// The group owning a parenthesis
    pub fn paren_group(&self, id: FragId) -> Option<FragId> {
        match self.get(id)? {
            Fragment::Paren(_) => self.parent(id),
            _ => None,
        }
    }

    /// The numeric field of a fragment
    pub fn number(&self, id: FragId) -> Option<&NumberField> {
        match self.get(id)? {
            Fragment::Number(field) => Some(field),
            _ => None,
        }
    }

    pub(super) fn get_mut(&mut self, id: FragId) -> Option<&mut Fragment> {
        self.frags.get_mut(id.0)
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = (FragId, &mut Fragment)> + '_ {
        self.frags
            .iter_mut()
            .enumerate()
            .map(|(i, f)| (FragId(i), f))
    }

    pub(super) fn number_mut(&mut self, id: FragId) -> Option<&mut NumberField> {
        match self.get_mut(id)? {
            Fragment::Number(field) => Some(field),
            _ => None,
        }
    }

    /// Set the highlight state of a group. Returns whether the state changed.
    pub(super) fn set_highlighted(&mut self, id: FragId, value: bool) -> bool {
        match self.get_mut(id) {
            Some(Fragment::Group { highlighted, .. }) if *highlighted != value => {
                *highlighted = value;
                true
            }
            _ => false,
        }
    }

    pub(super) fn push(&mut self, frag: Fragment) -> FragId {
        let id = FragId(self.frags.len());
        for child in frag.children() {
            self.parents[child.0] = Some(id);
        }
        self.frags.push(frag);
        self.parents.push(None);
        id
    }
}
