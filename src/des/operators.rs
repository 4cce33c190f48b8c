//! Operator vocabularies offered by the chooser

use crate::style::defaults;

/// Fixity of an operator, which determines its arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Unary operator displayed before its operand
    Prefix,
    /// Binary operator displayed between its operands
    Infix,
}

/// The operator tokens the chooser can offer, per fixity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operators {
    infix: Vec<String>,
    prefix: Vec<String>,
    grid: usize,
}

impl Default for Operators {
    fn default() -> Self {
        Operators::new(defaults::INFIX_OPERATORS, defaults::PREFIX_OPERATORS)
    }
}

impl Operators {
    /// Build vocabularies from token lists.
    /// Duplicated tokens are removed, the first occurrence sets the order.
    pub fn new<I, P, S, T>(infix: I, prefix: P) -> Self
    where
        I: IntoIterator<Item = S>,
        P: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Operators {
            infix: dedup(infix.into_iter().map(Into::into)),
            prefix: dedup(prefix.into_iter().map(Into::into)),
            grid: defaults::CHOOSER_GRID,
        }
    }

    /// Number of choices per row of the chooser
    pub fn grid(&self) -> usize {
        self.grid
    }

    /// Set the number of choices per row and return self for chaining
    pub fn with_grid(self, grid: usize) -> Self {
        Operators { grid, ..self }
    }

    /// The vocabulary for operators of the given fixity
    pub fn vocabulary(&self, fixity: Fixity) -> &[String] {
        match fixity {
            Fixity::Infix => &self.infix,
            Fixity::Prefix => &self.prefix,
        }
    }

    /// Whether `token` belongs to the vocabulary of `fixity`
    pub fn contains(&self, fixity: Fixity, token: &str) -> bool {
        self.vocabulary(fixity).iter().any(|t| t == token)
    }
}

fn dedup(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for tok in tokens {
        if !res.contains(&tok) {
            res.push(tok);
        }
    }
    res
}
