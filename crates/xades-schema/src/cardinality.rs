#![forbid(unsafe_code)]

//! Occurrence constraints of a qualifying property within its parent.

use std::fmt;

/// How many times an element may occur inside one instance of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// Exactly one occurrence.
    #[default]
    ExactlyOne,
    /// Optional, at most one occurrence.
    ZeroOrOne,
    /// Any number of occurrences, including none.
    ZeroOrMore,
    /// At least one occurrence.
    OneOrMore,
}

impl Cardinality {
    /// Whether `count` occurrences satisfy the rule.
    pub const fn permits(self, count: usize) -> bool {
        match self {
            Cardinality::ExactlyOne => count == 1,
            Cardinality::ZeroOrOne => count <= 1,
            Cardinality::ZeroOrMore => true,
            Cardinality::OneOrMore => count >= 1,
        }
    }

    /// Fewest occurrences permitted.
    pub const fn min(self) -> usize {
        match self {
            Cardinality::ExactlyOne | Cardinality::OneOrMore => 1,
            Cardinality::ZeroOrOne | Cardinality::ZeroOrMore => 0,
        }
    }

    /// Most occurrences permitted, `None` when unbounded.
    pub const fn max(self) -> Option<usize> {
        match self {
            Cardinality::ExactlyOne | Cardinality::ZeroOrOne => Some(1),
            Cardinality::ZeroOrMore | Cardinality::OneOrMore => None,
        }
    }

    /// Whether at least one occurrence is required.
    pub const fn is_required(self) -> bool {
        self.min() > 0
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cardinality::ExactlyOne => "1",
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ZeroOrMore => "0..n",
            Cardinality::OneOrMore => "1..n",
        })
    }
}
