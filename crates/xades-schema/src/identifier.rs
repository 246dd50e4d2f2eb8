#![forbid(unsafe_code)]

//! Dotted hierarchical identifiers locating an element in the schema tree.

use std::fmt;
use std::str::FromStr;

use xades_core::Error;

/// Separator between components in the rendered form.
pub const DELIMITER: char = '.';

/// A path of small integers from a synthetic root, rendered as `0.2.3.5`.
///
/// Ordering is component-wise: the first differing component decides, and a
/// strict prefix sorts before any identifier extending it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HierarchicalId {
    components: Vec<u32>,
}

impl HierarchicalId {
    /// Identifier of a root-level element at `local_index` in the table:
    /// `[0, local_index + 1]`.
    ///
    /// Fails with [`Error::InvalidArgument`] when `local_index + 1` does not
    /// fit a component.
    pub fn from_root(local_index: usize) -> Result<Self, Error> {
        Ok(Self {
            components: vec![0, component(local_index)?],
        })
    }

    /// Identifier of a child at `local_index`: this path plus
    /// `local_index + 1`.
    pub fn append(&self, local_index: usize) -> Result<Self, Error> {
        Ok(self.extended(component(local_index)?))
    }

    /// Identifier of the schema table row at `position` below `parent`.
    pub(crate) fn for_position(parent: Option<&HierarchicalId>, position: u8) -> Self {
        let last = u32::from(position) + 1;
        match parent {
            Some(parent) => parent.extended(last),
            None => Self {
                components: vec![0, last],
            },
        }
    }

    fn extended(&self, last: u32) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.extend_from_slice(&self.components);
        components.push(last);
        Self { components }
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Number of components; two for root-level elements.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether `self` lies strictly below `other` in the tree.
    pub fn is_descendant_of(&self, other: &HierarchicalId) -> bool {
        self.components.len() > other.components.len()
            && self.components.starts_with(&other.components)
    }

    /// Render the components joined by [`DELIMITER`].
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn component(local_index: usize) -> Result<u32, Error> {
    local_index
        .checked_add(1)
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| Error::InvalidArgument(format!("local index {local_index} out of range")))
}

impl fmt::Display for HierarchicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{DELIMITER}")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for HierarchicalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::InvalidArgument("empty identifier".into()));
        }
        let components = s
            .split(DELIMITER)
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidArgument(format!(
                        "invalid identifier component {part:?} in {s:?}"
                    )));
                }
                part.parse::<u32>().map_err(|e| {
                    Error::InvalidArgument(format!("identifier component {part:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl From<Vec<u32>> for HierarchicalId {
    fn from(components: Vec<u32>) -> Self {
        Self { components }
    }
}
