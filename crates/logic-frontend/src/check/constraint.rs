use std::fmt;

use logic_common::ast::NodeId;
use logic_common::types::Type;

/// An obligation for two types to be equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
    pub provenance: Provenance,
}

/// Where a constraint came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Provenance {
    pub description: &'static str,
    pub nodes: Vec<NodeId>,
}

impl Constraint {
    pub fn new(left: Type, right: Type, provenance: Provenance) -> Self {
        Self {
            left,
            right,
            provenance,
        }
    }

    /// Create a constraint between two parts of this one, keeping its
    /// provenance.
    pub fn derive(&self, left: Type, right: Type) -> Self {
        Self::new(left, right, self.provenance.clone())
    }
}

impl Provenance {
    pub fn new(description: &'static str, nodes: Vec<NodeId>) -> Self {
        Self { description, nodes }
    }

    /// The node a diagnostic about this constraint should point at.
    pub fn primary(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} ({})",
            self.left, self.right, self.provenance.description
        )
    }
}
