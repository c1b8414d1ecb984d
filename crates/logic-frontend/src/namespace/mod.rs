//! The namespace maps qualified names to the patterns declaring them. Values
//! and types live in separate registries, so a record can be both a type and
//! (through its constructor) a value under the same name.

#[cfg(test)]
mod tests;

use bimap::BiHashMap;
use log::trace;
use thiserror::Error;

use logic_common::ast::NodeId;
use logic_common::names::NamePath;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NamespaceError {
    #[error("value `{name}` is already declared by {existing} (redeclared by {new})")]
    ValueAlreadyDeclared {
        name: NamePath,
        existing: NodeId,
        new: NodeId,
    },

    #[error("type `{name}` is already declared by {existing} (redeclared by {new})")]
    TypeAlreadyDeclared {
        name: NamePath,
        existing: NodeId,
        new: NodeId,
    },
}

impl NamespaceError {
    pub fn name(&self) -> &NamePath {
        match self {
            Self::ValueAlreadyDeclared { name, .. } | Self::TypeAlreadyDeclared { name, .. } => {
                name
            }
        }
    }

    /// The node which was declared first.
    pub fn existing(&self) -> NodeId {
        match self {
            Self::ValueAlreadyDeclared { existing, .. }
            | Self::TypeAlreadyDeclared { existing, .. } => *existing,
        }
    }

    /// The node whose declaration failed.
    pub fn new_declaration(&self) -> NodeId {
        match self {
            Self::ValueAlreadyDeclared { new, .. } | Self::TypeAlreadyDeclared { new, .. } => *new,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Namespace {
    values: BiHashMap<NamePath, NodeId>,
    types: BiHashMap<NamePath, NodeId>,
}

impl Namespace {
    pub fn new() -> Self {
        Self {
            values: BiHashMap::new(),
            types: BiHashMap::new(),
        }
    }

    pub fn declare_value(&mut self, name: NamePath, id: NodeId) -> Result<(), NamespaceError> {
        if let Some(existing) = self.values.get_by_left(&name) {
            return Err(NamespaceError::ValueAlreadyDeclared {
                name,
                existing: *existing,
                new: id,
            });
        }

        trace!("declaring value `{name}` as {id}");
        self.values.insert(name, id);
        Ok(())
    }

    pub fn declare_type(&mut self, name: NamePath, id: NodeId) -> Result<(), NamespaceError> {
        if let Some(existing) = self.types.get_by_left(&name) {
            return Err(NamespaceError::TypeAlreadyDeclared {
                name,
                existing: *existing,
                new: id,
            });
        }

        trace!("declaring type `{name}` as {id}");
        self.types.insert(name, id);
        Ok(())
    }

    /// Get the pattern declaring the value with the given name.
    pub fn get(&self, name: &NamePath) -> Option<NodeId> {
        self.values.get_by_left(name).copied()
    }

    /// Get the pattern declaring the type with the given name.
    pub fn get_type(&self, name: &NamePath) -> Option<NodeId> {
        self.types.get_by_left(name).copied()
    }

    /// Get the qualified name a value pattern was declared under.
    pub fn value_name(&self, id: NodeId) -> Option<&NamePath> {
        self.values.get_by_right(&id)
    }

    /// Get the qualified name a type pattern was declared under.
    pub fn type_name(&self, id: NodeId) -> Option<&NamePath> {
        self.types.get_by_right(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = (&NamePath, NodeId)> {
        self.values.iter().map(|(name, id)| (name, *id))
    }

    pub fn types(&self) -> impl Iterator<Item = (&NamePath, NodeId)> {
        self.types.iter().map(|(name, id)| (name, *id))
    }

    /// Combine several namespaces into one. Any name declared in more than one
    /// of them is an error; the first namespace to declare it is reported as the
    /// existing declaration.
    pub fn merge(
        namespaces: impl IntoIterator<Item = Namespace>,
    ) -> Result<Self, NamespaceError> {
        let mut result = Namespace::new();

        for namespace in namespaces {
            for (name, id) in namespace.types {
                result.declare_type(name, id)?;
            }

            for (name, id) in namespace.values {
                result.declare_value(name, id)?;
            }
        }

        Ok(result)
    }
}
