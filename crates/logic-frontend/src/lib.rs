pub mod check;
pub mod namespace;
pub mod scope;

mod messages;

pub use check::{unify, Constraint, Provenance, Substitution, UnificationContext, UnificationError};
pub use namespace::{Namespace, NamespaceError};
pub use scope::ScopeContext;
