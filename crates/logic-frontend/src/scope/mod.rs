//! Name resolution.
//!
//! Resolution happens in two passes over the tree. The first ([`declare`])
//! registers every top-level and namespaced declaration in a [`Namespace`], so
//! that declarations may refer to each other regardless of order. The second
//! walks the tree with a stack of lexical scopes and binds every identifier
//! to the pattern declaring it.
//!
//! Names which fail to resolve are not errors as far as this module is
//! concerned; they are collected so the rest of the pipeline can keep working
//! on the parts of the program that do make sense.

mod declare;
mod messages;
mod resolve;


pub use self::declare::declare;

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{info, trace};

use logic_common::ast::{NodeId, Program};
use logic_common::names::NamePath;

use crate::namespace::{Namespace, NamespaceError};

/// Bindings introduced by one lexical scope, in declaration order.
type Scope = Vec<(String, NodeId)>;

#[derive(Clone, Debug, Default)]
pub struct ScopeContext {
    pub namespace: Namespace,

    /// Maps every resolved identifier (or member) expression to the pattern it
    /// refers to. Entries are never removed, even when the scope that made them
    /// visible is left.
    pub identifier_to_pattern: HashMap<NodeId, NodeId>,

    /// Maps every resolved type annotation to the pattern of the type or
    /// generic parameter it names.
    pub type_identifier_to_pattern: HashMap<NodeId, NodeId>,

    pub undefined_identifiers: HashSet<NodeId>,
    pub undefined_member_expressions: HashSet<NodeId>,
    pub undefined_type_identifiers: HashSet<NodeId>,

    scopes: Vec<Scope>,
    type_scopes: Vec<Scope>,
    namespace_path: NamePath,
}

impl ScopeContext {
    /// Resolve every name in the program. If `target` is given, resolution
    /// stops as soon as that node is reached, leaving the context describing
    /// the scope visible at that node.
    pub fn build(program: &Program, target: Option<NodeId>) -> Result<Self, NamespaceError> {
        let namespace = declare(program)?;
        Ok(Self::build_with(namespace, program, target))
    }

    /// Like [`ScopeContext::build`], but with an already declared namespace.
    /// This is used when the namespace was put together from several trees.
    pub fn build_with(namespace: Namespace, program: &Program, target: Option<NodeId>) -> Self {
        info!("beginning name resolution");

        let mut context = Self {
            namespace,
            ..Default::default()
        };

        let stopped = resolve::resolve(&mut context, program, target);

        trace!(
            "done resolving names ({} unresolved identifiers, {} unresolved members{})",
            context.undefined_identifiers.len(),
            context.undefined_member_expressions.len(),
            if stopped { ", stopped early" } else { "" }
        );

        context
    }

    /// Get every name visible in the current lexical scope, outermost first.
    /// Names shadowed by an inner scope are left out. Names only found through
    /// the namespace are not included; see [`ScopeContext::visible_names`].
    pub fn names_in_scope(&self) -> Vec<(String, NodeId)> {
        visible(&self.scopes)
    }

    /// Get every value an unqualified identifier could find through the
    /// namespace at the current position, sorted by name. These are the
    /// top-level names, and the names declared directly within the enclosing
    /// namespace, record or enumeration.
    pub fn namespace_names_in_scope(&self) -> Vec<(String, NodeId)> {
        let here: Vec<_> = self.namespace_path.segments().collect();
        let mut top = BTreeMap::new();
        let mut nested = BTreeMap::new();

        for (path, id) in self.namespace.values() {
            let segments: Vec<_> = path.segments().collect();
            let Some((last, parent)) = segments.split_last() else {
                continue;
            };

            if parent.is_empty() {
                top.insert(last.to_string(), id);
            } else if parent == here.as_slice() {
                nested.insert(last.to_string(), id);
            }
        }

        // Bare names are looked up first.
        for (name, id) in nested {
            top.entry(name).or_insert(id);
        }

        top.into_iter().collect()
    }

    /// Get every value an identifier could refer to at the current position:
    /// the names found through the namespace, followed by the lexical names.
    /// Lexical names shadow namespace names.
    pub fn visible_names(&self) -> Vec<(String, NodeId)> {
        let lexical = self.names_in_scope();
        let mut names: Vec<_> = self
            .namespace_names_in_scope()
            .into_iter()
            .filter(|(name, _)| !lexical.iter().any(|(bound, _)| bound == name))
            .collect();

        names.extend(lexical);
        names
    }

    /// Get every generic type parameter visible in the current lexical scope.
    pub fn type_names_in_scope(&self) -> Vec<(String, NodeId)> {
        visible(&self.type_scopes)
    }

    /// The namespace path of the declaration resolution stopped in.
    pub fn namespace_path(&self) -> &NamePath {
        &self.namespace_path
    }

    /// Get the pattern an identifier or member expression refers to.
    pub fn declaration_of(&self, id: NodeId) -> Option<NodeId> {
        self.identifier_to_pattern.get(&id).copied()
    }

    /// Get the pattern a type annotation refers to.
    pub fn type_declaration_of(&self, id: NodeId) -> Option<NodeId> {
        self.type_identifier_to_pattern.get(&id).copied()
    }

    /// Did every identifier, member expression and type annotation resolve?
    pub fn is_complete(&self) -> bool {
        self.undefined_identifiers.is_empty()
            && self.undefined_member_expressions.is_empty()
            && self.undefined_type_identifiers.is_empty()
    }

    fn lookup(scopes: &[Scope], name: &str) -> Option<NodeId> {
        scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter().rev())
            .find(|(bound, _)| bound == name)
            .map(|(_, id)| *id)
    }
}

fn visible(scopes: &[Scope]) -> Vec<(String, NodeId)> {
    let mut result: Vec<(String, NodeId)> = Vec::new();

    for (name, id) in scopes.iter().flatten() {
        result.retain(|(existing, _)| existing != name);
        result.push((name.clone(), *id));
    }

    result
}
