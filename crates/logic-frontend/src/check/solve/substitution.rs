use std::collections::HashMap;

use log::trace;

use logic_common::types::Type;

/// A solved set of type variables.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution {
    bindings: HashMap<Type, Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub(super) fn bind(&mut self, var: Type, ty: Type) {
        trace!("binding {var} to {ty}");
        self.bindings.insert(var, ty);
    }

    /// Get what a single term is bound to, without following the binding.
    pub fn get(&self, ty: &Type) -> Option<&Type> {
        self.bindings.get(ty)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Replace every bound variable in `ty`, following bindings until nothing
    /// more changes.
    pub fn substitute(&self, ty: &Type) -> Type {
        ty.map_leaves(&mut |leaf: &Type| {
            self.bindings
                .get(leaf)
                .map(|bound| self.substitute(bound))
        })
    }
}
