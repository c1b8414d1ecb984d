//! # Lazy evaluation
//!
//! Every node which denotes a value gets an [`EvaluationThunk`]: a function
//! from the values of some explicitly listed dependency nodes to the value of
//! the node itself. Values are computed on demand by
//! [`EvaluationContext::evaluate`] and memoized for the lifetime of the
//! context.
//!
//! Because the program is live-edited, it may well be nonsensical. A variable
//! may depend on itself, a name may be unresolved, or a function may recurse
//! forever. None of these are errors here; they simply mean some nodes have no
//! value. Before evaluating anything, the dependency graph is checked for
//! cycles, and any node which is part of a cycle is never evaluated at all.
//!
//! User functions are applied by copying the context, binding the parameters
//! to thunks producing the arguments, building thunks for the function body
//! within the copy and then evaluating the `return` statement the body
//! reaches. The maps of a context are persistent, so a copy is cheap and can
//! never disturb the values cached by the context it was copied from.

mod apply;
mod build;
mod builtins;
mod color;
mod defaults;
mod messages;
mod thunk;
mod value;

#[cfg(test)]
mod tests;

pub use self::apply::Arguments;
pub use self::builtins::Builtin;
pub use self::color::{Hsl, Rgba};
pub use self::defaults::default_value;
pub use self::thunk::{EvaluationThunk, ThunkFunction};
pub use self::value::{Function, LogicValue, Memory, NativeFunction};

use std::collections::HashSet;
use std::rc::Rc;

use im::HashMap;
use log::{debug, info, trace, warn};

use logic_common::ast::{NodeId, Pattern, Program};
use logic_common::names::NamePath;
use logic_common::components;
use logic_common::types::Type;
use logic_frontend::{ScopeContext, Substitution, UnificationContext};

/// Everything evaluation needs to know about the program, shared between a
/// context and all of its copies.
#[derive(Debug)]
pub struct Environment {
    pub program: Rc<Program>,
    pub scope: Rc<ScopeContext>,
    pub unification: Rc<UnificationContext>,
    pub substitution: Rc<Substitution>,

    /// How many user function applications may be nested.
    pub call_depth_limit: usize,
}

impl Environment {
    pub fn new(
        program: Rc<Program>,
        scope: Rc<ScopeContext>,
        unification: Rc<UnificationContext>,
        substitution: Rc<Substitution>,
    ) -> Self {
        Self {
            program,
            scope,
            unification,
            substitution,
            call_depth_limit: 64,
        }
    }

    /// Get the solved type of a node.
    pub fn type_of(&self, id: NodeId) -> Option<Type> {
        self.unification.type_of(id, &self.substitution)
    }

    /// Get the type declared by the pattern of a record or enumeration,
    /// without any generic arguments.
    pub fn declared_type(&self, pattern: &Pattern) -> Type {
        match self.scope.namespace.type_name(pattern.id) {
            Some(path) => Type::cons(path.to_string()),
            None => Type::cons(pattern.name.clone()),
        }
    }

    /// Find the pattern declaring the type constructor with the given name.
    pub fn find_type(&self, name: &str) -> Option<NodeId> {
        let path: NamePath = name.split('.').collect();
        self.scope.namespace.get_type(&path)
    }
}

#[derive(Debug, Default)]
struct Cycles {
    components: Vec<Vec<NodeId>>,
    members: HashSet<NodeId>,
}

#[derive(Clone, Debug)]
pub struct EvaluationContext {
    environment: Rc<Environment>,

    thunks: HashMap<NodeId, EvaluationThunk>,

    /// Computed values. `None` records a node which was evaluated but has no
    /// value.
    values: HashMap<NodeId, Option<LogicValue>>,

    /// Cycles of the current thunk graph, if they have been computed.
    cycles: Option<Rc<Cycles>>,

    /// How many function applications this context is nested within.
    depth: usize,
}

impl EvaluationContext {
    /// Create a context without any thunks.
    pub fn new(environment: Rc<Environment>) -> Self {
        Self {
            environment,
            thunks: HashMap::new(),
            values: HashMap::new(),
            cycles: None,
            depth: 0,
        }
    }

    /// Create a context with a thunk for every top-level value of the program.
    /// Function bodies only get thunks when the function is applied.
    pub fn build(environment: Rc<Environment>) -> Self {
        info!("building thunks");

        let mut context = Self::new(environment.clone());
        build::build_program(&mut context, &environment.program);

        trace!("done building thunks ({} thunks)", context.thunks.len());
        context
    }

    pub fn environment(&self) -> &Rc<Environment> {
        &self.environment
    }

    /// Create an independent snapshot of this context. Values computed in the
    /// copy are not visible in this context, and vice versa.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Compute the value of a node, if it has one.
    pub fn evaluate(&mut self, id: NodeId) -> Option<LogicValue> {
        if let Some(value) = self.values.get(&id) {
            return value.clone();
        }

        if self.cycle_info().members.contains(&id) {
            debug!("refusing to evaluate {id}, which is part of a cycle");
            return None;
        }

        let thunk = self.thunks.get(&id)?.clone();

        let value = self.evaluate_thunk(&thunk);
        match &value {
            Some(value) => trace!("evaluated {} ({id}) to {value}", thunk.label),
            None => trace!("{} ({id}) has no value", thunk.label),
        }

        self.values.insert(id, value.clone());
        value
    }

    fn evaluate_thunk(&mut self, thunk: &EvaluationThunk) -> Option<LogicValue> {
        let mut values = Vec::with_capacity(thunk.dependencies.len());
        for dependency in thunk.dependencies.iter() {
            values.push(self.evaluate(*dependency)?);
        }

        (thunk.function)(self, &values)
    }

    /// Get an already computed value without evaluating anything.
    pub fn cached(&self, id: NodeId) -> Option<&LogicValue> {
        self.values.get(&id)?.as_ref()
    }

    /// Check whether a node has been evaluated, whether or not it got a
    /// value.
    pub fn is_evaluated(&self, id: NodeId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn thunk(&self, id: NodeId) -> Option<&EvaluationThunk> {
        self.thunks.get(&id)
    }

    /// Add or replace the thunk of a node, forgetting its cached value.
    pub fn insert_thunk(&mut self, id: NodeId, thunk: EvaluationThunk) {
        self.values.remove(&id);
        self.thunks.insert(id, thunk);
        self.cycles = None;
    }

    /// Remove every thunk and cached value of the given nodes.
    pub fn forget(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            self.values.remove(&id);
            self.thunks.remove(&id);
        }

        self.cycles = None;
    }

    pub fn has_cycles(&mut self) -> bool {
        !self.cycle_info().components.is_empty()
    }

    /// Get every node which is part of some cycle.
    pub fn cycle_members(&mut self) -> HashSet<NodeId> {
        self.cycle_info().members.clone()
    }

    /// Get the nodes of every cycle, each sorted by id.
    pub fn cycles(&mut self) -> Vec<Vec<NodeId>> {
        self.cycle_info().components.clone()
    }

    fn cycle_info(&mut self) -> Rc<Cycles> {
        if let Some(cycles) = &self.cycles {
            return cycles.clone();
        }

        let graph: std::collections::HashMap<NodeId, Vec<NodeId>> = self
            .thunks
            .iter()
            .map(|(id, thunk)| (*id, thunk.dependencies.clone()))
            .collect();

        let cycles = if components::is_acyclic(&graph) {
            Cycles::default()
        } else {
            let mut components: Vec<Vec<NodeId>> = components::cycles(&graph)
                .into_iter()
                .map(|component| {
                    let mut component: Vec<_> = component.into_iter().collect();
                    component.sort();
                    component
                })
                .collect();
            components.sort();

            let members = components.iter().flatten().copied().collect();

            // Copies made for function applications share the cycles of the
            // top-level context, which has already warned about them.
            if self.depth == 0 {
                for component in components.iter() {
                    warn!("found a cycle between {} nodes", component.len());
                }
            }

            Cycles {
                components,
                members,
            }
        };

        let cycles = Rc::new(cycles);
        self.cycles = Some(cycles.clone());
        cycles
    }

    fn enter_call(&mut self) {
        self.depth += 1;
    }
}
