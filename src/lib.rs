//! The compiler core of a small visual programming language.
//!
//! An editor hands [`compile`] a snapshot of its syntax tree. The snapshot is
//! joined with the [prelude](logic_common::prelude), its names are resolved,
//! its types are inferred and finally every top-level value gets a lazily
//! evaluated thunk. Problems along the way are reported to the [`Driver`] as
//! messages; the pipeline never fails outright on a nonsensical program.

pub use logic_common as common;
pub use logic_frontend as frontend;
pub use logic_midend as midend;

pub use driver::{CollectingDriver, LogDriver};
pub use logic_common::{Driver, EvalAmount};

mod driver;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use log::{debug, info, trace};

use logic_common::ast::{NodeId, Program};
use logic_common::prelude;
use logic_common::types::Type;
use logic_frontend::namespace::{Namespace, NamespaceError};
use logic_frontend::scope::declare;
use logic_frontend::{ScopeContext, Substitution, UnificationContext};
use logic_midend::{Environment, EvaluationContext, LogicValue};

/// Everything the pipeline found out about one snapshot. Later stages are
/// missing if an earlier stage failed or the driver asked for less.
#[derive(Debug)]
pub struct Compilation {
    program: Rc<Program>,
    namespace: Option<Namespace>,
    scope: Option<Rc<ScopeContext>>,
    unification: Option<Rc<UnificationContext>>,
    substitution: Option<Rc<Substitution>>,
    evaluation: Option<EvaluationContext>,
}

/// Run the pipeline on a program. The prelude is added to it, so its node ids
/// must stay below [`prelude::FIRST_ID`].
pub fn compile(driver: &mut impl Driver, program: Program) -> Compilation {
    info!("beginning compilation");

    let amount = driver.eval_amount();
    let prelude = prelude::program();

    let namespace = match declare_all(&prelude, &program) {
        Ok(namespace) => Some(namespace),
        Err(error) => {
            driver.report(error.messages());
            None
        }
    };

    let program = Rc::new(Program::join(program.id, [prelude, program]));

    let mut compilation = Compilation {
        program: program.clone(),
        namespace: namespace.clone(),
        scope: None,
        unification: None,
        substitution: None,
        evaluation: None,
    };

    let Some(namespace) = namespace else {
        debug!("skipped everything after declaration");
        return compilation;
    };

    let scope = Rc::new(ScopeContext::build_with(namespace, &program, None));
    driver.report(scope.messages(&program));
    compilation.scope = Some(scope.clone());

    if amount == EvalAmount::None {
        debug!("skipped type checking");
        return compilation;
    }

    let unification = Rc::new(UnificationContext::build(&scope, &program));
    compilation.unification = Some(unification.clone());

    let substitution = match unification.unify() {
        Ok(substitution) => Rc::new(substitution),
        Err(error) => {
            driver.report(error.messages());
            debug!("skipped evaluation");
            return compilation;
        }
    };

    compilation.substitution = Some(substitution.clone());

    if amount == EvalAmount::Types {
        debug!("skipped evaluation");
        return compilation;
    }

    let environment = Environment::new(program, scope, unification, substitution);
    compilation.evaluation = Some(logic_midend::evaluate(driver, environment));

    trace!("done compiling");
    compilation
}

fn declare_all(prelude: &Program, program: &Program) -> Result<Namespace, NamespaceError> {
    let namespaces = [declare(prelude)?, declare(program)?];
    Namespace::merge(namespaces)
}

impl Compilation {
    /// The program together with the prelude.
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn scope(&self) -> Option<&ScopeContext> {
        self.scope.as_deref()
    }

    pub fn unification(&self) -> Option<&UnificationContext> {
        self.unification.as_deref()
    }

    pub fn substitution(&self) -> Option<&Substitution> {
        self.substitution.as_deref()
    }

    pub fn evaluation(&mut self) -> Option<&mut EvaluationContext> {
        self.evaluation.as_mut()
    }

    /// Get the solved type of a node.
    pub fn type_of(&self, id: NodeId) -> Option<Type> {
        let unification = self.unification.as_ref()?;
        let substitution = self.substitution.as_ref()?;
        unification.type_of(id, substitution)
    }

    /// Get the value of a node, computing it if necessary.
    pub fn evaluate(&mut self, id: NodeId) -> Option<LogicValue> {
        self.evaluation.as_mut()?.evaluate(id)
    }

    /// Get the lexical names visible at the given node. Resolution is run
    /// again and stopped at that node.
    pub fn names_in_scope_at(&self, id: NodeId) -> Vec<(String, NodeId)> {
        self.scope_at(id)
            .map(|scope| scope.names_in_scope())
            .unwrap_or_default()
    }

    /// Get every name an identifier at the given node could refer to,
    /// including those found through the namespace, for completions.
    pub fn visible_names_at(&self, id: NodeId) -> Vec<(String, NodeId)> {
        self.scope_at(id)
            .map(|scope| scope.visible_names())
            .unwrap_or_default()
    }

    fn scope_at(&self, id: NodeId) -> Option<ScopeContext> {
        let namespace = self.namespace.clone()?;
        Some(ScopeContext::build_with(namespace, &self.program, Some(id)))
    }
}
