mod infer;
mod signature;

use std::collections::{HashMap, HashSet};

use log::{info, trace};

use logic_common::ast::{NodeId, Program, TypeAnnotation, TypeAnnotationNode};
use logic_common::names::NameGenerator;
use logic_common::types::{Argument, Type};

use super::solve::{unify, Substitution, UnificationError};
use super::{Constraint, Provenance};
use crate::scope::ScopeContext;

/// The types assigned to every node of a program, along with the constraints
/// they must satisfy.
#[derive(Clone, Debug, Default)]
pub struct UnificationContext {
    pub constraints: Vec<Constraint>,
    types: HashMap<NodeId, Type>,
}

impl UnificationContext {
    /// Assign a type to every pattern, expression and annotation of the
    /// program and collect the constraints between them.
    pub fn build(scope: &ScopeContext, program: &Program) -> Self {
        info!("generating constraints");

        let mut constrainer = Constrainer::new(scope);
        constrainer.signatures(&program.declarations);

        for declaration in program.declarations.iter() {
            constrainer.constrain_declaration(declaration);
        }

        trace!(
            "done generating constraints ({} constraints over {} nodes)",
            constrainer.constraints.len(),
            constrainer.types.len()
        );

        Self {
            constraints: constrainer.constraints,
            types: constrainer.types,
        }
    }

    /// Solve the constraints of this context.
    pub fn unify(&self) -> Result<Substitution, UnificationError> {
        unify(self.constraints.clone())
    }

    /// Get the unsolved type assigned to a node.
    pub fn raw_type_of(&self, id: NodeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Get the type of a node under the given substitution.
    pub fn type_of(&self, id: NodeId, substitution: &Substitution) -> Option<Type> {
        self.types.get(&id).map(|ty| substitution.substitute(ty))
    }

    pub fn types(&self) -> impl Iterator<Item = (NodeId, &Type)> {
        self.types.iter().map(|(id, ty)| (*id, ty))
    }
}

struct Constrainer<'a> {
    scope: &'a ScopeContext,
    names: NameGenerator,

    types: HashMap<NodeId, Type>,
    constraints: Vec<Constraint>,

    /// Patterns of every generic parameter seen so far.
    generics: HashSet<NodeId>,

    /// The return type of every function we are within.
    returns: Vec<Type>,
}

impl<'a> Constrainer<'a> {
    fn new(scope: &'a ScopeContext) -> Self {
        Self {
            scope,
            names: NameGenerator::new(),

            types: HashMap::new(),
            constraints: Vec::new(),

            generics: HashSet::new(),
            returns: Vec::new(),
        }
    }

    /// Create a unique type variable.
    fn fresh(&mut self) -> Type {
        Type::Var(self.names.fresh("t"))
    }

    fn equate(&mut self, left: Type, right: Type, description: &'static str, nodes: Vec<NodeId>) {
        self.constraints
            .push(Constraint::new(left, right, Provenance::new(description, nodes)));
    }

    /// Record the type of a node, returning it.
    fn assign(&mut self, id: NodeId, ty: Type) -> Type {
        self.types.insert(id, ty.clone());
        ty
    }

    /// Get the type of a node which has already been given one, or give it a
    /// fresh one.
    fn type_of(&mut self, id: NodeId) -> Type {
        match self.types.get(&id) {
            Some(ty) => ty.clone(),
            None => {
                let ty = self.fresh();
                self.assign(id, ty)
            }
        }
    }

    /// Replace every generic parameter of `ty` with a fresh type variable. Each
    /// distinct generic gets exactly one variable.
    fn instantiate(&mut self, ty: &Type) -> Type {
        let generics = ty.generic_names();
        if generics.is_empty() {
            return ty.clone();
        }

        let mapping: HashMap<String, Type> = generics
            .into_iter()
            .map(|name| (name, self.fresh()))
            .collect();

        ty.map_leaves(&mut |leaf: &Type| match leaf {
            Type::Generic(name) => mapping.get(name).cloned(),
            _ => None,
        })
    }

    /// Get the name of the type constructor declared by a pattern. Types are
    /// named by their qualified name, so that types with the same name in
    /// different namespaces are different types.
    fn constructor_name(&self, pattern: NodeId, name: &str) -> String {
        match self.scope.namespace.type_name(pattern) {
            Some(path) => path.to_string(),
            None => name.to_string(),
        }
    }

    /// Lower a type annotation into a type, recording the type of the
    /// annotation and all of its parts.
    fn lower(&mut self, annotation: &TypeAnnotation) -> Type {
        let ty = match &annotation.node {
            TypeAnnotationNode::Identifier {
                identifier,
                generic_arguments,
            } => {
                let pattern = self.scope.type_declaration_of(annotation.id);

                if pattern.is_some_and(|pattern| self.generics.contains(&pattern)) {
                    Type::Generic(identifier.name.clone())
                } else {
                    let name = match pattern {
                        Some(pattern) => self.constructor_name(pattern, &identifier.name),
                        None => identifier.name.clone(),
                    };

                    let parameters = generic_arguments
                        .iter()
                        .map(|argument| self.lower(argument))
                        .collect();
                    Type::applied(name, parameters)
                }
            }

            TypeAnnotationNode::Function { arguments, returns } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| Argument::unlabelled(self.lower(argument)))
                    .collect();
                let returns = self.lower(returns);
                Type::fun(arguments, returns)
            }

            TypeAnnotationNode::Placeholder => self.fresh(),
        };

        self.assign(annotation.id, ty)
    }
}
