use logic_common::ast::{Declaration, DeclarationNode, GenericParameter, Statement, StatementNode};
use logic_common::types::{self, Argument, Type};

use super::Constrainer;

impl Constrainer<'_> {
    /// Give every declared pattern its type before any constraints are
    /// generated, so that uses before the declaration see the real signature.
    pub(super) fn signatures(&mut self, declarations: &[Declaration]) {
        for declaration in declarations {
            self.signature(declaration);
        }
    }

    fn signature(&mut self, declaration: &Declaration) {
        match &declaration.node {
            DeclarationNode::Variable {
                name, annotation, ..
            } => {
                let ty = match annotation {
                    Some(annotation) => self.lower(annotation),
                    None => self.fresh(),
                };

                self.assign(name.id, ty);
            }

            DeclarationNode::Function {
                name,
                return_type,
                generic_parameters,
                parameters,
                block,
            } => {
                self.declare_generics(generic_parameters);

                let arguments = parameters
                    .iter()
                    .map(|parameter| {
                        let ty = self.lower(&parameter.annotation);
                        self.assign(parameter.name.id, ty.clone());
                        Argument::labelled(parameter.name.name.clone(), ty)
                    })
                    .collect();

                let returns = self.lower(return_type);
                self.assign(name.id, Type::fun(arguments, returns));

                self.block_signatures(block);
            }

            DeclarationNode::Record {
                name,
                generic_parameters,
                declarations,
            } => {
                let generics = self.declare_generics(generic_parameters);
                let record = Type::applied(self.constructor_name(name.id, &name.name), generics);

                let mut arguments = Vec::new();
                for member in declarations {
                    let DeclarationNode::Variable {
                        name: member_name,
                        annotation,
                        ..
                    } = &member.node
                    else {
                        continue;
                    };

                    // Only annotated members can be given to the constructor.
                    let ty = match annotation {
                        Some(annotation) => {
                            let ty = self.lower(annotation);
                            let label = member_name.name.clone();
                            arguments.push(Argument::labelled(label, ty.clone()));
                            ty
                        }
                        None => self.fresh(),
                    };

                    let getter = Type::fun(vec![Argument::unlabelled(record.clone())], ty);
                    self.assign(member_name.id, getter);
                }

                if !types::is_scalar(&name.name) {
                    self.assign(name.id, Type::fun(arguments, record));
                }
            }

            DeclarationNode::Enumeration {
                name,
                generic_parameters,
                cases,
            } => {
                let generics = self.declare_generics(generic_parameters);
                let enumeration = self.constructor_name(name.id, &name.name);
                let enumeration = Type::applied(enumeration, generics);

                for case in cases {
                    let arguments: Vec<_> = case
                        .associated_values
                        .iter()
                        .map(|annotation| Argument::unlabelled(self.lower(annotation)))
                        .collect();

                    // A case without associated values is a value, not a
                    // constructor.
                    let ty = if arguments.is_empty() {
                        enumeration.clone()
                    } else {
                        Type::fun(arguments, enumeration.clone())
                    };

                    self.assign(case.name.id, ty);
                }
            }

            DeclarationNode::Namespace { declarations, .. } => self.signatures(declarations),

            DeclarationNode::Placeholder => {}
        }
    }

    fn block_signatures(&mut self, block: &[Statement]) {
        for statement in block {
            match &statement.node {
                StatementNode::Declaration(declaration) => self.signature(declaration),
                StatementNode::Branch { block, .. } => self.block_signatures(block),
                _ => {}
            }
        }
    }

    /// Remember the patterns of some generic parameters, returning them as
    /// types.
    fn declare_generics(&mut self, generics: &[GenericParameter]) -> Vec<Type> {
        generics
            .iter()
            .map(|generic| {
                self.generics.insert(generic.name.id);
                Type::Generic(generic.name.name.clone())
            })
            .collect()
    }
}
