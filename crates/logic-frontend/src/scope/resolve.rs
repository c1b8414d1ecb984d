use std::ops::ControlFlow;

use log::trace;

use logic_common::ast::{
    Declaration, DeclarationNode, Expression, ExpressionNode, FunctionParameter, GenericParameter,
    LiteralNode, NodeId, Pattern, Program, Statement, StatementNode, TypeAnnotation,
    TypeAnnotationNode,
};
use logic_common::names::NamePath;

use super::ScopeContext;

/// Resolve the names of the program into the given context. Returns `true` if
/// resolution stopped at `target`, in which case the scopes of the context
/// are left exactly as they were when the target was reached.
pub(super) fn resolve(
    context: &mut ScopeContext,
    program: &Program,
    target: Option<NodeId>,
) -> bool {
    let mut resolver = Resolver { context, target };
    resolver.resolve_program(program).is_break()
}

type Flow = ControlFlow<()>;

struct Resolver<'a> {
    context: &'a mut ScopeContext,
    target: Option<NodeId>,
}

impl Resolver<'_> {
    fn enter(&self, id: NodeId) -> Flow {
        if self.target == Some(id) {
            trace!("stopping name resolution at {id}");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn resolve_program(&mut self, program: &Program) -> Flow {
        self.enter(program.id)?;
        for declaration in program.declarations.iter() {
            self.resolve_declaration(declaration)?;
        }

        ControlFlow::Continue(())
    }

    fn resolve_declaration(&mut self, declaration: &Declaration) -> Flow {
        self.enter(declaration.id)?;

        match &declaration.node {
            DeclarationNode::Variable {
                name,
                annotation,
                initializer,
            } => {
                self.enter(name.id)?;

                if let Some(annotation) = annotation {
                    self.resolve_type(annotation)?;
                }

                if let Some(initializer) = initializer {
                    self.resolve_expression(initializer)?;
                }

                // Top-level variables are found through the namespace.
                if self.is_local() {
                    self.bind(name)?;
                }

                ControlFlow::Continue(())
            }

            DeclarationNode::Function {
                name,
                return_type,
                generic_parameters,
                parameters,
                block,
            } => {
                self.enter(name.id)?;

                // A local function is visible after its declaration, and within
                // itself.
                if self.is_local() {
                    self.bind(name)?;
                }

                self.context.scopes.push(Vec::new());
                self.context.type_scopes.push(Vec::new());

                self.bind(name)?;
                self.bind_generics(generic_parameters)?;

                for parameter in parameters {
                    self.resolve_parameter(parameter)?;
                }

                self.resolve_type(return_type)?;
                self.resolve_block(block)?;

                self.context.type_scopes.pop();
                self.context.scopes.pop();

                ControlFlow::Continue(())
            }

            DeclarationNode::Record {
                name,
                generic_parameters,
                declarations,
            } => {
                self.enter(name.id)?;
                self.context.type_scopes.push(Vec::new());
                self.bind_generics(generic_parameters)?;
                self.context.namespace_path.push(&name.name);

                for member in declarations {
                    self.enter(member.id)?;

                    if let DeclarationNode::Variable {
                        name,
                        annotation,
                        initializer,
                    } = &member.node
                    {
                        self.enter(name.id)?;

                        if let Some(annotation) = annotation {
                            self.resolve_type(annotation)?;
                        }

                        if let Some(initializer) = initializer {
                            self.resolve_expression(initializer)?;
                        }
                    }
                }

                self.context.namespace_path.pop();
                self.context.type_scopes.pop();

                ControlFlow::Continue(())
            }

            DeclarationNode::Enumeration {
                name,
                generic_parameters,
                cases,
            } => {
                self.enter(name.id)?;
                self.context.type_scopes.push(Vec::new());
                self.bind_generics(generic_parameters)?;
                self.context.namespace_path.push(&name.name);

                for case in cases {
                    self.enter(case.id)?;
                    self.enter(case.name.id)?;

                    for annotation in case.associated_values.iter() {
                        self.resolve_type(annotation)?;
                    }
                }

                self.context.namespace_path.pop();
                self.context.type_scopes.pop();

                ControlFlow::Continue(())
            }

            DeclarationNode::Namespace { name, declarations } => {
                self.enter(name.id)?;
                self.context.namespace_path.push(&name.name);

                for declaration in declarations {
                    self.resolve_declaration(declaration)?;
                }

                self.context.namespace_path.pop();

                ControlFlow::Continue(())
            }

            DeclarationNode::Placeholder => ControlFlow::Continue(()),
        }
    }

    fn resolve_parameter(&mut self, parameter: &FunctionParameter) -> Flow {
        self.enter(parameter.id)?;
        self.resolve_type(&parameter.annotation)?;

        if let Some(default) = &parameter.default_value {
            self.resolve_expression(default)?;
        }

        self.bind(&parameter.name)
    }

    fn resolve_block(&mut self, block: &[Statement]) -> Flow {
        for statement in block {
            self.resolve_statement(statement)?;
        }

        ControlFlow::Continue(())
    }

    fn resolve_statement(&mut self, statement: &Statement) -> Flow {
        self.enter(statement.id)?;

        match &statement.node {
            StatementNode::Declaration(declaration) => self.resolve_declaration(declaration),

            StatementNode::Expression(expression) | StatementNode::Return(expression) => {
                self.resolve_expression(expression)
            }

            StatementNode::Branch { condition, block } => {
                self.resolve_expression(condition)?;

                self.context.scopes.push(Vec::new());
                self.resolve_block(block)?;
                self.context.scopes.pop();

                ControlFlow::Continue(())
            }

            StatementNode::Placeholder => ControlFlow::Continue(()),
        }
    }

    fn resolve_expression(&mut self, expression: &Expression) -> Flow {
        self.enter(expression.id)?;

        match &expression.node {
            ExpressionNode::Identifier(identifier) => {
                self.enter(identifier.id)?;

                match self.lookup_value(&identifier.name) {
                    Some(pattern) => {
                        trace!("`{}` at {} refers to {pattern}", identifier.name, expression.id);
                        self.context
                            .identifier_to_pattern
                            .insert(expression.id, pattern);
                    }

                    None => {
                        trace!("`{}` at {} is undefined", identifier.name, expression.id);
                        self.context.undefined_identifiers.insert(expression.id);
                    }
                }

                ControlFlow::Continue(())
            }

            ExpressionNode::Member {
                expression: inner,
                member,
            } => {
                // Member chains on plain names are looked up in the namespace
                // as a whole, so `Color.setHue` never resolves `Color` on its
                // own.
                let found = expression
                    .key_path()
                    .and_then(|path| self.context.namespace.get(&NamePath(path)));

                match found {
                    Some(pattern) => {
                        self.context
                            .identifier_to_pattern
                            .insert(expression.id, pattern);
                    }

                    None => {
                        if expression.key_path().is_none() {
                            self.resolve_expression(inner)?;
                        }

                        trace!("member `{}` at {} is undefined", member.name, expression.id);
                        self.context
                            .undefined_member_expressions
                            .insert(expression.id);
                    }
                }

                self.enter(member.id)
            }

            ExpressionNode::Call { callee, arguments } => {
                self.resolve_expression(callee)?;

                for argument in arguments {
                    self.enter(argument.id)?;
                    self.resolve_expression(&argument.expression)?;
                }

                ControlFlow::Continue(())
            }

            ExpressionNode::Literal(literal) => {
                self.enter(literal.id)?;

                if let LiteralNode::Array(elements) = &literal.node {
                    for element in elements {
                        self.resolve_expression(element)?;
                    }
                }

                ControlFlow::Continue(())
            }

            ExpressionNode::Binary { left, right, .. } => {
                self.resolve_expression(left)?;
                self.resolve_expression(right)
            }

            ExpressionNode::Placeholder => ControlFlow::Continue(()),
        }
    }

    fn resolve_type(&mut self, annotation: &TypeAnnotation) -> Flow {
        self.enter(annotation.id)?;

        match &annotation.node {
            TypeAnnotationNode::Identifier {
                identifier,
                generic_arguments,
            } => {
                self.enter(identifier.id)?;

                match self.lookup_type(&identifier.name) {
                    Some(pattern) => {
                        self.context
                            .type_identifier_to_pattern
                            .insert(annotation.id, pattern);
                    }

                    None => {
                        trace!("type `{}` at {} is undefined", identifier.name, annotation.id);
                        self.context.undefined_type_identifiers.insert(annotation.id);
                    }
                }

                for argument in generic_arguments {
                    self.resolve_type(argument)?;
                }

                ControlFlow::Continue(())
            }

            TypeAnnotationNode::Function { arguments, returns } => {
                for argument in arguments {
                    self.resolve_type(argument)?;
                }

                self.resolve_type(returns)
            }

            TypeAnnotationNode::Placeholder => ControlFlow::Continue(()),
        }
    }

    fn bind(&mut self, pattern: &Pattern) -> Flow {
        self.enter(pattern.id)?;

        if let Some(scope) = self.context.scopes.last_mut() {
            scope.push((pattern.name.clone(), pattern.id));
        }

        ControlFlow::Continue(())
    }

    fn bind_generics(&mut self, generics: &[GenericParameter]) -> Flow {
        for generic in generics {
            self.enter(generic.id)?;
            self.enter(generic.name.id)?;

            if let Some(scope) = self.context.type_scopes.last_mut() {
                scope.push((generic.name.name.clone(), generic.name.id));
            }
        }

        ControlFlow::Continue(())
    }

    fn is_local(&self) -> bool {
        !self.context.scopes.is_empty()
    }

    /// Look a value up in the lexical scopes first, then as a top-level name,
    /// and finally within the enclosing namespace.
    fn lookup_value(&self, name: &str) -> Option<NodeId> {
        ScopeContext::lookup(&self.context.scopes, name)
            .or_else(|| self.context.namespace.get(&NamePath::single(name)))
            .or_else(|| {
                let path = self.context.namespace_path.child(name);
                self.context.namespace.get(&path)
            })
    }

    fn lookup_type(&self, name: &str) -> Option<NodeId> {
        ScopeContext::lookup(&self.context.type_scopes, name)
            .or_else(|| self.context.namespace.get_type(&NamePath::single(name)))
            .or_else(|| {
                let path = self.context.namespace_path.child(name);
                self.context.namespace.get_type(&path)
            })
    }
}
