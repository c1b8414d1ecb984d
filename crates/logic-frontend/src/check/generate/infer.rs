use log::warn;

use logic_common::ast::{
    BinaryOperator, Declaration, DeclarationNode, Expression, ExpressionNode, LiteralNode, NodeId,
    Statement, StatementNode,
};
use logic_common::types::{Argument, Type};

use super::Constrainer;

impl Constrainer<'_> {
    pub(super) fn constrain_declaration(&mut self, declaration: &Declaration) {
        match &declaration.node {
            DeclarationNode::Variable {
                name, initializer, ..
            } => {
                let ty = self.type_of(name.id);

                if let Some(initializer) = initializer {
                    let actual = self.infer(initializer);
                    self.equate(
                        ty,
                        actual,
                        "variable initializer",
                        vec![initializer.id, name.id],
                    );
                }
            }

            DeclarationNode::Function {
                return_type,
                parameters,
                block,
                ..
            } => {
                for parameter in parameters {
                    if let Some(default) = &parameter.default_value {
                        let expected = self.type_of(parameter.name.id);
                        let actual = self.infer(default);
                        self.equate(
                            expected,
                            actual,
                            "default value",
                            vec![default.id, parameter.id],
                        );
                    }
                }

                let returns = self.type_of(return_type.id);
                self.returns.push(returns);

                for statement in block {
                    self.constrain_statement(statement);
                }

                self.returns.pop();
            }

            DeclarationNode::Record { declarations, .. } => {
                for member in declarations {
                    let DeclarationNode::Variable {
                        name,
                        initializer: Some(initializer),
                        ..
                    } = &member.node
                    else {
                        continue;
                    };

                    // Members are typed by their getter.
                    let expected = match self.type_of(name.id) {
                        Type::Fun { returns, .. } => *returns,
                        other => other,
                    };

                    let actual = self.infer(initializer);
                    self.equate(
                        expected,
                        actual,
                        "member initializer",
                        vec![initializer.id, name.id],
                    );
                }
            }

            DeclarationNode::Namespace { declarations, .. } => {
                for declaration in declarations {
                    self.constrain_declaration(declaration);
                }
            }

            DeclarationNode::Enumeration { .. } | DeclarationNode::Placeholder => {}
        }
    }

    fn constrain_statement(&mut self, statement: &Statement) {
        match &statement.node {
            StatementNode::Declaration(declaration) => self.constrain_declaration(declaration),

            StatementNode::Expression(expression) => {
                self.infer(expression);
            }

            StatementNode::Return(expression) => {
                let actual = self.infer(expression);

                match self.returns.last().cloned() {
                    Some(expected) => {
                        self.equate(expected, actual, "return", vec![expression.id, statement.id]);
                    }
                    None => warn!("return statement {} outside of any function", statement.id),
                }
            }

            StatementNode::Branch { condition, block } => {
                let actual = self.infer(condition);
                self.equate(
                    Type::boolean(),
                    actual,
                    "branch condition",
                    vec![condition.id],
                );

                for statement in block {
                    self.constrain_statement(statement);
                }
            }

            StatementNode::Placeholder => {}
        }
    }

    /// Infer the type of an expression, generating constraints for all of its
    /// parts.
    fn infer(&mut self, expression: &Expression) -> Type {
        let ty = match &expression.node {
            ExpressionNode::Identifier(_) => self.instantiate_use(expression.id),

            ExpressionNode::Member { expression: inner, .. } => {
                if expression.key_path().is_none() {
                    self.infer(inner);
                }

                self.instantiate_use(expression.id)
            }

            ExpressionNode::Call { callee, arguments } => {
                let callee_ty = self.infer(callee);

                // The callee is equated with a function of exactly the shape of
                // this call, so labels can be matched up by the solver.
                let mut placeholders = Vec::with_capacity(arguments.len());
                let mut actuals = Vec::with_capacity(arguments.len());

                for argument in arguments {
                    let placeholder = self.fresh();
                    let actual = self.infer(&argument.expression);
                    self.assign(argument.id, actual.clone());

                    placeholders.push(Argument {
                        label: argument.label.clone(),
                        ty: placeholder.clone(),
                    });
                    actuals.push((argument.id, placeholder, actual));
                }

                let returns = self.fresh();
                let expected = Type::fun(placeholders, returns.clone());
                self.equate(
                    callee_ty,
                    expected,
                    "call",
                    vec![callee.id, expression.id],
                );

                for (id, placeholder, actual) in actuals {
                    self.equate(placeholder, actual, "argument", vec![id, expression.id]);
                }

                returns
            }

            ExpressionNode::Literal(literal) => {
                let ty = match &literal.node {
                    LiteralNode::None => Type::unit(),
                    LiteralNode::Boolean(_) => Type::boolean(),
                    LiteralNode::Number(_) => Type::number(),
                    LiteralNode::String(_) => Type::string(),
                    LiteralNode::Color(_) => Type::color(),
                    LiteralNode::Array(elements) => {
                        let element = self.fresh();

                        for item in elements {
                            let actual = self.infer(item);
                            self.equate(
                                element.clone(),
                                actual,
                                "array element",
                                vec![item.id, literal.id],
                            );
                        }

                        Type::array(element)
                    }
                };

                self.assign(literal.id, ty)
            }

            ExpressionNode::Binary { left, op, right } => {
                let left_ty = self.infer(left);
                let right_ty = self.infer(right);
                self.binary(expression, *op, (left.id, left_ty), (right.id, right_ty))
            }

            ExpressionNode::Placeholder => self.fresh(),
        };

        self.assign(expression.id, ty)
    }

    fn binary(
        &mut self,
        expression: &Expression,
        op: BinaryOperator,
        (left, left_ty): (NodeId, Type),
        (right, right_ty): (NodeId, Type),
    ) -> Type {
        if op.is_arithmetic() {
            self.equate(Type::number(), left_ty, "arithmetic", vec![left, expression.id]);
            self.equate(Type::number(), right_ty, "arithmetic", vec![right, expression.id]);
            Type::number()
        } else if op.is_logical() {
            self.equate(Type::boolean(), left_ty, "logic", vec![left, expression.id]);
            self.equate(Type::boolean(), right_ty, "logic", vec![right, expression.id]);
            Type::boolean()
        } else {
            self.equate(left_ty, right_ty, "comparison", vec![right, left, expression.id]);
            Type::boolean()
        }
    }

    /// Get the instantiated type of whatever the identifier or member
    /// expression refers to.
    fn instantiate_use(&mut self, id: NodeId) -> Type {
        let declared = self
            .scope
            .declaration_of(id)
            .and_then(|pattern| self.types.get(&pattern))
            .cloned();

        match declared {
            Some(ty) => self.instantiate(&ty),
            None => self.fresh(),
        }
    }
}
