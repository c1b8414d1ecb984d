use std::rc::Rc;

use log::trace;

use logic_common::ast::{
    BinaryOperator, Declaration, DeclarationNode, Expression, ExpressionNode, LiteralNode, NodeId,
    Program, Statement, StatementNode,
};
use logic_common::types::{self, Type};

use super::apply::{apply, Arguments};
use super::builtins::Builtin;
use super::defaults::default_value;
use super::{
    Environment, EvaluationContext, EvaluationThunk, Function, LogicValue, Memory, NativeFunction,
};

pub(super) fn build_program(context: &mut EvaluationContext, program: &Program) {
    let mut builder = ThunkBuilder::new(context);
    for declaration in program.declarations.iter() {
        builder.declaration(declaration);
    }
}

/// Creates thunks for nodes and puts them into a context.
pub(super) struct ThunkBuilder<'a> {
    context: &'a mut EvaluationContext,
    environment: Rc<Environment>,
}

impl<'a> ThunkBuilder<'a> {
    pub fn new(context: &'a mut EvaluationContext) -> Self {
        let environment = context.environment().clone();
        Self {
            context,
            environment,
        }
    }

    pub fn insert(&mut self, id: NodeId, thunk: EvaluationThunk) {
        self.context.insert_thunk(id, thunk);
    }

    /// Get the solved type of a node, or `fallback` if it has none.
    fn type_or(&self, id: NodeId, fallback: impl FnOnce() -> Type) -> Type {
        self.environment.type_of(id).unwrap_or_else(fallback)
    }

    pub fn declaration(&mut self, declaration: &Declaration) {
        match &declaration.node {
            DeclarationNode::Variable {
                name, initializer, ..
            } => match initializer {
                Some(initializer) => {
                    self.expression(initializer);
                    self.insert(name.id, EvaluationThunk::forward(&name.name, initializer.id));
                }

                None => {
                    let value = self
                        .environment
                        .type_of(name.id)
                        .and_then(|ty| default_value(&self.environment, &ty));

                    if let Some(value) = value {
                        self.insert(name.id, EvaluationThunk::constant(&name.name, value));
                    }
                }
            },

            DeclarationNode::Function { name, .. } => {
                let builtin = self
                    .environment
                    .scope
                    .namespace
                    .value_name(name.id)
                    .and_then(Builtin::from_path);

                let function = match builtin {
                    Some(builtin) => {
                        trace!("{} is the builtin {builtin:?}", name.name);
                        Function::Builtin(builtin)
                    }
                    None => Function::Closure {
                        declaration: declaration.id,
                    },
                };

                let ty = self.type_or(name.id, Type::unit);
                let value = LogicValue::function(ty, function);
                self.insert(name.id, EvaluationThunk::constant(&name.name, value));
            }

            DeclarationNode::Record {
                name, declarations, ..
            } => {
                if !types::is_scalar(&name.name) {
                    let ty = self.type_or(name.id, Type::unit);
                    let init = NativeFunction::RecordInit {
                        declaration: declaration.id,
                    };
                    let value = LogicValue::function(ty, Function::Native(init));
                    self.insert(name.id, EvaluationThunk::constant(&name.name, value));
                }

                for member in declarations {
                    let DeclarationNode::Variable {
                        name: member_name,
                        initializer,
                        ..
                    } = &member.node
                    else {
                        continue;
                    };

                    let ty = self.type_or(member_name.id, Type::unit);
                    let getter = NativeFunction::Getter {
                        member: member_name.name.clone(),
                    };
                    let value = LogicValue::function(ty, Function::Native(getter));
                    self.insert(
                        member_name.id,
                        EvaluationThunk::constant(&member_name.name, value),
                    );

                    if let Some(initializer) = initializer {
                        self.expression(initializer);
                    }
                }
            }

            DeclarationNode::Enumeration { name, cases, .. } => {
                for case in cases {
                    let ty = self.type_or(case.name.id, || self.environment.declared_type(name));

                    let value = if case.associated_values.is_empty() {
                        let memory = Memory::Enum {
                            case: case.name.name.clone(),
                            values: Vec::new(),
                        };
                        LogicValue::new(ty, memory)
                    } else {
                        let enumeration = match &ty {
                            Type::Fun { returns, .. } => returns.as_ref().clone(),
                            other => other.clone(),
                        };

                        let init = NativeFunction::EnumInit {
                            case: case.name.name.clone(),
                            ty: enumeration,
                        };
                        LogicValue::function(ty, Function::Native(init))
                    };

                    self.insert(case.name.id, EvaluationThunk::constant(&case.name.name, value));
                }
            }

            DeclarationNode::Namespace { declarations, .. } => {
                for declaration in declarations {
                    self.declaration(declaration);
                }
            }

            DeclarationNode::Placeholder => {}
        }
    }

    pub fn statement(&mut self, statement: &Statement) {
        match &statement.node {
            StatementNode::Declaration(declaration) => self.declaration(declaration),

            StatementNode::Expression(expression) | StatementNode::Return(expression) => {
                self.expression(expression)
            }

            StatementNode::Branch { condition, block } => {
                self.expression(condition);
                for statement in block {
                    self.statement(statement);
                }
            }

            StatementNode::Placeholder => {}
        }
    }

    pub fn expression(&mut self, expression: &Expression) {
        match &expression.node {
            ExpressionNode::Identifier(identifier) => {
                if let Some(pattern) = self.environment.scope.declaration_of(expression.id) {
                    let thunk = EvaluationThunk::forward(&identifier.name, pattern);
                    self.insert(expression.id, thunk);
                }
            }

            ExpressionNode::Member {
                expression: inner,
                member,
            } => {
                if expression.key_path().is_none() {
                    self.expression(inner);
                }

                if let Some(pattern) = self.environment.scope.declaration_of(expression.id) {
                    let thunk = EvaluationThunk::forward(&member.name, pattern);
                    self.insert(expression.id, thunk);
                }
            }

            ExpressionNode::Call { callee, arguments } => {
                self.expression(callee);

                let mut dependencies = vec![callee.id];
                let mut labels = Vec::with_capacity(arguments.len());

                for argument in arguments {
                    self.expression(&argument.expression);
                    dependencies.push(argument.expression.id);
                    labels.push(argument.label.clone());
                }

                let returns = self.environment.type_of(expression.id);
                let thunk = EvaluationThunk::new("call", dependencies, move |context, values| {
                    let (callee, values) = values.split_first()?;
                    let arguments = labels.iter().cloned().zip(values.iter().cloned());
                    apply(context, callee, Arguments::new(arguments), returns.clone())
                });

                self.insert(expression.id, thunk);
            }

            ExpressionNode::Literal(literal) => {
                let value = match &literal.node {
                    LiteralNode::None => LogicValue::unit(),
                    LiteralNode::Boolean(value) => LogicValue::boolean(*value),
                    LiteralNode::Number(value) => LogicValue::number(*value),
                    LiteralNode::String(value) => LogicValue::string(value.clone()),
                    LiteralNode::Color(value) => LogicValue::color(value.clone()),

                    LiteralNode::Array(elements) => {
                        for element in elements {
                            self.expression(element);
                        }

                        let ty = self.type_or(expression.id, || Type::array(Type::unit()));
                        let dependencies = elements.iter().map(|element| element.id).collect();
                        let thunk = EvaluationThunk::new("array", dependencies, move |_, values| {
                            Some(LogicValue::new(ty.clone(), Memory::Array(values.to_vec())))
                        });

                        self.insert(expression.id, thunk);
                        return;
                    }
                };

                self.insert(expression.id, EvaluationThunk::constant("literal", value));
            }

            ExpressionNode::Binary { left, op, right } => {
                self.expression(left);
                self.expression(right);

                let op = *op;
                let thunk = EvaluationThunk::new(
                    op.to_string(),
                    vec![left.id, right.id],
                    move |_, values| match values {
                        [left, right] => binary(op, left, right),
                        _ => None,
                    },
                );

                self.insert(expression.id, thunk);
            }

            ExpressionNode::Placeholder => {}
        }
    }
}

fn binary(op: BinaryOperator, left: &LogicValue, right: &LogicValue) -> Option<LogicValue> {
    match op {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide => {
            let (left, right) = (left.as_number()?, right.as_number()?);
            let result = match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Subtract => left - right,
                BinaryOperator::Multiply => left * right,
                _ if right == 0.0 => return None,
                _ => left / right,
            };

            Some(LogicValue::number(result))
        }

        BinaryOperator::IsEqualTo => Some(LogicValue::boolean(left.memory == right.memory)),
        BinaryOperator::IsNotEqualTo => Some(LogicValue::boolean(left.memory != right.memory)),

        BinaryOperator::IsLessThan
        | BinaryOperator::IsGreaterThan
        | BinaryOperator::IsLessThanOrEqualTo
        | BinaryOperator::IsGreaterThanOrEqualTo => {
            let ordering = match (&left.memory, &right.memory) {
                (Memory::Number(left), Memory::Number(right)) => left.partial_cmp(right)?,
                (Memory::String(left), Memory::String(right)) => left.cmp(right),
                _ => return None,
            };

            let result = match op {
                BinaryOperator::IsLessThan => ordering.is_lt(),
                BinaryOperator::IsGreaterThan => ordering.is_gt(),
                BinaryOperator::IsLessThanOrEqualTo => ordering.is_le(),
                _ => ordering.is_ge(),
            };

            Some(LogicValue::boolean(result))
        }

        BinaryOperator::And => Some(LogicValue::boolean(left.as_bool()? && right.as_bool()?)),
        BinaryOperator::Or => Some(LogicValue::boolean(left.as_bool()? || right.as_bool()?)),
    }
}
