use std::ops::ControlFlow;

use log::{debug, trace, warn};

use logic_common::ast::{DeclarationNode, Node, NodeId, Statement, StatementNode};
use logic_common::types::Type;

use super::build::ThunkBuilder;
use super::defaults::default_value;
use super::{EvaluationContext, EvaluationThunk, Function, LogicValue, Memory, NativeFunction};

/// The arguments of a call, labelled or not.
#[derive(Clone, Debug, Default)]
pub struct Arguments(Vec<(Option<String>, LogicValue)>);

impl Arguments {
    pub fn new(arguments: impl IntoIterator<Item = (Option<String>, LogicValue)>) -> Self {
        Self(arguments.into_iter().collect())
    }

    /// Get the argument for a parameter. If the call labels any of its
    /// arguments, arguments are matched by label only; otherwise they are
    /// matched by position.
    pub fn get(&self, label: &str, position: usize) -> Option<&LogicValue> {
        let labelled = self.0.iter().any(|(label, _)| label.is_some());

        if labelled {
            self.0
                .iter()
                .find(|(other, _)| other.as_deref() == Some(label))
                .map(|(_, value)| value)
        } else {
            self.0.get(position).map(|(_, value)| value)
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &LogicValue> {
        self.0.iter().map(|(_, value)| value)
    }
}

/// Apply a function value to some arguments. `returns` is the type the call
/// is expected to produce.
pub fn apply(
    context: &EvaluationContext,
    callee: &LogicValue,
    arguments: Arguments,
    returns: Option<Type>,
) -> Option<LogicValue> {
    let Memory::Function(function) = &callee.memory else {
        debug!("cannot call the non-function {callee}");
        return None;
    };

    match function {
        Function::Builtin(builtin) => builtin.call(&arguments),
        Function::Closure { declaration } => call_closure(context, *declaration, &arguments),
        Function::Value(value) => Some(value.as_ref().clone()),
        Function::Native(native) => call_native(context, native, &arguments, returns),
    }
}

fn call_closure(
    context: &EvaluationContext,
    declaration: NodeId,
    arguments: &Arguments,
) -> Option<LogicValue> {
    let environment = context.environment().clone();

    if context.depth() >= environment.call_depth_limit {
        warn!(
            "abandoning call of {declaration} nested {} calls deep",
            context.depth()
        );
        return None;
    }

    let function = environment.program.find(declaration)?.as_declaration()?;
    let DeclarationNode::Function {
        name,
        parameters,
        block,
        ..
    } = &function.node
    else {
        return None;
    };

    trace!("applying {}", name.name);

    let mut inner = context.copy();
    inner.enter_call();

    // An enclosing application of the same function may have left values for
    // the body behind.
    let mut stale = Vec::new();
    for parameter in parameters {
        subtree(Node::FunctionParameter(parameter), &mut stale);
    }
    for statement in block {
        subtree(Node::Statement(statement), &mut stale);
    }
    inner.forget(stale);

    {
        let mut builder = ThunkBuilder::new(&mut inner);

        for (position, parameter) in parameters.iter().enumerate() {
            let label = &parameter.name.name;

            let thunk = match (arguments.get(label, position), &parameter.default_value) {
                (Some(value), _) => EvaluationThunk::constant(label, value.clone()),

                (None, Some(default)) => {
                    builder.expression(default);
                    EvaluationThunk::forward(label, default.id)
                }

                (None, None) => {
                    let value = environment
                        .type_of(parameter.name.id)
                        .and_then(|ty| default_value(&environment, &ty))
                        .unwrap_or_else(LogicValue::unit);
                    EvaluationThunk::constant(label, value)
                }
            };

            builder.insert(parameter.name.id, thunk);
        }

        for statement in block {
            builder.statement(statement);
        }
    }

    match find_return(&mut inner, block) {
        ControlFlow::Break(value) => value,
        ControlFlow::Continue(()) => Some(LogicValue::unit()),
    }
}

/// Evaluate the first `return` statement the block reaches. Branches are only
/// entered if their condition holds.
fn find_return(
    context: &mut EvaluationContext,
    block: &[Statement],
) -> ControlFlow<Option<LogicValue>> {
    for statement in block {
        match &statement.node {
            StatementNode::Return(expression) => {
                return ControlFlow::Break(context.evaluate(expression.id));
            }

            StatementNode::Branch { condition, block } => {
                match context.evaluate(condition.id).and_then(|value| value.as_bool()) {
                    Some(true) => find_return(context, block)?,
                    Some(false) => {}
                    None => return ControlFlow::Break(None),
                }
            }

            StatementNode::Declaration(_)
            | StatementNode::Expression(_)
            | StatementNode::Placeholder => {}
        }
    }

    ControlFlow::Continue(())
}

fn call_native(
    context: &EvaluationContext,
    native: &NativeFunction,
    arguments: &Arguments,
    returns: Option<Type>,
) -> Option<LogicValue> {
    match native {
        NativeFunction::RecordInit { declaration } => {
            let environment = context.environment().clone();
            let record = environment.program.find(*declaration)?.as_declaration()?;
            let DeclarationNode::Record {
                name, declarations, ..
            } = &record.node
            else {
                return None;
            };

            let mut scratch = None;
            let mut members = Vec::new();

            let mut position = 0;
            for member in declarations {
                let DeclarationNode::Variable {
                    name: member_name,
                    annotation,
                    initializer,
                } = &member.node
                else {
                    continue;
                };

                // Arguments line up with the annotated members only.
                let argument = match annotation {
                    Some(_) => {
                        position += 1;
                        arguments.get(&member_name.name, position - 1)
                    }
                    None => None,
                };

                let value = match (argument, initializer) {
                    (Some(value), _) => Some(value.clone()),
                    (None, Some(initializer)) => scratch
                        .get_or_insert_with(|| context.copy())
                        .evaluate(initializer.id),
                    (None, None) => None,
                };

                let value = value
                    .or_else(|| {
                        let ty = match environment.type_of(member_name.id)? {
                            Type::Fun { returns, .. } => *returns,
                            other => other,
                        };
                        default_value(&environment, &ty)
                    })
                    .unwrap_or_else(LogicValue::unit);

                members.push((member_name.name.clone(), value));
            }

            let ty = returns.unwrap_or_else(|| environment.declared_type(name));
            Some(LogicValue::new(ty, Memory::Record(members)))
        }

        NativeFunction::EnumInit { case, ty } => {
            let memory = Memory::Enum {
                case: case.clone(),
                values: arguments.values().cloned().collect(),
            };

            Some(LogicValue::new(returns.unwrap_or_else(|| ty.clone()), memory))
        }

        NativeFunction::Getter { member } => {
            let record = arguments.values().next()?;
            record.field(member).cloned()
        }
    }
}

fn subtree(node: Node<'_>, ids: &mut Vec<NodeId>) {
    ids.push(node.id());
    for child in node.children() {
        subtree(child, ids);
    }
}
