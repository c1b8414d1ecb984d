use std::collections::HashMap;

use log::trace;

use logic_common::ast::{DeclarationNode, GenericParameter};
use logic_common::types::{Type, ARRAY, BOOLEAN, COLOR, NUMBER, STRING, UNIT};

use super::{Environment, Function, LogicValue, Memory};

/// Records may contain themselves, so defaults stop being synthesized this
/// deep.
const MAX_DEPTH: usize = 16;

/// Synthesize the value a variable of the given type gets if nothing else is
/// known about it. Types that are not fully solved have no default.
pub fn default_value(environment: &Environment, ty: &Type) -> Option<LogicValue> {
    default_at(environment, ty, 0)
}

fn default_at(environment: &Environment, ty: &Type, depth: usize) -> Option<LogicValue> {
    if depth > MAX_DEPTH {
        trace!("giving up on a default for {ty}");
        return None;
    }

    match ty {
        Type::Var(_) | Type::Generic(_) => None,

        Type::Fun { returns, .. } => {
            let value = default_at(environment, returns, depth + 1)?;
            Some(LogicValue::function(
                ty.clone(),
                Function::Value(Box::new(value)),
            ))
        }

        Type::Cons { name, parameters } => {
            let memory = match name.as_str() {
                UNIT => Memory::Unit,
                BOOLEAN => Memory::Bool(false),
                NUMBER => Memory::Number(0.0),
                STRING => Memory::String(String::new()),
                COLOR => Memory::String("#000000".into()),
                ARRAY => Memory::Array(Vec::new()),
                _ => return user_default(environment, ty, name, parameters, depth),
            };

            Some(LogicValue::new(ty.clone(), memory))
        }
    }
}

fn user_default(
    environment: &Environment,
    ty: &Type,
    name: &str,
    parameters: &[Type],
    depth: usize,
) -> Option<LogicValue> {
    let pattern = environment.find_type(name)?;
    let declaration = environment
        .program
        .parent_of(pattern)?
        .as_declaration()?;

    match &declaration.node {
        DeclarationNode::Record {
            generic_parameters,
            declarations,
            ..
        } => {
            let generics = bind_generics(generic_parameters, parameters);
            let mut members = Vec::new();

            for member in declarations {
                let DeclarationNode::Variable { name, .. } = &member.node else {
                    continue;
                };

                let member_ty = match environment.type_of(name.id)? {
                    Type::Fun { returns, .. } => *returns,
                    other => other,
                };

                let member_ty = member_ty.map_leaves(&mut |leaf: &Type| match leaf {
                    Type::Generic(name) => generics.get(name.as_str()).cloned(),
                    _ => None,
                });

                let value = default_at(environment, &member_ty, depth + 1)?;
                members.push((name.name.clone(), value));
            }

            Some(LogicValue::new(ty.clone(), Memory::Record(members)))
        }

        DeclarationNode::Enumeration { cases, .. } => {
            let case = cases
                .iter()
                .find(|case| case.associated_values.is_empty())?;

            let memory = Memory::Enum {
                case: case.name.name.clone(),
                values: Vec::new(),
            };

            Some(LogicValue::new(ty.clone(), memory))
        }

        _ => None,
    }
}

fn bind_generics<'a>(
    generics: &'a [GenericParameter],
    parameters: &[Type],
) -> HashMap<&'a str, Type> {
    generics
        .iter()
        .zip(parameters)
        .map(|(generic, ty)| (generic.name.name.as_str(), ty.clone()))
        .collect()
}
