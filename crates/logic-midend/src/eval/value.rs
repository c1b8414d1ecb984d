use std::fmt;

use itertools::Itertools;

use logic_common::ast::NodeId;
use logic_common::types::{Type, COLOR};

use super::builtins::Builtin;

/// A runtime value along with its static type.
#[derive(Clone, Debug, PartialEq)]
pub struct LogicValue {
    pub ty: Type,
    pub memory: Memory,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Memory {
    Unit,
    Bool(bool),
    Number(f64),

    /// Strings, and colours as CSS strings.
    String(String),

    Array(Vec<LogicValue>),

    Enum {
        case: String,
        values: Vec<LogicValue>,
    },

    /// Member values in declaration order.
    Record(Vec<(String, LogicValue)>),

    Function(Function),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Function {
    /// One of the functions of the prelude.
    Builtin(Builtin),

    /// A user function, applied by evaluating its body.
    Closure { declaration: NodeId },

    /// A function which ignores its arguments.
    Value(Box<LogicValue>),

    Native(NativeFunction),
}

/// Functions synthesized from type declarations.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeFunction {
    /// The constructor of the record declared by `declaration`.
    RecordInit { declaration: NodeId },

    /// An enumeration case with associated values.
    EnumInit { case: String, ty: Type },

    /// Get a member of a record.
    Getter { member: String },
}

impl LogicValue {
    pub fn new(ty: Type, memory: Memory) -> Self {
        Self { ty, memory }
    }

    pub fn unit() -> Self {
        Self::new(Type::unit(), Memory::Unit)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(Type::boolean(), Memory::Bool(value))
    }

    pub fn number(value: f64) -> Self {
        Self::new(Type::number(), Memory::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Type::string(), Memory::String(value.into()))
    }

    pub fn color(value: impl Into<String>) -> Self {
        Self::new(Type::color(), Memory::String(value.into()))
    }

    pub fn array(element: Type, values: Vec<LogicValue>) -> Self {
        Self::new(Type::array(element), Memory::Array(values))
    }

    pub fn function(ty: Type, function: Function) -> Self {
        Self::new(ty, Memory::Function(function))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.memory {
            Memory::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.memory {
            Memory::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.memory {
            Memory::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[LogicValue]> {
        match &self.memory {
            Memory::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Get the CSS string of a colour value.
    pub fn as_color(&self) -> Option<&str> {
        if self.ty.cons_name() == Some(COLOR) {
            self.as_str()
        } else {
            None
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match &self.memory {
            Memory::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Get a member of a record value.
    pub fn field(&self, name: &str) -> Option<&LogicValue> {
        match &self.memory {
            Memory::Record(members) => members
                .iter()
                .find(|(member, _)| member == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Get the case name of an enumeration value.
    pub fn case(&self) -> Option<&str> {
        match &self.memory {
            Memory::Enum { case, .. } => Some(case),
            _ => None,
        }
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.memory {
            Memory::Unit => write!(f, "()"),
            Memory::Bool(value) => write!(f, "{value}"),
            Memory::Number(value) => write!(f, "{value}"),
            Memory::String(value) if self.as_color().is_some() => write!(f, "{value}"),
            Memory::String(value) => write!(f, "{value:?}"),
            Memory::Array(values) => write!(f, "[{}]", values.iter().join(", ")),
            Memory::Enum { case, values } if values.is_empty() => write!(f, ".{case}"),
            Memory::Enum { case, values } => write!(f, ".{case}({})", values.iter().join(", ")),
            Memory::Record(members) => write!(
                f,
                "{}({})",
                self.ty.cons_name().unwrap_or("record"),
                members
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .join(", ")
            ),
            Memory::Function(_) => write!(f, "<function: {}>", self.ty),
        }
    }
}
