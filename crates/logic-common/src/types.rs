//! Type terms, the currency of both constraint generation and unification.

use std::fmt;

use itertools::Itertools;

pub const BOOLEAN: &str = "Boolean";
pub const NUMBER: &str = "Number";
pub const STRING: &str = "String";
pub const COLOR: &str = "Color";
pub const ARRAY: &str = "Array";
pub const OPTIONAL: &str = "Optional";
pub const UNIT: &str = "Unit";

/// The built-in scalar types. These are written with literal syntax, so no
/// constructor function is synthesized for them.
pub const SCALAR_TYPES: [&str; 5] = [BOOLEAN, NUMBER, STRING, ARRAY, COLOR];

pub fn is_scalar(name: &str) -> bool {
    SCALAR_TYPES.contains(&name)
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// An inference variable, waiting to be solved.
    Var(String),

    /// A type constructor applied to some parameters, like `Number` or
    /// `Array<String>`.
    Cons { name: String, parameters: Vec<Type> },

    /// A universally quantified parameter of a polymorphic signature. These are
    /// replaced by fresh inference variables wherever the signature is used.
    Generic(String),

    Fun {
        arguments: Vec<Argument>,
        returns: Box<Type>,
    },
}

/// A possibly labelled function argument type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Argument {
    pub label: Option<String>,
    pub ty: Type,
}

impl Argument {
    pub fn labelled(label: impl Into<String>, ty: Type) -> Self {
        Self {
            label: Some(label.into()),
            ty,
        }
    }

    pub fn unlabelled(ty: Type) -> Self {
        Self { label: None, ty }
    }
}

impl Type {
    pub fn cons(name: impl Into<String>) -> Self {
        Self::Cons {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn applied(name: impl Into<String>, parameters: Vec<Type>) -> Self {
        Self::Cons {
            name: name.into(),
            parameters,
        }
    }

    pub fn fun(arguments: Vec<Argument>, returns: Type) -> Self {
        Self::Fun {
            arguments,
            returns: Box::new(returns),
        }
    }

    pub fn unit() -> Self {
        Self::cons(UNIT)
    }

    pub fn boolean() -> Self {
        Self::cons(BOOLEAN)
    }

    pub fn number() -> Self {
        Self::cons(NUMBER)
    }

    pub fn string() -> Self {
        Self::cons(STRING)
    }

    pub fn color() -> Self {
        Self::cons(COLOR)
    }

    pub fn array(element: Type) -> Self {
        Self::applied(ARRAY, vec![element])
    }

    pub fn optional(element: Type) -> Self {
        Self::applied(OPTIONAL, vec![element])
    }

    /// The name of the outermost type constructor, if this is one.
    pub fn cons_name(&self) -> Option<&str> {
        match self {
            Self::Cons { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Does `other` appear anywhere within this type (including this type
    /// itself)?
    pub fn contains(&self, other: &Type) -> bool {
        if self == other {
            return true;
        }

        match self {
            Self::Var(_) | Self::Generic(_) => false,
            Self::Cons { parameters, .. } => parameters.iter().any(|ty| ty.contains(other)),
            Self::Fun { arguments, returns } => {
                arguments.iter().any(|arg| arg.ty.contains(other)) || returns.contains(other)
            }
        }
    }

    /// Get the name of every generic parameter in this type, in order of first
    /// appearance and without duplicates.
    pub fn generic_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_generics(&mut names);
        names
    }

    fn collect_generics(&self, names: &mut Vec<String>) {
        match self {
            Self::Generic(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            Self::Var(_) => {}
            Self::Cons { parameters, .. } => {
                for ty in parameters {
                    ty.collect_generics(names);
                }
            }
            Self::Fun { arguments, returns } => {
                for arg in arguments {
                    arg.ty.collect_generics(names);
                }
                returns.collect_generics(names);
            }
        }
    }

    /// Rebuild this type bottom-up, replacing every leaf (variable or generic)
    /// with the result of `f`.
    pub fn map_leaves<F>(&self, f: &mut F) -> Type
    where
        F: FnMut(&Type) -> Option<Type>,
    {
        match self {
            Self::Var(_) | Self::Generic(_) => f(self).unwrap_or_else(|| self.clone()),
            Self::Cons { name, parameters } => Self::Cons {
                name: name.clone(),
                parameters: parameters.iter().map(|ty| ty.map_leaves(f)).collect(),
            },
            Self::Fun { arguments, returns } => Self::Fun {
                arguments: arguments
                    .iter()
                    .map(|arg| Argument {
                        label: arg.label.clone(),
                        ty: arg.ty.map_leaves(f),
                    })
                    .collect(),
                returns: Box::new(returns.map_leaves(f)),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "?{name}"),
            Self::Generic(name) => write!(f, "{name}"),
            Self::Cons { name, parameters } if parameters.is_empty() => write!(f, "{name}"),
            Self::Cons { name, parameters } => {
                write!(f, "{name}<{}>", parameters.iter().join(", "))
            }
            Self::Fun { arguments, returns } => {
                write!(f, "({}) -> {returns}", arguments.iter().join(", "))
            }
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}
