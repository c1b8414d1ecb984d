//! The syntax tree handed to the core by the editor.
//!
//! Trees are immutable snapshots. Every node carries a [`NodeId`] which is
//! stable for as long as the node itself is not replaced, and every pass of
//! the core refers to nodes by id only. Cross references (an identifier to its
//! declaration, a thunk to its dependencies) live in side tables keyed by id,
//! so the tree itself never needs back-references.

pub mod build;

mod node;

pub use node::Node;

use std::fmt;

/// A unique identifier of a node within one tree snapshot.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The root of a tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub id: NodeId,
    pub declarations: Vec<Declaration>,
}

/// A binding site, such as the name of a variable, function, parameter, enum
/// case or record member.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pattern {
    pub id: NodeId,
    pub name: String,
}

/// A use of a name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Identifier {
    pub id: NodeId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub id: NodeId,
    pub node: DeclarationNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeclarationNode {
    Variable {
        name: Pattern,
        annotation: Option<TypeAnnotation>,
        initializer: Option<Expression>,
    },

    Function {
        name: Pattern,
        return_type: TypeAnnotation,
        generic_parameters: Vec<GenericParameter>,
        parameters: Vec<FunctionParameter>,
        block: Vec<Statement>,
    },

    /// A record type. Its members are variable declarations; any other kind of
    /// declaration inside a record is ignored.
    Record {
        name: Pattern,
        generic_parameters: Vec<GenericParameter>,
        declarations: Vec<Declaration>,
    },

    Enumeration {
        name: Pattern,
        generic_parameters: Vec<GenericParameter>,
        cases: Vec<EnumerationCase>,
    },

    Namespace {
        name: Pattern,
        declarations: Vec<Declaration>,
    },

    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionParameter {
    pub id: NodeId,
    pub name: Pattern,
    pub annotation: TypeAnnotation,
    pub default_value: Option<Expression>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GenericParameter {
    pub id: NodeId,
    pub name: Pattern,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumerationCase {
    pub id: NodeId,
    pub name: Pattern,
    pub associated_values: Vec<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub id: NodeId,
    pub node: StatementNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementNode {
    Declaration(Declaration),
    Expression(Expression),
    Return(Expression),

    /// Run `block` only if `condition` holds.
    Branch {
        condition: Expression,
        block: Vec<Statement>,
    },

    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    pub id: NodeId,
    pub node: ExpressionNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionNode {
    Identifier(Identifier),

    /// `expression.member`
    Member {
        expression: Box<Expression>,
        member: Identifier,
    },

    Call {
        callee: Box<Expression>,
        arguments: Vec<Argument>,
    },

    Literal(Literal),

    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    Placeholder,
}

/// A possibly labelled argument of a call.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub id: NodeId,
    pub label: Option<String>,
    pub expression: Expression,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,

    IsEqualTo,
    IsNotEqualTo,
    IsLessThan,
    IsGreaterThan,
    IsLessThanOrEqualTo,
    IsGreaterThanOrEqualTo,

    And,
    Or,
}

impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::IsEqualTo => "==",
            Self::IsNotEqualTo => "!=",
            Self::IsLessThan => "<",
            Self::IsGreaterThan => ">",
            Self::IsLessThanOrEqualTo => "<=",
            Self::IsGreaterThanOrEqualTo => ">=",
            Self::And => "and",
            Self::Or => "or",
        };

        write!(f, "{op}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub id: NodeId,
    pub node: LiteralNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralNode {
    None,
    Boolean(bool),
    Number(f64),
    String(String),

    /// A CSS colour string, such as `#ff0000`.
    Color(String),

    Array(Vec<Expression>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeAnnotation {
    pub id: NodeId,
    pub node: TypeAnnotationNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotationNode {
    Identifier {
        identifier: Identifier,
        generic_arguments: Vec<TypeAnnotation>,
    },

    Function {
        arguments: Vec<TypeAnnotation>,
        returns: Box<TypeAnnotation>,
    },

    Placeholder,
}

impl Program {
    /// Join several trees into one, keeping declaration order. This is how the
    /// prelude and the user's program end up in a single snapshot.
    pub fn join(id: NodeId, programs: impl IntoIterator<Item = Program>) -> Self {
        let declarations = programs
            .into_iter()
            .flat_map(|program| program.declarations)
            .collect();

        Self { id, declarations }
    }

    /// Find the node with the given id.
    pub fn find(&self, id: NodeId) -> Option<Node<'_>> {
        self.path_to(id).and_then(|mut path| path.pop())
    }

    /// Get every node from the root down to and including the node with the
    /// given id.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<Node<'_>>> {
        let mut path = Vec::new();
        if Node::Program(self).path_to(id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    /// Get the node directly containing the node with the given id.
    pub fn parent_of(&self, id: NodeId) -> Option<Node<'_>> {
        let mut path = self.path_to(id)?;
        path.pop();
        path.pop()
    }
}

impl Declaration {
    /// The pattern naming this declaration, if it has one.
    pub fn name(&self) -> Option<&Pattern> {
        match &self.node {
            DeclarationNode::Variable { name, .. }
            | DeclarationNode::Function { name, .. }
            | DeclarationNode::Record { name, .. }
            | DeclarationNode::Enumeration { name, .. }
            | DeclarationNode::Namespace { name, .. } => Some(name),
            DeclarationNode::Placeholder => None,
        }
    }
}

impl Expression {
    /// Flatten a chain of member accesses on plain identifiers, such as
    /// `A.B.c`, into its name segments. Returns `None` if the chain is rooted
    /// in anything but an identifier.
    pub fn key_path(&self) -> Option<Vec<String>> {
        match &self.node {
            ExpressionNode::Identifier(identifier) => Some(vec![identifier.name.clone()]),
            ExpressionNode::Member { expression, member } => {
                let mut path = expression.key_path()?;
                path.push(member.name.clone());
                Some(path)
            }
            _ => None,
        }
    }
}
