//! A small builder for syntax trees. The core has no parser, so the prelude
//! and the tests construct their trees through this.

use super::{
    Argument, BinaryOperator, Declaration, DeclarationNode, EnumerationCase, Expression,
    ExpressionNode, FunctionParameter, GenericParameter, Identifier, Literal, LiteralNode, NodeId,
    Pattern, Program, Statement, StatementNode, TypeAnnotation, TypeAnnotationNode,
};

/// Hands out node ids in increasing order.
#[derive(Debug, Default)]
pub struct Builder {
    next: usize,
}

impl Builder {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Create a builder whose first id is `first`. Use this to build trees that
    /// are later joined with trees from another builder.
    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }

    pub fn id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    pub fn pattern(&mut self, name: &str) -> Pattern {
        Pattern {
            id: self.id(),
            name: name.into(),
        }
    }

    pub fn identifier(&mut self, name: &str) -> Identifier {
        Identifier {
            id: self.id(),
            name: name.into(),
        }
    }

    pub fn program(&mut self, declarations: Vec<Declaration>) -> Program {
        Program {
            id: self.id(),
            declarations,
        }
    }

    // Type annotations

    pub fn ty(&mut self, name: &str) -> TypeAnnotation {
        self.generic_ty(name, Vec::new())
    }

    pub fn generic_ty(&mut self, name: &str, arguments: Vec<TypeAnnotation>) -> TypeAnnotation {
        let identifier = self.identifier(name);
        TypeAnnotation {
            id: self.id(),
            node: TypeAnnotationNode::Identifier {
                identifier,
                generic_arguments: arguments,
            },
        }
    }

    pub fn fun_ty(
        &mut self,
        arguments: Vec<TypeAnnotation>,
        returns: TypeAnnotation,
    ) -> TypeAnnotation {
        TypeAnnotation {
            id: self.id(),
            node: TypeAnnotationNode::Function {
                arguments,
                returns: Box::new(returns),
            },
        }
    }

    // Expressions

    fn expression(&mut self, node: ExpressionNode) -> Expression {
        Expression {
            id: self.id(),
            node,
        }
    }

    /// An identifier expression.
    pub fn name(&mut self, name: &str) -> Expression {
        let identifier = self.identifier(name);
        self.expression(ExpressionNode::Identifier(identifier))
    }

    pub fn member(&mut self, expression: Expression, member: &str) -> Expression {
        let member = self.identifier(member);
        self.expression(ExpressionNode::Member {
            expression: Box::new(expression),
            member,
        })
    }

    /// A chain of member accesses such as `Color.setHue`.
    pub fn path(&mut self, segments: &[&str]) -> Expression {
        let (first, rest) = segments
            .split_first()
            .expect("a path has at least one segment");

        let mut expression = self.name(first);
        for segment in rest {
            expression = self.member(expression, segment);
        }

        expression
    }

    pub fn call(
        &mut self,
        callee: Expression,
        arguments: Vec<(Option<&str>, Expression)>,
    ) -> Expression {
        let arguments = arguments
            .into_iter()
            .map(|(label, expression)| Argument {
                id: self.id(),
                label: label.map(Into::into),
                expression,
            })
            .collect();

        self.expression(ExpressionNode::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    pub fn binary(
        &mut self,
        left: Expression,
        op: BinaryOperator,
        right: Expression,
    ) -> Expression {
        self.expression(ExpressionNode::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn literal(&mut self, node: LiteralNode) -> Expression {
        let literal = Literal {
            id: self.id(),
            node,
        };
        self.expression(ExpressionNode::Literal(literal))
    }

    pub fn none(&mut self) -> Expression {
        self.literal(LiteralNode::None)
    }

    pub fn boolean(&mut self, value: bool) -> Expression {
        self.literal(LiteralNode::Boolean(value))
    }

    pub fn number(&mut self, value: f64) -> Expression {
        self.literal(LiteralNode::Number(value))
    }

    pub fn string(&mut self, value: &str) -> Expression {
        self.literal(LiteralNode::String(value.into()))
    }

    pub fn color(&mut self, value: &str) -> Expression {
        self.literal(LiteralNode::Color(value.into()))
    }

    pub fn array(&mut self, elements: Vec<Expression>) -> Expression {
        self.literal(LiteralNode::Array(elements))
    }

    pub fn placeholder(&mut self) -> Expression {
        self.expression(ExpressionNode::Placeholder)
    }

    // Declarations

    fn declaration(&mut self, node: DeclarationNode) -> Declaration {
        Declaration {
            id: self.id(),
            node,
        }
    }

    fn generics(&mut self, names: &[&str]) -> Vec<GenericParameter> {
        names
            .iter()
            .map(|name| GenericParameter {
                name: self.pattern(name),
                id: self.id(),
            })
            .collect()
    }

    pub fn variable(
        &mut self,
        name: &str,
        annotation: Option<TypeAnnotation>,
        initializer: Option<Expression>,
    ) -> Declaration {
        let name = self.pattern(name);
        self.declaration(DeclarationNode::Variable {
            name,
            annotation,
            initializer,
        })
    }

    pub fn parameter(
        &mut self,
        name: &str,
        annotation: TypeAnnotation,
        default_value: Option<Expression>,
    ) -> FunctionParameter {
        FunctionParameter {
            name: self.pattern(name),
            id: self.id(),
            annotation,
            default_value,
        }
    }

    pub fn function(
        &mut self,
        name: &str,
        generics: &[&str],
        parameters: Vec<FunctionParameter>,
        return_type: TypeAnnotation,
        block: Vec<Statement>,
    ) -> Declaration {
        let name = self.pattern(name);
        let generic_parameters = self.generics(generics);
        self.declaration(DeclarationNode::Function {
            name,
            return_type,
            generic_parameters,
            parameters,
            block,
        })
    }

    pub fn record(
        &mut self,
        name: &str,
        generics: &[&str],
        members: Vec<Declaration>,
    ) -> Declaration {
        let name = self.pattern(name);
        let generic_parameters = self.generics(generics);
        self.declaration(DeclarationNode::Record {
            name,
            generic_parameters,
            declarations: members,
        })
    }

    pub fn case(&mut self, name: &str, associated_values: Vec<TypeAnnotation>) -> EnumerationCase {
        EnumerationCase {
            name: self.pattern(name),
            id: self.id(),
            associated_values,
        }
    }

    pub fn enumeration(
        &mut self,
        name: &str,
        generics: &[&str],
        cases: Vec<EnumerationCase>,
    ) -> Declaration {
        let name = self.pattern(name);
        let generic_parameters = self.generics(generics);
        self.declaration(DeclarationNode::Enumeration {
            name,
            generic_parameters,
            cases,
        })
    }

    pub fn namespace(&mut self, name: &str, declarations: Vec<Declaration>) -> Declaration {
        let name = self.pattern(name);
        self.declaration(DeclarationNode::Namespace { name, declarations })
    }

    // Statements

    fn statement(&mut self, node: StatementNode) -> Statement {
        Statement {
            id: self.id(),
            node,
        }
    }

    pub fn declare(&mut self, declaration: Declaration) -> Statement {
        self.statement(StatementNode::Declaration(declaration))
    }

    pub fn evaluate(&mut self, expression: Expression) -> Statement {
        self.statement(StatementNode::Expression(expression))
    }

    pub fn ret(&mut self, expression: Expression) -> Statement {
        self.statement(StatementNode::Return(expression))
    }

    pub fn branch(&mut self, condition: Expression, block: Vec<Statement>) -> Statement {
        self.statement(StatementNode::Branch { condition, block })
    }
}
