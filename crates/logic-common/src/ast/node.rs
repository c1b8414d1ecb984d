use super::{
    Argument, Declaration, DeclarationNode, EnumerationCase, Expression, ExpressionNode,
    FunctionParameter, GenericParameter, Identifier, Literal, LiteralNode, NodeId, Pattern,
    Program, Statement, StatementNode, TypeAnnotation, TypeAnnotationNode,
};

/// A borrowed reference to any node in a tree, used by the generic structural
/// helpers.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Program(&'a Program),
    Declaration(&'a Declaration),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Argument(&'a Argument),
    Literal(&'a Literal),
    TypeAnnotation(&'a TypeAnnotation),
    Pattern(&'a Pattern),
    Identifier(&'a Identifier),
    FunctionParameter(&'a FunctionParameter),
    GenericParameter(&'a GenericParameter),
    EnumerationCase(&'a EnumerationCase),
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Program(node) => node.id,
            Node::Declaration(node) => node.id,
            Node::Statement(node) => node.id,
            Node::Expression(node) => node.id,
            Node::Argument(node) => node.id,
            Node::Literal(node) => node.id,
            Node::TypeAnnotation(node) => node.id,
            Node::Pattern(node) => node.id,
            Node::Identifier(node) => node.id,
            Node::FunctionParameter(node) => node.id,
            Node::GenericParameter(node) => node.id,
            Node::EnumerationCase(node) => node.id,
        }
    }

    /// Get the direct children of this node, in source order.
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut children = Vec::new();

        match *self {
            Node::Program(program) => {
                children.extend(program.declarations.iter().map(Node::Declaration));
            }

            Node::Declaration(declaration) => match &declaration.node {
                DeclarationNode::Variable {
                    name,
                    annotation,
                    initializer,
                } => {
                    children.push(Node::Pattern(name));
                    children.extend(annotation.iter().map(Node::TypeAnnotation));
                    children.extend(initializer.iter().map(Node::Expression));
                }

                DeclarationNode::Function {
                    name,
                    return_type,
                    generic_parameters,
                    parameters,
                    block,
                } => {
                    children.push(Node::Pattern(name));
                    children.push(Node::TypeAnnotation(return_type));
                    children.extend(generic_parameters.iter().map(Node::GenericParameter));
                    children.extend(parameters.iter().map(Node::FunctionParameter));
                    children.extend(block.iter().map(Node::Statement));
                }

                DeclarationNode::Record {
                    name,
                    generic_parameters,
                    declarations,
                } => {
                    children.push(Node::Pattern(name));
                    children.extend(generic_parameters.iter().map(Node::GenericParameter));
                    children.extend(declarations.iter().map(Node::Declaration));
                }

                DeclarationNode::Enumeration {
                    name,
                    generic_parameters,
                    cases,
                } => {
                    children.push(Node::Pattern(name));
                    children.extend(generic_parameters.iter().map(Node::GenericParameter));
                    children.extend(cases.iter().map(Node::EnumerationCase));
                }

                DeclarationNode::Namespace { name, declarations } => {
                    children.push(Node::Pattern(name));
                    children.extend(declarations.iter().map(Node::Declaration));
                }

                DeclarationNode::Placeholder => {}
            },

            Node::Statement(statement) => match &statement.node {
                StatementNode::Declaration(declaration) => {
                    children.push(Node::Declaration(declaration))
                }
                StatementNode::Expression(expression) | StatementNode::Return(expression) => {
                    children.push(Node::Expression(expression))
                }
                StatementNode::Branch { condition, block } => {
                    children.push(Node::Expression(condition));
                    children.extend(block.iter().map(Node::Statement));
                }
                StatementNode::Placeholder => {}
            },

            Node::Expression(expression) => match &expression.node {
                ExpressionNode::Identifier(identifier) => {
                    children.push(Node::Identifier(identifier))
                }
                ExpressionNode::Member { expression, member } => {
                    children.push(Node::Expression(expression));
                    children.push(Node::Identifier(member));
                }
                ExpressionNode::Call { callee, arguments } => {
                    children.push(Node::Expression(callee));
                    children.extend(arguments.iter().map(Node::Argument));
                }
                ExpressionNode::Literal(literal) => children.push(Node::Literal(literal)),
                ExpressionNode::Binary { left, right, .. } => {
                    children.push(Node::Expression(left));
                    children.push(Node::Expression(right));
                }
                ExpressionNode::Placeholder => {}
            },

            Node::Argument(argument) => children.push(Node::Expression(&argument.expression)),

            Node::Literal(literal) => {
                if let LiteralNode::Array(elements) = &literal.node {
                    children.extend(elements.iter().map(Node::Expression));
                }
            }

            Node::TypeAnnotation(annotation) => match &annotation.node {
                TypeAnnotationNode::Identifier {
                    identifier,
                    generic_arguments,
                } => {
                    children.push(Node::Identifier(identifier));
                    children.extend(generic_arguments.iter().map(Node::TypeAnnotation));
                }
                TypeAnnotationNode::Function { arguments, returns } => {
                    children.extend(arguments.iter().map(Node::TypeAnnotation));
                    children.push(Node::TypeAnnotation(returns));
                }
                TypeAnnotationNode::Placeholder => {}
            },

            Node::FunctionParameter(parameter) => {
                children.push(Node::Pattern(&parameter.name));
                children.push(Node::TypeAnnotation(&parameter.annotation));
                children.extend(parameter.default_value.iter().map(Node::Expression));
            }

            Node::GenericParameter(parameter) => children.push(Node::Pattern(&parameter.name)),

            Node::EnumerationCase(case) => {
                children.push(Node::Pattern(&case.name));
                children.extend(case.associated_values.iter().map(Node::TypeAnnotation));
            }

            Node::Pattern(_) | Node::Identifier(_) => {}
        }

        children
    }

    /// Push every node from this one down to the one with the given id onto
    /// `path`. Returns `false` (leaving `path` untouched) if there is no such
    /// node below this one.
    pub(super) fn path_to(self, id: NodeId, path: &mut Vec<Node<'a>>) -> bool {
        path.push(self);

        if self.id() == id {
            return true;
        }

        for child in self.children() {
            if child.path_to(id, path) {
                return true;
            }
        }

        path.pop();
        false
    }

    pub fn as_declaration(&self) -> Option<&'a Declaration> {
        match *self {
            Node::Declaration(declaration) => Some(declaration),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&'a Expression> {
        match *self {
            Node::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}
