use logic_common::ast::{ExpressionNode, Node, NodeId, Program, TypeAnnotationNode};
use logic_common::messages::{Code, Message, MessageContainer, MessageMaker};
use logic_common::names::NamePath;
use logic_common::text;

use super::ScopeContext;
use crate::messages::NameMessages;
use crate::namespace::NamespaceError;

impl<C: MessageContainer> NameMessages for MessageMaker<C> {
    fn duplicate_declaration(&mut self, name: &NamePath, previous: NodeId, is_type: bool) {
        let title = if is_type {
            text!["the type ", (code name), " is declared multiple times"]
        } else {
            text![(code name), " is declared multiple times"]
        };

        let labels = vec![(previous, text!["previous declaration here"])];

        let message = self
            .error(Code::DeclarationError)
            .with_title(title)
            .with_labels(labels);
        self.add(message);
    }

    fn unresolved_name(&mut self, name: &str) {
        let message = self
            .error(Code::NameError)
            .with_title(text!["cannot find ", (code name), " in scope"]);
        self.add(message);
    }

    fn unresolved_member(&mut self, path: &str) {
        let message = self
            .error(Code::NameError)
            .with_title(text!["cannot find ", (code path)]);
        self.add(message);
    }

    fn unresolved_type(&mut self, name: &str) {
        let message = self
            .error(Code::NameError)
            .with_title(text!["cannot find the type ", (code name)]);
        self.add(message);
    }
}

impl NamespaceError {
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::new();
        let is_type = matches!(self, Self::TypeAlreadyDeclared { .. });

        MessageMaker::new(&mut messages, self.new_declaration()).duplicate_declaration(
            self.name(),
            self.existing(),
            is_type,
        );

        messages
    }
}

impl ScopeContext {
    /// Describe every name which failed to resolve, ordered by node id.
    pub fn messages(&self, program: &Program) -> Vec<Message> {
        let mut messages = Vec::new();

        let mut identifiers: Vec<_> = self.undefined_identifiers.iter().copied().collect();
        identifiers.sort();

        for id in identifiers {
            let name = match program.find(id) {
                Some(Node::Expression(expression)) => match &expression.node {
                    ExpressionNode::Identifier(identifier) => identifier.name.clone(),
                    _ => continue,
                },
                _ => continue,
            };

            MessageMaker::new(&mut messages, id).unresolved_name(&name);
        }

        let mut members: Vec<_> = self.undefined_member_expressions.iter().copied().collect();
        members.sort();

        for id in members {
            let path = program
                .find(id)
                .and_then(|node| node.as_expression())
                .and_then(|expression| expression.key_path())
                .map(|path| NamePath(path).to_string())
                .unwrap_or_else(|| String::from("member"));

            MessageMaker::new(&mut messages, id).unresolved_member(&path);
        }

        let mut types: Vec<_> = self.undefined_type_identifiers.iter().copied().collect();
        types.sort();

        for id in types {
            let name = match program.find(id) {
                Some(Node::TypeAnnotation(annotation)) => match &annotation.node {
                    TypeAnnotationNode::Identifier { identifier, .. } => identifier.name.clone(),
                    _ => continue,
                },
                _ => continue,
            };

            MessageMaker::new(&mut messages, id).unresolved_type(&name);
        }

        messages
    }
}
