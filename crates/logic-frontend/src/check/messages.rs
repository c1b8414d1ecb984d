use logic_common::ast::NodeId;
use logic_common::messages::{Code, Message, MessageContainer, MessageMaker, NoteKind, Text};
use logic_common::text;
use logic_common::types::Type;

use super::UnificationError;
use crate::messages::TypeMessages;

fn related(labels: &[NodeId]) -> Vec<(NodeId, Text)> {
    labels
        .iter()
        .map(|id| (*id, text!["involved here"]))
        .collect()
}

impl<C: MessageContainer> TypeMessages for MessageMaker<C> {
    fn name_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]) {
        let message = self
            .error(Code::TypeError)
            .with_title(text!["expected ", (code left), ", found ", (code right)])
            .with_labels(related(labels));
        self.add(message);
    }

    fn argument_count_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]) {
        let message = self
            .error(Code::TypeError)
            .with_title(text![
                (code left),
                " and ",
                (code right),
                " take a different number of arguments"
            ])
            .with_labels(related(labels));
        self.add(message);
    }

    fn label_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]) {
        let message = self
            .error(Code::TypeError)
            .with_title(text!["argument labels of ", (code left), " and ", (code right), " differ"])
            .with_labels(related(labels))
            .with_note(
                NoteKind::Help,
                text!["either every argument of a call is labelled, or none is"],
            );
        self.add(message);
    }

    fn kind_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]) {
        let message = self
            .error(Code::TypeError)
            .with_title(text!["expected ", (code left), ", found ", (code right)])
            .with_labels(related(labels))
            .with_note(NoteKind::Note, text!["only functions can be called"]);
        self.add(message);
    }

    fn infinite_type(&mut self, var: &Type, ty: &Type, labels: &[NodeId]) {
        let message = self
            .error(Code::TypeError)
            .with_title(text!["the type ", (code var), " would have to contain itself"])
            .with_labels(related(labels))
            .with_note(NoteKind::Note, text![(code var), " occurs in ", (code ty)]);
        self.add(message);
    }
}

impl UnificationError {
    /// Describe this error as a message at the first node involved. Errors
    /// without any nodes to point at produce no messages.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::new();

        let provenance = self.provenance();
        let Some((at, rest)) = provenance.nodes.split_first() else {
            return messages;
        };

        let mut maker = MessageMaker::new(&mut messages, *at);

        match self {
            Self::NameMismatch { left, right, .. } => maker.name_mismatch(left, right, rest),
            Self::GenericArgumentsCountMismatch { left, right, .. } => {
                maker.argument_count_mismatch(left, right, rest)
            }
            Self::GenericArgumentsLabelMismatch { left, right, .. } => {
                maker.label_mismatch(left, right, rest)
            }
            Self::KindMismatch { left, right, .. } => maker.kind_mismatch(left, right, rest),
            Self::InfiniteType { var, ty, .. } => maker.infinite_type(var, ty, rest),
        }

        messages
    }
}
