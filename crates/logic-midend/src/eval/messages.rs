use logic_common::ast::{Node, NodeId};
use logic_common::messages::{Code, Message, MessageContainer, MessageMaker};
use logic_common::text;

use super::EvaluationContext;
use crate::messages::EvalMessages;

impl<C: MessageContainer> EvalMessages for MessageMaker<C> {
    fn cyclic_value(&mut self, name: Option<&str>, others: &[NodeId]) {
        let title = match name {
            Some(name) => text![(code name), " depends on itself"],
            None => text!["this value depends on itself"],
        };

        let labels = others
            .iter()
            .map(|id| (*id, text!["part of the cycle"]))
            .collect();

        let message = self
            .error(Code::EvaluationError)
            .with_title(title)
            .with_labels(labels);
        self.add(message);
    }
}

impl EvaluationContext {
    /// Describe every cycle in the thunk graph. Each message points at the
    /// first named node of its cycle.
    pub fn messages(&mut self) -> Vec<Message> {
        let environment = self.environment().clone();
        let mut messages = Vec::new();

        for cycle in self.cycles() {
            let named = cycle.iter().find_map(|id| match environment.program.find(*id) {
                Some(Node::Pattern(pattern)) => Some((pattern.id, pattern.name.clone())),
                _ => None,
            });

            let (at, name) = match named {
                Some((id, name)) => (id, Some(name)),
                None => match cycle.first() {
                    Some(id) => (*id, None),
                    None => continue,
                },
            };

            let others: Vec<_> = cycle.iter().copied().filter(|id| *id != at).collect();
            MessageMaker::new(&mut messages, at).cyclic_value(name.as_deref(), &others);
        }

        messages
    }
}
