use logic_common::ast::NodeId;

pub trait EvalMessages {
    /// A value depends on itself, through the given other nodes.
    fn cyclic_value(&mut self, name: Option<&str>, others: &[NodeId]);
}
