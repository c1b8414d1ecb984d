use std::fmt;
use std::rc::Rc;

use logic_common::ast::NodeId;

use super::{EvaluationContext, LogicValue};

pub type ThunkFunction = Rc<dyn Fn(&EvaluationContext, &[LogicValue]) -> Option<LogicValue>>;

/// A deferred computation of the value of one node. The function receives the
/// values of the dependencies in the order they are listed.
#[derive(Clone)]
pub struct EvaluationThunk {
    pub label: String,
    pub dependencies: Vec<NodeId>,
    pub function: ThunkFunction,
}

impl EvaluationThunk {
    pub fn new<F>(label: impl Into<String>, dependencies: Vec<NodeId>, function: F) -> Self
    where
        F: Fn(&EvaluationContext, &[LogicValue]) -> Option<LogicValue> + 'static,
    {
        Self {
            label: label.into(),
            dependencies,
            function: Rc::new(function),
        }
    }

    /// A thunk without dependencies which always produces the same value.
    pub fn constant(label: impl Into<String>, value: LogicValue) -> Self {
        Self::new(label, Vec::new(), move |_, _| Some(value.clone()))
    }

    /// A thunk producing the value of another node.
    pub fn forward(label: impl Into<String>, to: NodeId) -> Self {
        Self::new(label, vec![to], |_, values| values.first().cloned())
    }
}

impl fmt::Debug for EvaluationThunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationThunk")
            .field("label", &self.label)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
