use crate::messages::Message;

/// The driver is the pipeline's view of whoever is running it, usually the
/// editor. It receives diagnostics and decides how much of the pipeline runs.
pub trait Driver {
    fn report(&mut self, messages: Vec<Message>);

    /// How far the pipeline should go for this snapshot.
    fn eval_amount(&mut self) -> EvalAmount {
        EvalAmount::Full
    }

    /// How deeply user functions may call each other during evaluation before
    /// the call is abandoned.
    fn call_depth_limit(&mut self) -> usize {
        64
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EvalAmount {
    /// Resolve names, check types and evaluate.
    Full,
    /// Resolve names and check types.
    Types,
    /// Only resolve names.
    None,
}
