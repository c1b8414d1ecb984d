use log::{error, warn};

use logic_common::messages::{Message, Severity};
use logic_common::{Driver, EvalAmount};

/// A driver which writes every message to the log.
#[derive(Debug)]
pub struct LogDriver {
    amount: EvalAmount,
    call_depth_limit: usize,
}

impl LogDriver {
    pub fn new() -> Self {
        Self {
            amount: EvalAmount::Full,
            call_depth_limit: 64,
        }
    }

    pub fn with_eval_amount(self, amount: EvalAmount) -> Self {
        Self { amount, ..self }
    }

    pub fn with_call_depth_limit(self, call_depth_limit: usize) -> Self {
        Self {
            call_depth_limit,
            ..self
        }
    }
}

impl Default for LogDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for LogDriver {
    fn report(&mut self, messages: Vec<Message>) {
        for message in messages {
            match message.severity {
                Severity::Error => error!("{}[{}]: {}", message.at, message.code, message.title),
                Severity::Warning => warn!("{}[{}]: {}", message.at, message.code, message.title),
            }
        }
    }

    fn eval_amount(&mut self) -> EvalAmount {
        self.amount
    }

    fn call_depth_limit(&mut self) -> usize {
        self.call_depth_limit
    }
}

/// A driver which keeps every message, for editors that render them
/// themselves.
#[derive(Debug)]
pub struct CollectingDriver {
    pub messages: Vec<Message>,
    pub amount: EvalAmount,
    pub call_depth_limit: usize,
}

impl CollectingDriver {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            amount: EvalAmount::Full,
            call_depth_limit: 64,
        }
    }

    /// Take every message reported so far.
    pub fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl Default for CollectingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CollectingDriver {
    fn report(&mut self, messages: Vec<Message>) {
        self.messages.extend(messages);
    }

    fn eval_amount(&mut self) -> EvalAmount {
        self.amount
    }

    fn call_depth_limit(&mut self) -> usize {
        self.call_depth_limit
    }
}
