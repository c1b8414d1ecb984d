pub mod eval;

mod messages;

use std::rc::Rc;

use log::{info, trace};

use logic_common::Driver;

pub use eval::{
    default_value, Builtin, Environment, EvaluationContext, EvaluationThunk, Function, LogicValue,
    Memory, NativeFunction,
};

/// Build the thunks of a program, reporting every value which can never be
/// computed because it depends on itself.
pub fn evaluate(driver: &mut impl Driver, mut environment: Environment) -> EvaluationContext {
    info!("beginning evaluation");

    environment.call_depth_limit = driver.call_depth_limit();

    let mut context = EvaluationContext::build(Rc::new(environment));
    driver.report(context.messages());

    trace!("done evaluating");
    context
}
