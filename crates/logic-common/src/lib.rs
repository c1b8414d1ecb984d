pub mod ast;
pub mod components;
pub mod messages;
pub mod names;
pub mod prelude;
pub mod types;

pub use driver::{Driver, EvalAmount};

mod driver;
