//! Types downstream clients use to drive a session.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{IdleInput, InputProvider, ScriptedInput};
