//! Salonbook agent: the function-call seam between the conversational layer
//! and the scheduling core.

pub mod runtime;
pub mod tools;

pub use runtime::ReceptionistRuntime;
pub use tools::{Tool, ToolRegistry};
