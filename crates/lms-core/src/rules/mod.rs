//! Rule Compiler
//!
//! Turns one [`CourseConfig`](crate::config::CourseConfig) plus the remote
//! catalog into an ordered list of [`ResolvedExtractionRule`]s and a
//! [`RemoteFilter`] restricting what is requested for download.

mod compiler;
mod filter;
mod resolved;

pub use compiler::{CompiledRules, compile_rules};
pub use filter::{RemoteFilter, SelectionBuilder};
pub use resolved::ResolvedExtractionRule;
