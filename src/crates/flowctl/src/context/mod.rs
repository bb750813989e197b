//! Execution context binding for command invocations.
//!
//! Provides the validated, immutable aggregate passed to every command.
//!
//! # Components
//!
//! - **ExecutionContext** - Frozen bundle of client factories, session,
//!   output sink, interactivity flag, and result writers
//! - **ContextBuilder** - Fluent builder that validates and freezes a context

mod execution_context;

pub use execution_context::{ContextBuilder, ExecutionContext};
