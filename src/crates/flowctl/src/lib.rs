//! # flowctl - Execution-Context Core
//!
//! The command-execution context binder for the flowctl CLI, which manages
//! two remote services: a flow-management service and a flow registry.
//!
//! A hosting driver assembles one [`ExecutionContext`] per process invocation
//! (or once for an interactive shell) and passes it, unchanged, to every
//! command. The context bundles client factories for both backends, session
//! state, the output sink, an interactivity flag, and one result writer per
//! [`ResultType`].
//!
//! ## Construction-time completeness
//!
//! [`ContextBuilder::build`] validates the whole configuration in one pass:
//! every required field must be set and every result type must have a
//! registered writer. A context that exists is therefore always complete,
//! and [`ExecutionContext::result_writer`] never fails — including when a
//! command requests no format and the context falls back to human-readable
//! output (interactive) or JSON (batch).
//!
//! ## Quick Start
//!
//! ```rust
//! use flowctl::{
//!     output_sink, ContextBuilder, InMemorySession, JsonResultWriter, ResultType,
//!     SimpleResultWriter, StandardFlowClientFactory, StandardRegistryClientFactory,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> flowctl::Result<()> {
//! let context = ContextBuilder::new()
//!     .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
//!     .with_registry_client_factory(Arc::new(StandardRegistryClientFactory::new()))
//!     .with_session(Arc::new(InMemorySession::new()))
//!     .with_output(output_sink(std::io::stdout()))
//!     .with_interactive(false)
//!     .add_result_writer(ResultType::Simple, Arc::new(SimpleResultWriter::new()))
//!     .add_result_writer(ResultType::Json, Arc::new(JsonResultWriter::new()))
//!     .build()?;
//!
//! // Batch mode: unspecified format defaults to the JSON writer.
//! let writer = context.result_writer(None);
//! # let _ = writer;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod api;
pub mod client;
pub mod context;
pub mod session;
pub mod writers;

// Error types and utilities
mod error;

// Re-export key types for convenience
pub use api::{
    output_sink, ClientFactory, CommandOutcome, OutputSink, ResultType, ResultWriter, Session,
};
pub use client::{
    ClientProperties, FlowClient, RegistryClient, StandardFlowClientFactory,
    StandardRegistryClientFactory,
};
pub use context::{ContextBuilder, ExecutionContext};
pub use session::InMemorySession;
pub use writers::{JsonResultWriter, SimpleResultWriter};

// Error types
pub use error::{FlowCtlError, Result};
