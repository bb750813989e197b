//! Collaborator contracts consumed by the execution context.
//!
//! The context core does not implement backend clients, session persistence,
//! or rendering itself; it binds implementations of the traits defined here
//! and guarantees their presence before any command runs.

use crate::client::ClientProperties;
use crate::error::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// The shape a command result is rendered in.
///
/// This is a closed set: adding a variant requires registering a writer for it
/// at every context assembly site, or `build()` rejects the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Human-readable text output.
    Simple,
    /// Structured JSON output.
    Json,
}

impl ResultType {
    /// Every result type, in declaration order.
    ///
    /// The builder's totality check iterates this array, so the compiler's
    /// exhaustiveness guarantee extends to the writer registry.
    pub const VALUES: [ResultType; 2] = [ResultType::Simple, ResultType::Json];
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Simple => write!(f, "simple"),
            ResultType::Json => write!(f, "json"),
        }
    }
}

/// The value a command hands to a result writer.
///
/// Carries both a human-readable message and a structured payload so any
/// registered writer can render it without consulting the command again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// One-line (or multi-line) human-readable summary.
    pub message: String,

    /// Structured body for script-friendly output.
    pub payload: serde_json::Value,
}

impl CommandOutcome {
    /// Create an outcome with an empty payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: serde_json::Value::Null,
        }
    }

    /// Attach a structured payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Shared, lockable handle to the output sink.
///
/// The context is shared read-only across commands; the sink itself needs
/// interior mutability so concurrent renderings serialize on the lock.
pub type OutputSink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Wrap a writer into a shareable output sink.
pub fn output_sink(writer: impl Write + Send + 'static) -> OutputSink {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Produces a configured client for one backend service.
///
/// Connection and authentication failures are the factory's concern; the
/// context only stores the factory and hands it to commands.
pub trait ClientFactory<C>: Send + Sync {
    /// Create a ready-to-use client from the given connection properties.
    fn create_client(&self, properties: &ClientProperties) -> Result<C>;
}

/// Cross-invocation session state.
///
/// Holds keyed string variables (saved connections, credentials references)
/// that outlive a single command. Implementations use interior mutability;
/// the context exposes the session without owning its semantics.
pub trait Session: Send + Sync {
    /// Set a variable. Overwrites any prior value.
    fn set(&self, name: &str, value: &str) -> Result<()>;

    /// Get a variable's current value.
    fn get(&self, name: &str) -> Option<String>;

    /// Remove a variable, returning its last value if it was set.
    fn remove(&self, name: &str) -> Option<String>;

    /// Remove all variables.
    fn clear(&self);

    /// Snapshot of all variables, sorted by name for display.
    fn variables(&self) -> Vec<(String, String)>;
}

/// Renders a command outcome in one specific format.
pub trait ResultWriter: Send + Sync {
    /// Write the outcome to the given sink.
    fn write(&self, outcome: &CommandOutcome, output: &mut dyn Write) -> Result<()>;
}
