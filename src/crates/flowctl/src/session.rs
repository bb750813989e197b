//! In-memory session state.
//!
//! The standard `Session` implementation: keyed string variables scoped to
//! the lifetime of an interactive shell or a single process invocation.

use crate::api::Session;
use crate::error::{FlowCtlError, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Session backed by an in-memory variable map.
#[derive(Debug)]
pub struct InMemorySession {
    /// Unique session identifier.
    session_id: String,

    /// Session creation timestamp.
    created_at: DateTime<Utc>,

    /// Keyed session variables.
    variables: RwLock<HashMap<String, String>>,
}

impl InMemorySession {
    /// Create a new session with a generated ID.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            variables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session with a specific ID.
    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now(),
            variables: RwLock::new(HashMap::new()),
        }
    }

    /// Get the session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the session creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for InMemorySession {
    fn set(&self, name: &str, value: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(FlowCtlError::Session(
                "variable name cannot be empty".to_string(),
            ));
        }
        self.variables
            .write()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.variables.read().get(name).cloned()
    }

    fn remove(&self, name: &str) -> Option<String> {
        self.variables.write().remove(name)
    }

    fn clear(&self) {
        self.variables.write().clear();
    }

    fn variables(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .variables
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
