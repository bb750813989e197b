//! The two shipped result writers.

use crate::api::{CommandOutcome, ResultWriter};
use crate::error::Result;
use std::io::Write;

/// Writes the human-readable message of an outcome.
#[derive(Debug, Default)]
pub struct SimpleResultWriter;

impl SimpleResultWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl ResultWriter for SimpleResultWriter {
    fn write(&self, outcome: &CommandOutcome, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "{}", outcome.message)?;
        Ok(())
    }
}

/// Writes the structured payload of an outcome as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonResultWriter;

impl JsonResultWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl ResultWriter for JsonResultWriter {
    fn write(&self, outcome: &CommandOutcome, output: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *output, &outcome.payload)?;
        writeln!(output)?;
        Ok(())
    }
}
