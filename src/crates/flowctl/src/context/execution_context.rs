//! Execution context for command invocations
//!
//! One context is built per process invocation (or once for the lifetime of
//! an interactive shell) and passed, unchanged, to every command it executes.

use crate::api::{ClientFactory, OutputSink, ResultType, ResultWriter, Session};
use crate::client::{FlowClient, RegistryClient};
use crate::error::{FlowCtlError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Immutable execution context that provides access to all command resources.
///
/// Construction goes through [`ContextBuilder`], which guarantees that every
/// required field is present and that every [`ResultType`] has a registered
/// writer before a context exists. A built context is safe to share across
/// concurrent command executions: every accessor is side-effect free.
pub struct ExecutionContext {
    /// Factory for flow-management service clients.
    flow_client_factory: Arc<dyn ClientFactory<FlowClient>>,

    /// Factory for flow registry service clients.
    registry_client_factory: Arc<dyn ClientFactory<RegistryClient>>,

    /// Cross-invocation session state.
    session: Arc<dyn Session>,

    /// Sink rendered results are written to.
    output: OutputSink,

    /// Whether the tool is running in an interactive shell.
    interactive: bool,

    /// Writer for each result type. Total over `ResultType::VALUES`.
    writers: HashMap<ResultType, Arc<dyn ResultWriter>>,
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("interactive", &self.interactive)
            .field("writers", &self.writers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ExecutionContext {
    /// Get the flow-management client factory.
    pub fn flow_client_factory(&self) -> &Arc<dyn ClientFactory<FlowClient>> {
        &self.flow_client_factory
    }

    /// Get the registry client factory.
    pub fn registry_client_factory(&self) -> &Arc<dyn ClientFactory<RegistryClient>> {
        &self.registry_client_factory
    }

    /// Get the session.
    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Get the output sink.
    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// Check whether the tool is running interactively.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Read-only view of the writer registry.
    pub fn result_writers(&self) -> &HashMap<ResultType, Arc<dyn ResultWriter>> {
        &self.writers
    }

    /// Resolve the writer for a command's result.
    ///
    /// An explicit result type resolves to its registered writer. When no
    /// type is requested, interactive contexts default to human-readable
    /// output and non-interactive (piped or batch) contexts default to JSON,
    /// so scripted callers always get structured output.
    ///
    /// Infallible: `build()` validated that every result type has a writer.
    pub fn result_writer(&self, requested: Option<ResultType>) -> &Arc<dyn ResultWriter> {
        let kind = requested.unwrap_or(if self.interactive {
            ResultType::Simple
        } else {
            ResultType::Json
        });
        // Present for every kind by the build-time totality check.
        &self.writers[&kind]
    }
}

/// Builder for creating execution contexts.
///
/// Setters are chainable and carry no validation; all checks happen in a
/// single pass inside [`ContextBuilder::build`]. `build` borrows the builder,
/// so repeated calls produce independent context snapshots and later builder
/// mutation never affects an already-built context.
pub struct ContextBuilder {
    flow_client_factory: Option<Arc<dyn ClientFactory<FlowClient>>>,
    registry_client_factory: Option<Arc<dyn ClientFactory<RegistryClient>>>,
    session: Option<Arc<dyn Session>>,
    output: Option<OutputSink>,
    interactive: bool,
    writers: HashMap<ResultType, Arc<dyn ResultWriter>>,
}

impl ContextBuilder {
    /// Create a new context builder.
    pub fn new() -> Self {
        Self {
            flow_client_factory: None,
            registry_client_factory: None,
            session: None,
            output: None,
            interactive: false,
            writers: HashMap::new(),
        }
    }

    /// Set the flow-management client factory.
    pub fn with_flow_client_factory(
        mut self,
        factory: Arc<dyn ClientFactory<FlowClient>>,
    ) -> Self {
        self.flow_client_factory = Some(factory);
        self
    }

    /// Set the registry client factory.
    pub fn with_registry_client_factory(
        mut self,
        factory: Arc<dyn ClientFactory<RegistryClient>>,
    ) -> Self {
        self.registry_client_factory = Some(factory);
        self
    }

    /// Set the session.
    pub fn with_session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the output sink.
    pub fn with_output(mut self, output: OutputSink) -> Self {
        self.output = Some(output);
        self
    }

    /// Set the interactivity flag.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Register the writer for a result type.
    ///
    /// Last registration for a given type wins; overwriting is not an error.
    pub fn add_result_writer(mut self, kind: ResultType, writer: Arc<dyn ResultWriter>) -> Self {
        self.writers.insert(kind, writer);
        self
    }

    /// Validate the accumulated configuration and freeze it into a context.
    ///
    /// # Errors
    ///
    /// [`FlowCtlError::MissingField`] if the flow client factory, registry
    /// client factory, session, or output sink was never set (checked in that
    /// order); [`FlowCtlError::MissingResultWriter`] if any [`ResultType`]
    /// has no registered writer. A failed build leaves no partial context.
    pub fn build(&self) -> Result<ExecutionContext> {
        // Independent copy: later builder mutation must not reach the context.
        let writers = self.writers.clone();

        let flow_client_factory = self
            .flow_client_factory
            .clone()
            .ok_or(FlowCtlError::MissingField("flow client factory"))?;
        let registry_client_factory = self
            .registry_client_factory
            .clone()
            .ok_or(FlowCtlError::MissingField("registry client factory"))?;
        let session = self
            .session
            .clone()
            .ok_or(FlowCtlError::MissingField("session"))?;
        let output = self
            .output
            .clone()
            .ok_or(FlowCtlError::MissingField("output"))?;

        // Every result type must have a writer before any command runs.
        for kind in ResultType::VALUES {
            if !writers.contains_key(&kind) {
                return Err(FlowCtlError::MissingResultWriter(kind));
            }
        }

        info!(
            interactive = self.interactive,
            writers = writers.len(),
            "execution context ready"
        );

        Ok(ExecutionContext {
            flow_client_factory,
            registry_client_factory,
            session,
            output,
            interactive: self.interactive,
            writers,
        })
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{output_sink, CommandOutcome};
    use crate::client::{StandardFlowClientFactory, StandardRegistryClientFactory};
    use crate::session::InMemorySession;
    use crate::writers::{JsonResultWriter, SimpleResultWriter};
    use std::io::Write;

    /// Writer that renders a fixed tag, so tests can tell instances apart.
    struct TaggedWriter(&'static str);

    impl ResultWriter for TaggedWriter {
        fn write(&self, _outcome: &CommandOutcome, output: &mut dyn Write) -> Result<()> {
            writeln!(output, "{}", self.0)?;
            Ok(())
        }
    }

    fn complete_builder() -> ContextBuilder {
        ContextBuilder::new()
            .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
            .with_registry_client_factory(Arc::new(StandardRegistryClientFactory::new()))
            .with_session(Arc::new(InMemorySession::new()))
            .with_output(output_sink(Vec::new()))
            .add_result_writer(ResultType::Simple, Arc::new(SimpleResultWriter::new()))
            .add_result_writer(ResultType::Json, Arc::new(JsonResultWriter::new()))
    }

    #[test]
    fn test_builder_missing_flow_factory_named_first() {
        // Nothing set at all: the flow factory is the first check to trip.
        let err = ContextBuilder::new().build().unwrap_err();
        assert_eq!(err.to_string(), "missing required field: flow client factory");
    }

    #[test]
    fn test_builder_missing_registry_factory() {
        let err = ContextBuilder::new()
            .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field: registry client factory"
        );
    }

    #[test]
    fn test_builder_missing_session() {
        let err = ContextBuilder::new()
            .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
            .with_registry_client_factory(Arc::new(StandardRegistryClientFactory::new()))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: session");
    }

    #[test]
    fn test_builder_missing_output() {
        let err = ContextBuilder::new()
            .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
            .with_registry_client_factory(Arc::new(StandardRegistryClientFactory::new()))
            .with_session(Arc::new(InMemorySession::new()))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: output");
    }

    #[test]
    fn test_builder_missing_writer_names_the_kind() {
        let builder = ContextBuilder::new()
            .with_flow_client_factory(Arc::new(StandardFlowClientFactory::new()))
            .with_registry_client_factory(Arc::new(StandardRegistryClientFactory::new()))
            .with_session(Arc::new(InMemorySession::new()))
            .with_output(output_sink(Vec::new()))
            .add_result_writer(ResultType::Simple, Arc::new(SimpleResultWriter::new()));

        let err = builder.build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "no result writer registered for result type: json"
        );

        // Registering the missing writer fixes the build.
        let builder = builder.add_result_writer(ResultType::Json, Arc::new(JsonResultWriter::new()));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_builder_success_and_accessors() {
        let session = Arc::new(InMemorySession::with_id("shell-1"));
        let context = complete_builder()
            .with_session(session.clone())
            .with_interactive(true)
            .build()
            .unwrap();

        assert!(context.is_interactive());
        assert_eq!(context.result_writers().len(), 2);

        // The session handle is shared, not copied.
        session.set("flow.url", "http://localhost:8080").unwrap();
        assert_eq!(
            context.session().get("flow.url").as_deref(),
            Some("http://localhost:8080")
        );

        let props = crate::client::ClientProperties::new("http://localhost:8080");
        assert!(context.flow_client_factory().create_client(&props).is_ok());
        assert!(context.registry_client_factory().create_client(&props).is_ok());
    }

    #[test]
    fn test_explicit_kind_resolves_registered_writer() {
        let simple: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("simple"));
        let json: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("json"));
        let context = complete_builder()
            .add_result_writer(ResultType::Simple, simple.clone())
            .add_result_writer(ResultType::Json, json.clone())
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(
            context.result_writer(Some(ResultType::Simple)),
            &simple
        ));
        assert!(Arc::ptr_eq(
            context.result_writer(Some(ResultType::Json)),
            &json
        ));
    }

    #[test]
    fn test_default_writer_interactive() {
        let simple: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("simple"));
        let context = complete_builder()
            .add_result_writer(ResultType::Simple, simple.clone())
            .with_interactive(true)
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(context.result_writer(None), &simple));
    }

    #[test]
    fn test_default_writer_non_interactive() {
        let json: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("json"));
        let context = complete_builder()
            .add_result_writer(ResultType::Json, json.clone())
            .with_interactive(false)
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(context.result_writer(None), &json));
    }

    #[test]
    fn test_duplicate_registration_last_wins() {
        let first: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("first"));
        let second: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("second"));
        let context = complete_builder()
            .add_result_writer(ResultType::Simple, first)
            .add_result_writer(ResultType::Simple, second.clone())
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(
            context.result_writer(Some(ResultType::Simple)),
            &second
        ));
    }

    #[test]
    fn test_builder_mutation_after_build_does_not_reach_context() {
        let original: Arc<dyn ResultWriter> = Arc::new(TaggedWriter("original"));
        let builder = complete_builder()
            .with_interactive(true)
            .add_result_writer(ResultType::Simple, original.clone());

        let context = builder.build().unwrap();

        // Mutate the builder after the fact.
        let builder = builder
            .with_interactive(false)
            .add_result_writer(ResultType::Simple, Arc::new(TaggedWriter("replacement")));

        assert!(context.is_interactive());
        assert!(Arc::ptr_eq(
            context.result_writer(Some(ResultType::Simple)),
            &original
        ));

        // The mutated builder still produces its own, independent snapshot.
        let rebuilt = builder.build().unwrap();
        assert!(!rebuilt.is_interactive());
        assert!(!Arc::ptr_eq(
            rebuilt.result_writer(Some(ResultType::Simple)),
            &original
        ));
    }

    #[test]
    fn test_repeated_build_produces_independent_contexts() {
        let builder = complete_builder();
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a.result_writers().len(), b.result_writers().len());
        // Both snapshots share the same registered writer instances.
        assert!(Arc::ptr_eq(
            a.result_writer(Some(ResultType::Json)),
            b.result_writer(Some(ResultType::Json))
        ));
    }
}
