//! Client properties and the standard backend client factories.
//!
//! The factories validate connection properties and produce opaque client
//! handles; the REST transport behind a handle is a separate concern.

use crate::api::ClientFactory;
use crate::error::{FlowCtlError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection properties for one backend service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProperties {
    /// Base URL of the service.
    pub url: String,

    /// Basic-auth username, paired with `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic-auth password, paired with `username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Connect timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,
}

impl ClientProperties {
    /// Create properties for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            connect_timeout_ms: None,
            read_timeout_ms: None,
        }
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_ms(mut self, millis: u64) -> Self {
        self.connect_timeout_ms = Some(millis);
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout_ms(mut self, millis: u64) -> Self {
        self.read_timeout_ms = Some(millis);
        self
    }
}

/// Ready-to-use handle to the flow-management service.
#[derive(Debug, Clone)]
pub struct FlowClient {
    properties: ClientProperties,
}

impl FlowClient {
    /// Base URL the client targets.
    pub fn base_url(&self) -> &str {
        &self.properties.url
    }

    /// Resolved connection properties.
    pub fn properties(&self) -> &ClientProperties {
        &self.properties
    }
}

/// Ready-to-use handle to the flow registry service.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    properties: ClientProperties,
}

impl RegistryClient {
    /// Base URL the client targets.
    pub fn base_url(&self) -> &str {
        &self.properties.url
    }

    /// Resolved connection properties.
    pub fn properties(&self) -> &ClientProperties {
        &self.properties
    }
}

fn validate_properties(properties: &ClientProperties, backend: &str) -> Result<()> {
    let url = properties.url.trim();
    if url.is_empty() {
        return Err(FlowCtlError::Client(format!("{backend} URL is not configured")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FlowCtlError::Client(format!(
            "{backend} URL must be http or https: {url}"
        )));
    }
    // Credentials come in pairs or not at all.
    if properties.username.is_some() != properties.password.is_some() {
        return Err(FlowCtlError::Client(format!(
            "{backend} credentials require both username and password"
        )));
    }
    Ok(())
}

/// Standard factory for flow-management service clients.
#[derive(Debug, Default)]
pub struct StandardFlowClientFactory;

impl StandardFlowClientFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self
    }
}

impl ClientFactory<FlowClient> for StandardFlowClientFactory {
    fn create_client(&self, properties: &ClientProperties) -> Result<FlowClient> {
        validate_properties(properties, "flow service")?;
        debug!(url = %properties.url, "creating flow service client");
        Ok(FlowClient {
            properties: properties.clone(),
        })
    }
}

/// Standard factory for flow registry service clients.
#[derive(Debug, Default)]
pub struct StandardRegistryClientFactory;

impl StandardRegistryClientFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self
    }
}

impl ClientFactory<RegistryClient> for StandardRegistryClientFactory {
    fn create_client(&self, properties: &ClientProperties) -> Result<RegistryClient> {
        validate_properties(properties, "registry service")?;
        debug!(url = %properties.url, "creating registry service client");
        Ok(RegistryClient {
            properties: properties.clone(),
        })
    }
}
