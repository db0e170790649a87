//! Storage Client Seam
//!
//! The storage client and its wire protocol live outside this crate. Contexts
//! only see the [`StorageClient`] trait, and registration builds clients through a
//! [`StorageClientFactory`]. When the registry holds no factory, the
//! [`DefaultClientFactory`] produces clients that carry their connection settings
//! and nothing else.

use crate::error::ContextError;
use crate::options::{ContextOptions, Credentials, RegionEndpoint};
use std::fmt;
use std::sync::Arc;

/// Where the client connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Explicit URL, typically a local emulator
    ServiceUrl(String),
    /// The managed service in a region
    Region(RegionEndpoint),
}

impl Endpoint {
    /// URL requests are sent to
    pub fn url(&self) -> String {
        match self {
            Endpoint::ServiceUrl(url) => url.clone(),
            Endpoint::Region(region) => region.service_endpoint(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::ServiceUrl(url) => write!(f, "{}", url),
            Endpoint::Region(region) => write!(f, "{} ({})", region.service_endpoint(), region),
        }
    }
}

/// Connection settings a client is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Client against a service url
    pub fn local(service_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: Endpoint::ServiceUrl(service_url.into()),
            credentials,
        }
    }

    /// Client against the managed service in `region`
    pub fn cloud(region: RegionEndpoint, credentials: Credentials) -> Self {
        Self {
            endpoint: Endpoint::Region(region),
            credentials,
        }
    }

    /// Settings for validated options: the service url in local mode, the
    /// region in cloud mode.
    pub fn from_options(options: &ContextOptions) -> Result<Self, ContextError> {
        let credentials = options.credentials();
        if options.local_mode() {
            let url = options.service_url().ok_or_else(|| {
                ContextError::Configuration(format!(
                    "{}: service url must be provided in local mode",
                    options.context_type()
                ))
            })?;
            Ok(Self::local(url, credentials))
        } else {
            let region = options.region_endpoint().ok_or_else(|| {
                ContextError::Configuration(format!(
                    "{}: region endpoint must be provided in cloud mode",
                    options.context_type()
                ))
            })?;
            Ok(Self::cloud(region, credentials))
        }
    }
}

/// Handle to the storage backend
pub trait StorageClient: Send + Sync + fmt::Debug {
    /// Settings the client was built with
    fn config(&self) -> &ClientConfig;
}

/// Builds storage clients
pub trait StorageClientFactory: Send + Sync {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn StorageClient>, ContextError>;
}

/// Client that only records its settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredClient {
    config: ClientConfig,
}

impl StorageClient for ConfiguredClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Factory used when the registry provides none
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClientFactory;

impl StorageClientFactory for DefaultClientFactory {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn StorageClient>, ContextError> {
        if let Endpoint::ServiceUrl(url) = &config.endpoint {
            if !has_http_scheme(url) {
                return Err(ContextError::Configuration(format!(
                    "Invalid service url '{}': expected an http:// or https:// url",
                    url
                )));
            }
        }
        Ok(Arc::new(ConfiguredClient {
            config: config.clone(),
        }))
    }
}

/// Scheme comparison ignores case, so `HTTP://host` is accepted
fn has_http_scheme(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    }
}
