//! Options Builder
//!
//! Fluent façade over an [`OptionsDraft`]. Each call validates its own input and
//! fails at the call site, so a misconfiguration points at the exact builder call
//! that caused it. A failed call leaves the draft untouched.

use crate::error::{require_non_blank, ContextError};
use crate::options::{EntryConversion, OptionsDraft, RegionEndpoint};

/// Builder handed to registration callbacks
pub struct OptionsBuilder<'a> {
    options: &'a mut OptionsDraft,
}

impl<'a> OptionsBuilder<'a> {
    pub(crate) fn new(options: &'a mut OptionsDraft) -> Self {
        Self { options }
    }

    /// Current state of the draft being built
    pub fn options(&self) -> &OptionsDraft {
        self.options
    }

    /// Use a specific table name for entity `E`.
    pub fn use_table_name<E: 'static>(&mut self, table_name: &str) -> Result<&mut Self, ContextError> {
        self.options.use_table_name::<E>(table_name)?;
        Ok(self)
    }

    /// Access key id of the client credentials.
    pub fn use_access_key_id(&mut self, access_key: &str) -> Result<&mut Self, ContextError> {
        let access_key = require_non_blank(access_key, "access_key_id")?;
        self.options.set_access_key_id(Some(access_key.to_string()));
        Ok(self)
    }

    /// Secret access key of the client credentials.
    pub fn use_secret_access_key(&mut self, access_secret: &str) -> Result<&mut Self, ContextError> {
        let access_secret = require_non_blank(access_secret, "secret_access_key")?;
        self.options
            .set_secret_access_key(Some(access_secret.to_string()));
        Ok(self)
    }

    /// Named credentials profile.
    pub fn use_profile(&mut self, profile: &str) -> Result<&mut Self, ContextError> {
        let profile = require_non_blank(profile, "profile")?;
        self.options.set_profile(Some(profile.to_string()));
        Ok(self)
    }

    /// Target a local emulator at `service_url`, e.g. `"http://localhost:8000"`.
    ///
    /// Switches the options into local mode. Surrounding whitespace is trimmed,
    /// as it is for urls read from configuration.
    pub fn use_local_mode(&mut self, service_url: &str) -> Result<&mut Self, ContextError> {
        let service_url = require_non_blank(service_url, "service_url")?.trim();
        self.options.set_service_url(Some(service_url.to_string()));
        self.options.set_local_mode(true);
        Ok(self)
    }

    /// Target the managed service; validation will require a region.
    pub fn use_cloud_mode(&mut self) -> &mut Self {
        self.options.set_local_mode(false);
        self
    }

    /// Service url without changing the mode.
    pub fn use_service_url(&mut self, service_url: &str) -> Result<&mut Self, ContextError> {
        let service_url = require_non_blank(service_url, "service_url")?.trim();
        self.options.set_service_url(Some(service_url.to_string()));
        Ok(self)
    }

    pub fn use_region_endpoint(&mut self, region: RegionEndpoint) -> &mut Self {
        self.options.set_region_endpoint(Some(region));
        self
    }

    /// Region by system name, e.g. `"eu-west-1"`.
    pub fn use_region(&mut self, system_name: &str) -> Result<&mut Self, ContextError> {
        let system_name = require_non_blank(system_name, "region")?;
        let region = RegionEndpoint::from_system_name(system_name).ok_or_else(|| {
            ContextError::argument("region", &format!("unknown region '{}'", system_name))
        })?;
        Ok(self.use_region_endpoint(region))
    }

    /// Schema with full support for the L, M, BOOL and NULL types.
    pub fn use_entry_conversion_v2(&mut self) -> &mut Self {
        self.options.set_conversion(EntryConversion::V2);
        self
    }
}
