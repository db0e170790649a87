//! Context Options
//!
//! Configuration values for one storage context type. Options start life as a
//! mutable [`OptionsDraft`], seeded from a configuration source and adjusted through
//! the [`OptionsBuilder`](crate::builder::OptionsBuilder). Registration consumes the
//! draft with [`OptionsDraft::freeze`], which validates it and yields the read-only
//! [`ContextOptions`] shared by the registered client and context.

use crate::builder::OptionsBuilder;
use crate::config::{keys, ConfigurationSource};
use crate::error::{require_non_blank, ContextError};
use crate::types::TypeKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

mod credentials;
mod region;

pub use credentials::Credentials;
pub use region::RegionEndpoint;

/// Schema version used when converting entities to storage records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryConversion {
    /// Original schema: booleans as numbers, lists as sets
    #[default]
    V1,
    /// Schema with native L, M, BOOL and NULL support
    V2,
}

/// Mutable options for a context that has not been registered yet
#[derive(Clone, PartialEq)]
pub struct OptionsDraft {
    context_type: TypeKey,
    profile: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    region_endpoint: Option<RegionEndpoint>,
    service_url: Option<String>,
    local_mode: bool,
    conversion: EntryConversion,
    table_names: HashMap<TypeKey, String>,
}

impl OptionsDraft {
    /// Empty draft for the given context type
    pub fn new(context_type: TypeKey) -> Self {
        Self {
            context_type,
            profile: None,
            access_key_id: None,
            secret_access_key: None,
            region_endpoint: None,
            service_url: None,
            local_mode: false,
            conversion: EntryConversion::default(),
            table_names: HashMap::new(),
        }
    }

    /// Draft seeded from a configuration source.
    ///
    /// Blank values count as absent. An unknown region or an unparseable mode
    /// flag is rejected here rather than silently dropped.
    pub fn seeded(
        context_type: TypeKey,
        source: &dyn ConfigurationSource,
    ) -> Result<Self, ContextError> {
        let mut draft = Self::new(context_type);

        draft.profile = non_blank(source, keys::PROFILE);
        draft.access_key_id = non_blank(source, keys::ACCESS_KEY_ID);
        draft.secret_access_key = non_blank(source, keys::SECRET_ACCESS_KEY);
        draft.service_url = non_blank(source, keys::SERVICE_URL);

        if let Some(region) = non_blank(source, keys::REGION) {
            let endpoint = RegionEndpoint::from_system_name(&region).ok_or_else(|| {
                ContextError::Configuration(format!(
                    "{}: unknown region '{}'",
                    keys::REGION,
                    region
                ))
            })?;
            draft.region_endpoint = Some(endpoint);
        }

        if let Some(flag) = non_blank(source, keys::LOCAL_MODE) {
            draft.local_mode = parse_flag(&flag).ok_or_else(|| {
                ContextError::Configuration(format!(
                    "{}: expected a boolean, got '{}'",
                    keys::LOCAL_MODE,
                    flag
                ))
            })?;
        }

        Ok(draft)
    }

    /// Fluent builder writing into this draft
    pub fn builder(&mut self) -> OptionsBuilder<'_> {
        OptionsBuilder::new(self)
    }

    pub fn context_type(&self) -> TypeKey {
        self.context_type
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn set_profile(&mut self, profile: Option<String>) {
        self.profile = profile;
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref()
    }

    pub fn set_access_key_id(&mut self, access_key_id: Option<String>) {
        self.access_key_id = access_key_id;
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref()
    }

    pub fn set_secret_access_key(&mut self, secret_access_key: Option<String>) {
        self.secret_access_key = secret_access_key;
    }

    pub fn region_endpoint(&self) -> Option<RegionEndpoint> {
        self.region_endpoint
    }

    pub fn set_region_endpoint(&mut self, region: Option<RegionEndpoint>) {
        self.region_endpoint = region;
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }

    pub fn set_service_url(&mut self, service_url: Option<String>) {
        self.service_url = service_url;
    }

    pub fn local_mode(&self) -> bool {
        self.local_mode
    }

    pub fn set_local_mode(&mut self, local_mode: bool) {
        self.local_mode = local_mode;
    }

    pub fn conversion(&self) -> EntryConversion {
        self.conversion
    }

    pub fn set_conversion(&mut self, conversion: EntryConversion) {
        self.conversion = conversion;
    }

    pub fn table_names(&self) -> &HashMap<TypeKey, String> {
        &self.table_names
    }

    /// Table name override for entity `E`, if any
    pub fn table_name<E: 'static>(&self) -> Option<&str> {
        self.table_names.get(&TypeKey::of::<E>()).map(String::as_str)
    }

    /// Map entity `E` to `table_name`. A later call for the same entity replaces
    /// the earlier mapping.
    pub fn use_table_name<E: 'static>(&mut self, table_name: &str) -> Result<(), ContextError> {
        let table_name = require_non_blank(table_name, "table_name")?;
        self.table_names
            .insert(TypeKey::of::<E>(), table_name.to_string());
        Ok(())
    }

    /// Cloud mode needs a region; credentials fall back to the ambient chain.
    pub fn validate_cloud_mode(&self) -> Result<(), ContextError> {
        if self.region_endpoint.is_none() {
            return Err(ContextError::Configuration(format!(
                "{}: region endpoint must be provided in cloud mode",
                self.context_type
            )));
        }
        Ok(())
    }

    pub fn validate_local_mode(&self) -> Result<(), ContextError> {
        match self.service_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(()),
            _ => Err(ContextError::Configuration(format!(
                "{}: service url must be provided in local mode",
                self.context_type
            ))),
        }
    }

    /// Validate against the branch selected by the local-mode flag
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.local_mode {
            self.validate_local_mode()
        } else {
            self.validate_cloud_mode()
        }
    }

    /// Validate and lock the draft. The draft is consumed, so nothing can keep
    /// mutating options that are already in use.
    pub fn freeze(self) -> Result<ContextOptions, ContextError> {
        self.validate()?;

        Ok(ContextOptions {
            context_type: self.context_type,
            profile: self.profile,
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            region_endpoint: self.region_endpoint,
            service_url: self.service_url,
            local_mode: self.local_mode,
            conversion: self.conversion,
            table_names: self.table_names,
        })
    }
}

impl fmt::Debug for OptionsDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsDraft")
            .field("context_type", &self.context_type)
            .field("profile", &self.profile)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region_endpoint", &self.region_endpoint)
            .field("service_url", &self.service_url)
            .field("local_mode", &self.local_mode)
            .field("conversion", &self.conversion)
            .finish_non_exhaustive()
    }
}

/// Validated, read-only options of a registered context
#[derive(Clone, PartialEq)]
pub struct ContextOptions {
    context_type: TypeKey,
    profile: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    region_endpoint: Option<RegionEndpoint>,
    service_url: Option<String>,
    local_mode: bool,
    conversion: EntryConversion,
    table_names: HashMap<TypeKey, String>,
}

impl ContextOptions {
    pub fn context_type(&self) -> TypeKey {
        self.context_type
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref()
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref()
    }

    pub fn region_endpoint(&self) -> Option<RegionEndpoint> {
        self.region_endpoint
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }

    pub fn local_mode(&self) -> bool {
        self.local_mode
    }

    pub fn conversion(&self) -> EntryConversion {
        self.conversion
    }

    pub fn table_names(&self) -> &HashMap<TypeKey, String> {
        &self.table_names
    }

    pub fn table_name_for(&self, entity: &TypeKey) -> Option<&str> {
        self.table_names.get(entity).map(String::as_str)
    }

    /// Credentials the client should be built with
    pub fn credentials(&self) -> Credentials {
        Credentials::resolve(
            self.profile(),
            self.access_key_id(),
            self.secret_access_key(),
        )
    }
}

impl fmt::Debug for ContextOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextOptions")
            .field("context_type", &self.context_type)
            .field("profile", &self.profile)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region_endpoint", &self.region_endpoint)
            .field("service_url", &self.service_url)
            .field("local_mode", &self.local_mode)
            .field("conversion", &self.conversion)
            .field("table_names", &self.table_names)
            .finish()
    }
}

fn non_blank(source: &dyn ConfigurationSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
