//! Configuration Sources
//!
//! String-keyed configuration lookups used to seed context options, and a layered
//! loader built on the `config` crate: built-in defaults, the global file, workspace
//! files, then `DYNAMO_CONTEXT__*` environment variables.

use crate::error::ContextError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;

/// Selects the per-environment workspace file, `config/{name}.toml`
pub const ENV_NAME_VAR: &str = "DYNAMO_CONTEXT_ENV";
const DEFAULT_ENV_NAME: &str = "development";

/// Configuration keys read when seeding options
pub mod keys {
    pub const PROFILE: &str = "aws.profile";
    pub const REGION: &str = "aws.region";
    pub const ACCESS_KEY_ID: &str = "aws.access_key_id";
    pub const SECRET_ACCESS_KEY: &str = "aws.secret_access_key";
    pub const SERVICE_URL: &str = "dynamo.service_url";
    pub const LOCAL_MODE: &str = "dynamo.local_mode";
}

/// Read-only, string-keyed configuration lookups
pub trait ConfigurationSource {
    /// Value stored under `key`, rendered as a string
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigurationSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigurationSource for Config {
    fn get(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }
}

/// Loads layered configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest last): defaults, global file, `config/config.toml`,
    /// `config/{DYNAMO_CONTEXT_ENV}.toml`, environment variables.
    pub fn load(workspace_root: &Path) -> Result<Config, ContextError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = Self::workspace_layers(workspace_root)
            .into_iter()
            .fold(builder, |builder, path| {
                builder.add_source(File::from(path).required(false))
            });
        let builder = sources::environment::add_to_builder(builder);
        Ok(builder.build()?)
    }

    /// Load a single configuration file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<Config, ContextError> {
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?;
        Ok(config)
    }

    /// Workspace files present under `config/`, lowest precedence first: the
    /// shared `config.toml`, then the file named by [`ENV_NAME_VAR`].
    pub fn workspace_layers(workspace_root: &Path) -> Vec<PathBuf> {
        let config_dir = workspace_root.join("config");
        let env_name =
            std::env::var(ENV_NAME_VAR).unwrap_or_else(|_| DEFAULT_ENV_NAME.to_string());

        [
            config_dir.join("config.toml"),
            config_dir.join(format!("{}.toml", env_name)),
        ]
        .into_iter()
        .filter(|path| path.is_file())
        .collect()
    }

    /// Location of the user-level configuration file
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    /// The `logging` section, or defaults when absent
    pub fn logging_config(config: &Config) -> Result<LoggingConfig, ContextError> {
        match config.get::<LoggingConfig>("logging") {
            Ok(logging) => Ok(logging),
            Err(config::ConfigError::NotFound(_)) => Ok(LoggingConfig::default()),
            Err(e) => Err(e.into()),
        }
    }
}
