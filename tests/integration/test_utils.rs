//! Shared test utilities for integration tests
//!
//! Environment isolation for configuration loading, context types that count
//! their hook invocations, and a client factory that records what it built.

use dynamo_context::config::keys;
use dynamo_context::{
    ClientConfig, ContextError, DefaultClientFactory, StorageClient, StorageClientFactory,
};
use parking_lot::Mutex as RecordMutex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Serializes environment variable access across all tests in this binary
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "DYNAMO_CONTEXT_ENV"];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(extra: &[(&str, &str)]) -> Self {
        let names = ISOLATED_VARS
            .iter()
            .copied()
            .chain(extra.iter().map(|(name, _)| *name));
        Self {
            saved: names
                .map(|name| (name.to_string(), std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`, the
/// environment file selector cleared, and `vars` set.
///
/// The original environment is restored afterwards.
pub fn with_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture(vars);

    let config_home = test_dir.path().join("xdg");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    std::env::set_var("HOME", home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", config_home.to_str().unwrap());
    std::env::remove_var("DYNAMO_CONTEXT_ENV");
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();

    result
}

pub fn source(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Named-profile cloud configuration in ap-northeast-1
pub fn cloud_source() -> HashMap<String, String> {
    source(&[
        (keys::PROFILE, "ApplicationDevelopment"),
        (keys::REGION, "ap-northeast-1"),
    ])
}

pub struct Order;
pub struct Customer;

/// Declares a context type whose hooks count their invocations. Each expansion
/// gets its own counters, so tests can assert exact call counts in parallel.
macro_rules! counting_context {
    ($name:ident) => {
        pub struct $name {
            pub data: ::std::sync::Arc<::dynamo_context::DataContext>,
        }

        impl $name {
            fn counters() -> &'static (
                ::std::sync::atomic::AtomicUsize,
                ::std::sync::atomic::AtomicUsize,
            ) {
                static COUNTERS: (
                    ::std::sync::atomic::AtomicUsize,
                    ::std::sync::atomic::AtomicUsize,
                ) = (
                    ::std::sync::atomic::AtomicUsize::new(0),
                    ::std::sync::atomic::AtomicUsize::new(0),
                );
                &COUNTERS
            }

            #[allow(dead_code)]
            pub fn configuring_calls() -> usize {
                Self::counters().0.load(::std::sync::atomic::Ordering::SeqCst)
            }

            #[allow(dead_code)]
            pub fn model_creating_calls() -> usize {
                Self::counters().1.load(::std::sync::atomic::Ordering::SeqCst)
            }
        }

        impl ::dynamo_context::StorageContext for $name {
            fn from_data_context(data: ::std::sync::Arc<::dynamo_context::DataContext>) -> Self {
                Self { data }
            }

            fn on_configuring(_options: &::dynamo_context::ContextOptions) {
                Self::counters()
                    .0
                    .fetch_add(1, ::std::sync::atomic::Ordering::SeqCst);
            }

            fn on_model_creating(
                model: &mut ::dynamo_context::ModelBuilder,
            ) -> Result<(), ::dynamo_context::ContextError> {
                Self::counters()
                    .1
                    .fetch_add(1, ::std::sync::atomic::Ordering::SeqCst);
                model
                    .entity::<$crate::integration::test_utils::Order>()
                    .has_table("Orders")?
                    .has_hash_key("order_id")?;
                Ok(())
            }
        }
    };
}

pub(crate) use counting_context;

/// Factory that remembers every configuration it was asked to build
#[derive(Default)]
pub struct RecordingFactory {
    created: RecordMutex<Vec<ClientConfig>>,
}

impl RecordingFactory {
    pub fn created(&self) -> Vec<ClientConfig> {
        self.created.lock().clone()
    }
}

impl StorageClientFactory for RecordingFactory {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn StorageClient>, ContextError> {
        self.created.lock().push(config.clone());
        DefaultClientFactory.create(config)
    }
}

/// Shared handle to a [`RecordingFactory`], plus the same factory as the trait
/// object a registry resolves.
pub fn recording_factory() -> (Arc<RecordingFactory>, Arc<dyn StorageClientFactory>) {
    let factory = Arc::new(RecordingFactory::default());
    let as_trait: Arc<dyn StorageClientFactory> = factory.clone();
    (factory, as_trait)
}
