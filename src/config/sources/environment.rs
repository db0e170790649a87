//! Environment variable source: DYNAMO_CONTEXT__<SECTION>__<KEY>

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "DYNAMO_CONTEXT";

/// Add environment overrides to builder.
///
/// `DYNAMO_CONTEXT__AWS__REGION=eu-west-1` sets `aws.region`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__"),
    )
}
