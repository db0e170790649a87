//! Integration tests for layered configuration feeding registration

use dynamo_context::{
    ClientConfig, ConfigLoader, ContextError, Credentials, Endpoint, RegionEndpoint,
    ServiceRegistry,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::integration::test_utils::{counting_context, with_config_env};

counting_context!(WorkspaceContext);
counting_context!(EnvironmentFileContext);
counting_context!(EnvVarContext);
counting_context!(GlobalFileContext);
counting_context!(BadRegionContext);

fn write_workspace_config(root: &Path, file: &str, contents: &str) {
    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(file), contents).unwrap();
}

#[test]
fn test_workspace_file_seeds_cloud_options() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        r#"
[aws]
profile = "ApplicationDevelopment"
region = "eu-west-1"
"#,
    );

    with_config_env(&test_dir, &[], || {
        let config = ConfigLoader::load(&workspace).unwrap();
        let mut registry = ServiceRegistry::new();
        registry.add_context::<WorkspaceContext>(&config).unwrap();

        let client_config = registry.get::<ClientConfig>().unwrap();
        assert_eq!(
            client_config.endpoint,
            Endpoint::Region(RegionEndpoint::EU_WEST_1)
        );
        assert_eq!(
            client_config.credentials,
            Credentials::Profile("ApplicationDevelopment".to_string())
        );
    });
}

#[test]
fn test_environment_file_overrides_base_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        r#"
[aws]
region = "us-east-1"
"#,
    );
    write_workspace_config(
        &workspace,
        "test.toml",
        r#"
[dynamo]
local_mode = true
service_url = "http://localhost:8000"
"#,
    );

    with_config_env(&test_dir, &[("DYNAMO_CONTEXT_ENV", "test")], || {
        let config = ConfigLoader::load(&workspace).unwrap();
        let mut registry = ServiceRegistry::new();
        registry
            .add_context::<EnvironmentFileContext>(&config)
            .unwrap();

        let options = registry
            .context_options::<EnvironmentFileContext>()
            .unwrap();
        assert!(options.local_mode());
        assert_eq!(options.region_endpoint(), Some(RegionEndpoint::US_EAST_1));
        assert_eq!(
            registry.get::<ClientConfig>().unwrap().endpoint,
            Endpoint::ServiceUrl("http://localhost:8000".to_string())
        );
    });
}

#[test]
fn test_environment_variable_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        r#"
[aws]
region = "us-east-1"
"#,
    );

    with_config_env(
        &test_dir,
        &[("DYNAMO_CONTEXT__AWS__REGION", "ap-southeast-2")],
        || {
            let config = ConfigLoader::load(&workspace).unwrap();
            let mut registry = ServiceRegistry::new();
            registry.add_context::<EnvVarContext>(&config).unwrap();

            assert_eq!(
                registry.get::<ClientConfig>().unwrap().endpoint,
                Endpoint::Region(RegionEndpoint::AP_SOUTHEAST_2)
            );
        },
    );
}

#[test]
fn test_global_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();

    with_config_env(&test_dir, &[], || {
        let global_path = ConfigLoader::global_config_path().unwrap();
        assert_eq!(
            global_path,
            test_dir
                .path()
                .join("xdg")
                .join("dynamo-context")
                .join("config.toml")
        );
        fs::create_dir_all(global_path.parent().unwrap()).unwrap();
        fs::write(
            &global_path,
            r#"
[aws]
region = "sa-east-1"
access_key_id = "AKIDEXAMPLE"
secret_access_key = "wJalrXUtnFEMI"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        let mut registry = ServiceRegistry::new();
        registry.add_context::<GlobalFileContext>(&config).unwrap();

        let client_config = registry.get::<ClientConfig>().unwrap();
        assert_eq!(
            client_config.endpoint,
            Endpoint::Region(RegionEndpoint::SA_EAST_1)
        );
        assert!(matches!(
            client_config.credentials,
            Credentials::Basic { .. }
        ));
    });
}

#[test]
fn test_unknown_region_in_file_fails_registration() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        r#"
[aws]
region = "moon-base-1"
"#,
    );

    with_config_env(&test_dir, &[], || {
        let config = ConfigLoader::load(&workspace).unwrap();
        let mut registry = ServiceRegistry::new();
        let result = registry.add_context::<BadRegionContext>(&config);

        assert!(matches!(result, Err(ContextError::Configuration(_))));
        assert!(registry.is_empty());
    });
}

#[test]
fn test_logging_section_from_workspace() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        r#"
[logging]
level = "debug"
format = "json"
"#,
    );

    with_config_env(&test_dir, &[], || {
        let config = ConfigLoader::load(&workspace).unwrap();
        let logging = ConfigLoader::logging_config(&config).unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, "json");
        assert_eq!(logging.output, "stdout");
    });
}
