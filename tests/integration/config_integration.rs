//! Integration tests for Configuration System

use crate::integration::test_utils::with_home_env;
use mapquery::cli::{Commands, RunContext, ServiceCommands};
use mapquery::config::{ConfigLoader, MapQueryConfig, ValidationError};
use mapquery::service::{ServiceConfig, ServiceKind};
use tempfile::TempDir;

#[test]
fn test_config_loads_services_layers_and_templates() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("test_config.toml");

    std::fs::write(
        &config_file,
        r#"
[system]
default_workspace_root = "."

[services.identify]
kind = "select"
title = "Identify Parcels"

[services.find-owner]
kind = "search"

[[layers]]
path = "parcels/parcels"
queryable = true

[[layers.features]]
[layers.features.properties]
OWNER_NAME = "John Smith"
PIN = "001"

[templates]
"@select" = "<li>{{OWNER_NAME}}</li>"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());

    assert_eq!(config.services.len(), 2);
    assert_eq!(config.services["identify"].kind, ServiceKind::Select);
    assert_eq!(
        config.services["identify"].options.title.as_deref(),
        Some("Identify Parcels")
    );
    assert_eq!(config.services["find-owner"].kind, ServiceKind::Search);

    assert_eq!(config.layers.len(), 1);
    assert_eq!(config.layers[0].path, "parcels/parcels");
    assert!(config.layers[0].queryable);
    assert_eq!(config.layers[0].features.len(), 1);

    assert_eq!(
        config.templates.get("@select").map(String::as_str),
        Some("<li>{{OWNER_NAME}}</li>")
    );
}

#[test]
fn test_config_default_values() {
    let config = MapQueryConfig::default();
    assert_eq!(
        config.system.default_workspace_root,
        std::path::PathBuf::from(".")
    );
    assert!(config.services.is_empty());
    assert!(config.layers.is_empty());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation_rejects_duplicate_layer_paths() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("test_config.toml");

    std::fs::write(
        &config_file,
        r#"
[[layers]]
path = "parcels/parcels"

[[layers]]
path = "parcels/parcels"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Layer(_, _))));
}

#[test]
fn test_config_validation_rejects_broken_service_tool_set() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("test_config.toml");

    std::fs::write(
        &config_file,
        r#"
[services.identify]
kind = "select"

[services.identify.tools]
default = "Polygon"

[services.identify.tools.enabled]
Point = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Service(_, _))));
}

#[test]
fn test_workspace_config_overrides_global_config() {
    let temp_dir = TempDir::new().unwrap();

    with_home_env(&temp_dir, || {
        let home = std::path::PathBuf::from(std::env::var("HOME").unwrap());
        let global_dir = home.join(".config").join("mapquery");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(
            global_dir.join("config.toml"),
            r#"
[logging]
level = "warn"

[templates]
"@select" = "global"
"#,
        )
        .unwrap();

        let workspace = temp_dir.path().join("workspace");
        let config_dir = workspace.join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            r#"
[templates]
"@select" = "workspace"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(
            config.templates.get("@select").map(String::as_str),
            Some("workspace")
        );
        // Global settings the workspace does not touch still apply.
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_run_context_builds_working_services_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");

    std::fs::write(
        &config_file,
        r#"
[services.identify]
kind = "select"

[[layers]]
path = "parcels/parcels"
queryable = true

[[layers.features]]
[layers.features.properties]
OWNER_NAME = "John Smith"
PIN = "001"

[templates]
"@select" = "<li>{{OWNER_NAME}}</li>"
"#,
    )
    .unwrap();

    let context =
        RunContext::new(temp_dir.path().to_path_buf(), Some(config_file)).unwrap();

    let listing = context
        .execute(&Commands::Service {
            command: ServiceCommands::List {
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(listing.contains("identify"));

    let output = context
        .execute(&Commands::Query {
            service: "identify".to_string(),
            fields: Vec::new(),
            selection: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("<li>John Smith</li>"));
}

#[test]
fn test_run_context_with_unconfigured_service_config() {
    let config = ServiceConfig::default();
    assert_eq!(config.kind, ServiceKind::Select);
    assert!(config.options.title.is_none());
}
