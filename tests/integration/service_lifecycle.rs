//! Integration tests for service construction and registration

use crate::integration::test_utils::fixture_host;
use mapquery::error::ServiceError;
use mapquery::field::FieldSpec;
use mapquery::host::QueryHost;
use mapquery::service::{
    ServiceConfig, ServiceFactory, ServiceKind, ServiceOptions, ServiceRegistry,
};
use mapquery::tools::ToolCapabilitySet;
use std::sync::Arc;

#[test]
fn test_factory_builds_select_with_stock_definition() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let service = ServiceFactory::create(host, &ServiceConfig::new(ServiceKind::Select)).unwrap();

    let definition = service.definition();
    assert_eq!(definition.title, "Select");
    assert_eq!(definition.template, "@select");
    assert!(definition.tools.is_enabled("Polygon"));
    assert_eq!(definition.tools.default.as_deref(), Some("Polygon"));
}

#[test]
fn test_factory_builds_search_with_stock_definition() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let service = ServiceFactory::create(host, &ServiceConfig::new(ServiceKind::Search)).unwrap();

    let definition = service.definition();
    assert_eq!(definition.title, "Search");
    assert_eq!(definition.template, "@search");
    assert!(definition.tools.is_empty());
    assert_eq!(definition.fields.len(), 1);
    assert_eq!(definition.fields[0].name, "keyword");
}

#[test]
fn test_factory_applies_option_overrides() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let config = ServiceConfig {
        kind: ServiceKind::Search,
        options: ServiceOptions {
            title: Some("Owner Lookup".to_string()),
            fields: Some(vec![FieldSpec::text("owner", "Owner name")]),
            ..Default::default()
        },
    };
    let service = ServiceFactory::create(host, &config).unwrap();

    let definition = service.definition();
    assert_eq!(definition.title, "Owner Lookup");
    assert_eq!(definition.fields[0].name, "owner");
    // Untouched options keep the kind's defaults.
    assert_eq!(definition.template, "@search");
}

#[test]
fn test_factory_rejects_broken_tool_set() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let config = ServiceConfig {
        kind: ServiceKind::Select,
        options: ServiceOptions {
            tools: Some(ToolCapabilitySet::none().with_tool("Point", true).with_default("Polygon")),
            ..Default::default()
        },
    };

    let err = ServiceFactory::create(host, &config).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidDefinition { .. }));
}

#[test]
fn test_registry_binds_name_once_per_service() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let registry = ServiceRegistry::new();

    let select = ServiceFactory::create(
        Arc::clone(&host),
        &ServiceConfig::new(ServiceKind::Select),
    )
    .unwrap();
    let search = ServiceFactory::create(host, &ServiceConfig::new(ServiceKind::Search)).unwrap();

    registry.register("identify".to_string(), select).unwrap();
    registry.register("find-owner".to_string(), search).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.list_all(),
        vec!["find-owner".to_string(), "identify".to_string()]
    );
    let handle = registry.get_or_error("identify").unwrap();
    assert_eq!(handle.name(), "identify");
}

#[test]
fn test_registry_rejects_duplicate_name() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let registry = ServiceRegistry::new();

    let first = ServiceFactory::create(
        Arc::clone(&host),
        &ServiceConfig::new(ServiceKind::Select),
    )
    .unwrap();
    let second =
        ServiceFactory::create(host, &ServiceConfig::new(ServiceKind::Select)).unwrap();

    registry.register("identify".to_string(), first).unwrap();
    let err = registry.register("identify".to_string(), second).unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyRegistered(_)));
}

#[test]
fn test_registry_removal_frees_the_name() {
    let host: Arc<dyn QueryHost> = Arc::new(fixture_host());
    let registry = ServiceRegistry::new();

    let service =
        ServiceFactory::create(Arc::clone(&host), &ServiceConfig::new(ServiceKind::Select))
            .unwrap();
    registry.register("identify".to_string(), service).unwrap();
    assert!(registry.remove("identify").is_some());
    assert!(registry.get("identify").is_none());

    let replacement =
        ServiceFactory::create(host, &ServiceConfig::new(ServiceKind::Search)).unwrap();
    registry.register("identify".to_string(), replacement).unwrap();
    assert_eq!(
        registry.get_or_error("identify").unwrap().definition().title,
        "Search"
    );
}

#[test]
fn test_unknown_service_lookup_is_an_error() {
    let registry = ServiceRegistry::new();
    let err = registry.get_or_error("missing").unwrap_err();
    assert!(matches!(err, ServiceError::ServiceNotFound(_)));
}
