//! Integration tests for result aggregation into markup

use crate::integration::test_utils::{fixture_host, parcel_features};
use mapquery::field::FieldValue;
use mapquery::host::{MemoryHost, QueryHost};
use mapquery::query::record::{LayerResult, QueryRecord};
use mapquery::service::{ServiceConfig, ServiceFactory, ServiceKind, ServiceRegistry};
use mapquery::types::{LayerPath, QueryId};
use std::sync::Arc;

fn select_handle(host: &Arc<MemoryHost>) -> Arc<mapquery::service::RegisteredService> {
    let registry = ServiceRegistry::new();
    let service = ServiceFactory::create(
        Arc::clone(host) as Arc<dyn QueryHost>,
        &ServiceConfig::new(ServiceKind::Select),
    )
    .unwrap();
    registry.register("identify".to_string(), service).unwrap()
}

#[test]
fn test_markup_concatenates_layers_in_record_order() {
    let host = Arc::new(MemoryHost::new());
    host.add_layer(
        LayerPath::from("b/b"),
        true,
        vec![mapquery::query::record::Feature::with_properties(&[(
            "OWNER_NAME",
            "Second",
        )])],
    );
    host.add_layer(
        LayerPath::from("a/a"),
        true,
        vec![mapquery::query::record::Feature::with_properties(&[(
            "OWNER_NAME",
            "First",
        )])],
    );
    host.set_template("@select", "<li>{{OWNER_NAME}}</li>");

    let handle = select_handle(&host);
    let query_id = handle.query(None, &[]).unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    // Host layer order, not alphabetical order.
    let markup = handle.results_as_html(query_id, &completed.record);
    assert_eq!(markup, "<li>Second</li><li>First</li>");
}

#[test]
fn test_failed_and_missing_layers_are_skipped_silently() {
    let host = Arc::new(fixture_host());
    let handle = select_handle(&host);

    let mut record = QueryRecord::new(vec![
        LayerPath::from("missing/missing"),
        LayerPath::from("parcels/parcels"),
        LayerPath::from("broken/broken"),
    ]);
    record.insert_result(
        LayerPath::from("parcels/parcels"),
        LayerResult::ok(parcel_features()),
    );
    record.insert_result(LayerPath::from("broken/broken"), LayerResult::failed());

    let markup = handle.results_as_html(QueryId(1), &record);
    assert_eq!(
        markup,
        "<li>John Smith</li><li>Jane Jones</li><li>Pat Smithson</li>"
    );
}

#[test]
fn test_aggregation_with_no_successful_layer_is_empty() {
    let host = Arc::new(fixture_host());
    let handle = select_handle(&host);

    let mut record = QueryRecord::new(vec![LayerPath::from("a/a")]);
    record.insert_result(LayerPath::from("a/a"), LayerResult::failed());

    assert_eq!(handle.results_as_html(QueryId(1), &record), "");
}

#[test]
fn test_aggregation_is_repeatable_for_the_same_record() {
    let host = Arc::new(fixture_host());
    let handle = select_handle(&host);

    let query_id = handle.query(None, &[]).unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    let first = handle.results_as_html(query_id, &completed.record);
    let second = handle.results_as_html(query_id, &completed.record);
    assert_eq!(first, second);
    assert!(first.contains("<li>John Smith</li>"));
}

#[test]
fn test_search_markup_uses_the_search_template() {
    let host = Arc::new(fixture_host());
    let registry = ServiceRegistry::new();
    let service = ServiceFactory::create(
        Arc::clone(&host) as Arc<dyn QueryHost>,
        &ServiceConfig::new(ServiceKind::Search),
    )
    .unwrap();
    let handle = registry.register("search".to_string(), service).unwrap();

    let query_id = handle
        .query(None, &[FieldValue::new("keyword", "jones")])
        .unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    let markup = handle.results_as_html(query_id, &completed.record);
    assert_eq!(markup, "<li>Jane Jones (002)</li>");
}

#[test]
fn test_unregistered_template_renders_nothing() {
    let host = Arc::new(MemoryHost::new());
    host.add_layer(LayerPath::from("parcels/parcels"), true, parcel_features());
    // No templates registered on the host.

    let handle = select_handle(&host);
    let query_id = handle.query(None, &[]).unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    assert_eq!(handle.results_as_html(query_id, &completed.record), "");
}
