//! Integration tests for query dispatch through the host completion bus

use crate::integration::test_utils::{fixture_host, parcel_features};
use mapquery::field::FieldValue;
use mapquery::host::{MemoryHost, QueryHost};
use mapquery::service::{ServiceConfig, ServiceFactory, ServiceKind, ServiceRegistry};
use mapquery::types::{LayerPath, Selection};
use serde_json::json;
use std::sync::Arc;

fn registry_with(host: &Arc<MemoryHost>) -> ServiceRegistry {
    let registry = ServiceRegistry::new();
    for (name, kind) in [("identify", ServiceKind::Select), ("search", ServiceKind::Search)] {
        let service = ServiceFactory::create(
            Arc::clone(host) as Arc<dyn QueryHost>,
            &ServiceConfig::new(kind),
        )
        .unwrap();
        registry.register(name.to_string(), service).unwrap();
    }
    registry
}

#[test]
fn test_dispatch_returns_before_completion_is_drained() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("identify").unwrap();

    let query_id = handle.query(None, &[]).unwrap();

    // The id is usable for correlation before any completion is read.
    let completed = host.next_completed().unwrap().unwrap();
    assert_eq!(completed.query_id, query_id);
    assert_eq!(completed.service, "identify");
    assert!(host.next_completed().unwrap().is_none());
}

#[test]
fn test_select_targets_only_queryable_layers() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("identify").unwrap();

    handle.query(None, &[]).unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    assert_eq!(
        completed.record.layers,
        vec![LayerPath::from("parcels/parcels")]
    );
}

#[test]
fn test_select_sees_queryable_flag_changes_between_dispatches() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("identify").unwrap();

    handle.query(None, &[]).unwrap();
    assert_eq!(host.next_completed().unwrap().unwrap().record.layers.len(), 1);

    host.set_queryable(&LayerPath::from("vector-parcels/ms:parcels"), true);
    handle.query(None, &[]).unwrap();
    assert_eq!(host.next_completed().unwrap().unwrap().record.layers.len(), 2);
}

#[test]
fn test_search_ignores_queryable_flags() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("search").unwrap();

    // The search layer is flagged non-queryable in the fixture.
    handle
        .query(None, &[FieldValue::new("keyword", "smith")])
        .unwrap();
    let completed = host.next_completed().unwrap().unwrap();

    assert_eq!(
        completed.record.layers,
        vec![LayerPath::from("vector-parcels/ms:parcels")]
    );
    let result = completed
        .record
        .result_for(&LayerPath::from("vector-parcels/ms:parcels"))
        .unwrap();
    let owners: Vec<_> = result
        .features
        .iter()
        .filter_map(|f| f.property("OWNER_NAME"))
        .collect();
    assert_eq!(owners, vec!["John Smith", "Pat Smithson"]);
}

#[test]
fn test_search_with_empty_keyword_matches_all_features() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("search").unwrap();

    handle.query(None, &[]).unwrap();
    let completed = host.next_completed().unwrap().unwrap();
    let result = completed
        .record
        .result_for(&LayerPath::from("vector-parcels/ms:parcels"))
        .unwrap();
    assert_eq!(result.features.len(), parcel_features().len());
}

#[test]
fn test_overlapping_queries_correlate_by_id() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let identify = registry.get_or_error("identify").unwrap();
    let search = registry.get_or_error("search").unwrap();

    let first = identify.query(None, &[]).unwrap();
    let second = search
        .query(None, &[FieldValue::new("keyword", "jones")])
        .unwrap();
    assert_ne!(first, second);

    let completions = [
        host.next_completed().unwrap().unwrap(),
        host.next_completed().unwrap().unwrap(),
    ];
    assert_eq!(completions[0].query_id, first);
    assert_eq!(completions[0].service, "identify");
    assert_eq!(completions[1].query_id, second);
    assert_eq!(completions[1].service, "search");
}

#[test]
fn test_selection_geometry_is_accepted_and_query_completes() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("identify").unwrap();

    let selection = Selection::new(json!({
        "type": "Polygon",
        "coordinates": [[[-93.3, 44.8], [-93.3, 45.2], [-92.9, 45.2], [-92.9, 44.8], [-93.3, 44.8]]],
    }));
    let query_id = handle.query(Some(selection), &[]).unwrap();

    let completed = host.next_completed().unwrap().unwrap();
    assert_eq!(completed.query_id, query_id);
    assert!(completed
        .record
        .succeeded(&LayerPath::from("parcels/parcels")));
}

#[test]
fn test_unknown_layer_failure_is_per_layer_not_dispatch_error() {
    let host = Arc::new(MemoryHost::new());
    host.add_layer(LayerPath::from("parcels/parcels"), true, parcel_features());

    // Dispatch directly against a layer list with one unknown entry.
    host.dispatch_query(
        "identify",
        None,
        Vec::new(),
        vec![LayerPath::from("parcels/parcels"), LayerPath::from("gone/gone")],
    )
    .unwrap();

    let completed = host.next_completed().unwrap().unwrap();
    assert!(completed.record.succeeded(&LayerPath::from("parcels/parcels")));
    assert!(!completed.record.succeeded(&LayerPath::from("gone/gone")));
}

#[test]
fn test_no_queries_in_flight_after_synchronous_completion() {
    let host = Arc::new(fixture_host());
    let registry = registry_with(&host);
    let handle = registry.get_or_error("identify").unwrap();

    handle.query(None, &[]).unwrap();
    assert_eq!(host.in_flight(), 0);
}
