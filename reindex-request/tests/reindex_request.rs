//! Integration tests for reindex request validation and slicing.
//!
//! These exercise the public API the way a coordinator does: build a request,
//! validate it, ship it across a serialization boundary, and slice it.

use std::collections::BTreeSet;
use std::time::Duration;

use reindex_request::{for_slice, validate, ReindexRequest, ValidationFailure};
use reindex_shared::{
    Destination, RemoteAuth, RemoteInfo, Script, SearchSource, SliceSpec, TaskId,
};
use serde_json::json;

fn new_request() -> ReindexRequest {
    ReindexRequest::new(SearchSource::new(["source"]), Destination::new("dest"))
}

fn remote(query: &str) -> RemoteInfo {
    RemoteInfo::new("http", "abcde", 9200, query)
}

/// Variations applied on top of the base request, standing in for randomized
/// requests. Each one is valid when sliced into `slices` workers.
fn variations() -> Vec<ReindexRequest> {
    let mut variations = Vec::new();
    for slices in [1, 2, 5, 17] {
        let base = new_request().with_slices(slices);
        variations.push(base.clone());
        variations.push(base.clone().with_script(Script::inline("ctx._source.x = 1")));
        variations.push(
            base.clone()
                .with_max_docs(1000)
                .with_requests_per_second(50.0),
        );

        let mut tuned = base.clone();
        tuned.abort_on_version_conflict = false;
        tuned.refresh = true;
        tuned.timeout = Duration::from_secs(90);
        tuned.wait_for_active_shards = Some(2);
        tuned.retry_backoff_initial_time = Duration::from_millis(250);
        tuned.max_retries = 3;
        tuned.should_store_result = true;
        tuned.source.query = Some(json!({"range": {"age": {"gte": 21}}}));
        variations.push(tuned);

        if slices == 1 {
            // Remote sources only support a single worker.
            variations.push(
                base.with_remote_info(
                    remote("{\"match_all\":{}}")
                        .with_auth(RemoteAuth::basic("user", Some("pass".to_string()))),
                ),
            );
        }
    }
    variations
}

#[test]
fn test_timestamp_and_ttl_not_allowed() {
    let mut reindex = new_request();
    reindex.destination = reindex.destination.with_ttl("1s").with_timestamp("now");

    let err = reindex.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation Failed: 1: setting ttl on destination isn't supported. use scripts instead.;\
         2: setting timestamp on destination isn't supported. use scripts instead.;"
    );
    assert_eq!(err.len(), 2);
}

#[test]
fn test_reindex_from_remote_does_not_support_search_query() {
    let mut reindex = new_request().with_remote_info(remote("real_query"));
    reindex.source.query = Some(json!({"match_all": {}}));

    let err = reindex.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation Failed: 1: reindex from remote sources should use RemoteInfo's query instead of source's query;"
    );
}

#[test]
fn test_reindex_from_remote_does_not_support_workers() {
    for workers in [2, 7, u32::MAX] {
        let reindex = new_request()
            .with_remote_info(remote("real_query"))
            .with_slices(workers);

        let err = reindex.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Validation Failed: 1: reindex from remote sources doesn't support workers > 1 but was [{}];",
                workers
            )
        );
    }
}

#[test]
fn test_no_slice_with_workers() {
    for workers in [2, 9, u32::MAX] {
        let mut reindex = new_request().with_slices(workers);
        reindex.source.slice = Some(SliceSpec::new(0, 4).unwrap());

        let failures = validate(&reindex);
        assert_eq!(failures, vec![ValidationFailure::SliceWithWorkers]);
        assert_eq!(
            reindex.validate().unwrap_err().to_string(),
            "Validation Failed: 1: can't specify both slice and workers;"
        );
    }
}

#[test]
fn test_for_slice() {
    for original in variations() {
        let total = original.slices;
        for slice_id in 0..total {
            let sliced = for_slice(&original, slice_id, total).unwrap();

            assert_eq!(original.script, sliced.script);
            assert_eq!(original.destination, sliced.destination);
            assert_eq!(original.remote_info, sliced.remote_info);
            assert_eq!(original.abort_on_version_conflict, sliced.abort_on_version_conflict);
            assert_eq!(original.refresh, sliced.refresh);
            assert_eq!(original.timeout, sliced.timeout);
            assert_eq!(original.wait_for_active_shards, sliced.wait_for_active_shards);
            assert_eq!(
                original.retry_backoff_initial_time,
                sliced.retry_backoff_initial_time
            );
            assert_eq!(original.max_retries, sliced.max_retries);
            assert!(
                !sliced.should_store_result,
                "only the parent task should store results"
            );
            assert_eq!(sliced.slices, 1, "slice requests always have a single worker");
            assert_eq!(
                sliced.requests_per_second,
                original.requests_per_second.map(|rps| rps / total as f32),
                "requests_per_second is split between all workers"
            );

            let slice = sliced.source.slice.clone().unwrap();
            assert_eq!((slice.id(), slice.max()), (slice_id, total));

            let mut source_without_slice = sliced.source.clone();
            source_without_slice.slice = None;
            assert_eq!(source_without_slice, original.source);
        }
    }
}

#[test]
fn test_sliced_max_docs_add_up_to_parent() {
    let original = new_request().with_slices(7).with_max_docs(1000);
    let total: u64 = (0..7)
        .map(|i| for_slice(&original, i, 7).unwrap().max_docs.unwrap())
        .sum();
    assert_eq!(total, 1000);
}

#[test]
fn test_partition_keys_are_distinct() {
    let original = new_request().with_slices(12);
    let keys: BTreeSet<(u32, u32)> = (0..12)
        .map(|i| {
            let slice = for_slice(&original, i, 12).unwrap().source.slice.unwrap();
            (slice.id(), slice.max())
        })
        .collect();
    assert_eq!(keys.len(), 12);
}

#[test]
fn test_round_trip_preserves_validation_and_slicing() {
    let mut invalid = new_request()
        .with_remote_info(remote("real_query"))
        .with_slices(3);
    invalid.source.query = Some(json!({"match_all": {}}));
    invalid.destination.ttl = Some("1s".to_string());

    let mut candidates = variations();
    candidates.push(invalid);

    for original in candidates {
        let bytes = original.to_json_bytes().unwrap();
        let shipped = ReindexRequest::from_json_slice(&bytes).unwrap();

        assert_eq!(shipped, original);
        assert_eq!(validate(&shipped), validate(&original));
        assert_eq!(shipped.script.is_some(), original.script.is_some());
        assert_eq!(shipped.remote_info.is_some(), original.remote_info.is_some());

        if original.validate().is_ok() {
            for slice_id in 0..original.slices {
                assert_eq!(
                    for_slice(&shipped, slice_id, original.slices).unwrap(),
                    for_slice(&original, slice_id, original.slices).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_unthrottled_request_round_trips() {
    let unthrottled = new_request().with_requests_per_second(f32::INFINITY);
    assert_eq!(unthrottled.requests_per_second, None);
    assert!(unthrottled.validate().is_ok());

    let bytes = unthrottled.to_json_bytes().unwrap();
    assert_eq!(ReindexRequest::from_json_slice(&bytes).unwrap(), unthrottled);
}

#[test]
fn test_infinite_throttle_is_rejected() {
    let mut request = new_request();
    request.requests_per_second = Some(f32::INFINITY);
    assert_eq!(
        request.validate().unwrap_err().to_string(),
        "Validation Failed: 1: requests_per_second must be greater than 0 but was [inf];"
    );
}

#[test]
fn test_sliced_sub_requests_survive_shipping() {
    let original = new_request().with_slices(3);
    let sub_requests = reindex_request::slice_into_sub_requests(
        &original,
        &TaskId::new("coordinator", 12),
        &Default::default(),
    )
    .unwrap();

    for sub_request in sub_requests {
        let bytes = sub_request.to_json_bytes().unwrap();
        let shipped = ReindexRequest::from_json_slice(&bytes).unwrap();
        assert_eq!(shipped, sub_request);
        assert!(shipped.validate().is_ok());
        assert_eq!(shipped.parent_task, Some(TaskId::new("coordinator", 12)));
    }
}
