//! Tests for pagination

use super::*;
use crate::error::Error;
use crate::http::RetryPolicy;
use crate::request::{CallParams, OperationDescriptor, ParamSpec};
use crate::testing::{test_client, ScriptedTransport};
use crate::types::Method;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

static LIST_JOBS: OperationDescriptor = OperationDescriptor::new(
    "list_ingestion_jobs",
    Method::GET,
    "/v2/ingestion_jobs",
    &[
        ParamSpec::query("start"),
        ParamSpec::query("jobs_per_page"),
        ParamSpec::query("engine_id").required(),
    ],
);

fn job_spec() -> PageSpec {
    PageSpec::new("ingestion_jobs", "start", TokenSource::field("next.start"))
}

fn base_params() -> CallParams {
    CallParams::new()
        .with("engine_id", "spark-1")
        .with("jobs_per_page", 2)
}

fn page(ids: &[&str], next: Option<&str>) -> serde_json::Value {
    let jobs: Vec<_> = ids.iter().map(|id| json!({"job_id": id})).collect();
    match next {
        Some(token) => json!({"ingestion_jobs": jobs, "next": {"start": token}}),
        None => json!({"ingestion_jobs": jobs}),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Job {
    job_id: String,
}

fn ids(jobs: &[Job]) -> Vec<&str> {
    jobs.iter().map(|j| j.job_id.as_str()).collect()
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_extract_path() {
    let body = json!({"next": {"start": "abc", "count": 3}, "items": []});
    assert_eq!(extract_path(&body, "next.start"), Some(&json!("abc")));
    assert_eq!(extract_path(&body, "$.next.count"), Some(&json!(3)));
    assert_eq!(extract_path(&body, "next.missing"), None);
    assert_eq!(extract_path(&body, "items.0"), None);
    assert_eq!(extract_path(&body, "$"), Some(&body));
}

#[test]
fn test_token_from_field() {
    let source = TokenSource::field("next.start");
    assert_eq!(source.extract(&json!({"next": {"start": "t1"}})), Some("t1".into()));
    assert_eq!(source.extract(&json!({"next": {"start": 40}})), Some("40".into()));
    assert_eq!(source.extract(&json!({"next": {}})), None);
    assert_eq!(source.extract(&json!({"next": {"start": null}})), None);
}

#[test]
fn test_token_from_href() {
    let source = TokenSource::href_query("next.href", "start");

    let relative = json!({"next": {"href": "/v2/ingestion_jobs?jobs_per_page=2&start=g2%3D"}});
    assert_eq!(source.extract(&relative), Some("g2=".into()));

    let absolute = json!({"next": {"href": "https://host/api/v2/jobs?start=abc"}});
    assert_eq!(source.extract(&absolute), Some("abc".into()));

    let without = json!({"next": {"href": "/v2/jobs?limit=2"}});
    assert_eq!(source.extract(&without), None);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_rejects_preset_token() {
    let client = test_client(ScriptedTransport::new(), RetryPolicy::disabled());
    let params = base_params().with("start", "abc");

    let err = Pager::<Job>::new(client, &LIST_JOBS, params, job_spec()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "start"));
}

#[test]
fn test_new_rejects_undeclared_token_param() {
    let client = test_client(ScriptedTransport::new(), RetryPolicy::disabled());
    let spec = PageSpec::new("ingestion_jobs", "cursor", TokenSource::field("next.cursor"));

    let err = Pager::<Job>::new(client, &LIST_JOBS, base_params(), spec).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[test]
fn test_new_validates_required_params() {
    let transport = ScriptedTransport::new();
    let client = test_client(transport.clone(), RetryPolicy::disabled());

    let err = Pager::<Job>::new(client, &LIST_JOBS, CallParams::new(), job_spec()).unwrap_err();
    assert_eq!(err.to_string(), "Missing required parameters: engine_id");
    assert_eq!(transport.calls(), 0);
}

// ============================================================================
// Iteration
// ============================================================================

#[tokio::test]
async fn test_pages_until_token_absent() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a", "b"], Some("tok-2")));
    transport.push_json(200, page(&["c"], None));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    assert!(pager.has_next());
    assert_eq!(ids(&pager.get_next().await.unwrap()), vec!["a", "b"]);
    assert!(pager.has_next());
    assert_eq!(pager.token(), Some("tok-2"));
    assert_eq!(ids(&pager.get_next().await.unwrap()), vec!["c"]);
    assert!(!pager.has_next());
    assert_eq!(pager.state(), PagerState::Exhausted);

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::PaginationState { .. }));
    assert_eq!(transport.calls(), 2);

    let requests = transport.requests();
    assert_eq!(
        requests[0].url.query(),
        Some("jobs_per_page=2&engine_id=spark-1")
    );
    assert_eq!(
        requests[1].url.query(),
        Some("start=tok-2&jobs_per_page=2&engine_id=spark-1")
    );
}

#[tokio::test]
async fn test_get_all_matches_manual_iteration() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a", "b"], Some("tok-2")));
    transport.push_json(200, page(&["c"], None));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    let all = pager.get_all().await.unwrap();
    assert_eq!(ids(&all), vec!["a", "b", "c"]);
    assert_eq!(pager.pages_fetched(), 2);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_failed_fetch_keeps_state() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a"], Some("tok-2")));
    transport.push_json(500, json!({"message": "backend unavailable"}));
    transport.push_json(200, page(&["b"], None));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    pager.get_next().await.unwrap();
    let err = pager.get_next().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(pager.has_next());
    assert_eq!(pager.token(), Some("tok-2"));
    assert_eq!(pager.pages_fetched(), 1);

    assert_eq!(ids(&pager.get_next().await.unwrap()), vec!["b"]);
    assert_eq!(transport.requests()[2].url.query_pairs().next().unwrap().1, "tok-2");
}

#[tokio::test]
async fn test_undecodable_page_keeps_state() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"ingestion_jobs": [{"id": 1}], "next": {"start": "x"}}));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(pager.token(), None);
    assert_eq!(pager.pages_fetched(), 0);
}

#[tokio::test]
async fn test_repeated_or_empty_token_ends_iteration() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a"], Some("same")));
    transport.push_json(200, page(&["b"], Some("same")));
    transport.push_json(200, page(&["c"], Some("")));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();
    assert_eq!(ids(&pager.get_all().await.unwrap()), vec!["a", "b"]);

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();
    assert_eq!(ids(&pager.get_all().await.unwrap()), vec!["c"]);
}

#[tokio::test]
async fn test_missing_items_field_is_empty_page() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({}));

    let client = test_client(transport, RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    assert!(pager.get_next().await.unwrap().is_empty());
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_items_field_not_array() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"ingestion_jobs": {"job_id": "a"}}));

    let client = test_client(transport, RetryPolicy::disabled());
    let mut pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_into_stream_yields_pages() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a", "b"], Some("tok-2")));
    transport.push_json(200, page(&["c"], None));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    let pages: Vec<_> = pager.into_stream().collect().await;
    assert_eq!(pages.len(), 2);
    assert_eq!(ids(pages[1].as_ref().unwrap()), vec!["c"]);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_into_stream_stops_after_error() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, page(&["a"], Some("tok-2")));
    transport.push_json(404, json!({"message": "gone"}));

    let client = test_client(transport.clone(), RetryPolicy::disabled());
    let pager = Pager::<Job>::new(client, &LIST_JOBS, base_params(), job_spec()).unwrap();

    let pages: Vec<_> = pager.into_stream().collect().await;
    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_ok());
    assert!(pages[1].is_err());
    assert_eq!(transport.calls(), 2);
}
