use serde::Deserialize;
use reqwest::Method;
use serde_json::json;

use crate::endpoints::{EndpointRegistry, EndpointResolver};
use crate::error::WazuhError;
use crate::params::{
    AddAgentBody, AddAgentQueryParams, FlagParams, ListAgentsParams, OsFilter, WireMap,
};
use crate::request::{decode, wire_body, Operation, PreparedCall};

fn resolver() -> EndpointResolver {
    EndpointResolver::new(
        "https://localhost:55000",
        EndpointRegistry::for_version("4.2.1").unwrap(),
    )
}

#[test]
fn test_prepare_get_with_query() {
    let params = ListAgentsParams::default().with_os(OsFilter::platform("linux"));
    let call = PreparedCall::prepare(&resolver(), "list_agents", Some(&params), None, &[]).unwrap();
    assert_eq!(call.url, "https://localhost:55000/agents");
    let query = call.query.unwrap();
    assert_eq!(query.get("os.platform").map(String::as_str), Some("linux"));
    assert!(call.body.is_none());
}

#[test]
fn test_prepare_post_with_body() {
    let body = AddAgentBody::new("web-01", Some("10.0.0.9".into())).unwrap();
    let query = AddAgentQueryParams::new(false, false);
    let call =
        PreparedCall::prepare(&resolver(), "add_agent", Some(&query), Some(&body), &[]).unwrap();
    assert_eq!(call.body, Some(json!({"name": "web-01", "ip": "10.0.0.9"})));
}

#[test]
fn test_prepare_with_path_params() {
    let call = PreparedCall::prepare(
        &resolver(),
        "assign_agent_to_group",
        None,
        None,
        &[("agent_id", "004"), ("group_id", "web")],
    )
    .unwrap();
    assert_eq!(call.url, "https://localhost:55000/agents/004/group/web");
    assert!(call.query.is_none());
}

#[test]
fn test_prepare_plain_map_query() {
    let mut map = WireMap::new();
    map.insert("q".to_string(), "status=active".to_string());
    let call = PreparedCall::prepare(&resolver(), "list_agents", Some(&map), None, &[]).unwrap();
    assert_eq!(call.query, Some(map));
}

#[test]
fn test_prepare_propagates_resolution_errors() {
    let err = PreparedCall::prepare(&resolver(), "nonexistent_key", None, None, &[]).unwrap_err();
    assert!(err.is_configuration());

    let err = PreparedCall::prepare(&resolver(), "restart_agent", None, None, &[]).unwrap_err();
    assert!(matches!(err, WazuhError::MissingPathParameter(_)));
}

#[test]
fn test_wire_body_values_are_strings() {
    let mut map = WireMap::new();
    map.insert("purge".to_string(), "true".to_string());
    assert_eq!(wire_body(map), json!({"purge": "true"}));
}

#[derive(Debug, Deserialize)]
struct Sample {
    id: String,
}

#[test]
fn test_decode_reports_malformed_response() {
    let ok: Sample = decode(json!({"id": "001"})).unwrap();
    assert_eq!(ok.id, "001");

    let err = decode::<Sample>(json!({"name": "x"})).unwrap_err();
    assert!(matches!(err, WazuhError::MalformedResponse(_)));
}

#[test]
fn test_operation_builder() {
    let op = Operation::put("assign_agent_to_group")
        .query(&FlagParams::new(true, false))
        .path("agent_id", "004")
        .path("group_id", "web");
    assert_eq!(op.method, Method::PUT);
    assert_eq!(op.key, "assign_agent_to_group");
    assert_eq!(op.path, vec![("agent_id", "004"), ("group_id", "web")]);
    assert!(op.body.is_none());

    let call = op.prepare(&resolver()).unwrap();
    assert_eq!(call.url, "https://localhost:55000/agents/004/group/web");
    let query = call.query.unwrap();
    assert_eq!(query.get("pretty").map(String::as_str), Some("true"));
    assert_eq!(query.get("wait_for_complete").map(String::as_str), Some("false"));
}

#[test]
fn test_operation_empty_query_is_dropped() {
    let call = Operation::get("list_agents")
        .query(&WireMap::new())
        .prepare(&resolver())
        .unwrap();
    assert!(call.query.is_none());

    let body = AddAgentBody::new("db-01", None).unwrap();
    let call = Operation::post("add_agent")
        .body(&body)
        .prepare(&resolver())
        .unwrap();
    assert_eq!(call.body, Some(json!({"name": "db-01"})));
}

#[test]
fn test_operation_escapes_path_values() {
    let err = Operation::put("restart_agent")
        .path("agent_id", "..")
        .prepare(&resolver())
        .unwrap_err();
    assert!(matches!(err, WazuhError::Validation { .. }));

    let call = Operation::put("restart_agent")
        .path("agent_id", "../agents/group/web")
        .prepare(&resolver())
        .unwrap();
    assert_eq!(
        call.url,
        "https://localhost:55000/agents/..%2Fagents%2Fgroup%2Fweb/restart"
    );
}
