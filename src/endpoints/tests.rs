use crate::endpoints::{
    lookup, normalize_base_url, resolve, substitute, ApiVersion, EndpointRegistry,
    EndpointResolver,
};
use crate::error::{ConfigurationError, WazuhError};

const BASE: &str = "https://localhost:55000";

#[test]
fn test_version_dispatch_by_major_digit() {
    assert_eq!(ApiVersion::from_version("3.x").unwrap(), ApiVersion::V3);
    assert_eq!(ApiVersion::from_version("3.13.2").unwrap(), ApiVersion::V3);
    assert_eq!(ApiVersion::from_version("4.x").unwrap(), ApiVersion::V4);
    assert_eq!(ApiVersion::from_version("4").unwrap(), ApiVersion::V4);
    assert_eq!(ApiVersion::from_version("v4.7.3").unwrap(), ApiVersion::V4);

    let err = ApiVersion::from_version("5.x").unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        WazuhError::Configuration(ConfigurationError::UnsupportedVersion(ref v)) if v == "5.x"
    ));
    assert!(ApiVersion::from_version("").is_err());
}

#[test]
fn test_registry_tables_differ_per_version() {
    let v3 = EndpointRegistry::for_version("3.x").unwrap();
    let v4 = EndpointRegistry::for_version("4.x").unwrap();

    assert_eq!(v3.lookup("alerts").unwrap(), "/alerts");
    assert!(v3.lookup("generate_token").is_err());
    assert!(!v3.contains("agent_restart"));

    assert_eq!(v4.lookup("generate_token").unwrap(), "/security/user/authenticate");
    assert_eq!(v4.lookup("alerts_search").unwrap(), "/syscheck/events");
    assert!(!v4.contains("alerts"));
}

#[test]
fn test_lookup_unknown_operation() {
    let err = lookup("4.2.1", "nonexistent_key").unwrap_err();
    assert!(matches!(
        err,
        WazuhError::Configuration(ConfigurationError::UnknownOperation { ref operation, ref version })
            if operation == "nonexistent_key" && version == "4.2.1"
    ));
}

#[test]
fn test_resolve_agent_restart() {
    let url = resolve(BASE, "4.2.1", "agent_restart", &[("agent_id", "001")]).unwrap();
    assert_eq!(url, "https://localhost:55000/agents/001/restart");
}

#[test]
fn test_resolve_nonexistent_key_is_configuration_error() {
    let err = resolve(BASE, "4.2.1", "nonexistent_key", &[]).unwrap_err();
    assert!(err.is_configuration());

    let err = resolve(BASE, "5.0.0", "list_agents", &[]).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_resolve_without_placeholders() {
    let resolver = EndpointResolver::new(BASE, EndpointRegistry::for_version("4.7.0").unwrap());
    assert_eq!(
        resolver.resolve("list_agents", &[]).unwrap(),
        "https://localhost:55000/agents"
    );
    assert_eq!(resolver.registry().version(), "4.7.0");
}

#[test]
fn test_substitute_multiple_placeholders() {
    let path = substitute(
        "/agents/{agent_id}/config/{component}/{configuration}",
        &[
            ("configuration", "syscheck"),
            ("agent_id", "007"),
            ("component", "syscheck"),
        ],
    )
    .unwrap();
    assert_eq!(path, "/agents/007/config/syscheck/syscheck");
}

#[test]
fn test_substitute_missing_placeholder() {
    let err = substitute("/agents/{agent_id}/restart", &[]).unwrap_err();
    assert!(matches!(err, WazuhError::MissingPathParameter(ref p) if p == "agent_id"));
}

#[test]
fn test_substitute_drops_empty_values() {
    // An empty value counts as not supplied.
    let err = substitute("/agents/{agent_id}/restart", &[("agent_id", "")]).unwrap_err();
    assert!(matches!(err, WazuhError::MissingPathParameter(_)));

    let path = substitute("/agents", &[("agent_id", "")]).unwrap();
    assert_eq!(path, "/agents");
}

#[test]
fn test_substitute_rejects_unexpected_parameter() {
    let err = substitute("/agents/{agent_id}/key", &[("agent_id", "001"), ("group_id", "web")])
        .unwrap_err();
    assert!(matches!(err, WazuhError::UnexpectedPathParameter(ref p) if p == "group_id"));
}

#[test]
fn test_substitute_keeps_values_inside_their_segment() {
    let url = resolve(BASE, "4.2.1", "restart_agent", &[("agent_id", "../agents/group/web")])
        .unwrap();
    assert_eq!(url, format!("{BASE}/agents/..%2Fagents%2Fgroup%2Fweb/restart"));

    let path = substitute("/syscheck/{agent_id}", &[("agent_id", "001?purge=true#x")]).unwrap();
    assert_eq!(path, "/syscheck/001%3Fpurge%3Dtrue%23x");

    let path = substitute("/agents/group/{group_id}/restart", &[("group_id", "web servers")])
        .unwrap();
    assert_eq!(path, "/agents/group/web%20servers/restart");
}

#[test]
fn test_substitute_rejects_dot_segments() {
    for value in [".", ".."] {
        let err = substitute("/agents/{agent_id}/restart", &[("agent_id", value)]).unwrap_err();
        assert!(matches!(err, WazuhError::Validation { field: "path_params", .. }));
    }
    // Dots inside a value are harmless.
    let path = substitute("/agents/{agent_id}/key", &[("agent_id", "a..b")]).unwrap();
    assert_eq!(path, "/agents/a..b/key");
}

#[test]
fn test_normalize_base_url_strips_one_slash() {
    assert_eq!(normalize_base_url("https://wazuh:55000/"), "https://wazuh:55000");
    assert_eq!(normalize_base_url("https://wazuh:55000"), "https://wazuh:55000");
    assert_eq!(normalize_base_url("https://wazuh:55000//"), "https://wazuh:55000/");
}
