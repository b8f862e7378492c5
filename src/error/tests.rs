use std::error::Error;

use reqwest::StatusCode;

use crate::error::{ConfigurationError, WazuhError};

#[test]
fn test_invalid_parameter_lists_valid_keys() {
    let err = WazuhError::InvalidParameter {
        key: "colour".to_string(),
        valid: vec!["limit", "offset"],
    };
    let msg = err.to_string();
    assert!(msg.contains("colour"));
    assert!(msg.contains("limit, offset"));
}

#[test]
fn test_unknown_operation_names_key_and_version() {
    let err: WazuhError = ConfigurationError::UnknownOperation {
        operation: "nonexistent_key".to_string(),
        version: "4.2.1".to_string(),
    }
    .into();
    assert!(err.is_configuration());
    let msg = err.to_string();
    assert!(msg.contains("nonexistent_key"));
    assert!(msg.contains("4.2.1"));
}

#[test]
fn test_http_status_keeps_code_and_body() {
    let err = WazuhError::HttpStatus {
        status: StatusCode::FORBIDDEN,
        body: r#"{"title":"Permission Denied"}"#.to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("403"));
    assert!(msg.contains("Permission Denied"));
}

#[test]
fn test_connection_error_chains_source() {
    let json_err = serde_json::from_str::<String>("not-json").unwrap_err();
    let err = WazuhError::connection("failed to detect Wazuh version", json_err);
    assert!(err.source().is_some());
    assert!(!err.is_configuration());
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WazuhError>();
}
