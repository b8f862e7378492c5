//! Error types for the Wazuh client.
//!
//! Every failure surfaces as a distinct `WazuhError` variant so callers can
//! match on the kind instead of parsing messages. Nothing in this crate retries
//! on error.

use reqwest::StatusCode;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Result type using `WazuhError`.
pub type Result<T> = std::result::Result<T, WazuhError>;

/// Problems with the client's configuration: API version, endpoint tables or
/// the settings file.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No endpoint table exists for the version's major number.
    #[error("unsupported Wazuh version: {0}")]
    UnsupportedVersion(String),

    /// The operation key is not present in the endpoint table for the version.
    #[error("endpoint for key '{operation}' not found in API mapping for version {version}")]
    UnknownOperation { operation: String, version: String },

    /// The settings file is missing, unreadable or invalid.
    #[error("invalid settings: {0}")]
    Settings(String),
}

#[derive(Debug, Error)]
pub enum WazuhError {
    /// Transport failure, or an unusable response while detecting the version
    /// or acquiring the token.
    #[error("connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An override named a field the parameter object does not have.
    #[error("invalid parameter '{key}', valid parameters are: {}", valid.join(", "))]
    InvalidParameter { key: String, valid: Vec<&'static str> },

    /// A parameter value is out of bounds or cannot be parsed.
    #[error("invalid value for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("missing path parameter '{0}'")]
    MissingPathParameter(String),

    #[error("unexpected path parameter '{0}'")]
    UnexpectedPathParameter(String),

    /// The API answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// The JSON body lacks fields required by the typed response record.
    /// A body that is not JSON at all is reported as `Connection`.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The authentication response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request was attempted before `initialize()` succeeded or after `close()`.
    #[error("session is not initialized")]
    NotInitialized,
}

impl WazuhError {
    pub(crate) fn connection(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        WazuhError::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        WazuhError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for every configuration-class failure (version, operation key, settings).
    pub fn is_configuration(&self) -> bool {
        matches!(self, WazuhError::Configuration(_))
    }
}
