//! Authenticated sessions against the Wazuh manager API.
//!
//! [`WazuhClient`] is the async flavor, [`blocking::WazuhClient`] runs every
//! call on the caller's thread. Both follow the same lifecycle:
//!
//! `Created --initialize()--> Ready --close()--> Closed`
//!
//! `initialize()` resolves the API version (when not configured), acquires a
//! bearer token and loads the endpoint table. A failure leaves the session in
//! `Created` so it can be initialized again. The token is read-only once the
//! session is ready, so one initialized client may be shared by reference
//! across concurrent requests. Nothing is retried.

use std::fmt;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::endpoints::{normalize_base_url, EndpointRegistry, EndpointResolver, PathParams};
use crate::error::{Result, WazuhError};
use crate::models::AuthResponse;
use crate::params::WireMap;

pub mod blocking;


/// Sent as `User-Agent` on every request.
pub const USER_AGENT: &str = concat!("wazuh-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Version detection endpoint; called before any endpoint table is known.
pub const MANAGER_INFO_PATH: &str = "/manager/info";

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Created,
    Ready,
    Closed,
}

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
struct Authenticated {
    token: String,
    resolver: EndpointResolver,
}

#[derive(Debug)]
enum SessionState {
    Created,
    Ready(Authenticated),
    Closed,
}

/// State shared by both client flavors. The transport handle lives in the
/// flavor itself.
#[derive(Debug)]
struct Session {
    base_url: String,
    credentials: Credentials,
    version: Option<String>,
    state: SessionState,
}

impl Session {
    fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.url),
            credentials: Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            },
            version: config.version.clone(),
            state: SessionState::Created,
        }
    }

    fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Created => SessionStatus::Created,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Closed => SessionStatus::Closed,
        }
    }

    fn authenticated(&self) -> Result<&Authenticated> {
        match &self.state {
            SessionState::Ready(auth) => Ok(auth),
            _ => Err(WazuhError::NotInitialized),
        }
    }

    /// Moves back to `Created` before an (re)initialization attempt.
    fn begin_initialize(&mut self) -> Result<()> {
        if let SessionState::Closed = self.state {
            return Err(WazuhError::NotInitialized);
        }
        self.state = SessionState::Created;
        Ok(())
    }

    fn manager_info_url(&self) -> String {
        format!("{}{}", self.base_url, MANAGER_INFO_PATH)
    }

    fn resolver_for(&self, version: &str) -> Result<EndpointResolver> {
        Ok(EndpointResolver::new(
            self.base_url.clone(),
            EndpointRegistry::for_version(version)?,
        ))
    }

    fn finish_initialize(&mut self, version: String, token: String, resolver: EndpointResolver) {
        info!(url = %self.base_url, version = %version, "Authenticated against Wazuh API");
        self.version = Some(version);
        self.state = SessionState::Ready(Authenticated { token, resolver });
    }

    /// Returns false when the session was already closed.
    fn close(&mut self) -> bool {
        if let SessionState::Closed = self.state {
            return false;
        }
        self.state = SessionState::Closed;
        info!(url = %self.base_url, "Wazuh session closed");
        true
    }

    fn auth_header(&self) -> Option<String> {
        match &self.state {
            SessionState::Ready(auth) => Some(format!("Bearer {}", auth.token)),
            _ => None,
        }
    }
}

/// Extracts the manager version from a `/manager/info` body.
///
/// Reads `data.version`, falling back to `data.affected_items[0].version`.
pub(crate) fn version_from_info(body: &Value) -> Option<String> {
    let data = body.get("data")?;
    data.get("version")
        .or_else(|| data.get("affected_items")?.get(0)?.get("version"))
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn version_error(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> WazuhError {
    WazuhError::connection("failed to detect Wazuh version", source)
}

fn token_status_error(status: StatusCode, body: String) -> WazuhError {
    WazuhError::connection(
        format!("token request failed with status {status}"),
        WazuhError::HttpStatus { status, body },
    )
}

fn decode_token(body: &str) -> Result<String> {
    let auth: AuthResponse = serde_json::from_str(body).map_err(WazuhError::Decode)?;
    Ok(auth.data.token)
}

/// Non-2xx becomes `HttpStatus`; a 2xx body that is not JSON is a
/// `Connection` failure like any other unusable response.
pub(crate) fn parse_body(status: StatusCode, body: String) -> Result<Value> {
    if !status.is_success() {
        return Err(WazuhError::HttpStatus { status, body });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|e| WazuhError::connection("response body is not valid JSON", e))
}

fn warn_if_unverified(config: &ClientConfig) {
    if !config.verify_tls {
        warn!(
            url = %config.url,
            "TLS certificate verification is DISABLED for this Wazuh client"
        );
    }
}

/// Async session.
#[derive(Debug)]
pub struct WazuhClient {
    session: Session,
    http: Option<reqwest::Client>,
}

impl WazuhClient {
    /// Builds an unauthenticated client. No network traffic happens here.
    pub fn new(config: ClientConfig) -> Result<Self> {
        warn_if_unverified(&config);
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout())
            .build()
            .map_err(|e| WazuhError::connection("failed to build HTTP client", e))?;

        Ok(Self {
            session: Session::new(&config),
            http: Some(http),
        })
    }

    /// `new` followed by `initialize`.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.initialize().await?;
        Ok(client)
    }

    fn http(&self) -> Result<&reqwest::Client> {
        self.http.as_ref().ok_or(WazuhError::NotInitialized)
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.session.begin_initialize()?;
        let version = match self.session.version.clone() {
            Some(v) => v,
            None => self.detect_version().await?,
        };
        let resolver = self.session.resolver_for(&version)?;
        let token = self.generate_token(&resolver).await?;
        self.session.finish_initialize(version, token, resolver);
        Ok(())
    }

    async fn detect_version(&self) -> Result<String> {
        let url = self.session.manager_info_url();
        debug!(url = %url, "Detecting Wazuh version");
        let response = self
            .http()?
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(version_error)?;
        let body: Value = response.json().await.map_err(version_error)?;
        version_from_info(&body)
            .ok_or_else(|| version_error("version missing from manager info response"))
    }

    async fn generate_token(&self, resolver: &EndpointResolver) -> Result<String> {
        let url = resolver.resolve("generate_token", &[])?;
        let creds = &self.session.credentials;
        let response = self
            .http()?
            .post(&url)
            .basic_auth(&creds.username, Some(&creds.password))
            .send()
            .await
            .map_err(|e| WazuhError::connection("token request failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WazuhError::connection("failed to read token response", e))?;
        if !status.is_success() {
            return Err(token_status_error(status, body));
        }
        decode_token(&body)
    }

    /// Sends one authenticated request and returns the parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        query: Option<&WireMap>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let auth = self.session.authenticated()?;
        debug!(method = %method, url, "Sending request");

        let mut rb = self.http()?.request(method, url).bearer_auth(&auth.token);
        if let Some(q) = query {
            rb = rb.query(q);
        }
        if let Some(b) = body {
            rb = rb.json(b);
        }

        let response = rb
            .send()
            .await
            .map_err(|e| WazuhError::connection("HTTP request failed", e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WazuhError::connection("failed to read response body", e))?;
        parse_body(status, text)
    }

    pub fn resolver(&self) -> Result<&EndpointResolver> {
        Ok(&self.session.authenticated()?.resolver)
    }

    pub fn resolve(&self, operation: &str, path_params: &PathParams<'_>) -> Result<String> {
        self.resolver()?.resolve(operation, path_params)
    }

    /// Drops the transport handle. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.session.close() {
            self.http = None;
        }
    }

    pub fn state(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionStatus::Ready
    }

    pub fn version(&self) -> Option<&str> {
        self.session.version.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.session.base_url
    }

    /// `Authorization` header value attached to requests, once ready.
    pub fn auth_header(&self) -> Option<String> {
        self.session.auth_header()
    }
}
