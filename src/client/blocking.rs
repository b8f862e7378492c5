//! Blocking session, same contract as the async [`WazuhClient`](super::WazuhClient).
//!
//! Must not be used from inside an async runtime; wrap calls in
//! `tokio::task::spawn_blocking` there.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::{
    decode_token, parse_body, token_status_error, version_error, version_from_info,
    warn_if_unverified, Session, SessionStatus, USER_AGENT,
};
use crate::config::ClientConfig;
use crate::endpoints::{EndpointResolver, PathParams};
use crate::error::{Result, WazuhError};
use crate::params::WireMap;

#[derive(Debug)]
pub struct WazuhClient {
    session: Session,
    http: Option<reqwest::blocking::Client>,
}

impl WazuhClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        warn_if_unverified(&config);
        let http = reqwest::blocking::Client::builder()
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

    pub fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.initialize()?;
        Ok(client)
    }

    fn http(&self) -> Result<&reqwest::blocking::Client> {
        self.http.as_ref().ok_or(WazuhError::NotInitialized)
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.session.begin_initialize()?;
        let version = match self.session.version.clone() {
            Some(v) => v,
            None => self.detect_version()?,
        };
        let resolver = self.session.resolver_for(&version)?;
        let token = self.generate_token(&resolver)?;
        self.session.finish_initialize(version, token, resolver);
        Ok(())
    }

    fn detect_version(&self) -> Result<String> {
        let url = self.session.manager_info_url();
        debug!(url = %url, "Detecting Wazuh version");
        let response = self
            .http()?
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(version_error)?;
        let body: Value = response.json().map_err(version_error)?;
        version_from_info(&body)
            .ok_or_else(|| version_error("version missing from manager info response"))
    }

    fn generate_token(&self, resolver: &EndpointResolver) -> Result<String> {
        let url = resolver.resolve("generate_token", &[])?;
        let creds = &self.session.credentials;
        let response = self
            .http()?
            .post(&url)
            .basic_auth(&creds.username, Some(&creds.password))
            .send()
            .map_err(|e| WazuhError::connection("token request failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| WazuhError::connection("failed to read token response", e))?;
        if !status.is_success() {
            return Err(token_status_error(status, body));
        }
        decode_token(&body)
    }

    pub fn request(
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
            .map_err(|e| WazuhError::connection("HTTP request failed", e))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| WazuhError::connection("failed to read response body", e))?;
        parse_body(status, text)
    }

    pub fn resolver(&self) -> Result<&EndpointResolver> {
        Ok(&self.session.authenticated()?.resolver)
    }

    pub fn resolve(&self, operation: &str, path_params: &PathParams<'_>) -> Result<String> {
        self.resolver()?.resolve(operation, path_params)
    }

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

    pub fn auth_header(&self) -> Option<String> {
        self.session.auth_header()
    }
}
