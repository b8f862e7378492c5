//! Verb helpers combining endpoint resolution, parameter serialization and
//! dispatch through a session.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::{blocking, WazuhClient};
use crate::endpoints::{EndpointResolver, PathParams};
use crate::error::{Result, WazuhError};
use crate::params::{WireMap, WireParams};

#[cfg(test)]
mod tests;

/// A fully prepared call: absolute URL plus serialized query and body.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    pub url: String,
    pub query: Option<WireMap>,
    pub body: Option<Value>,
}

impl PreparedCall {
    pub fn prepare(
        resolver: &EndpointResolver,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Self> {
        Ok(Self {
            url: resolver.resolve(operation, path_params)?,
            query: query.map(|q| q.to_wire_map()).filter(|q| !q.is_empty()),
            body: body.map(|b| wire_body(b.to_wire_map())),
        })
    }
}

/// One API call described independently of the session flavor: operation
/// key, serialized query and body, and path parameters.
///
/// Domain managers build these once and hand them to either
/// [`RequestMaker::call`] or [`BlockingRequestMaker::call`].
#[derive(Debug, Clone, PartialEq)]
pub struct Operation<'p> {
    pub method: Method,
    pub key: &'static str,
    pub query: Option<WireMap>,
    pub body: Option<WireMap>,
    pub path: Vec<(&'static str, &'p str)>,
}

impl<'p> Operation<'p> {
    pub fn new(method: Method, key: &'static str) -> Self {
        Self {
            method,
            key,
            query: None,
            body: None,
            path: Vec::new(),
        }
    }

    pub fn get(key: &'static str) -> Self {
        Self::new(Method::GET, key)
    }

    pub fn post(key: &'static str) -> Self {
        Self::new(Method::POST, key)
    }

    pub fn put(key: &'static str) -> Self {
        Self::new(Method::PUT, key)
    }

    pub fn delete(key: &'static str) -> Self {
        Self::new(Method::DELETE, key)
    }

    pub fn query(mut self, params: &dyn WireParams) -> Self {
        self.query = Some(params.to_wire_map());
        self
    }

    pub fn body(mut self, params: &dyn WireParams) -> Self {
        self.body = Some(params.to_wire_map());
        self
    }

    pub fn path(mut self, name: &'static str, value: &'p str) -> Self {
        self.path.push((name, value));
        self
    }

    /// Resolves the operation against `resolver`.
    pub fn prepare(&self, resolver: &EndpointResolver) -> Result<PreparedCall> {
        PreparedCall::prepare(
            resolver,
            self.key,
            self.query.as_ref().map(|q| q as &dyn WireParams),
            self.body.as_ref().map(|b| b as &dyn WireParams),
            &self.path,
        )
    }
}

/// JSON object whose values are the wire strings.
pub fn wire_body(map: WireMap) -> Value {
    Value::Object(
        map.into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

/// Builds a typed response record from a decoded JSON body.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(WazuhError::MalformedResponse)
}

/// Async verb helpers over one [`WazuhClient`].
#[derive(Debug, Clone, Copy)]
pub struct RequestMaker<'a> {
    client: &'a WazuhClient,
}

impl<'a> RequestMaker<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &'a WazuhClient {
        self.client
    }

    pub async fn get(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::GET, operation, query, None, path_params)
            .await
    }

    pub async fn post(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::POST, operation, query, body, path_params)
            .await
    }

    pub async fn put(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::PUT, operation, query, body, path_params)
            .await
    }

    pub async fn delete(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::DELETE, operation, query, None, path_params)
            .await
    }

    /// Dispatches `operation` and decodes the body into `T`.
    pub async fn call<T: DeserializeOwned>(&self, operation: Operation<'_>) -> Result<T> {
        let call = operation.prepare(self.client.resolver()?)?;
        let res = self
            .client
            .request(
                operation.method,
                &call.url,
                call.query.as_ref(),
                call.body.as_ref(),
            )
            .await?;
        decode(res)
    }

    async fn send(
        &self,
        method: Method,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        let call =
            PreparedCall::prepare(self.client.resolver()?, operation, query, body, path_params)?;
        self.client
            .request(method, &call.url, call.query.as_ref(), call.body.as_ref())
            .await
    }
}

/// Blocking counterpart of [`RequestMaker`].
#[derive(Debug, Clone, Copy)]
pub struct BlockingRequestMaker<'a> {
    client: &'a blocking::WazuhClient,
}

impl<'a> BlockingRequestMaker<'a> {
    pub fn new(client: &'a blocking::WazuhClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &'a blocking::WazuhClient {
        self.client
    }

    pub fn get(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::GET, operation, query, None, path_params)
    }

    pub fn post(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::POST, operation, query, body, path_params)
    }

    pub fn put(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::PUT, operation, query, body, path_params)
    }

    pub fn delete(
        &self,
        operation: &str,
        query: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        self.send(Method::DELETE, operation, query, None, path_params)
    }

    /// Dispatches `operation` and decodes the body into `T`.
    pub fn call<T: DeserializeOwned>(&self, operation: Operation<'_>) -> Result<T> {
        let call = operation.prepare(self.client.resolver()?)?;
        let res = self.client.request(
            operation.method,
            &call.url,
            call.query.as_ref(),
            call.body.as_ref(),
        )?;
        decode(res)
    }

    fn send(
        &self,
        method: Method,
        operation: &str,
        query: Option<&dyn WireParams>,
        body: Option<&dyn WireParams>,
        path_params: &PathParams<'_>,
    ) -> Result<Value> {
        let call =
            PreparedCall::prepare(self.client.resolver()?, operation, query, body, path_params)?;
        self.client
            .request(method, &call.url, call.query.as_ref(), call.body.as_ref())
    }
}
