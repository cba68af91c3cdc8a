//! Authenticated request descriptions.

use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

use taskmaster_core::error::InvalidInputError;
use taskmaster_core::Result;

/// A request to send through [`SessionManager::send`](crate::SessionManager::send).
///
/// It is a description rather than a built `reqwest::Request` so it can be
/// replayed with a fresh token after a refresh. Each request is replayed at
/// most once; the flag travels with the request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    id: Uuid,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Correlation id, recorded on the request's tracing span.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether this request has already been replayed after a refresh.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }

    /// Apply method, path, query and body to a builder.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = if self.query.is_empty() {
            builder
        } else {
            builder.query(&self.query)
        };
        match &self.body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }
}
