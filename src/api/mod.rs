//! HTTP access to the companion backend.
//!
//! [`ApiClient::fetch`] is the single request path: it prefixes the base
//! origin, injects `Content-Type: application/json` and the bearer token,
//! lets caller headers win on collision, and turns non-2xx responses into
//! [`ApiError::Status`]. The service modules are thin wrappers over it.

pub mod auth;
pub mod error;
pub mod partner;
pub mod payment;
pub mod plan;
pub mod preferences;

pub use error::ApiError;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::session::TokenProvider;

/// The request fields a caller may set. Anything unset uses the defaults:
/// `GET`, no body, and the default headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get() -> Self {
        Self::new().method(Method::GET)
    }

    pub fn post() -> Self {
        Self::new().method(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new().method(Method::PATCH)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ApiError> {
        Ok(self.body(serde_json::to_string(value)?))
    }
}

/// Client for one API origin.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url + endpoint`, concatenated as-is.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Default headers with the caller's merged over them.
    ///
    /// Header names are case-insensitive, so a caller `content-type` replaces
    /// the default `Content-Type`.
    pub fn headers(&self, overrides: &BTreeMap<String, String>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Perform one request and decode the JSON response as `T`.
    ///
    /// Transport failures are returned untranslated as [`ApiError::Transport`].
    /// No retries, caching, or timeouts.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let method = options.method.unwrap_or(Method::GET);
        let headers = self.headers(&options.headers)?;

        tracing::debug!(method = %method, url = %url, "api request");

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable error body is treated like an unparseable one.
            let body = response.bytes().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::warn!(method = %method, url = %url, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        let body = response.bytes().await?;
        tracing::debug!(method = %method, url = %url, status = status.as_u16(), bytes = body.len(), "api response");
        Ok(serde_json::from_slice(&body)?)
    }
}
