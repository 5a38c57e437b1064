//! Stateless request builder and response parser for the Lucent API.
//!
//! # Design
//! `LucentClient` holds the connection identity (channel, token, user,
//! locale) and the default header set derived from it. It never changes
//! after construction and performs no I/O: `build_request` produces a
//! `LucentRequest`, the caller executes it, and `parse_*` decodes the
//! `HttpResponse` into an envelope.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::endpoints::{is_valid_endpoint, BASE_URL};
use crate::error::ApiError;
use crate::headers::{Headers, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, LUCENT_CHANNEL, LUCENT_USER};
use crate::http::HttpResponse;
use crate::request::LucentRequest;
use crate::response::{LucentListResponse, LucentResponse, Response};
use crate::types::Payload;

/// Per-credential client configuration for the Lucent API.
///
/// Cheap to clone and safe to share between threads; all fields are
/// read-only once built.
#[derive(Debug, Clone)]
pub struct LucentClient {
    channel: String,
    token: String,
    user: String,
    base_url: String,
    default_headers: Headers,
    request_timeout: Duration,
}

impl LucentClient {
    /// Create a client for `channel` authenticated with `token`.
    ///
    /// `user` is sent as `Lucent-User` only when non-empty. `locale` becomes
    /// `Accept-Language`. `timeout` is passed through to every request.
    pub fn new(channel: &str, token: &str, user: &str, locale: &str, timeout: Duration) -> Self {
        let mut headers = Headers::new();
        headers.set_trusted(ACCEPT, "application/json");
        headers.set_trusted(LUCENT_CHANNEL, channel);
        headers.set_trusted(AUTHORIZATION, format!("Bearer {token}"));
        headers.set_trusted(ACCEPT_LANGUAGE, locale);
        if !user.is_empty() {
            headers.set_trusted(LUCENT_USER, user);
        }

        Self {
            channel: channel.to_string(),
            token: token.to_string(),
            user: user.to_string(),
            base_url: BASE_URL.to_string(),
            default_headers: headers,
            request_timeout: timeout,
        }
    }

    /// Point the client at a different API root, e.g. a staging host or a
    /// local mock. A trailing `/` is added if missing.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Build a request for one of the supported endpoints.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidEndpoint` if `endpoint` is not `documents`,
    ///   `channels` or `files` (with or without a trailing `/`).
    /// - `ApiError::InvalidUrl` if the base URL joined with `endpoint` does
    ///   not parse as an absolute URL.
    pub fn build_request(&self, endpoint: &str, payload: Payload) -> Result<LucentRequest, ApiError> {
        if !is_valid_endpoint(endpoint) {
            warn!(endpoint, "rejected unsupported endpoint");
            return Err(ApiError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            });
        }

        let url = format!("{}{}", self.base_url, endpoint);
        if let Err(source) = Url::parse(&url) {
            warn!(%url, error = %source, "request URL failed validation");
            return Err(ApiError::InvalidUrl { url, source });
        }

        debug!(%url, channel = %self.channel, "built request");
        Ok(LucentRequest::new(
            url,
            payload,
            self.default_headers.clone(),
            self.request_timeout,
        ))
    }

    /// Decode a reply carrying a single document.
    pub fn parse_document(&self, response: HttpResponse) -> Result<LucentResponse, ApiError> {
        parse_envelope(response)
    }

    /// Decode a reply carrying a list of documents.
    pub fn parse_document_list(&self, response: HttpResponse) -> Result<LucentListResponse, ApiError> {
        parse_envelope(response)
    }
}

/// Decode the envelope in `response`.
///
/// A non-2xx reply whose body is an envelope with errors is returned as
/// `Ok`, so API-reported errors stay data. Any other non-2xx reply maps to
/// `NotFound` or `HttpError`.
fn parse_envelope<T>(response: HttpResponse) -> Result<Response<T>, ApiError>
where
    T: DeserializeOwned + Default,
{
    let decoded = serde_json::from_str::<Response<T>>(&response.body);
    if response.is_success() {
        let envelope = decoded.map_err(ApiError::Deserialization)?;
        debug!(status = response.status, errors = envelope.errors.len(), "parsed response");
        return Ok(envelope);
    }

    match decoded {
        Ok(envelope) if envelope.has_errors() => {
            debug!(status = response.status, error = envelope.error(), "API reported errors");
            Ok(envelope)
        }
        _ => Err(status_error(response)),
    }
}

/// Map a non-success reply without an envelope to an `ApiError` variant.
fn status_error(response: HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}
