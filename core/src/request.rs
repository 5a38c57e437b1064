//! A pending call against the Lucent API.

use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;
use crate::headers::{Headers, CONTENT_TYPE};
use crate::http::{HttpMethod, HttpRequest};
use crate::types::Payload;

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_SKIP: u32 = 0;

/// One request produced by `LucentClient::build_request`.
///
/// `headers` is a private copy of the client defaults. Callers may add
/// headers through `headers_mut`, but the Lucent identity headers stay
/// write-protected. `limit` and `skip` are carried for pagination and are
/// not interpreted by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct LucentRequest {
    pub endpoint: String,
    pub payload: Payload,
    pub timeout: Duration,
    pub limit: u32,
    pub skip: u32,
    headers: Headers,
}

impl LucentRequest {
    pub(crate) fn new(endpoint: String, payload: Payload, headers: Headers, timeout: Duration) -> Self {
        Self {
            endpoint,
            payload,
            timeout,
            limit: DEFAULT_LIMIT,
            skip: DEFAULT_SKIP,
            headers,
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Turn this request into plain transport data for `method`.
    ///
    /// `POST` and `PUT` carry the payload as a JSON body with a
    /// `Content-Type` header; `GET` and `DELETE` have no body.
    pub fn into_http(self, method: HttpMethod) -> Result<HttpRequest, ApiError> {
        let mut headers = self.headers;
        let body = if method.has_body() {
            let body = serde_json::to_string(&self.payload).map_err(ApiError::Serialization)?;
            headers.set_trusted(CONTENT_TYPE, "application/json");
            Some(body)
        } else {
            None
        };
        debug!(%method, url = %self.endpoint, "prepared HTTP request");
        Ok(HttpRequest {
            method,
            url: self.endpoint,
            headers: headers.into_pairs(),
            body,
            timeout: self.timeout,
        })
    }
}
