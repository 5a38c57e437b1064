//! Error types for the Lucent API client.
//!
//! # Design
//! Request construction fails fast: `InvalidEndpoint`, `InvalidUrl` and
//! `ProtectedHeader` are raised before anything reaches the network and are
//! never worth retrying. Errors reported by the API itself are not here; they
//! travel inside a decoded envelope (see `response`). `NotFound` and
//! `HttpError` only cover replies whose body is not an envelope at all.

use thiserror::Error;

/// Errors returned by `LucentClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint is not one of the supported resource collections.
    #[error("unsupported endpoint {endpoint:?}: can not create request")]
    InvalidEndpoint { endpoint: String },

    /// Base URL joined with the endpoint is not a valid absolute URL.
    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Attempt to set or remove a header only the client may write.
    #[error("header {name:?} is protected and can not be overridden")]
    ProtectedHeader { name: String },

    /// The server returned 404 without a Lucent envelope in the body.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status without a Lucent envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into an envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
