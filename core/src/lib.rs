//! Synchronous client core for the Lucent CMS API.
//!
//! # Overview
//! Builds authenticated requests against the `documents`, `channels` and
//! `files` endpoints and decodes replies into typed `Document` envelopes,
//! without touching the network (host-does-IO pattern). The caller executes
//! the HTTP round-trip with its own transport.
//!
//! # Design
//! - `LucentClient` is immutable: it holds the connection identity and the
//!   default headers derived from it.
//! - `build_request` validates the endpoint against a fixed allow-list and
//!   hands out a `LucentRequest` with its own copy of the headers; the
//!   `Lucent-Channel` and `Lucent-User` headers cannot be overridden.
//! - `LucentRequest::into_http` produces plain `HttpRequest` data, and
//!   `parse_*` turns an `HttpResponse` into a `Response` envelope.
//! - API-reported errors are envelope data, not `Err` values.
//!
//! ```
//! use std::time::Duration;
//! use lucent_core::{HttpMethod, LucentClient, Payload};
//!
//! let client = LucentClient::new("store1", "abc", "", "en-US", Duration::from_secs(10));
//! let request = client.build_request("documents", Payload::new()).unwrap();
//! assert_eq!(request.endpoint, "https://api.lucentcms.com/api/documents");
//!
//! let http = request.into_http(HttpMethod::Get).unwrap();
//! assert!(http.headers.contains(&("Authorization".to_string(), "Bearer abc".to_string())));
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod headers;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use client::LucentClient;
pub use error::ApiError;
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::LucentRequest;
pub use response::{LucentListResponse, LucentResponse, Response};
pub use types::{Content, Document, Payload};
