//! Response envelopes returned by the Lucent API.
//!
//! # Design
//! Every reply wraps its payload in the same envelope: `data` plus
//! `errors`, `links`, `meta` and `included`. `Response<T>` models that once
//! and the two shapes the API returns are aliases over it. Errors reported
//! by the API are plain data here; inspecting them is up to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{null_as_default, Document};

/// Envelope around a single document.
pub type LucentResponse = Response<Document>;

/// Envelope around a list of documents.
pub type LucentListResponse = Response<Vec<Document>>;

/// A decoded API reply.
///
/// When `errors` is empty, `data` is authoritative. Otherwise `data` may be
/// a zero-value placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Response<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub data: T,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    // TODO: replace with a typed paginator once the API's meta shape is pinned down.
    #[serde(deserialize_with = "null_as_default")]
    pub meta: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub included: Map<String, Value>,
}

impl<T> Response<T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All errors reported by the API, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The first reported error, or `""` when there is none.
    pub fn error(&self) -> &str {
        self.errors.first().map(String::as_str).unwrap_or("")
    }

    /// Side-loaded related resources, keyed by resource type.
    pub fn included(&self) -> &Map<String, Value> {
        &self.included
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl Response<Vec<Document>> {
    /// The first document and `true`, or a zero-value document and `false`
    /// when the list is empty.
    pub fn first(&self) -> (Document, bool) {
        match self.data.first() {
            Some(doc) => (doc.clone(), true),
            None => (Document::default(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str) -> Document {
        Document {
            id: id.to_string(),
            ..Document::default()
        }
    }

    #[test]
    fn has_errors_tracks_error_list() {
        let mut response = LucentResponse::default();
        assert!(!response.has_errors());
        assert_eq!(response.error(), "");
        assert!(response.errors().is_empty());

        response.errors = vec!["a".to_string(), "b".to_string()];
        assert!(response.has_errors());
        assert_eq!(response.error(), "a");
        assert_eq!(response.errors(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn first_on_empty_list() {
        let response = LucentListResponse::default();
        let (first, ok) = response.first();
        assert!(!ok);
        assert_eq!(first, Document::default());
    }

    #[test]
    fn first_returns_head_of_list() {
        let response = LucentListResponse {
            data: vec![doc("d1"), doc("d2")],
            ..Default::default()
        };
        let (first, ok) = response.first();
        assert!(ok);
        assert_eq!(first.id, "d1");
        assert_eq!(response.data().len(), 2);
    }

    #[test]
    fn decodes_full_envelope() {
        let response: LucentListResponse = serde_json::from_value(json!({
            "data": [{"id": "d1", "schema": "articles"}],
            "errors": [],
            "links": ["https://api.lucentcms.com/api/documents?skip=10"],
            "meta": {"total": 11},
            "included": {"authors": [{"id": "u1"}]}
        }))
        .unwrap();
        assert!(!response.has_errors());
        assert_eq!(response.data()[0].schema, "articles");
        assert_eq!(response.links().len(), 1);
        assert_eq!(response.meta()["total"], 11);
        assert_eq!(response.included()["authors"][0]["id"], "u1");
    }

    #[test]
    fn error_envelope_without_data() {
        let response: LucentResponse =
            serde_json::from_str(r#"{"errors": ["Unauthenticated."], "data": null}"#).unwrap();
        assert!(response.has_errors());
        assert_eq!(response.error(), "Unauthenticated.");
        assert_eq!(response.data(), &Document::default());
        assert!(response.included().is_empty());
    }

    #[test]
    fn into_data_moves_payload_out() {
        let response = LucentListResponse {
            data: vec![doc("only")],
            ..Default::default()
        };
        let docs = response.into_data();
        assert_eq!(docs, vec![doc("only")]);
    }
}
