//! Document model for the Lucent API.
//!
//! # Design
//! Field names map one-to-one to the camelCase wire names. Open-ended parts
//! of a document (`content`, `subdocs`, `relationships`) stay as
//! `serde_json` values so nothing is lost on a decode/encode round-trip.
//! Absent and `null` members decode to the field's zero value, which is
//! what a placeholder document inside an error envelope looks like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Schema-defined fields of a document.
pub type Content = Map<String, Value>;

/// JSON object sent along with a request.
pub type Payload = Map<String, Value>;

/// One content record managed by Lucent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub schema: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub editor: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub published_at: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub behind: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub content: Content,
    pub subdocs: Value,
    pub relationships: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Look up a single content field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.content.get(name)
    }
}

/// Decode `null` as `T::default()` instead of failing.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
