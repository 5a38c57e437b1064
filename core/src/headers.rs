//! Outbound header map with write-protected Lucent identity headers.
//!
//! # Design
//! `Lucent-Channel` and `Lucent-User` identify the tenant and acting user.
//! They are written once by `LucentClient::new` and every `LucentRequest`
//! gets its own copy of the defaults, so nothing a caller does to a request
//! leaks back into the client. The public mutators refuse the reserved keys;
//! only crate code can set them. Names compare ASCII case-insensitively, as
//! HTTP header names do.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::ApiError;

pub const ACCEPT: &str = "Accept";
pub const AUTHORIZATION: &str = "Authorization";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const LUCENT_CHANNEL: &str = "Lucent-Channel";
pub const LUCENT_USER: &str = "Lucent-User";

/// Headers a caller can never set or remove on a request.
pub const PROTECTED_HEADERS: [&str; 2] = [LUCENT_CHANNEL, LUCENT_USER];

pub fn is_protected(name: &str) -> bool {
    PROTECTED_HEADERS
        .iter()
        .any(|protected| protected.eq_ignore_ascii_case(name))
}

/// An owned, ordered set of request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header without the protection check. Crate-internal so that
    /// only the client can write the identity headers.
    pub(crate) fn set_trusted(&mut self, name: &str, value: impl Into<String>) {
        if let Some(existing) = self.find_key(name).cloned() {
            self.entries.remove(&existing);
        }
        self.entries.insert(name.to_string(), value.into());
    }

    /// Insert or replace a header, returning the previous value.
    ///
    /// # Errors
    ///
    /// `ApiError::ProtectedHeader` if `name` is `Lucent-Channel` or
    /// `Lucent-User` in any letter case. The map is left untouched.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Result<Option<String>, ApiError> {
        if is_protected(name) {
            warn!(header = name, "rejected override of protected header");
            return Err(ApiError::ProtectedHeader {
                name: name.to_string(),
            });
        }
        let previous = self
            .find_key(name)
            .cloned()
            .and_then(|existing| self.entries.remove(&existing));
        self.entries.insert(name.to_string(), value.into());
        Ok(previous)
    }

    /// Remove a header, returning its value if it was present.
    ///
    /// # Errors
    ///
    /// `ApiError::ProtectedHeader` for the reserved identity headers.
    pub fn remove(&mut self, name: &str) -> Result<Option<String>, ApiError> {
        if is_protected(name) {
            warn!(header = name, "rejected removal of protected header");
            return Err(ApiError::ProtectedHeader {
                name: name.to_string(),
            });
        }
        Ok(self
            .find_key(name)
            .cloned()
            .and_then(|existing| self.entries.remove(&existing)))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.find_key(name)
            .and_then(|key| self.entries.get(key))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_key(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries.into_iter().collect()
    }

    fn find_key(&self, name: &str) -> Option<&String> {
        self.entries.keys().find(|key| key.eq_ignore_ascii_case(name))
    }
}
