//! Viewer request as delivered by the edge platform.
//!
//! Headers use the multi-value shape: lower-cased name → ordered list of
//! `{ key, value }` entries, where `key` (optional) keeps the original casing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower-cased header name → ordered entries.
pub type Headers = BTreeMap<String, Vec<HeaderEntry>>;

static NO_HEADERS: Headers = BTreeMap::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Inbound viewer request.
///
/// Optional fields stay `None` when the edge omitted them, and fields the gate
/// does not read (`clientIp`, `body`, `origin`, ...) are kept in `extra`, so a
/// pass-through serializes back exactly what came in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub uri: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querystring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EdgeRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: method.into(),
            querystring: None,
            headers: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_querystring(mut self, querystring: impl Into<String>) -> Self {
        self.querystring = Some(querystring.into());
        self
    }

    /// Append a header entry. `name` is lower-cased for the map key; the entry
    /// keeps it as given.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry::new(name, value));
        self
    }

    /// Query string without the leading `?`; `""` when absent.
    pub fn querystring(&self) -> &str {
        self.querystring.as_deref().unwrap_or("")
    }

    /// Header map; empty when the request carried none.
    pub fn headers(&self) -> &Headers {
        self.headers.as_ref().unwrap_or(&NO_HEADERS)
    }

    /// Value of the first entry for `name` (lower-cased lookup).
    pub fn first_header(&self, name: &str) -> Option<&str> {
        self.headers()
            .get(&name.to_ascii_lowercase())
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}
