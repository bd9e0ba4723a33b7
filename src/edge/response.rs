//! Generated response returned to the edge instead of forwarding to origin.

use serde::{Deserialize, Serialize};

use crate::edge::request::{HeaderEntry, Headers};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    // The platform expects the status as a string.
    pub status: String,
    pub status_description: String,
    pub headers: Headers,
}

impl EdgeResponse {
    /// `302 Found` with a single `Location` header.
    pub fn found(location: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.insert(
            "location".to_string(),
            vec![HeaderEntry::new("Location", location)],
        );

        Self {
            status: "302".to_string(),
            status_description: "Found".to_string(),
            headers,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}
