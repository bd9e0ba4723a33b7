//! Viewer-request invocation envelope and handler output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edge::{request::EdgeRequest, response::EdgeResponse};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event contains no records")]
    NoRecords,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub cf: CfPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfPayload {
    #[serde(default)]
    pub config: DistributionConfig,
    pub request: EdgeRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl EdgeEvent {
    /// Distribution of the first record, for log context.
    pub fn distribution_id(&self) -> Option<&str> {
        self.records
            .first()
            .and_then(|r| r.cf.config.distribution_id.as_deref())
    }

    /// Take the request of the first record.
    ///
    /// Viewer-request triggers deliver exactly one record; any further records
    /// are ignored.
    pub fn into_request(self) -> Result<EdgeRequest, EventError> {
        self.records
            .into_iter()
            .next()
            .map(|r| r.cf.request)
            .ok_or(EventError::NoRecords)
    }
}

/// What the handler hands back to the edge: either the (unchanged) request to
/// forward, or a generated response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerOutput {
    Response(EdgeResponse),
    Request(EdgeRequest),
}
