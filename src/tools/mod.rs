//! Status-tagged actions
//!
//! Each action takes typed parameters, calls the API client or the post
//! reader, and folds the outcome into a [`ToolResult`]. Actions never return
//! errors: failures become `{"status": "error", "message": ...}`, and actions
//! whose backing service is not configured report themselves as unavailable.

pub mod media;
pub mod post;
pub mod profile;
pub mod reaction;
pub mod read_post;

use crate::{api::LinkedInClient, error::ApiError, reader::PostReader};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Message reported by API actions when no access token is configured
pub const API_DISABLED_MESSAGE: &str =
    "LinkedIn API tools are disabled: LINKEDIN_ACCESS_TOKEN is not set";

/// Message reported by the post reader when no session cookie is configured
pub const READER_DISABLED_MESSAGE: &str = "LinkedIn post reading is disabled: LINKEDIN_COOKIE is not set";

/// Outcome tag of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
    Limited,
}

/// Action result, serialized flat as `{"status": ..., ...payload}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub status: Status,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolResult {
    fn with_status(status: Status, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        Self { status, payload }
    }

    /// Successful result with the fields of `payload`
    pub fn success_with(payload: Value) -> Self {
        Self::with_status(Status::Success, payload)
    }

    /// Error result with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_status(Status::Error, serde_json::json!({ "message": message.into() }))
    }

    /// Degraded but non-failing result
    pub fn limited(payload: Value) -> Self {
        Self::with_status(Status::Limited, payload)
    }

    /// Builder method: add a payload field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn message(&self) -> Option<&str> {
        self.get("message").and_then(Value::as_str)
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.payload.clone();
        map.insert("status".to_string(), serde_json::to_value(self.status).unwrap_or(Value::Null));
        Value::Object(map)
    }
}

impl From<ApiError> for ToolResult {
    fn from(e: ApiError) -> Self {
        ToolResult::error(e.to_string())
    }
}

/// Parameters for actions that take none
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Services the actions run against; either may be absent
#[derive(Clone, Default)]
pub struct ToolContext {
    api: Option<Arc<LinkedInClient>>,
    reader: Option<Arc<PostReader>>,
}

impl ToolContext {
    pub fn new(api: Option<LinkedInClient>, reader: Option<PostReader>) -> Self {
        Self {
            api: api.map(Arc::new),
            reader: reader.map(Arc::new),
        }
    }

    /// The API client, or the "disabled" result to return instead
    pub fn api(&self) -> Result<&LinkedInClient, ToolResult> {
        self.api.as_deref().ok_or_else(|| ToolResult::error(API_DISABLED_MESSAGE))
    }

    /// The post reader, or the "disabled" result to return instead
    pub fn reader(&self) -> Result<&Arc<PostReader>, ToolResult> {
        self.reader.as_ref().ok_or_else(|| ToolResult::error(READER_DISABLED_MESSAGE))
    }

    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }

    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_serializes_flat() {
        let result = ToolResult::success_with(json!({"post_urn": "urn:li:share:42"}));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"status": "success", "post_urn": "urn:li:share:42"})
        );
        assert_eq!(result.to_value(), serde_json::to_value(&result).unwrap());
    }

    #[test]
    fn test_error_result() {
        let result = ToolResult::error("boom");
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.message(), Some("boom"));
        assert!(!result.is_success());
    }

    #[test]
    fn test_non_object_payload_wrapped() {
        let result = ToolResult::success_with(json!([1, 2]));
        assert_eq!(result.get("data"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_empty_context_reports_disabled() {
        let context = ToolContext::default();
        assert_eq!(context.api().err().unwrap().message(), Some(API_DISABLED_MESSAGE));
        assert_eq!(context.reader().err().unwrap().message(), Some(READER_DISABLED_MESSAGE));
        assert!(!context.has_api());
        assert!(!context.has_reader());
    }
}
