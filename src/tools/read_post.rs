use crate::{post_url,
            tools::{ToolContext, ToolResult}};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Parameters for reading a post
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadPostParams {
    /// Post URL (desktop, mobile share, or feed/update URN form)
    pub url: String,
}

/// Render the post with the configured session and extract its fields.
///
/// The browser work is blocking and runs on the blocking thread pool.
pub async fn read_post(context: &ToolContext, params: ReadPostParams) -> ToolResult {
    let reader = match context.reader() {
        Ok(reader) => Arc::clone(reader),
        Err(disabled) => return disabled,
    };

    let url = params.url;
    let task_url = url.clone();
    let outcome = tokio::task::spawn_blocking(move || reader.read(&task_url)).await;

    match outcome {
        Ok(Ok(post)) => ToolResult::success_with(json!({
            "post_id": post.post_id,
            "url": post.source_url,
            "data": post.data(),
            "defaulted_fields": post.defaulted_fields(),
        })),
        Ok(Err(e)) => {
            log::error!("Failed to read post {}: {}", post_url::strip_query(&url), e);
            let result = ToolResult::error(e.to_string());
            match post_url::extract_post_id(&url) {
                Some(post_id) => result.with("extracted_post_id", post_id),
                None => result,
            }
        }
        Err(e) => ToolResult::error(format!("Post reader task failed: {}", e)),
    }
}
