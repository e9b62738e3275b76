use crate::{api::Visibility,
            tools::{ToolContext, ToolResult}};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for creating a post
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatePostParams {
    /// Post content text
    pub text: String,

    /// 'PUBLIC' or 'CONNECTIONS' (default: PUBLIC)
    #[serde(default = "default_visibility")]
    pub visibility: String,

    /// Optional public image URL to upload and attach
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_visibility() -> String {
    Visibility::Public.as_str().to_string()
}

/// Parameters for updating a post
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePostParams {
    /// URN of the post to update (e.g. 'urn:li:share:123456')
    pub post_urn: String,

    /// New post content
    pub text: String,
}

/// Parameters for deleting a post
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeletePostParams {
    /// URN of the post to delete
    pub post_urn: String,
}

pub async fn create_post(context: &ToolContext, params: CreatePostParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    let visibility: Visibility = match params.visibility.parse() {
        Ok(visibility) => visibility,
        Err(e) => return e.into(),
    };

    let mut media_urns = Vec::new();
    if let Some(image_url) = params.image_url.as_deref().filter(|url| !url.trim().is_empty()) {
        match api.upload_image(image_url).await {
            Ok(handle) => media_urns.push(handle.urn),
            Err(e) => return e.into(),
        }
    }

    match api.create_post(&params.text, visibility, &media_urns).await {
        Ok(receipt) => {
            let result = ToolResult::success_with(serde_json::json!({
                "post_urn": receipt.post_urn.as_deref().unwrap_or("unknown"),
                "message": "Post created successfully",
            }));
            match media_urns.first() {
                Some(image_urn) => result.with("image_urn", image_urn.as_str()),
                None => result,
            }
        }
        Err(e) => e.into(),
    }
}

pub async fn update_post(context: &ToolContext, params: UpdatePostParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.update_post(&params.post_urn, &params.text).await {
        Ok(()) => ToolResult::success_with(serde_json::json!({
            "post_urn": params.post_urn,
            "message": "Post updated successfully",
        })),
        Err(e) => e.into(),
    }
}

pub async fn delete_post(context: &ToolContext, params: DeletePostParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.delete_post(&params.post_urn).await {
        Ok(()) => ToolResult::success_with(serde_json::json!({
            "post_urn": params.post_urn,
            "message": "Post deleted successfully",
        })),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_params_defaults() {
        let params: CreatePostParams = serde_json::from_value(serde_json::json!({"text": "Hello"})).unwrap();
        assert_eq!(params.visibility, "PUBLIC");
        assert_eq!(params.image_url, None);
    }

    #[tokio::test]
    async fn test_invalid_visibility_needs_api_first() {
        let params: CreatePostParams =
            serde_json::from_value(serde_json::json!({"text": "Hello", "visibility": "FRIENDS"})).unwrap();
        let result = create_post(&ToolContext::default(), params).await;
        assert_eq!(result.message(), Some(crate::tools::API_DISABLED_MESSAGE));
    }
}
