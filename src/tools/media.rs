use crate::{api::FinalizeVideoUpload,
            error::ApiError,
            tools::{NoParams, ToolContext, ToolResult}};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for uploading an image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadImageParams {
    /// Public URL of the image to upload
    pub image_url: String,
}

/// Parameters for reading an image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetImageParams {
    /// Image ID or URN
    pub image_id: String,
}

/// Parameters for initializing a video upload
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InitializeVideoParams {
    /// Size of the video file in bytes
    pub file_size_bytes: u64,
}

/// Parameters for finalizing a video upload
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinalizeVideoParams {
    /// Video URN from initialization
    pub video_urn: String,

    /// Upload token from initialization
    pub upload_token: String,

    /// ETags of the uploaded chunks, in the order of the upload instructions
    pub part_ids: Vec<String>,

    /// Number of upload instructions returned at initialization; checked against part_ids when given
    #[serde(default)]
    pub expected_parts: Option<usize>,
}

/// Parameters for reading a video
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetVideoParams {
    /// Video ID or URN
    pub video_id: String,
}

/// Parameters for reading a document
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetDocumentParams {
    /// Document ID or URN
    pub document_id: String,
}

pub async fn upload_image(context: &ToolContext, params: UploadImageParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.upload_image(&params.image_url).await {
        Ok(handle) => ToolResult::success_with(json!({
            "image_urn": handle.urn,
            "phase": handle.phase,
        })),
        Err(e) => e.into(),
    }
}

pub async fn get_image(context: &ToolContext, params: GetImageParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.get_image(&params.image_id).await {
        Ok(data) => ToolResult::success_with(json!({ "data": data })),
        Err(e) => e.into(),
    }
}

pub async fn initialize_video_upload(context: &ToolContext, params: InitializeVideoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.initialize_video_upload(params.file_size_bytes).await {
        Ok(upload) => ToolResult::success_with(json!({
            "video_urn": upload.urn,
            "upload_token": upload.upload_token,
            "upload_instructions": upload.instructions,
        })),
        Err(e) => e.into(),
    }
}

pub async fn finalize_video_upload(context: &ToolContext, params: FinalizeVideoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    if let Some(expected) = params.expected_parts {
        if expected != params.part_ids.len() {
            return ApiError::PartCountMismatch {
                expected,
                actual: params.part_ids.len(),
            }
            .into();
        }
    }

    let finalize = FinalizeVideoUpload {
        video: params.video_urn,
        upload_token: params.upload_token,
        uploaded_part_ids: params.part_ids,
    };

    match api.finalize_video_upload(&finalize).await {
        Ok(handle) => ToolResult::success_with(json!({
            "video_urn": handle.urn,
            "phase": handle.phase,
            "message": "Video upload finalized",
        })),
        Err(e) => e.into(),
    }
}

pub async fn get_video(context: &ToolContext, params: GetVideoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.get_video(&params.video_id).await {
        Ok(data) => ToolResult::success_with(json!({ "data": data })),
        Err(e) => e.into(),
    }
}

pub async fn initialize_document_upload(context: &ToolContext, _params: NoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.initialize_document_upload().await {
        Ok(handle) => ToolResult::success_with(json!({
            "document_urn": handle.urn,
            "upload_url": handle.upload_url,
        })),
        Err(e) => e.into(),
    }
}

pub async fn get_document(context: &ToolContext, params: GetDocumentParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.get_document(&params.document_id).await {
        Ok(data) => ToolResult::success_with(json!({ "data": data })),
        Err(e) => e.into(),
    }
}
