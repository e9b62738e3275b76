use crate::{api::{parse_as, path_segment,
                  transport::TRANSFER_TIMEOUT,
                  types::{ActionResponse, DocumentUploadValue, FinalizeUploadRequest, FinalizeVideoUpload,
                          ImageUploadValue, InitializeUploadRequest, MediaHandle, MediaKind, OwnerOnly, UploadPhase,
                          VideoUpload, VideoUploadOptions, VideoUploadValue},
                  HttpRequest, LinkedInClient},
            error::{ApiError, Operation, UploadStep}};
use reqwest::Method;
use serde_json::Value;

impl LinkedInClient {
    // ==================== IMAGES ====================

    /// Register an image upload owned by the authenticated member
    pub async fn initialize_image_upload(&self) -> Result<MediaHandle, ApiError> {
        let owner = self.resolve_identity().await?;
        let body = InitializeUploadRequest {
            initialize_upload_request: OwnerOnly { owner: &owner },
        };

        let response = self
            .post_json(Operation::InitializeImageUpload, "images?action=initializeUpload", &body)
            .await?;
        let result: ActionResponse<ImageUploadValue> = parse_as(Operation::InitializeImageUpload, &response)?;

        Ok(MediaHandle {
            kind: MediaKind::Image,
            urn: result.value.image,
            upload_url: Some(result.value.upload_url),
            phase: UploadPhase::Initialized,
        })
    }

    /// Download image bytes from a public URL
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, ApiError> {
        let request = HttpRequest::new(Method::GET, image_url, TRANSFER_TIMEOUT);
        let response = self.send(Operation::UploadImage, request).await?;
        Ok(response.body)
    }

    /// PUT image bytes to the upload URL returned by initialization
    pub async fn transfer_image(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        let mut request = HttpRequest::new(Method::PUT, upload_url, TRANSFER_TIMEOUT).with_bytes(bytes);
        request.headers.push(("Authorization".to_string(), format!("Bearer {}", self.session().token())));

        self.send(Operation::UploadImage, request).await?;
        Ok(())
    }

    /// Initialize, download `image_url`, and upload it.
    ///
    /// The returned handle's URN can be attached to a post.
    pub async fn upload_image(&self, image_url: &str) -> Result<MediaHandle, ApiError> {
        let mut handle = self
            .initialize_image_upload()
            .await
            .map_err(|e| upload_failed(UploadStep::Initialize, e))?;

        let upload_url = handle.upload_url.clone().ok_or_else(|| ApiError::ImageUploadFailed {
            step: UploadStep::Initialize,
            reason: "no upload URL returned".to_string(),
        })?;

        let bytes = self
            .fetch_image(image_url)
            .await
            .map_err(|e| upload_failed(UploadStep::Download, e))?;

        self.transfer_image(&upload_url, bytes)
            .await
            .map_err(|e| upload_failed(UploadStep::Upload, e))?;

        handle.phase = UploadPhase::Transferred;
        log::info!("Image uploaded: {}", handle.urn);
        Ok(handle)
    }

    pub async fn get_image(&self, image_id: &str) -> Result<Value, ApiError> {
        self.get_entity(Operation::GetImage, &format!("images/{}", path_segment(image_id))).await
    }

    // ==================== VIDEOS ====================

    /// Register a video upload of `file_size` bytes.
    ///
    /// Chunk transfer happens outside this client, following the returned
    /// instructions.
    pub async fn initialize_video_upload(&self, file_size: u64) -> Result<VideoUpload, ApiError> {
        let owner = self.resolve_identity().await?;
        let body = InitializeUploadRequest {
            initialize_upload_request: VideoUploadOptions {
                owner: &owner,
                file_size_bytes: file_size,
                upload_captions: false,
                upload_thumbnail: false,
            },
        };

        let response = self
            .post_json(Operation::InitializeVideoUpload, "videos?action=initializeUpload", &body)
            .await?;
        let result: ActionResponse<VideoUploadValue> = parse_as(Operation::InitializeVideoUpload, &response)?;

        log::info!(
            "Video upload initialized: {} ({} chunks)",
            result.value.video,
            result.value.upload_instructions.len()
        );
        Ok(VideoUpload {
            urn: result.value.video,
            upload_token: result.value.upload_token,
            instructions: result.value.upload_instructions,
        })
    }

    /// Complete a video upload once every chunk has been transferred
    pub async fn finalize_video_upload(&self, finalize: &FinalizeVideoUpload) -> Result<MediaHandle, ApiError> {
        if finalize.uploaded_part_ids.is_empty() {
            return Err(ApiError::InvalidRequest {
                operation: Operation::FinalizeVideoUpload,
                reason: "at least one uploaded part id is required".to_string(),
            });
        }

        let body = FinalizeUploadRequest {
            finalize_upload_request: finalize,
        };
        self.post_json(Operation::FinalizeVideoUpload, "videos?action=finalizeUpload", &body)
            .await?;

        log::info!("Video upload finalized: {}", finalize.video);
        Ok(MediaHandle {
            kind: MediaKind::Video,
            urn: finalize.video.clone(),
            upload_url: None,
            phase: UploadPhase::Finalized,
        })
    }

    pub async fn get_video(&self, video_id: &str) -> Result<Value, ApiError> {
        self.get_entity(Operation::GetVideo, &format!("videos/{}", path_segment(video_id))).await
    }

    // ==================== DOCUMENTS ====================

    /// Register a document upload; the transfer itself is up to the caller
    pub async fn initialize_document_upload(&self) -> Result<MediaHandle, ApiError> {
        let owner = self.resolve_identity().await?;
        let body = InitializeUploadRequest {
            initialize_upload_request: OwnerOnly { owner: &owner },
        };

        let response = self
            .post_json(Operation::InitializeDocumentUpload, "documents?action=initializeUpload", &body)
            .await?;
        let result: ActionResponse<DocumentUploadValue> = parse_as(Operation::InitializeDocumentUpload, &response)?;

        Ok(MediaHandle {
            kind: MediaKind::Document,
            urn: result.value.document,
            upload_url: Some(result.value.upload_url),
            phase: UploadPhase::Initialized,
        })
    }

    pub async fn get_document(&self, document_id: &str) -> Result<Value, ApiError> {
        self.get_entity(Operation::GetDocument, &format!("documents/{}", path_segment(document_id)))
            .await
    }
}

fn upload_failed(step: UploadStep, e: ApiError) -> ApiError {
    log::error!("Failed to upload image at {} step: {}", step, e);
    ApiError::ImageUploadFailed {
        step,
        reason: e.to_string(),
    }
}
