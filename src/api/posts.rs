use crate::{api::{path_segment,
                  transport::WRITE_TIMEOUT,
                  types::{CommentaryUpdate, CreatePostRequest, Distribution, MediaRef, PatchRequest, PostContent,
                          PostReceipt, SetPatch, Visibility},
                  LinkedInClient},
            error::{ApiError, Operation}};
use reqwest::Method;
use serde_json::Value;

/// Response header carrying the created entity's id
const RESTLI_ID_HEADER: &str = "x-restli-id";

impl LinkedInClient {
    /// Publish a post authored by the authenticated member.
    ///
    /// Posts carry at most one media item: when `media_urns` has several
    /// entries only the first is attached. Text length is validated by the
    /// provider, not here.
    pub async fn create_post(
        &self,
        text: &str,
        visibility: Visibility,
        media_urns: &[String],
    ) -> Result<PostReceipt, ApiError> {
        let author = self.resolve_identity().await?;

        if media_urns.len() > 1 {
            log::warn!("Post supports a single media item; attaching {} and ignoring {} more", media_urns[0], media_urns.len() - 1);
        }

        let body = CreatePostRequest {
            author: &author,
            commentary: text,
            visibility,
            distribution: Distribution::main_feed(),
            lifecycle_state: "PUBLISHED",
            is_reshare_disabled_by_author: false,
            content: media_urns.first().map(|urn| PostContent {
                media: MediaRef { id: urn },
            }),
        };

        log::info!("Creating LinkedIn post");
        let response = self.post_json(Operation::CreatePost, "posts", &body).await.inspect_err(|e| log::error!("{}", e))?;

        let raw = response.body_json().unwrap_or_else(|_| Value::String(response.body_text()));
        let post_urn = raw
            .get("id")
            .or_else(|| raw.get("urn"))
            .and_then(Value::as_str)
            .or_else(|| response.header(RESTLI_ID_HEADER))
            .map(str::to_string);

        log::info!("Post created: {}", post_urn.as_deref().unwrap_or("unknown"));
        Ok(PostReceipt { post_urn, raw })
    }

    /// Replace the commentary of an existing post
    pub async fn update_post(&self, post_urn: &str, text: &str) -> Result<(), ApiError> {
        let body = PatchRequest {
            patch: SetPatch {
                set: CommentaryUpdate { commentary: text },
            },
        };
        let body = serde_json::to_value(&body).map_err(|e| ApiError::InvalidRequest {
            operation: Operation::UpdatePost,
            reason: e.to_string(),
        })?;

        let request = self
            .request(Method::PATCH, &format!("posts/{}", path_segment(post_urn)), WRITE_TIMEOUT)
            .with_json(body);
        self.send(Operation::UpdatePost, request).await.inspect_err(|e| log::error!("{}", e))?;

        log::info!("Post updated: {}", post_urn);
        Ok(())
    }

    pub async fn delete_post(&self, post_urn: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("posts/{}", path_segment(post_urn)), WRITE_TIMEOUT);
        self.send(Operation::DeletePost, request).await.inspect_err(|e| log::error!("{}", e))?;

        log::info!("Post deleted: {}", post_urn);
        Ok(())
    }
}
