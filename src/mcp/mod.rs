//! MCP (Model Context Protocol) server
//!
//! Every action in [`tools`](crate::tools) is exposed as an rmcp tool. Tool
//! results are the action's status-tagged JSON; `error` results are flagged
//! as tool errors so clients can tell them apart.

pub mod handler;
pub use handler::LinkedInServer;

use crate::tools::{self,
                   media::{FinalizeVideoParams, GetDocumentParams, GetImageParams, GetVideoParams, InitializeVideoParams,
                           UploadImageParams},
                   post::{CreatePostParams, DeletePostParams, UpdatePostParams},
                   reaction::{AddReactionParams, GetReactionsParams, RemoveReactionParams},
                   read_post::ReadPostParams,
                   NoParams, Status, ToolResult};
use rmcp::{handler::server::wrapper::Parameters,
           model::{CallToolResult, Content},
           tool, tool_router, ErrorData as McpError};

/// Convert an action result to an MCP tool result
fn convert_result(result: ToolResult) -> Result<CallToolResult, McpError> {
    let value = result.to_value();
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());

    if result.status == Status::Error {
        Ok(CallToolResult::error(vec![Content::text(text)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_router]
impl LinkedInServer {
    // ==================== POSTS ====================

    #[tool(description = "Create a LinkedIn post, optionally with an image downloaded from a public URL")]
    async fn create_linkedin_post(
        &self,
        Parameters(params): Parameters<CreatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::post::create_post(self.context(), params).await)
    }

    #[tool(description = "Replace the text of an existing LinkedIn post")]
    async fn update_linkedin_post(
        &self,
        Parameters(params): Parameters<UpdatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::post::update_post(self.context(), params).await)
    }

    #[tool(description = "Delete a LinkedIn post")]
    async fn delete_linkedin_post(
        &self,
        Parameters(params): Parameters<DeletePostParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::post::delete_post(self.context(), params).await)
    }

    // ==================== MEDIA ====================

    #[tool(description = "Upload an image from a public URL; returns the image URN to attach to a post")]
    async fn upload_linkedin_image(
        &self,
        Parameters(params): Parameters<UploadImageParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::upload_image(self.context(), params).await)
    }

    #[tool(description = "Get details of an uploaded image")]
    async fn get_linkedin_image(
        &self,
        Parameters(params): Parameters<GetImageParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::get_image(self.context(), params).await)
    }

    #[tool(description = "Initialize a video upload; returns the video URN, upload token and chunk upload instructions")]
    async fn initialize_linkedin_video_upload(
        &self,
        Parameters(params): Parameters<InitializeVideoParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::initialize_video_upload(self.context(), params).await)
    }

    #[tool(description = "Finalize a video upload with the ETags of every uploaded chunk")]
    async fn finalize_linkedin_video_upload(
        &self,
        Parameters(params): Parameters<FinalizeVideoParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::finalize_video_upload(self.context(), params).await)
    }

    #[tool(description = "Get details of an uploaded video")]
    async fn get_linkedin_video(
        &self,
        Parameters(params): Parameters<GetVideoParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::get_video(self.context(), params).await)
    }

    #[tool(description = "Initialize a document upload; returns the document URN and upload URL")]
    async fn initialize_linkedin_document_upload(&self) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::initialize_document_upload(self.context(), NoParams::default()).await)
    }

    #[tool(description = "Get details of an uploaded document")]
    async fn get_linkedin_document(
        &self,
        Parameters(params): Parameters<GetDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::media::get_document(self.context(), params).await)
    }

    // ==================== REACTIONS ====================

    #[tool(description = "React to a post or comment (LIKE, PRAISE, APPRECIATION, EMPATHY, INTEREST, ENTERTAINMENT)")]
    async fn add_linkedin_reaction(
        &self,
        Parameters(params): Parameters<AddReactionParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::reaction::add_reaction(self.context(), params).await)
    }

    #[tool(description = "Remove a reaction")]
    async fn remove_linkedin_reaction(
        &self,
        Parameters(params): Parameters<RemoveReactionParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::reaction::remove_reaction(self.context(), params).await)
    }

    #[tool(description = "List the reactions on a post or comment")]
    async fn get_linkedin_reactions(
        &self,
        Parameters(params): Parameters<GetReactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::reaction::get_reactions(self.context(), params).await)
    }

    // ==================== PROFILE ====================

    #[tool(description = "Get the authenticated member's profile (limited when the token lacks profile permission)")]
    async fn get_linkedin_profile(&self) -> Result<CallToolResult, McpError> {
        convert_result(tools::profile::get_profile(self.context(), NoParams::default()).await)
    }

    #[tool(description = "Check that the access token works and resolve the member URN")]
    async fn validate_linkedin_credentials(&self) -> Result<CallToolResult, McpError> {
        convert_result(tools::profile::validate_credentials(self.context(), NoParams::default()).await)
    }

    // ==================== READER ====================

    #[tool(description = "Read any LinkedIn post by URL through a logged-in browser session: author, text, date, \
                          engagement counts, images, video and article")]
    async fn read_linkedin_post(
        &self,
        Parameters(params): Parameters<ReadPostParams>,
    ) -> Result<CallToolResult, McpError> {
        convert_result(tools::read_post::read_post(self.context(), params).await)
    }
}
