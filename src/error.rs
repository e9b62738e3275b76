use std::fmt;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Provider operation an [`ApiError`] is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ResolveIdentity,
    CreatePost,
    UpdatePost,
    DeletePost,
    InitializeImageUpload,
    UploadImage,
    GetImage,
    InitializeVideoUpload,
    FinalizeVideoUpload,
    GetVideo,
    InitializeDocumentUpload,
    GetDocument,
    AddReaction,
    RemoveReaction,
    ListReactions,
    GetProfile,
}

impl Operation {
    /// Human readable verb phrase, e.g. "create post"
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ResolveIdentity => "resolve identity",
            Operation::CreatePost => "create post",
            Operation::UpdatePost => "update post",
            Operation::DeletePost => "delete post",
            Operation::InitializeImageUpload => "initialize image upload",
            Operation::UploadImage => "upload image",
            Operation::GetImage => "get image",
            Operation::InitializeVideoUpload => "initialize video upload",
            Operation::FinalizeVideoUpload => "finalize video upload",
            Operation::GetVideo => "get video",
            Operation::InitializeDocumentUpload => "initialize document upload",
            Operation::GetDocument => "get document",
            Operation::AddReaction => "add reaction",
            Operation::RemoveReaction => "remove reaction",
            Operation::ListReactions => "get reactions",
            Operation::GetProfile => "get profile",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step of the composite image upload that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    Initialize,
    Download,
    Upload,
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            UploadStep::Initialize => "initialize",
            UploadStep::Download => "download",
            UploadStep::Upload => "upload",
        };
        f.write_str(step)
    }
}

/// Errors raised by the LinkedIn REST API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cannot determine user ID ({0}). Ensure the token has the w_member_social permission.")]
    IdentityUnresolved(String),

    #[error("Failed to {operation}: HTTP {status}{}", format_body(.body))]
    Rejected {
        operation: Operation,
        status: u16,
        body: Option<String>,
    },

    #[error("Failed to {operation}: not found (HTTP {status}){}", format_body(.body))]
    NotFound {
        operation: Operation,
        status: u16,
        body: Option<String>,
    },

    #[error("Failed to {operation}: {message}")]
    Transport { operation: Operation, message: String },

    #[error("Failed to {operation}: unexpected response: {reason}")]
    MalformedResponse { operation: Operation, reason: String },

    #[error("Invalid {field} '{value}'. Use: {expected}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Failed to upload image at {step} step: {reason}")]
    ImageUploadFailed { step: UploadStep, reason: String },

    #[error("Failed to {operation}: {reason}")]
    InvalidRequest { operation: Operation, reason: String },

    #[error("Video finalize expects {expected} uploaded part ids (one per chunk), got {actual}")]
    PartCountMismatch { expected: usize, actual: usize },
}

fn format_body(body: &Option<String>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!(" - {}", body),
        _ => String::new(),
    }
}

impl ApiError {
    /// Operation the error is attributed to, if it came from a provider call
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Rejected { operation, .. }
            | ApiError::NotFound { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::MalformedResponse { operation, .. }
            | ApiError::InvalidRequest { operation, .. } => Some(*operation),
            ApiError::IdentityUnresolved(_) => Some(Operation::ResolveIdentity),
            ApiError::ImageUploadFailed { .. } => Some(Operation::UploadImage),
            ApiError::PartCountMismatch { .. } => Some(Operation::FinalizeVideoUpload),
            ApiError::InvalidEnumValue { .. } => None,
        }
    }

    /// HTTP status of a provider rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::NotFound { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by the rendering surface and the post reader
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Rendering surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    #[error("Page load failed: {0}")]
    PageLoadFailed(String),

    #[error("Invalid post URL: {0}")]
    InvalidUrl(String),
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Access token must not be empty")]
    EmptyToken,

    #[error("API version must be a 6-digit YYYYMM string, got '{0}'")]
    InvalidApiVersion(String),

    #[error("Session cookie must not be empty")]
    EmptyCookie,
}
