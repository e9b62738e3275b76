//! Request and response schemas for the LinkedIn REST endpoints

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Who can see a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    Connections,
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Public, Visibility::Connections];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Connections => "CONNECTIONS",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| invalid_enum("visibility", s, Self::ALL.iter().map(Visibility::as_str)))
    }
}

/// Reaction types accepted by the reactions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionKind {
    #[default]
    Like,
    Praise,
    Appreciation,
    Empathy,
    Interest,
    Entertainment,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 6] = [
        ReactionKind::Like,
        ReactionKind::Praise,
        ReactionKind::Appreciation,
        ReactionKind::Empathy,
        ReactionKind::Interest,
        ReactionKind::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "LIKE",
            ReactionKind::Praise => "PRAISE",
            ReactionKind::Appreciation => "APPRECIATION",
            ReactionKind::Empathy => "EMPATHY",
            ReactionKind::Interest => "INTEREST",
            ReactionKind::Entertainment => "ENTERTAINMENT",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| invalid_enum("reaction type", s, Self::ALL.iter().map(ReactionKind::as_str)))
    }
}

fn invalid_enum<'a>(field: &'static str, value: &str, expected: impl Iterator<Item = &'a str>) -> ApiError {
    ApiError::InvalidEnumValue {
        field,
        value: value.to_string(),
        expected: expected.collect::<Vec<_>>().join(", "),
    }
}

// ==================== POSTS ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostRequest<'a> {
    pub author: &'a str,
    pub commentary: &'a str,
    pub visibility: Visibility,
    pub distribution: Distribution,
    pub lifecycle_state: &'static str,
    pub is_reshare_disabled_by_author: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PostContent<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Distribution {
    pub feed_distribution: &'static str,
    pub target_entities: Vec<Value>,
    pub third_party_distribution_channels: Vec<Value>,
}

impl Distribution {
    /// Main feed, no targeting
    pub fn main_feed() -> Self {
        Self {
            feed_distribution: "MAIN_FEED",
            target_entities: Vec::new(),
            third_party_distribution_channels: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PostContent<'a> {
    pub media: MediaRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MediaRef<'a> {
    pub id: &'a str,
}

/// `{"patch": {"$set": {"commentary": ...}}}`
#[derive(Debug, Serialize)]
pub(crate) struct PatchRequest<T> {
    pub patch: SetPatch<T>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetPatch<T> {
    #[serde(rename = "$set")]
    pub set: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentaryUpdate<'a> {
    pub commentary: &'a str,
}

/// Result of creating a post
#[derive(Debug, Clone, PartialEq)]
pub struct PostReceipt {
    /// URN of the new post (`urn:li:share:…` or `urn:li:ugcPost:…`)
    pub post_urn: Option<String>,
    /// Provider response body, `Null` when empty
    pub raw: Value,
}

// ==================== MEDIA ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

/// Lifecycle of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadPhase {
    Initialized,
    Transferred,
    Finalized,
}

/// An image or document being uploaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaHandle {
    pub kind: MediaKind,
    pub urn: String,
    pub upload_url: Option<String>,
    pub phase: UploadPhase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitializeUploadRequest<T> {
    pub initialize_upload_request: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct OwnerOnly<'a> {
    pub owner: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoUploadOptions<'a> {
    pub owner: &'a str,
    pub file_size_bytes: u64,
    pub upload_captions: bool,
    pub upload_thumbnail: bool,
}

/// Every initializeUpload action wraps its result in `value`
#[derive(Debug, Deserialize)]
pub(crate) struct ActionResponse<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageUploadValue {
    pub upload_url: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentUploadValue {
    pub upload_url: String,
    pub document: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoUploadValue {
    pub video: String,
    #[serde(default)]
    pub upload_token: Option<String>,
    #[serde(default)]
    pub upload_instructions: Vec<UploadInstruction>,
}

/// Where to PUT one byte range of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadInstruction {
    pub upload_url: String,
    pub first_byte: u64,
    pub last_byte: u64,
}

/// An initialized video upload.
///
/// The caller PUTs each chunk to its instruction's URL and collects the `ETag`
/// of every response, in instruction order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoUpload {
    pub urn: String,
    pub upload_token: Option<String>,
    pub instructions: Vec<UploadInstruction>,
}

impl VideoUpload {
    /// Build the finalize request, checking there is one part id per chunk.
    ///
    /// `part_ids[i]` must be the ETag returned for `instructions[i]`.
    pub fn finalize_request(&self, part_ids: Vec<String>) -> Result<FinalizeVideoUpload, ApiError> {
        if part_ids.len() != self.instructions.len() {
            return Err(ApiError::PartCountMismatch {
                expected: self.instructions.len(),
                actual: part_ids.len(),
            });
        }

        Ok(FinalizeVideoUpload {
            video: self.urn.clone(),
            upload_token: self.upload_token.clone().unwrap_or_default(),
            uploaded_part_ids: part_ids,
        })
    }
}

/// Body of `POST /videos?action=finalizeUpload`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeVideoUpload {
    pub video: String,
    pub upload_token: String,
    /// Chunk ETags, in upload order
    pub uploaded_part_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinalizeUploadRequest<'a> {
    pub finalize_upload_request: &'a FinalizeVideoUpload,
}

// ==================== REACTIONS ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReactionRequest<'a> {
    pub actor: &'a str,
    pub object: &'a str,
    pub reaction_type: ReactionKind,
}

/// A reaction as sent to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub actor_urn: String,
    pub target_urn: String,
    pub kind: ReactionKind,
}

// ==================== PROFILE ====================

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    #[serde(default)]
    pub sub: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Me {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

/// Outcome of a profile lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Full(Value),
    /// The token cannot read the profile (typically only `w_member_social`)
    Limited {
        message: String,
        person_urn: Option<String>,
    },
}
