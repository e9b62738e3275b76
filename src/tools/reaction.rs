use crate::{api::ReactionKind,
            tools::{ToolContext, ToolResult}};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for adding a reaction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddReactionParams {
    /// URN of the post or comment to react to
    pub entity_urn: String,

    /// LIKE, PRAISE, APPRECIATION, EMPATHY, INTEREST, or ENTERTAINMENT (default: LIKE)
    #[serde(default = "default_reaction")]
    pub reaction_type: String,
}

fn default_reaction() -> String {
    ReactionKind::Like.as_str().to_string()
}

/// Parameters for removing a reaction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RemoveReactionParams {
    /// ID of the reaction to remove
    pub reaction_id: String,
}

/// Parameters for listing reactions
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetReactionsParams {
    /// URN of the post or comment
    pub entity_urn: String,
}

pub async fn add_reaction(context: &ToolContext, params: AddReactionParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    let kind: ReactionKind = match params.reaction_type.parse() {
        Ok(kind) => kind,
        Err(e) => return e.into(),
    };

    match api.add_reaction(&params.entity_urn, kind).await {
        Ok(record) => ToolResult::success_with(json!({
            "message": format!("Reaction {} added", record.kind),
            "entity_urn": record.target_urn,
        })),
        Err(e) => e.into(),
    }
}

pub async fn remove_reaction(context: &ToolContext, params: RemoveReactionParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.remove_reaction(&params.reaction_id).await {
        Ok(()) => ToolResult::success_with(json!({ "message": "Reaction removed" })),
        Err(e) => e.into(),
    }
}

pub async fn get_reactions(context: &ToolContext, params: GetReactionsParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.list_reactions(&params.entity_urn).await {
        Ok(data) => ToolResult::success_with(json!({ "data": data })),
        Err(e) => e.into(),
    }
}
