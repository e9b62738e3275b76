use crate::{api::ProfileLookup,
            tools::{NoParams, ToolContext, ToolResult}};
use serde_json::json;

pub async fn get_profile(context: &ToolContext, _params: NoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    match api.get_profile().await {
        ProfileLookup::Full(profile) => ToolResult::success_with(json!({ "profile": profile })),
        ProfileLookup::Limited { message, person_urn } => ToolResult::limited(json!({
            "message": message,
            "person_urn": person_urn.unwrap_or_else(|| "Call validate_linkedin_credentials first".to_string()),
        })),
    }
}

pub async fn validate_credentials(context: &ToolContext, _params: NoParams) -> ToolResult {
    let api = match context.api() {
        Ok(api) => api,
        Err(disabled) => return disabled,
    };

    if api.validate_credentials().await {
        let result = ToolResult::success_with(json!({ "message": "LinkedIn credentials are valid" }));
        match api.session().cached_identity() {
            Some(urn) => result.with("person_urn", urn),
            None => result,
        }
    } else {
        ToolResult::error("LinkedIn credentials validation failed")
    }
}
