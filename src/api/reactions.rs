use crate::{api::{parse_json, path_segment,
                  transport::{READ_TIMEOUT, WRITE_TIMEOUT},
                  types::{CreateReactionRequest, ReactionKind, ReactionRecord},
                  LinkedInClient},
            error::{ApiError, Operation}};
use reqwest::Method;
use serde_json::Value;

impl LinkedInClient {
    /// React to a post or comment as the authenticated member.
    ///
    /// Repeating a reaction is passed through to the provider as-is.
    pub async fn add_reaction(&self, entity_urn: &str, kind: ReactionKind) -> Result<ReactionRecord, ApiError> {
        let actor = self.resolve_identity().await?;
        let body = CreateReactionRequest {
            actor: &actor,
            object: entity_urn,
            reaction_type: kind,
        };

        self.post_json(Operation::AddReaction, "reactions", &body)
            .await
            .inspect_err(|e| log::error!("{}", e))?;

        log::info!("Reaction {} added to {}", kind, entity_urn);
        Ok(ReactionRecord {
            actor_urn: actor,
            target_urn: entity_urn.to_string(),
            kind,
        })
    }

    pub async fn remove_reaction(&self, reaction_id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("reactions/{}", path_segment(reaction_id)), WRITE_TIMEOUT);
        self.send(Operation::RemoveReaction, request)
            .await
            .inspect_err(|e| log::error!("{}", e))?;

        log::info!("Reaction removed: {}", reaction_id);
        Ok(())
    }

    /// Reactions on an entity, as returned by the provider
    pub async fn list_reactions(&self, entity_urn: &str) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, "reactions", READ_TIMEOUT)
            .with_query("q", "entity")
            .with_query("entity", entity_urn);
        let response = self.send(Operation::ListReactions, request).await?;

        parse_json(Operation::ListReactions, &response)
    }
}
