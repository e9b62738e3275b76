use crate::{api::{parse_as, transport::READ_TIMEOUT, types::{Me, UserInfo}, HttpRequest, LinkedInClient},
            error::{ApiError, Operation}};
use reqwest::Method;

const PERSON_URN_PREFIX: &str = "urn:li:person:";

impl LinkedInClient {
    /// URN of the authenticated member, e.g. `urn:li:person:abc123`.
    ///
    /// Tries the OpenID userinfo endpoint, then `/me`. The first success is
    /// cached on the session for the rest of the process; later calls do not
    /// touch the network.
    pub async fn resolve_identity(&self) -> Result<String, ApiError> {
        self.session()
            .identity_cell()
            .get_or_try_init(|| self.discover_identity())
            .await
            .cloned()
    }

    async fn discover_identity(&self) -> Result<String, ApiError> {
        let primary_error = match self.identity_from_userinfo().await {
            Ok(id) => {
                let urn = person_urn(&id);
                log::info!("Got person URN from userinfo: {}", urn);
                return Ok(urn);
            }
            Err(e) => {
                log::warn!("Failed to get person URN from userinfo: {}", e);
                e
            }
        };

        match self.identity_from_me().await {
            Ok(id) => {
                let urn = person_urn(&id);
                log::info!("Got person URN from /me: {}", urn);
                Ok(urn)
            }
            Err(e) => {
                log::warn!("Failed to get person URN from /me: {}", e);
                Err(ApiError::IdentityUnresolved(format!("userinfo: {}; /me: {}", primary_error, e)))
            }
        }
    }

    async fn identity_from_userinfo(&self) -> Result<String, ApiError> {
        let request = HttpRequest::new(Method::GET, self.session().identity_url(), READ_TIMEOUT)
            .with_headers(self.session().headers());
        let response = self.send(Operation::ResolveIdentity, request).await?;

        let info: UserInfo = parse_as(Operation::ResolveIdentity, &response)?;
        non_empty(info.sub).ok_or_else(|| missing_subject("userinfo response has no 'sub'"))
    }

    async fn identity_from_me(&self) -> Result<String, ApiError> {
        let request = self.request(Method::GET, "me", READ_TIMEOUT);
        let response = self.send(Operation::ResolveIdentity, request).await?;

        let me: Me = parse_as(Operation::ResolveIdentity, &response)?;
        non_empty(me.id)
            .or_else(|| non_empty(me.sub))
            .ok_or_else(|| missing_subject("/me response has neither 'id' nor 'sub'"))
    }
}

fn person_urn(id: &str) -> String {
    if id.starts_with(PERSON_URN_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", PERSON_URN_PREFIX, id)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_subject(reason: &str) -> ApiError {
    ApiError::MalformedResponse {
        operation: Operation::ResolveIdentity,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_urn() {
        assert_eq!(person_urn("999"), "urn:li:person:999");
        assert_eq!(person_urn("urn:li:person:999"), "urn:li:person:999");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(" ".to_string())), None);
        assert_eq!(non_empty(Some("a".to_string())), Some("a".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
