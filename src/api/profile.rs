use crate::{api::{transport::READ_TIMEOUT, types::ProfileLookup, LinkedInClient},
            error::Operation};
use reqwest::Method;

const PROFILE_PERMISSION_HINT: &str =
    "Profile access requires the r_liteprofile permission. This token only grants w_member_social (post creation).";

impl LinkedInClient {
    /// Profile of the authenticated member.
    ///
    /// Never fails: tokens without profile permission get
    /// [`ProfileLookup::Limited`] with whatever identity is already cached.
    pub async fn get_profile(&self) -> ProfileLookup {
        let person_urn = || self.session().cached_identity().map(str::to_string);

        let request = self.request(Method::GET, "me", READ_TIMEOUT);
        let response = match self.send_raw(Operation::GetProfile, request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Failed to get profile: {}", e);
                return ProfileLookup::Limited {
                    message: format!("Profile access limited: {}", e),
                    person_urn: person_urn(),
                };
            }
        };

        match response.status {
            200..=299 => match response.body_json() {
                Ok(profile) => ProfileLookup::Full(profile),
                Err(e) => ProfileLookup::Limited {
                    message: format!("Profile access limited: invalid profile JSON: {}", e),
                    person_urn: person_urn(),
                },
            },
            403 => ProfileLookup::Limited {
                message: PROFILE_PERMISSION_HINT.to_string(),
                person_urn: person_urn(),
            },
            status => {
                log::warn!("Failed to get profile: HTTP {}", status);
                ProfileLookup::Limited {
                    message: format!("Profile access limited: HTTP {}", status),
                    person_urn: person_urn(),
                }
            }
        }
    }

    /// Whether the token can resolve the member identity
    pub async fn validate_credentials(&self) -> bool {
        match self.resolve_identity().await {
            Ok(_) => true,
            Err(e) => {
                log::error!("Credential validation failed: {}", e);
                false
            }
        }
    }
}
