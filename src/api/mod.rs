//! LinkedIn REST API client
//!
//! [`LinkedInClient`] covers the `w_member_social` surface: posts, image/video/
//! document uploads, reactions, and the identity/profile lookups they depend on.
//! Every provider call goes through [`HttpTransport`]; transport and HTTP
//! failures are converted into [`ApiError`]s tagged with the failing
//! [`Operation`](crate::error::Operation) and never retried.

pub mod identity;
pub mod media;
pub mod posts;
pub mod profile;
pub mod reactions;
pub mod session;
pub mod transport;
pub mod types;

pub use session::SessionContext;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use types::{FinalizeVideoUpload, MediaHandle, MediaKind, PostReceipt, ProfileLookup, ReactionKind, ReactionRecord, UploadInstruction,
                UploadPhase, VideoUpload, Visibility};

use crate::{config::ClientConfig,
            error::{ApiError, Operation}};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

/// Client for the LinkedIn REST API
pub struct LinkedInClient {
    session: SessionContext,
    transport: Arc<dyn HttpTransport>,
}

impl LinkedInClient {
    /// Client using the real network
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Client using a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            session: SessionContext::new(&config),
            transport,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Request to a path under the REST base URL, with the session headers
    fn request(&self, method: Method, path: &str, timeout: Duration) -> HttpRequest {
        HttpRequest::new(method, self.session.url(path), timeout).with_headers(self.session.headers())
    }

    /// Send a request; non-2xx responses become [`ApiError::Rejected`]
    async fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.send_raw(operation, request).await?;

        if !response.is_success() {
            return Err(ApiError::Rejected {
                operation,
                status: response.status,
                body: provider_body(&response),
            });
        }

        Ok(response)
    }

    /// Send a request, only mapping transport failures
    async fn send_raw(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {} ({})", request.method, request.url, operation);

        self.transport.send(request).await.map_err(|e| ApiError::Transport {
            operation,
            message: if e.timed_out { format!("request timed out: {}", e) } else { e.to_string() },
        })
    }

    /// POST a JSON body and return the response
    async fn post_json<B: Serialize>(
        &self,
        operation: Operation,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest {
            operation,
            reason: format!("failed to encode request: {}", e),
        })?;

        let request = self.request(Method::POST, path, transport::WRITE_TIMEOUT).with_json(body);
        self.send(operation, request).await
    }

    /// GET a provider entity; any non-2xx response is [`ApiError::NotFound`]
    async fn get_entity(&self, operation: Operation, path: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, path, transport::READ_TIMEOUT);
        let response = self.send_raw(operation, request).await?;

        if !response.is_success() {
            return Err(ApiError::NotFound {
                operation,
                status: response.status,
                body: provider_body(&response),
            });
        }

        parse_json(operation, &response)
    }
}

/// Structured provider error body when it is JSON, else the raw text
fn provider_body(response: &HttpResponse) -> Option<String> {
    match response.body_json() {
        Ok(Value::Null) => None,
        Ok(value) => Some(value.to_string()),
        Err(_) => Some(response.body_text()),
    }
}

fn parse_json(operation: Operation, response: &HttpResponse) -> Result<Value, ApiError> {
    response.body_json().map_err(|e| ApiError::MalformedResponse {
        operation,
        reason: format!("invalid JSON: {}", e),
    })
}

fn parse_as<T: DeserializeOwned>(operation: Operation, response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_value(parse_json(operation, response)?).map_err(|e| ApiError::MalformedResponse {
        operation,
        reason: e.to_string(),
    })
}

/// Percent-encode a URN or id for use as a path segment
fn path_segment(id: &str) -> String {
    urlencoding::encode(id.trim()).into_owned()
}
