//! HTTP transport for the browse controller.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::controller::{FetchError, FetchRequest};
use crate::dto::browse::{BrowseBootstrap, BrowsePayload, BrowseResponse};

/// Path of the JSON bootstrap endpoint.
pub const BOOTSTRAP_PATH: &str = "/browse/bootstrap";

/// Upper bound on one request, connection included. A request that runs
/// over it fails like any other network error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to a browse server, keeping its session cookie between calls so the
/// anti-forgery token from the bootstrap stays valid.
#[derive(Clone)]
pub struct HttpBrowseTransport {
    http: Client,
    base_url: String,
}

impl HttpBrowseTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::NetworkFailure(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches tabs, page size and a fresh token for this session.
    pub async fn bootstrap(&self) -> Result<BrowseBootstrap, FetchError> {
        let response = self
            .http
            .get(format!("{}{BOOTSTRAP_PATH}", self.base_url))
            .send()
            .await
            .map_err(network_failure)?
            .error_for_status()
            .map_err(network_failure)?;
        response.json().await.map_err(network_failure)
    }

    /// Sends one browse request and reduces the reply to an outcome for
    /// [`crate::controller::BrowseController::on_fetch_complete`].
    pub async fn load(&self, request: &FetchRequest) -> Result<BrowsePayload, FetchError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, request.endpoint))
            .form(&request.body)
            .send()
            .await
            .map_err(network_failure)?;
        let status = response.status();
        let body = response.text().await.map_err(network_failure)?;
        outcome_from_response(status, &body)
    }
}

fn network_failure(err: reqwest::Error) -> FetchError {
    FetchError::NetworkFailure(err.to_string())
}

/// Interprets a browse reply. A failure envelope is honoured whatever the
/// status; anything else that is not a successful envelope counts as a
/// network failure.
pub fn outcome_from_response(status: StatusCode, body: &str) -> Result<BrowsePayload, FetchError> {
    let envelope = match serde_json::from_str::<BrowseResponse>(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            return Err(FetchError::NetworkFailure(format!(
                "unreadable response ({status}): {err}"
            )));
        }
    };

    if envelope.success && !status.is_success() {
        return Err(FetchError::NetworkFailure(format!("HTTP {status}")));
    }

    envelope.into_result().map_err(FetchError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_payload() {
        let body = r#"{"success":true,"payload":{"fragment":"<p>x</p>","debug":{"category":"all","search":"","page":1,"pageSize":12,"totalCount":0,"totalPages":0}}}"#;
        let payload = outcome_from_response(StatusCode::OK, body).unwrap();
        assert_eq!(payload.fragment, "<p>x</p>");
        assert_eq!(payload.debug.page_size, 12);
    }

    #[test]
    fn forbidden_failure_envelope_is_unauthorized() {
        let body = r#"{"success":false,"error":{"message":"Invalid token.","code":"unauthorized"}}"#;
        assert_eq!(
            outcome_from_response(StatusCode::FORBIDDEN, body),
            Err(FetchError::Unauthorized("Invalid token.".to_string()))
        );
    }

    #[test]
    fn server_error_page_is_network_failure() {
        let outcome = outcome_from_response(
            StatusCode::BAD_GATEWAY,
            "<html>502 Bad Gateway</html>",
        );
        assert!(matches!(outcome, Err(FetchError::NetworkFailure(_))));
    }

    #[test]
    fn success_flag_with_error_status_is_network_failure() {
        let body = r#"{"success":true,"payload":{"fragment":"","debug":{"category":"all","search":"","page":1,"pageSize":12,"totalCount":0,"totalPages":0}}}"#;
        assert!(matches!(
            outcome_from_response(StatusCode::INTERNAL_SERVER_ERROR, body),
            Err(FetchError::NetworkFailure(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport = HttpBrowseTransport::new("http://localhost:8080/").unwrap();
        assert_eq!(transport.base_url, "http://localhost:8080");
    }
}
