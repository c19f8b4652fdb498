//! Shared HTTP plumbing for collaborator backends
//!
//! One `reqwest::Client` (and so one connection pool) serves every
//! collaborator call. Each request carries its own bounded timeout; the
//! gateway makes exactly one attempt per orchestration invocation, so every
//! failure here maps straight into the error taxonomy with no retry.

use ragway_utils::{Collaborator, GatewayError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin wrapper over `reqwest::Client` that owns the failure mapping.
pub(crate) struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Construct the shared client.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Internal` if the TLS/connection-pool setup
    /// fails; this happens at startup, never per-request.
    pub fn new() -> Result<Self, GatewayError> {
        let inner = reqwest::Client::builder().build().map_err(|e| {
            GatewayError::Internal(format!("Failed to construct HTTP client: {e}"))
        })?;

        Ok(Self { inner })
    }

    /// POST a JSON body to a collaborator and decode the JSON reply.
    ///
    /// Failure mapping:
    /// - connect/DNS failure or elapsed timeout → `Unreachable`
    /// - non-2xx reply → `DownstreamStatus` carrying the reply body
    /// - undecodable reply body → `Internal`
    pub async fn post_json<B, R>(
        &self,
        url: &str,
        body: &B,
        timeout: Duration,
        collaborator: Collaborator,
    ) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .inner
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(&e, collaborator))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::DownstreamStatus {
                collaborator,
                status: status.as_u16(),
                body: body_text,
            });
        }

        response.json::<R>().await.map_err(|e| {
            GatewayError::Internal(format!("Failed to decode {collaborator} reply: {e}"))
        })
    }
}

/// Map a request-send failure into the taxonomy.
///
/// Timeouts and connection-level failures (refused, DNS) are the
/// "collaborator unreachable" class; anything else reaching this point is
/// unanticipated.
fn map_send_error(err: &reqwest::Error, collaborator: Collaborator) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Unreachable {
            collaborator,
            detail: "request timed out".to_string(),
        }
    } else if err.is_connect() {
        GatewayError::Unreachable {
            collaborator,
            detail: format!("connection failed: {err}"),
        }
    } else {
        GatewayError::Internal(format!("Request to {collaborator} service failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Empty {}

    /// A listener that accepts connections but never replies forces the
    /// per-request timeout to elapse.
    #[tokio::test]
    async fn timeout_maps_to_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                // Hold the connection open without answering
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(stream);
            }
        });

        let client = HttpClient::new().unwrap();
        let result: Result<Empty, _> = client
            .post_json(
                &format!("http://{addr}/retrieve"),
                &serde_json::json!({"query": "q"}),
                Duration::from_millis(200),
                Collaborator::Retrieval,
            )
            .await;

        match result {
            Err(GatewayError::Unreachable {
                collaborator: Collaborator::Retrieval,
                detail,
            }) => assert!(detail.contains("timed out")),
            other => panic!("Expected Unreachable for timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_unreachable() {
        // Bind then drop to obtain a port with (very likely) no listener
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new().unwrap();
        let result: Result<Empty, _> = client
            .post_json(
                &format!("http://{addr}/generate"),
                &serde_json::json!({"query": "q", "context": ["c"]}),
                Duration::from_secs(5),
                Collaborator::Generation,
            )
            .await;

        match result {
            Err(GatewayError::Unreachable {
                collaborator: Collaborator::Generation,
                ..
            }) => {}
            other => panic!("Expected Unreachable for refused connection, got {other:?}"),
        }
    }
}
