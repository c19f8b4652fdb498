//! HTTP Handlers
//!
//! Request handlers for the gateway endpoints and the boundary mapping from
//! `GatewayError` to HTTP responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use ragway_orchestrator::ChatOrchestrator;
use ragway_utils::GatewayError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

// ==================== REQUEST/RESPONSE DTOs ====================

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorBody {
    pub detail: String,
}

// ==================== APPLICATION STATE ====================

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

// ==================== ERROR MAPPING ====================

/// Boundary wrapper carrying a `GatewayError` out as an HTTP response.
///
/// The taxonomy itself is transport-agnostic; the wrapper exists so the
/// status mapping lives at the boundary and nowhere else.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        warn!(
            kind = self.0.kind(),
            status = status.as_u16(),
            "Request failed"
        );

        (
            status,
            Json(ErrorBody {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ==================== HANDLERS ====================

/// Chat with the gateway: one pass through the retrieval/generation pipeline.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let answer = state.orchestrator.answer(&request.query).await?;

    Ok(Json(ChatResponse { answer }))
}

/// Liveness probe
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "API Gateway is healthy",
        "service": "ragway",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragway_client::{GenerationBackend, RetrievalBackend};
    use ragway_utils::Collaborator;

    struct FixedRetrieval(Vec<String>);

    #[async_trait]
    impl RetrievalBackend for FixedRetrieval {
        async fn retrieve(&self, _query: &str) -> Result<Vec<String>, GatewayError> {
            Ok(self.0.clone())
        }
    }

    struct FixedGeneration(Result<String, GatewayError>);

    #[async_trait]
    impl GenerationBackend for FixedGeneration {
        async fn generate(
            &self,
            _query: &str,
            _context: &[String],
        ) -> Result<String, GatewayError> {
            self.0.clone()
        }
    }

    fn state(retrieval: FixedRetrieval, generation: FixedGeneration) -> AppState {
        AppState {
            orchestrator: Arc::new(ChatOrchestrator::new(
                Arc::new(retrieval),
                Arc::new(generation),
            )),
        }
    }

    #[tokio::test]
    async fn chat_handler_returns_generated_answer() {
        let state = state(
            FixedRetrieval(vec!["ctx".to_string()]),
            FixedGeneration(Ok("an answer".to_string())),
        );

        let response = chat_handler(
            State(state),
            Json(ChatRequest {
                query: "What is Kubernetes?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.answer, "an answer");
    }

    #[tokio::test]
    async fn chat_handler_maps_empty_query_to_400() {
        let state = state(
            FixedRetrieval(vec!["ctx".to_string()]),
            FixedGeneration(Ok("an answer".to_string())),
        );

        let err = chat_handler(
            State(state),
            Json(ChatRequest {
                query: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_passes_downstream_status_through() {
        let err = ApiError(GatewayError::DownstreamStatus {
            collaborator: Collaborator::Retrieval,
            status: 503,
            body: "index rebuilding".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn api_error_maps_unknown_status_to_500() {
        // A collaborator replying with a nonsense status must not panic the
        // boundary
        let err = ApiError(GatewayError::DownstreamStatus {
            collaborator: Collaborator::Generation,
            status: 42,
            body: String::new(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_handler_names_the_service() {
        let Json(body) = health_handler().await;
        assert_eq!(body["service"], "ragway");
    }
}
