//! Generation collaborator client
//!
//! POSTs the validated query plus the retrieved context to
//! `{base_url}/generate`. A structurally valid reply without an `answer`
//! field is surfaced as `MalformedResponse` rather than passed through as a
//! sentinel answer.

use crate::http_client::HttpClient;
use crate::types::GenerationBackend;
use async_trait::async_trait;
use ragway_utils::{Collaborator, GatewayError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP implementation of [`GenerationBackend`].
#[derive(Clone)]
pub(crate) struct HttpGenerationBackend {
    client: Arc<HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl HttpGenerationBackend {
    pub(crate) fn new(
        client: Arc<HttpClient>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationBackend {
    async fn generate(&self, query: &str, context: &[String]) -> Result<String, GatewayError> {
        debug!(
            collaborator = "generation",
            context_snippets = context.len(),
            timeout_secs = self.timeout.as_secs(),
            "Calling generation service"
        );

        let request = GenerateRequest { query, context };
        let reply: GenerateReply = self
            .client
            .post_json(
                &self.endpoint(),
                &request,
                self.timeout,
                Collaborator::Generation,
            )
            .await?;

        let answer = reply.answer.ok_or_else(|| GatewayError::MalformedResponse {
            collaborator: Collaborator::Generation,
            detail: "reply missing 'answer' field".to_string(),
        })?;

        debug!(
            collaborator = "generation",
            answer_len = answer.len(),
            "Generation call completed"
        );

        Ok(answer)
    }
}

/// Generation request body: the original query plus the retrieved context,
/// built fresh per orchestration call
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    query: &'a str,
    context: &'a [String],
}

/// Generation reply body
#[derive(Debug, Deserialize)]
struct GenerateReply {
    answer: Option<String>,
}
