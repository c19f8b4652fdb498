//! Retrieval collaborator client
//!
//! POSTs the validated query to `{base_url}/retrieve` and returns the
//! context snippets in the order the service produced them. The gateway
//! never re-ranks.

use crate::http_client::HttpClient;
use crate::types::RetrievalBackend;
use async_trait::async_trait;
use ragway_utils::{Collaborator, GatewayError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP implementation of [`RetrievalBackend`].
#[derive(Clone)]
pub(crate) struct HttpRetrievalBackend {
    client: Arc<HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl HttpRetrievalBackend {
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
        format!("{}/retrieve", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RetrievalBackend for HttpRetrievalBackend {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, GatewayError> {
        debug!(
            collaborator = "retrieval",
            timeout_secs = self.timeout.as_secs(),
            "Calling retrieval service"
        );

        let request = RetrieveRequest { query };
        let reply: RetrieveReply = self
            .client
            .post_json(
                &self.endpoint(),
                &request,
                self.timeout,
                Collaborator::Retrieval,
            )
            .await?;

        debug!(
            collaborator = "retrieval",
            snippets = reply.context.len(),
            "Retrieval call completed"
        );

        Ok(reply.context)
    }
}

/// Retrieval request body
#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
}

/// Retrieval reply body. A missing `context` field is the empty list by
/// contract, not an error.
#[derive(Debug, Deserialize)]
struct RetrieveReply {
    #[serde(default)]
    context: Vec<String>,
}
