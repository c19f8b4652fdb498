//! Core traits for collaborator backend abstraction

use async_trait::async_trait;
use ragway_utils::GatewayError;

/// Trait for the retrieval collaborator.
///
/// Given a validated query, returns the ordered context snippets the service
/// found, possibly none. Implementations must be safe for concurrent use by
/// many simultaneous orchestration tasks.
#[async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Fetch context snippets for a query.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for any failure: a 4xx/5xx reply from the
    /// service, a connection failure or timeout, or an undecodable reply.
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, GatewayError>;
}

/// Trait for the generation collaborator.
///
/// Given a validated query and the retrieved context, returns the
/// synthesized answer. Implementations must be safe for concurrent use by
/// many simultaneous orchestration tasks.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Synthesize an answer from a query and its context.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for any failure, including a structurally
    /// valid reply that is missing its answer field.
    async fn generate(&self, query: &str, context: &[String]) -> Result<String, GatewayError>;
}
