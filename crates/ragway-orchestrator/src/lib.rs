//! Chat orchestration for the ragway gateway
//!
//! This crate wires the two collaborator backends into the gateway's single
//! pipeline: validate the query, fetch context from retrieval, short-circuit
//! when there is none, otherwise ask generation for the answer.
//!
//! Control flow is strictly linear. The two downstream calls are never
//! issued concurrently (generation depends on retrieval's output), nothing
//! retries, and no invocation shares state with another.

mod validate;

pub use validate::validate_query;

use ragway_client::{GenerationBackend, RetrievalBackend};
use ragway_utils::GatewayError;
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed answer returned when retrieval finds no context.
///
/// Skipping generation here is a deliberate cost-saving policy: there is no
/// point paying for a generation call with nothing to ground it.
pub const NO_CONTEXT_FALLBACK: &str = "I couldn't find relevant information in my knowledge base. Please try rephrasing your question.";

/// The gateway's orchestration pipeline.
///
/// Holds the two collaborator handles, both immutable after construction
/// and safe for concurrent use by many simultaneous request tasks.
#[derive(Clone)]
pub struct ChatOrchestrator {
    retrieval: Arc<dyn RetrievalBackend>,
    generation: Arc<dyn GenerationBackend>,
}

impl ChatOrchestrator {
    /// Build the orchestrator from explicitly constructed backends.
    #[must_use]
    pub fn new(
        retrieval: Arc<dyn RetrievalBackend>,
        generation: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self {
            retrieval,
            generation,
        }
    }

    /// Answer a query through the two-stage pipeline.
    ///
    /// One pass: validate, retrieve with its bounded timeout, short-circuit
    /// on empty context, generate with its (wider) bounded timeout. Every
    /// failure is mapped once by the layer that observed it and returned
    /// unchanged; there is no partial success.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::EmptyQuery` for blank input without issuing
    /// any downstream call, and otherwise whatever error the failing
    /// collaborator call mapped to.
    pub async fn answer(&self, query: &str) -> Result<String, GatewayError> {
        let query = validate_query(query)?;

        debug!(query_len = query.len(), "Received chat query");

        let context = self.retrieval.retrieve(query).await?;

        if context.is_empty() {
            info!("No relevant context found; skipping generation");
            return Ok(NO_CONTEXT_FALLBACK.to_string());
        }

        debug!(
            context_chars = context.iter().map(String::len).sum::<usize>(),
            "Retrieved context"
        );

        let answer = self.generation.generate(query, &context).await?;

        info!("Successfully processed query");

        Ok(answer)
    }
}
