//! Collaborator clients for the ragway gateway
//!
//! This crate provides trait-based access to the two downstream services the
//! gateway orchestrates: retrieval (context passages) and generation
//! (synthesized answers). Both HTTP implementations share one connection
//! pool, carry a bounded per-call timeout, and map every failure into
//! [`GatewayError`] before the orchestrator sees it.

mod generation;
pub(crate) mod http_client;
mod retrieval;
mod types;

pub use types::{GenerationBackend, RetrievalBackend};

// Internal backend implementations
pub(crate) use generation::HttpGenerationBackend;
pub(crate) use retrieval::HttpRetrievalBackend;

use ragway_config::Config;
use ragway_utils::GatewayError;
use std::sync::Arc;

use crate::http_client::HttpClient;

/// Construct both collaborator backends from configuration.
///
/// Builds one shared HTTP client at startup and hands out immutable backend
/// handles; nothing downstream reads global state after this point.
///
/// # Errors
///
/// Returns `GatewayError::Internal` if the underlying HTTP client cannot be
/// constructed.
pub fn from_config(
    config: &Config,
) -> Result<(Arc<dyn RetrievalBackend>, Arc<dyn GenerationBackend>), GatewayError> {
    let client = Arc::new(HttpClient::new()?);

    let retrieval = HttpRetrievalBackend::new(
        Arc::clone(&client),
        config.retrieval_base_url(),
        config.retrieval_timeout(),
    );
    let generation = HttpGenerationBackend::new(
        client,
        config.generation_base_url(),
        config.generation_timeout(),
    );

    Ok((Arc::new(retrieval), Arc::new(generation)))
}
