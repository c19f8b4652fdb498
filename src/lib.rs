//! ragway - request-orchestration gateway for retrieval-augmented chat
//!
//! ragway sits in front of two collaborator services: a retrieval service
//! returning contextual passages and a generation service returning a
//! synthesized answer. A query comes in over HTTP, flows through the
//! strictly sequential retrieval-then-generation pipeline, and leaves as a
//! single composed answer or a typed error with a meaningful status code.
//!
//! # Quick Start
//!
//! ```bash
//! # Serve with configuration discovered from ragway.toml
//! ragway
//!
//! # Point at explicit collaborators and a local port
//! RAGWAY_RETRIEVAL_URL=http://localhost:8001 \
//! RAGWAY_GENERATION_URL=http://localhost:8002 \
//! ragway --bind 127.0.0.1:8080
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -s localhost:8080/chat -H 'content-type: application/json' \
//!   -d '{"query": "What is Kubernetes?"}'
//! ```
//!
//! # Behavior
//!
//! - Blank queries are rejected with 400 before any downstream call.
//! - Empty retrieval context short-circuits with a fixed fallback answer;
//!   generation is never invoked.
//! - Downstream 4xx/5xx replies pass their status through; unreachable or
//!   timed-out collaborators surface as 503; a generation reply missing its
//!   answer field surfaces as 502.
//! - Nothing retries and nothing is cached: one pass per request.

pub mod cli;
pub mod server;

pub use ragway_orchestrator::{ChatOrchestrator, NO_CONTEXT_FALLBACK};
