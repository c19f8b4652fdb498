use std::fmt;
use thiserror::Error;

/// The downstream service a failure originated from.
///
/// Every downstream failure names its collaborator so the caller-facing
/// detail identifies which service misbehaved without exposing anything
/// beyond that service's own error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// The retrieval service (context passages for a query)
    Retrieval,
    /// The generation service (synthesized answer from query + context)
    Generation,
}

impl Collaborator {
    /// Stable lowercase name used in logs and error details
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retrieval => "retrieval",
            Self::Generation => "generation",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway-level error taxonomy.
///
/// `GatewayError` is the single error type flowing out of the orchestration
/// pipeline. Each kind carries a human-readable detail and maps to exactly
/// one transport status code via [`status_code()`](Self::status_code):
///
/// | Kind | Status |
/// |------|--------|
/// | `EmptyQuery` | 400 |
/// | `DownstreamStatus` | the collaborator's own status |
/// | `Unreachable` | 503 |
/// | `MalformedResponse` | 502 |
/// | `Internal` | 500 |
///
/// Errors are created at the point of failure and propagated unchanged to
/// the boundary; nothing in the pipeline retries or rewraps them.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// The query was empty or whitespace-only after trimming
    #[error("Query cannot be empty.")]
    EmptyQuery,

    /// A collaborator replied with a 4xx/5xx status; the status is passed
    /// through to the caller and the detail carries the collaborator's body
    #[error("Downstream service error: {body}")]
    DownstreamStatus {
        collaborator: Collaborator,
        status: u16,
        body: String,
    },

    /// A collaborator could not be reached: connection failure, DNS failure,
    /// or the bounded per-call timeout elapsed
    #[error("Cannot connect to the {collaborator} service. Please try again later. ({detail})")]
    Unreachable {
        collaborator: Collaborator,
        detail: String,
    },

    /// A collaborator replied 2xx but the reply was missing a required field
    #[error("Malformed reply from the {collaborator} service: {detail}")]
    MalformedResponse {
        collaborator: Collaborator,
        detail: String,
    },

    /// Any other unanticipated failure during orchestration
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Transport status code surfaced at the gateway boundary.
    ///
    /// `DownstreamStatus` passes the collaborator's own status through
    /// verbatim; every other kind has a fixed mapping.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyQuery => 400,
            Self::DownstreamStatus { status, .. } => *status,
            Self::Unreachable { .. } => 503,
            Self::MalformedResponse { .. } => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Stable error kind name for structured logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::DownstreamStatus { .. } => "downstream_status",
            Self::Unreachable { .. } => "unreachable",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_maps_to_400() {
        assert_eq!(GatewayError::EmptyQuery.status_code(), 400);
    }

    #[test]
    fn downstream_status_passes_through_collaborator_status() {
        let err = GatewayError::DownstreamStatus {
            collaborator: Collaborator::Retrieval,
            status: 503,
            body: "index rebuilding".to_string(),
        };
        assert_eq!(err.status_code(), 503);

        let err = GatewayError::DownstreamStatus {
            collaborator: Collaborator::Generation,
            status: 422,
            body: "bad prompt".to_string(),
        };
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn unreachable_maps_to_503_and_names_the_collaborator() {
        let err = GatewayError::Unreachable {
            collaborator: Collaborator::Generation,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.status_code(), 503);
        assert!(err.to_string().contains("generation"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn malformed_response_maps_to_502() {
        let err = GatewayError::MalformedResponse {
            collaborator: Collaborator::Generation,
            detail: "reply missing 'answer' field".to_string(),
        };
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("generation"));
    }

    #[test]
    fn internal_maps_to_500() {
        let err = GatewayError::Internal("boom".to_string());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(GatewayError::EmptyQuery.kind(), "empty_query");
        assert_eq!(
            GatewayError::Internal("x".to_string()).kind(),
            "internal"
        );
        let err = GatewayError::Unreachable {
            collaborator: Collaborator::Retrieval,
            detail: String::new(),
        };
        assert_eq!(err.kind(), "unreachable");
    }

    #[test]
    fn collaborator_display_is_lowercase() {
        assert_eq!(Collaborator::Retrieval.to_string(), "retrieval");
        assert_eq!(Collaborator::Generation.to_string(), "generation");
    }
}
