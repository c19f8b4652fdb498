//! Query validation gate
//!
//! Runs before any downstream call; no network resource is consumed for
//! invalid input.

use ragway_utils::GatewayError;

/// Trim surrounding whitespace and reject empty queries.
///
/// # Errors
///
/// Returns `GatewayError::EmptyQuery` if the trimmed query is empty.
pub fn validate_query(raw: &str) -> Result<&str, GatewayError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::EmptyQuery);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_rejected() {
        assert!(matches!(
            validate_query(""),
            Err(GatewayError::EmptyQuery)
        ));
    }

    #[test]
    fn whitespace_only_query_rejected() {
        for raw in ["   ", "\t", "\n\n", " \t \n "] {
            assert!(
                matches!(validate_query(raw), Err(GatewayError::EmptyQuery)),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        assert_eq!(validate_query("  What is Kubernetes?  ").unwrap(), "What is Kubernetes?");
    }

    #[test]
    fn interior_whitespace_preserved() {
        assert_eq!(validate_query("a  b").unwrap(), "a  b");
    }
}
