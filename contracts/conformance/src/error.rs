//! Error types for class-identity conformance checks.

use thiserror::Error;

/// A class-identity assertion that did not hold.
///
/// `actual` is `None` when the assertion was handed no instance at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected instance of {expected}, found {}", .actual.as_deref().unwrap_or("no instance"))]
pub struct AssertionFailure {
    /// The type name the instance was required to have
    pub expected: String,
    /// The type name the instance actually had
    pub actual: Option<String>,
}

impl AssertionFailure {
    /// Failure for an instance whose type name differs from the expectation
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: Some(actual.into()),
        }
    }

    /// Failure for a missing instance
    pub fn absent(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: None,
        }
    }
}

/// Harness error types
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The checked instance was not of the expected type
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// The subject under test could not be built
    #[error("failed to construct {subject}: {reason}")]
    Construction {
        /// Name of the subject type
        subject: String,
        /// Why construction failed
        reason: String,
    },

    /// The expected type name is unusable
    #[error("Invalid expectation: {0}")]
    InvalidExpectation(String),

    /// A test case name is empty or malformed
    #[error("Invalid test name: {0:?}")]
    InvalidTestName(String),

    /// A test case with the same name is already registered
    #[error("Test case already registered: {0}")]
    DuplicateTestCase(String),

    /// No test case is registered under the name
    #[error("Unknown test case: {0}")]
    UnknownTestCase(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display_names_both_types() {
        let err = AssertionFailure::mismatch("org.example.Expected", "org.example.Actual");
        let msg = err.to_string();
        assert!(msg.contains("org.example.Expected"));
        assert!(msg.contains("org.example.Actual"));
    }

    #[test]
    fn test_absent_display() {
        let err = AssertionFailure::absent("org.example.Expected");
        assert_eq!(
            err.to_string(),
            "expected instance of org.example.Expected, found no instance"
        );
        assert!(err.actual.is_none());
    }

    #[test]
    fn test_assertion_converts_transparently() {
        let err: HarnessError = AssertionFailure::mismatch("a.B", "a.C").into();
        assert!(matches!(err, HarnessError::Assertion(_)));
        assert_eq!(err.to_string(), "expected instance of a.B, found a.C");
    }

    #[test]
    fn test_construction_display() {
        let err = HarnessError::Construction {
            subject: "Greeting".into(),
            reason: "out of memory".into(),
        };
        assert!(err.to_string().contains("Greeting"));
        assert!(err.to_string().contains("out of memory"));
    }
}
