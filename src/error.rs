//! ChurnLens error types

/// ChurnLens error types
///
/// Every failure is scoped to a single view or request; none is fatal to
/// the process. Errors are `Clone` so a failure can be published to a
/// view's state and returned to the awaiting caller at the same time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChurnLensError {
    // Transport errors
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("undefined ratio: {0}")]
    UndefinedRatio(String),

    /// A required form field was blank or not a number.
    ///
    /// Raised before any network call is made.
    #[error("incomplete input: {field} {reason}")]
    IncompleteInput { field: String, reason: String },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Coarse failure taxonomy surfaced to the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NetworkFailure,
    MalformedResponse,
    UndefinedRatio,
    IncompleteInput,
    Configuration,
}

impl ChurnLensError {
    /// Which failure class this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            ChurnLensError::Network(_) | ChurnLensError::Api { .. } => FailureKind::NetworkFailure,
            ChurnLensError::MalformedResponse(_) => FailureKind::MalformedResponse,
            ChurnLensError::UndefinedRatio(_) => FailureKind::UndefinedRatio,
            ChurnLensError::IncompleteInput { .. } => FailureKind::IncompleteInput,
            ChurnLensError::Configuration(_) => FailureKind::Configuration,
        }
    }

    pub(crate) fn incomplete(field: &str, reason: impl Into<String>) -> Self {
        ChurnLensError::IncompleteInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ChurnLensError {
    fn from(err: serde_json::Error) -> Self {
        ChurnLensError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for ChurnLens operations
pub type Result<T> = std::result::Result<T, ChurnLensError>;
