use crate::errors::AuthError;

/// Failure classification for a callback validation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider reported an error, or the state check rejected the
    /// request
    AccessDenied,
    /// An expected query parameter, token, or payload was absent
    NoDataReturned,
    /// An underlying error was absorbed into the result channel
    Error,
}

/// Details of a failed validation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// The query parameter or payload the failure refers to
    pub field: Option<String>,
    /// Display form of the absorbed error, when `kind` is [`FailureKind::Error`]
    pub message: Option<String>,
}

/// Tagged outcome of a validation or exchange step
///
/// All variants are immutable value records scoped to a single callback
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    Failure(Failure),
}

impl ActionResult {
    pub const fn success() -> Self {
        Self::Success
    }

    pub fn access_denied(field: impl Into<String>) -> Self {
        Self::Failure(Failure {
            kind: FailureKind::AccessDenied,
            field: Some(field.into()),
            message: None,
        })
    }

    pub fn no_data_returned(field: impl Into<String>) -> Self {
        Self::Failure(Failure {
            kind: FailureKind::NoDataReturned,
            field: Some(field.into()),
            message: None,
        })
    }

    /// Map an absorbed error into the result channel
    pub fn from_error(error: &AuthError) -> Self {
        Self::Failure(Failure {
            kind: FailureKind::Error,
            field: None,
            message: Some(error.to_string()),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}
