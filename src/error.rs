use serde_json::Value;
use thiserror::Error;

use crate::domain::ProblemDetails;
use crate::transport::TransportError;

/// Failure of a single REST call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No HTTP response at all (status 0).
    #[error("network error: {0}")]
    Network(String),
    #[error("not found: {0}")]
    NotFound(ProblemDetails),
    #[error("conflict: {0}")]
    Conflict(ProblemDetails),
    /// Any other 4xx, usually a validation problem code.
    #[error("rejected: {0}")]
    Rejected(ProblemDetails),
    #[error("server error: {0}")]
    Server(ProblemDetails),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used by the form controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Generic,
}

impl ApiError {
    /// Builds the error for a non-2xx response. A body that is not a problem
    /// document is replaced by a placeholder derived from the status.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let mut problem = body
            .and_then(|body| serde_json::from_value::<ProblemDetails>(body).ok())
            .filter(|problem| !problem.kind.is_empty() || !problem.message.is_empty())
            .unwrap_or_else(|| ProblemDetails::from_status(status));
        if problem.status == 0 {
            problem.status = status;
        }

        if status == 409 || problem.kind.ends_with("-conflict") {
            ApiError::Conflict(problem)
        } else if status == 404 {
            ApiError::NotFound(problem)
        } else if (400..500).contains(&status) {
            ApiError::Rejected(problem)
        } else {
            ApiError::Server(problem)
        }
    }

    /// HTTP status, with 0 standing for "no response".
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Network(_) | ApiError::Serialization(_) => 0,
            ApiError::NotFound(problem)
            | ApiError::Conflict(problem)
            | ApiError::Rejected(problem)
            | ApiError::Server(problem) => problem.status,
        }
    }

    pub fn problem(&self) -> Option<&ProblemDetails> {
        match self {
            ApiError::NotFound(problem)
            | ApiError::Conflict(problem)
            | ApiError::Rejected(problem)
            | ApiError::Server(problem) => Some(problem),
            ApiError::Network(_) | ApiError::Serialization(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Rejected(_) => ErrorKind::Validation,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Generic,
        }
    }

    /// Text shown to the operator: the problem message when the server sent
    /// one, otherwise the transport message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(message) | ApiError::Serialization(message) => message.clone(),
            ApiError::NotFound(problem)
            | ApiError::Conflict(problem)
            | ApiError::Rejected(problem)
            | ApiError::Server(problem) => {
                if problem.message.is_empty() {
                    problem.to_string()
                } else {
                    problem.message.clone()
                }
            }
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        ApiError::Network(error.0)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialization(error.to_string())
    }
}
