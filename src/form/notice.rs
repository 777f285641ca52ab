use std::time::Duration;

use serde::Serialize;

use crate::error::ApiError;

/// How long a detail-form notice stays on screen.
pub const DETAIL_NOTICE_DURATION: Duration = Duration::from_secs(10);
/// How long a list notice stays on screen.
pub const LIST_NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A transient, non-blocking message (toast/snackbar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    #[serde(with = "millis")]
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message, Severity::Error, duration)
    }

    pub fn warning(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message, Severity::Warning, duration)
    }

    /// Detail-form notice for a failure that has no better mapping.
    pub fn unexpected(error: &ApiError) -> Self {
        Self::error(
            format!("an unexpected error happened: {}", error.user_message()),
            DETAIL_NOTICE_DURATION,
        )
    }

    pub fn conflict(resource_name: &str) -> Self {
        Self::warning(
            format!("{resource_name} update conflict, please reload the page"),
            DETAIL_NOTICE_DURATION,
        )
    }

    /// Notice published by a list whose page request failed.
    pub fn list_failure(error: &ApiError) -> Self {
        Self::error(error.user_message(), LIST_NOTICE_DURATION)
    }
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProblemDetails;

    #[test]
    fn test_conflict_notice() {
        let notice = Notice::conflict("order");
        assert_eq!(notice.message, "order update conflict, please reload the page");
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.duration, Duration::from_secs(10));
    }

    #[test]
    fn test_unexpected_notice_uses_problem_message() {
        let error = ApiError::Server(ProblemDetails::new("internal", "database is down", 500));
        assert_eq!(
            Notice::unexpected(&error).message,
            "an unexpected error happened: database is down"
        );
    }

    #[test]
    fn test_notice_serializes_duration_in_millis() {
        let notice = Notice::list_failure(&ApiError::Network("offline".to_string()));
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["duration"], 5000);
        assert_eq!(json["severity"], "error");
    }
}
