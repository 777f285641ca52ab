use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured error payload returned by the backend on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Machine readable problem code, e.g. `customer-name-is-empty`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "statusCode")]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ProblemDetails {
    pub fn new(kind: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            status,
            title: None,
        }
    }

    /// Placeholder used when a failed response carries no problem body.
    pub fn from_status(status: u16) -> Self {
        Self::new(
            format!("http-{status}"),
            format!("request failed with status {status}"),
            status,
        )
    }

    pub fn is(&self, code: &str) -> bool {
        self.kind == code
    }
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{} (status {})", self.kind, self.status)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_accepts_status_code_alias_and_title() {
        let json = r#"{"type":"customer-conflict","title":"Conflict","message":"stale version","statusCode":409}"#;
        let problem: ProblemDetails = serde_json::from_str(json).unwrap();
        assert_eq!(problem.kind, "customer-conflict");
        assert_eq!(problem.status, 409);
        assert_eq!(problem.title.as_deref(), Some("Conflict"));
        assert_eq!(problem.to_string(), "customer-conflict: stale version");
    }

    #[test]
    fn test_problem_from_status_without_body() {
        let problem = ProblemDetails::from_status(502);
        assert_eq!(problem.kind, "http-502");
        assert_eq!(problem.status, 502);
    }
}
