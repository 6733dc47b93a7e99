use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform failure shape returned by every service operation.
///
/// Transport, HTTP, decode and service-reported failures all collapse into
/// this one type; callers only look at `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Extract a service-reported error from a decoded response body.
    ///
    /// Returns `None` when the body has no `error` member, or when it is
    /// `null`/`false`.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(message) => Some(Self::new(message.clone())),
            other => Some(Self::new(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_reads_string_error() {
        let body = json!({ "error": "User already exists" });
        assert_eq!(
            ErrorResult::from_body(&body),
            Some(ErrorResult::new("User already exists"))
        );
    }

    #[test]
    fn test_from_body_ignores_resources() {
        let body = json!({ "user": "test", "currency": "$", "balance": 10 });
        assert_eq!(ErrorResult::from_body(&body), None);
        assert_eq!(ErrorResult::from_body(&json!({ "error": null })), None);
    }
}
