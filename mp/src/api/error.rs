//! Planner API error types

use thiserror::Error;

/// Errors that can occur while talking to the planning service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `detail` is the server's message when it sent one
    #[error("Server error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied detail message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message safe to show a user: the server detail, or the given fallback
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_only_from_server_errors() {
        let err = ApiError::Server {
            status: 500,
            detail: Some("model unavailable".to_string()),
        };
        assert_eq!(err.detail(), Some("model unavailable"));

        let err = ApiError::Decode("expected array".to_string());
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message("fallback"), "fallback");

        let err = ApiError::Server {
            status: 400,
            detail: Some("weekly_goal is required".to_string()),
        };
        assert_eq!(err.user_message("fallback"), "weekly_goal is required");
    }

    #[test]
    fn test_display_includes_status() {
        let err = ApiError::Server {
            status: 404,
            detail: None,
        };
        assert_eq!(err.to_string(), "Server error 404: no detail");
    }
}
