// src/errors.rs

use thiserror::Error;

pub type DraftResult<T> = Result<T, DraftError>;

/// Everything that can go wrong talking to the completion API, plus the
/// handful of local failures (config file, JSON) around it.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("server or model failure: {0}")]
    Server(String),

    #[error("{0}")]
    Unknown(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DraftError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        DraftError::Config(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        DraftError::Unknown(msg.into())
    }

    /// Classifies a non-success HTTP status from the completion endpoint.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let detail = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };

        match status {
            401 | 403 => DraftError::Auth(detail),
            429 => DraftError::RateLimited(detail),
            500..=599 => DraftError::Server(detail),
            _ => DraftError::Unknown(detail),
        }
    }

    /// The fixed, user-facing text shown in place of a result.
    pub fn user_message(&self) -> String {
        match self {
            DraftError::Auth(_) => "❌ Invalid API key. Please check your key.".to_string(),
            DraftError::RateLimited(_) => "⏱️ Rate limit reached. Please wait a moment.".to_string(),
            DraftError::Network(_) => "🌐 Network error. Please check your connection.".to_string(),
            DraftError::Server(_) => "🚫 Server/Model error. Please try again later.".to_string(),
            DraftError::Unknown(raw) => format!("❌ Error: {}", raw),
            other => format!("❌ Error: {}", other),
        }
    }
}

impl From<reqwest::Error> for DraftError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return DraftError::from_status(status.as_u16(), err.to_string());
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return DraftError::Network(err.to_string());
        }
        DraftError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(DraftError::from_status(401, ""), DraftError::Auth(_)));
        assert!(matches!(DraftError::from_status(403, "nope"), DraftError::Auth(_)));
        assert!(matches!(DraftError::from_status(429, ""), DraftError::RateLimited(_)));
        assert!(matches!(DraftError::from_status(503, ""), DraftError::Server(_)));
        assert!(matches!(DraftError::from_status(404, ""), DraftError::Unknown(_)));
    }

    #[test]
    fn test_user_messages_are_fixed_per_category() {
        assert_eq!(
            DraftError::Auth("whatever".into()).user_message(),
            "❌ Invalid API key. Please check your key."
        );
        assert_eq!(
            DraftError::RateLimited("x".into()).user_message(),
            "⏱️ Rate limit reached. Please wait a moment."
        );
        assert_eq!(
            DraftError::Network("x".into()).user_message(),
            "🌐 Network error. Please check your connection."
        );
        assert_eq!(
            DraftError::Server("x".into()).user_message(),
            "🚫 Server/Model error. Please try again later."
        );
    }

    #[test]
    fn test_unknown_echoes_raw_description() {
        let err = DraftError::Unknown("model exploded in a novel way".into());
        assert_eq!(err.user_message(), "❌ Error: model exploded in a novel way");
    }
}
