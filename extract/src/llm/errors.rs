//! Errors from the completion capability.
//!
//! Connection, rate-limit, and generic API errors are all treated
//! identically by the orchestrator: the chunk's failure is logged and
//! processing continues with the remaining chunks.

use thiserror::Error;

/// A wrapper for all kinds of completion-side failures.
#[derive(Debug, Clone, Error)]
pub enum LLMError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The API rejected the request with a rate limit.
    #[error("rate limited by the completion API")]
    RateLimited,

    /// Got a 401/403 response, most likely a credentials problem.
    #[error("got 4xx response, possible credentials error")]
    Credential,

    /// A network connectivity error occurred.
    #[error("a network connectivity error occurred")]
    Network,

    /// Some other non-success HTTP status.
    #[error("unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// A required environment variable could not be fetched.
    #[error("environment variable could not be fetched")]
    Env,

    /// The response body did not deserialize into the expected shape.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Anything else.
    #[error("completion request failed: {0}")]
    Generic(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(error: reqwest::Error) -> LLMError {
        if error.is_timeout() {
            return LLMError::Timeout;
        }

        if let Some(status) = error.status() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return LLMError::RateLimited;
            }
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return LLMError::Credential;
            }
            return LLMError::HttpStatus(status.as_u16());
        }

        if error.is_connect() {
            return LLMError::Network;
        }

        LLMError::Generic(error.to_string())
    }
}

impl From<std::env::VarError> for LLMError {
    fn from(_error: std::env::VarError) -> LLMError {
        LLMError::Env
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(error: serde_json::Error) -> LLMError {
        LLMError::Deserialization(error.to_string())
    }
}
