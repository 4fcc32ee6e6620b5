//! Error types for txdesk-graphql

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphqlError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("GraphQL endpoint answered with HTTP {status}")]
    Http { status: u16 },

    #[error("API rejected the request: {}", .messages.join("; "))]
    Api { messages: Vec<String> },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl GraphqlError {
    /// Whether a retry has a chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            GraphqlError::Network { .. } => true,
            GraphqlError::Http { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GraphqlError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            GraphqlError::Http { status: status.as_u16() }
        } else if error.is_decode() {
            GraphqlError::MalformedResponse { message: error.to_string() }
        } else {
            GraphqlError::Network { message: error.to_string() }
        }
    }
}

pub type GraphqlResult<T> = Result<T, GraphqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GraphqlError::Network { message: "refused".into() }.is_transient());
        assert!(GraphqlError::Http { status: 503 }.is_transient());
        assert!(GraphqlError::Http { status: 429 }.is_transient());
        assert!(!GraphqlError::Http { status: 400 }.is_transient());
        assert!(!GraphqlError::Api { messages: vec!["bad".into()] }.is_transient());
        assert!(!GraphqlError::NotFound { message: "t1".into() }.is_transient());
    }

    #[test]
    fn test_api_error_joins_messages() {
        let err = GraphqlError::Api {
            messages: vec!["amount is required".into(), "userId is invalid".into()],
        };
        assert_eq!(err.to_string(), "API rejected the request: amount is required; userId is invalid");
    }
}
