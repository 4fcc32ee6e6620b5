//! Error types for txdesk-core
//!
//! Every failure reaching the UI is a [`CoreError`]. Each carries an error
//! code and a severity, and can be expanded into [`ErrorDetails`] with
//! suggestions for the operator.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use txdesk_graphql::GraphqlError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// API unreachable or failing
    NetworkError,
    /// Input rejected locally or by the API
    ValidationError,
    /// Transaction not found
    TransactionNotFound,
    /// API answered with something we could not read
    MalformedResponse,
    /// Operation not allowed in the current modal state
    InvalidState,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            ErrorCode::InvalidState => write!(f, "INVALID_STATE"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for txdesk-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Validation error: {message}")]
    Validation { field: Option<String>, message: String },

    #[error("Transaction not found: {id}")]
    NotFound { id: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },
}

impl CoreError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CoreError::InvalidState { message: message.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Network { .. } => ErrorCode::NetworkError,
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            CoreError::InvalidState { .. } => ErrorCode::InvalidState,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Network { .. } => ErrorSeverity::Error,
            CoreError::Validation { .. } => ErrorSeverity::Warning,
            CoreError::NotFound { .. } => ErrorSeverity::Info,
            CoreError::MalformedResponse { .. } => ErrorSeverity::Error,
            CoreError::InvalidState { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Network { .. } => {
                details = details.with_suggestion("Check that the GraphQL API is running and reachable.".to_string());
                details = details.with_suggestion("Verify `api.endpoint` in the configuration file.".to_string());
            }
            CoreError::Validation { field, message } => {
                details = details.with_detail(serde_json::json!({ "field": field, "validation_message": message }));
                details = details.with_suggestion("Correct the highlighted field and submit again.".to_string());
            }
            CoreError::NotFound { .. } => {
                details = details.with_suggestion("The transaction may have been deleted. Reload the list.".to_string());
            }
            CoreError::MalformedResponse { message } => {
                details = details.with_detail(serde_json::json!({ "response_message": message }));
                details = details.with_suggestion("Check that the endpoint serves the transactions schema.".to_string());
            }
            CoreError::InvalidState { .. } => {
                details = details.with_suggestion("Close the form and open it again.".to_string());
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<GraphqlError> for CoreError {
    fn from(error: GraphqlError) -> Self {
        match error {
            GraphqlError::Network { message } => CoreError::Network { message },
            GraphqlError::Http { status } => CoreError::Network {
                message: format!("API responded with HTTP {}", status),
            },
            GraphqlError::Api { messages } => CoreError::Validation {
                field: None,
                message: messages.join("; "),
            },
            GraphqlError::NotFound { message } => CoreError::NotFound { id: message },
            GraphqlError::MalformedResponse { message } => CoreError::MalformedResponse { message },
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Transaction the operation targeted, if any
    pub transaction_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            transaction_id: None,
        }
    }

    pub fn with_transaction(mut self, id: &str) -> Self {
        self.transaction_id = Some(id.to_string());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let message = format!(
            "[{}] {} - Operation: {} - Transaction: {:?}",
            error.code(),
            error,
            context.operation,
            context.transaction_id
        );
        match error.severity() {
            ErrorSeverity::Info => log::info!(target: "txdesk::error", "{}", message),
            ErrorSeverity::Warning => log::warn!(target: "txdesk::error", "{}", message),
            ErrorSeverity::Error => log::error!(target: "txdesk::error", "{}", message),
        }
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "txdesk::error",
            "{} - Operation: {} - Transaction: {:?}",
            message,
            context.operation,
            context.transaction_id
        );
    }
}
