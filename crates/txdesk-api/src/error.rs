//! Error types for txdesk-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use txdesk_core::{CoreError, ErrorCode};
use txdesk_utils::escape_html;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e.code() {
                ErrorCode::NetworkError | ErrorCode::MalformedResponse => StatusCode::BAD_GATEWAY,
                ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidState => StatusCode::CONFLICT,
            },
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// Inline error box shown in place of the requested fragment
pub fn error_fragment(title: &str, message: &str, suggestions: &[String]) -> String {
    let items: String = suggestions
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect();
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4' data-testid='error'>
    <div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>{}</span></div>
    <p class='text-sm text-red-600 mt-1'>{}</p>
    <ul class='text-sm text-red-500 mt-2 list-disc list-inside'>{}</ul>
</div>"#,
        escape_html(title),
        escape_html(message),
        items
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Core(e) => {
                let details = e.to_details();
                error_fragment(&details.code.to_string(), &e.to_string(), &details.suggestions)
            }
            ApiError::BadRequest { message } => error_fragment("BAD_REQUEST", message, &[]),
        };
        (status, Html(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(CoreError::NotFound { id: "t1".into() });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError::from(CoreError::invalid_state("closed"));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let upstream = ApiError::from(CoreError::Network { message: "refused".into() });
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_fragment_escapes() {
        let html = error_fragment("E", "<b>bad</b>", &["try <again>".to_string()]);
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("<li>try &lt;again&gt;</li>"));
    }
}
