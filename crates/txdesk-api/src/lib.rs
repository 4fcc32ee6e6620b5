//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::home: Home page with filter bar and table container
//! - routes::transactions: Table fragment, modal form and mutations
//! - routes::filters: Company and numeral format selection

pub mod error;
pub mod routes;

use axum::http::{HeaderMap, HeaderValue, Method};
use axum::{
    routing::{get, post, put},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txdesk_config::Config;
use txdesk_core::Desk;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<Desk>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::filters::{api_filters, api_set_filters};
    use routes::home::index_page;
    use routes::transactions::{
        api_transactions, htmx_modal_close, htmx_transaction_create_form, htmx_transaction_delete,
        htmx_transaction_draft, htmx_transaction_edit_form, htmx_transaction_store, htmx_transaction_update,
        htmx_transactions_list,
    };

    let cors = cors_layer(&state.config.server.cors_origins);

    let router = Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/filters", get(api_filters).post(api_set_filters))
        // Pages
        .route("/", get(index_page))
        // HTMX fragments
        .route("/transactions", post(htmx_transaction_store))
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/create", get(htmx_transaction_create_form))
        .route("/transactions/draft", post(htmx_transaction_draft))
        .route("/transactions/modal/close", post(htmx_modal_close))
        .route("/transactions/:id/edit", get(htmx_transaction_edit_form))
        .route("/transactions/:id", put(htmx_transaction_update).delete(htmx_transaction_delete))
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS for the configured origins, none when the list is empty
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(tower_http::cors::Any),
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - txdesk</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <script>
        // Error fragments replace their target like any other response
        document.body.addEventListener('htmx:beforeSwap', function(e) {{
            if (e.detail.xhr.status >= 400) {{
                e.detail.shouldSwap = true;
                e.detail.isError = false;
            }}
        }});
    </script>
</body>
</html>"#,
        txdesk_utils::escape_html(title),
        content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='max-w-6xl mx-auto p-6'>{}</main>"#, inner_content)
    } else {
        base_html(
            title,
            &format!(
                r#"<header class='bg-white border-b'><div class='max-w-6xl mx-auto px-6 py-4'><h1 class='text-xl font-bold text-indigo-600'>txdesk</h1></div></header>
<main class='max-w-6xl mx-auto p-6'>{}</main>"#,
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(config: Config, desk: Arc<Desk>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState { desk, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Starting txdesk server on http://{}", addr);
    info!("Available routes:");
    info!("  - / (Transactions)");
    info!("  - /api/* (JSON endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_partial_for_htmx() {
        let mut headers = HeaderMap::new();
        let full = page_response(&headers, "Home", "<p>hi</p>");
        assert!(full.starts_with("<!DOCTYPE html>"));
        assert!(full.contains("htmx.org"));

        headers.insert("hx-request", HeaderValue::from_static("true"));
        let partial = page_response(&headers, "Home", "<p>hi</p>");
        assert!(!partial.contains("<html"));
        assert!(partial.contains("<p>hi</p>"));
    }

    #[test]
    fn test_cors_layer_only_with_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_some());
    }
}
