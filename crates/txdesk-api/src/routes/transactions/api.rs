//! Transactions endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Visible transactions (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)
//! - htmx_transaction_create_form: Open the form in create mode
//! - htmx_transaction_edit_form: Open the form in edit mode
//! - htmx_transaction_draft: Apply a field change to the form
//! - htmx_modal_close: Close the form, discarding the draft
//! - htmx_transaction_store / update / delete: Submit the form

use super::page::{render_load_error, render_modal, render_table};
use crate::error::{ApiError, ApiResult};
use crate::routes::parse_form;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use txdesk_core::{CoreError, CoreResult, Desk, DraftField, MutationOutcome};

/// Visible transactions under the current filters (JSON API)
pub async fn api_transactions(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let view = state.desk.home().await?;
    Ok(Json(serde_json::json!({
        "filters": view.filters,
        "transactions": view.visible(),
    })))
}

/// Table fragment, or the error placeholder when the reads failed
pub(crate) async fn table_fragment(desk: &Desk) -> String {
    match desk.home().await {
        Ok(view) => render_table(&view.rows()),
        Err(e) => render_load_error(&e),
    }
}

/// HTMX: Transaction table
pub async fn htmx_transactions_list(State(state): State<AppState>) -> Html<String> {
    Html(table_fragment(&state.desk).await)
}

/// HTMX: Open the form for a new transaction
pub async fn htmx_transaction_create_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let modal = state.desk.open_create().await;
    let refs = state.desk.references().await?;
    Ok(Html(render_modal(&modal, &refs)))
}

/// HTMX: Open the form for an existing transaction
pub async fn htmx_transaction_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let modal = state.desk.open_edit(&id).await?;
    let refs = state.desk.references().await?;
    Ok(Html(render_modal(&modal, &refs)))
}

/// HTMX: Apply field changes posted by the form
pub async fn htmx_transaction_draft(State(state): State<AppState>, body: String) -> ApiResult<Html<String>> {
    let params = parse_form(&body);
    if params.is_empty() {
        return Err(ApiError::bad_request("no form field given"));
    }

    let mut modal = state.desk.modal().await;
    for (name, value) in &params {
        let field = DraftField::from_form(name, value)?;
        modal = state.desk.apply_draft(field).await?;
    }

    let refs = state.desk.references().await?;
    Ok(Html(render_modal(&modal, &refs)))
}

/// HTMX: Close the form
pub async fn htmx_modal_close(State(state): State<AppState>) -> Html<String> {
    state.desk.close_modal().await;
    Html(String::new())
}

/// HTMX: Submit the form in create mode
pub async fn htmx_transaction_store(State(state): State<AppState>) -> ApiResult<Response> {
    let result = state.desk.submit_create().await;
    mutation_response(&state, result).await
}

/// HTMX: Submit the form in edit mode
pub async fn htmx_transaction_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let result = state.desk.submit_update(&id).await;
    mutation_response(&state, result).await
}

/// HTMX: Delete the record the form is editing
pub async fn htmx_transaction_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let result = state.desk.submit_delete(&id).await;
    mutation_response(&state, result).await
}

/// Success closes the form and tells the table to refresh; failure shows
/// the form again with the error inline.
async fn mutation_response(state: &AppState, result: CoreResult<MutationOutcome>) -> ApiResult<Response> {
    match result {
        Ok(outcome) => Ok(([("HX-Trigger", outcome.invalidation.event)], Html(String::new())).into_response()),
        Err(e @ CoreError::InvalidState { .. }) => Err(e.into()),
        Err(_) => {
            let modal = state.desk.modal().await;
            let refs = state.desk.references().await.unwrap_or_default();
            Ok(Html(render_modal(&modal, &refs)).into_response())
        }
    }
}
