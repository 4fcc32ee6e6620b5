//! Filter routes
//!
//! The company selection and the numeral format are global to the server,
//! like the rest of the UI state.

use crate::error::{ApiError, ApiResult};
use crate::routes::parse_form;
use crate::routes::transactions::api::table_fragment;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use std::collections::HashMap;
use txdesk_core::HomeFilters;
use txdesk_utils::NumeralMode;

/// Get current filters (JSON API)
pub async fn api_filters(State(state): State<AppState>) -> Json<HomeFilters> {
    Json(state.desk.filters().await)
}

/// Set filters (POST) - supports query params and form body
///
/// `company` selects a company id (empty for all), `format` is `decimal`
/// or `roman`. Responds with the re-rendered table.
pub async fn api_set_filters(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> ApiResult<Html<String>> {
    let mut params = parse_form(&body);
    // Query parameters win over the body
    params.extend(query);

    let company = params.get("company").map(|c| c.trim().to_string());
    let format = params
        .get("format")
        .map(|f| f.parse::<NumeralMode>())
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state.desk.set_filters(company, format).await;
    Ok(Html(table_fragment(&state.desk).await))
}
