//! Home page: filter bar, table container and modal container

use super::transactions::page::{render_modal, LOADING_PLACEHOLDER};
use crate::{page_response, AppState};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use txdesk_core::{HomeFilters, ReferenceData, TRANSACTIONS_CHANGED};
use txdesk_utils::{escape_html, NumeralMode};

fn filter_bar(filters: &HomeFilters, refs: &ReferenceData) -> String {
    let companies: String = refs
        .companies
        .iter()
        .map(|c| {
            format!(
                "<option value='{}' {}>{}</option>",
                escape_html(&c.id),
                if c.id == filters.company_id { "selected" } else { "" },
                escape_html(&c.name)
            )
        })
        .collect();

    let formats: String = [NumeralMode::Decimal, NumeralMode::Roman]
        .iter()
        .map(|mode| {
            format!(
                "<option value='{}' {}>{}</option>",
                mode,
                if *mode == filters.numeral_mode { "selected" } else { "" },
                match mode {
                    NumeralMode::Decimal => "Numbers",
                    NumeralMode::Roman => "Roman numerals",
                }
            )
        })
        .collect();

    format!(
        r#"<div class='flex flex-wrap items-center gap-4 mb-4'>
    <select name='company' hx-post='/api/filters' hx-trigger='change' hx-target='#transactions-table' hx-swap='innerHTML' class='px-3 py-2 border rounded-lg bg-white' data-testid='company-filter'>
        <option value='' {}>All companies</option>{}
    </select>
    <select name='format' hx-post='/api/filters' hx-trigger='change' hx-target='#transactions-table' hx-swap='innerHTML' class='px-3 py-2 border rounded-lg bg-white' data-testid='format-filter'>{}</select>
</div>"#,
        if filters.company_id.is_empty() { "selected" } else { "" },
        companies,
        formats
    )
}

/// Home page
pub async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let filters = state.desk.filters().await;
    // The table reports read failures itself; the filter bar just goes without companies
    let refs = state.desk.references().await.unwrap_or_default();
    let modal = state.desk.modal().await;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
    <h2 class='text-2xl font-bold'>Transactions</h2>
    <button hx-get='/transactions/create' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700' data-testid='add-transaction'>Add Transaction</button>
</div>
{}
<div id='transactions-table' hx-get='/transactions/list' hx-trigger='load, {} from:body' hx-swap='innerHTML'>{}</div>
<div id='modal-container'>{}</div>"#,
        filter_bar(&filters, &refs),
        TRANSACTIONS_CHANGED,
        LOADING_PLACEHOLDER,
        render_modal(&modal, &refs)
    );

    Html(page_response(&headers, "Transactions", &inner_content))
}
