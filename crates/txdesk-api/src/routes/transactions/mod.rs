//! Transaction routes - table, modal form and mutations
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod api;
pub mod page;

pub use api::{
    api_transactions,
    htmx_modal_close,
    htmx_transaction_create_form,
    htmx_transaction_delete,
    htmx_transaction_draft,
    htmx_transaction_edit_form,
    htmx_transaction_store,
    htmx_transaction_update,
    htmx_transactions_list,
};
