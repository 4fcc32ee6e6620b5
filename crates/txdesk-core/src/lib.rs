//! Transaction desk state and operations
//!
//! [`Desk`] is the single coordinator behind the web UI. It owns the filter
//! selection and the one transaction modal, and talks to the GraphQL API
//! through a [`TransactionApi`] handle. Its locks are never held across a
//! request to the API.

pub mod draft;
pub mod error;
pub mod home;
pub mod modal;
pub mod table;

use log::info;
use tokio::sync::RwLock;
use txdesk_graphql::{ApiRef, Transaction, TransactionApi};
use txdesk_utils::NumeralMode;

pub use draft::{parse_amount, DraftField, PaymentMethod, TransactionDraft};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use home::{HomeData, HomeFilters, ReferenceData};
pub use modal::{
    Invalidation, ModalState, MutationKind, MutationOutcome, Submission, SubmissionRequest, TransactionModal,
    TRANSACTIONS_CHANGED,
};
pub use table::{build_rows, TransactionRow};

/// Home data together with the filters it was derived under
#[derive(Debug, Clone)]
pub struct HomeView {
    pub data: HomeData,
    pub filters: HomeFilters,
}

impl HomeView {
    pub fn visible(&self) -> &[Transaction] {
        self.data.visible_transactions(&self.filters.company_id)
    }

    pub fn rows(&self) -> Vec<TransactionRow> {
        build_rows(self.visible(), &self.data.references, self.filters.numeral_mode)
    }
}

/// Coordinator of filters, modal and mutations
pub struct Desk {
    api: ApiRef,
    filters: RwLock<HomeFilters>,
    modal: RwLock<TransactionModal>,
    /// Last loaded users/merchants/companies, for rendering the form
    references: RwLock<Option<ReferenceData>>,
    logger: DefaultErrorLogger,
}

impl Desk {
    pub fn new(api: ApiRef, numeral_mode: NumeralMode) -> Self {
        Self {
            api,
            filters: RwLock::new(HomeFilters::new(numeral_mode)),
            modal: RwLock::new(TransactionModal::new()),
            references: RwLock::new(None),
            logger: DefaultErrorLogger,
        }
    }

    // ==================== Filters ====================

    pub async fn filters(&self) -> HomeFilters {
        self.filters.read().await.clone()
    }

    /// Update the company and/or numeral mode selection
    pub async fn set_filters(&self, company_id: Option<String>, numeral_mode: Option<NumeralMode>) -> HomeFilters {
        let mut filters = self.filters.write().await;
        if let Some(company_id) = company_id {
            filters.company_id = company_id;
        }
        if let Some(mode) = numeral_mode {
            filters.numeral_mode = mode;
        }
        info!("Filters set: company='{}' format={}", filters.company_id, filters.numeral_mode);
        filters.clone()
    }

    // ==================== Reads ====================

    /// Load everything the home page shows
    pub async fn home(&self) -> CoreResult<HomeView> {
        let filters = self.filters().await;
        let data = HomeData::load(self.api.as_ref())
            .await
            .map_err(|e| self.report(e, ErrorContext::new("load_home")))?;
        *self.references.write().await = Some(data.references.clone());
        Ok(HomeView { data, filters })
    }

    /// Users, merchants and companies for the form, loaded once and then
    /// refreshed by every [`Desk::home`] call
    pub async fn references(&self) -> CoreResult<ReferenceData> {
        if let Some(references) = self.references.read().await.as_ref() {
            return Ok(references.clone());
        }
        let references = ReferenceData::load(self.api.as_ref())
            .await
            .map_err(|e| self.report(e, ErrorContext::new("load_references")))?;
        *self.references.write().await = Some(references.clone());
        Ok(references)
    }

    async fn find_transaction(&self, id: &str) -> CoreResult<Transaction> {
        let transactions = self.api.transactions().await?;
        transactions
            .into_iter()
            .find(|tx| tx.id == id)
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })
    }

    // ==================== Modal ====================

    pub async fn modal(&self) -> TransactionModal {
        self.modal.read().await.clone()
    }

    pub async fn open_create(&self) -> TransactionModal {
        let mut modal = self.modal.write().await;
        modal.open_create();
        modal.clone()
    }

    /// Open the form for the record with `id`, read fresh from the API
    pub async fn open_edit(&self, id: &str) -> CoreResult<TransactionModal> {
        let tx = self
            .find_transaction(id)
            .await
            .map_err(|e| self.report(e, ErrorContext::new("open_edit").with_transaction(id)))?;
        let mut modal = self.modal.write().await;
        modal.open_edit(&tx);
        Ok(modal.clone())
    }

    /// Apply one field change.
    ///
    /// A rejected value is kept as the modal's inline error and the snapshot
    /// is still returned; only a closed modal is an error.
    pub async fn apply_draft(&self, field: DraftField) -> CoreResult<TransactionModal> {
        let mut modal = self.modal.write().await;
        match modal.apply(field) {
            Ok(()) => Ok(modal.clone()),
            Err(CoreError::Validation { .. }) => Ok(modal.clone()),
            Err(e) => Err(self.report(e, ErrorContext::new("apply_draft"))),
        }
    }

    pub async fn close_modal(&self) -> TransactionModal {
        let mut modal = self.modal.write().await;
        modal.close();
        modal.clone()
    }

    // ==================== Mutations ====================

    pub async fn submit_create(&self) -> CoreResult<MutationOutcome> {
        self.submit(ErrorContext::new("submit_create"), TransactionModal::prepare_create)
            .await
    }

    /// Update the record with `id`; refused unless the form is editing it
    pub async fn submit_update(&self, id: &str) -> CoreResult<MutationOutcome> {
        self.submit(ErrorContext::new("submit_update").with_transaction(id), |modal| {
            modal.prepare_update(id)
        })
        .await
    }

    /// Delete the record with `id`; refused unless the form is editing it
    pub async fn submit_delete(&self, id: &str) -> CoreResult<MutationOutcome> {
        self.submit(ErrorContext::new("submit_delete").with_transaction(id), |modal| {
            modal.prepare_delete(id)
        })
        .await
    }

    /// Check and snapshot under one lock, then send with no lock held
    async fn submit<F>(&self, context: ErrorContext, prepare: F) -> CoreResult<MutationOutcome>
    where
        F: FnOnce(&TransactionModal) -> CoreResult<Submission>,
    {
        let submission = {
            let modal = self.modal.read().await;
            prepare(&modal)
        }
        .map_err(|e| self.report(e, context.clone()))?;

        self.logger.log_debug("Sending mutation", &context);
        let result = self.execute(&submission.request).await;
        self.modal.write().await.finish(&submission, &result);

        match result {
            Ok(outcome) => {
                info!("Transaction {} {:?}", outcome.transaction.id, outcome.kind);
                Ok(outcome)
            }
            Err(e) => Err(self.report(e, context)),
        }
    }

    /// Send exactly one mutation
    async fn execute(&self, request: &SubmissionRequest) -> CoreResult<MutationOutcome> {
        let api: &dyn TransactionApi = self.api.as_ref();
        let outcome = match request {
            SubmissionRequest::Create(input) => {
                MutationOutcome::new(MutationKind::Created, api.create_transaction(input).await?)
            }
            SubmissionRequest::Update { id, input } => {
                MutationOutcome::new(MutationKind::Updated, api.update_transaction(id, input).await?)
            }
            SubmissionRequest::Delete { id } => {
                MutationOutcome::new(MutationKind::Deleted, api.delete_transaction(id).await?)
            }
        };
        Ok(outcome)
    }

    fn report(&self, error: CoreError, context: ErrorContext) -> CoreError {
        self.logger.log_error(&error, &context);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use txdesk_graphql::{GraphqlError, InMemoryApi, RecordedCall, TransactionInput};

    fn desk() -> (Arc<InMemoryApi>, Desk) {
        let api = Arc::new(InMemoryApi::with_demo_data());
        let desk = Desk::new(api.clone(), NumeralMode::Decimal);
        (api, desk)
    }

    #[tokio::test]
    async fn test_create_end_to_end() {
        let (api, desk) = desk();
        desk.open_create().await;
        for (name, value) in [
            ("userId", "u1"),
            ("merchantId", "m1"),
            ("companyId", "c1"),
            ("description", "coffee"),
            ("amount", "500"),
            ("payment", "debit"),
        ] {
            desk.apply_draft(DraftField::from_form(name, value).unwrap()).await.unwrap();
        }
        api.clear_calls();

        let outcome = desk.submit_create().await.unwrap();
        assert_eq!(outcome.kind, MutationKind::Created);
        assert_eq!(outcome.invalidation.event, TRANSACTIONS_CHANGED);

        let expected = TransactionInput {
            user_id: "u1".into(),
            description: "coffee".into(),
            merchant_id: "m1".into(),
            debit: true,
            credit: false,
            company_id: "c1".into(),
            amount: 500,
        };
        assert_eq!(api.calls(), vec![RecordedCall::Create(expected)]);

        let modal = desk.modal().await;
        assert_eq!(modal.state(), &ModalState::Closed);
        assert_eq!(modal.draft(), &TransactionDraft::default());
    }

    #[tokio::test]
    async fn test_delete_end_to_end() {
        let mut seed = InMemoryApi::with_demo_data().snapshot();
        seed[0].id = "t42".into();
        let api = Arc::new(InMemoryApi::new(vec![], vec![], vec![], seed));
        let desk = Desk::new(api.clone(), NumeralMode::Decimal);

        desk.open_edit("t42").await.unwrap();
        api.clear_calls();
        desk.submit_delete("t42").await.unwrap();

        assert_eq!(api.mutations(), vec![RecordedCall::Delete { id: "t42".into() }]);
        assert_eq!(api.calls().len(), 1);
        assert!(!desk.modal().await.is_open());
    }

    #[tokio::test]
    async fn test_update_sends_id_and_fields() {
        let (api, desk) = desk();
        desk.open_edit("t2").await.unwrap();
        desk.apply_draft(DraftField::Amount("12.9".into())).await.unwrap();
        desk.submit_update("t2").await.unwrap();

        match &api.mutations()[..] {
            [RecordedCall::Update { id, input }] => {
                assert_eq!(id, "t2");
                assert_eq!(input.amount, 12);
                assert!(input.credit && !input.debit);
            }
            other => panic!("unexpected mutations {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_mode_sends_nothing() {
        let (api, desk) = desk();
        let err = desk.submit_delete("t1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);

        desk.open_create().await;
        assert!(desk.submit_update("t1").await.is_err());
        assert!(api.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_submit_targets_only_the_open_record() {
        let (api, desk) = desk();
        desk.open_edit("t1").await.unwrap();
        // Another tab reopened the form on a different record
        desk.open_edit("t3").await.unwrap();

        let err = desk.submit_update("t1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);
        assert!(desk.submit_delete("t1").await.is_err());
        assert!(api.mutations().is_empty());
        assert_eq!(desk.modal().await.state(), &ModalState::Editing("t3".into()));

        desk.submit_delete("t3").await.unwrap();
        assert_eq!(api.mutations(), vec![RecordedCall::Delete { id: "t3".into() }]);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_modal_open() {
        let (api, desk) = desk();
        desk.open_create().await;
        desk.apply_draft(DraftField::Description("rejected".into())).await.unwrap();
        api.fail_mutations(Some(GraphqlError::Api {
            messages: vec!["companyId must not be empty".into()],
        }));

        let err = desk.submit_create().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(api.mutations().len(), 1);

        let modal = desk.modal().await;
        assert_eq!(modal.state(), &ModalState::Creating);
        assert_eq!(modal.draft().description, "rejected");
        assert!(modal.error().unwrap().contains("companyId must not be empty"));
    }

    #[tokio::test]
    async fn test_open_edit_unknown_id() {
        let (_api, desk) = desk();
        let err = desk.open_edit("t999").await.unwrap_err();
        assert_eq!(err, CoreError::NotFound { id: "t999".into() });
        assert!(!desk.modal().await.is_open());
    }

    #[tokio::test]
    async fn test_invalid_amount_is_inline() {
        let (_api, desk) = desk();
        desk.open_create().await;
        let modal = desk.apply_draft(DraftField::Amount("ten".into())).await.unwrap();
        assert!(modal.error().is_some());
        assert_eq!(modal.draft().amount, 0);

        desk.close_modal().await;
        assert!(desk.apply_draft(DraftField::Amount("1".into())).await.is_err());
    }

    #[tokio::test]
    async fn test_references_are_cached() {
        let (api, desk) = desk();
        desk.references().await.unwrap();
        desk.references().await.unwrap();
        assert_eq!(api.calls().len(), 3);

        desk.home().await.unwrap();
        api.clear_calls();
        assert_eq!(desk.references().await.unwrap().users.len(), 2);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_filters_drive_home_view() {
        let (_api, desk) = desk();
        desk.set_filters(Some("c2".into()), Some(NumeralMode::Roman)).await;
        let view = desk.home().await.unwrap();
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "t3");
        assert_eq!(rows[0].amount, "4500");
        assert_eq!(rows[0].company, "Globex");

        desk.set_filters(Some(String::new()), None).await;
        let view = desk.home().await.unwrap();
        assert_eq!(view.rows()[0].amount, "MCMXCIV");
        assert_eq!(view.visible().len(), 3);
    }
}
