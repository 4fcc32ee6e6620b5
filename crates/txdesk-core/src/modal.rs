//! Create/edit modal state machine
//!
//! The modal is either closed, creating a new record, or editing one
//! existing record. Submitting happens in two steps so that no lock has to
//! be held while the mutation is in flight: `prepare_*` validates the
//! current state and hands out a [`Submission`], `finish` applies the
//! outcome if the modal was not reopened in the meantime.

use crate::draft::{DraftField, TransactionDraft};
use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use txdesk_graphql::{Transaction, TransactionInput};

/// Name of the event fired after the transaction list changed
pub const TRANSACTIONS_CHANGED: &str = "transactions-changed";

/// Which form is shown, if any
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Closed,
    Creating,
    Editing(String),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

/// Signal that cached transaction lists are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub event: &'static str,
}

impl Default for Invalidation {
    fn default() -> Self {
        Self {
            event: TRANSACTIONS_CHANGED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    /// Record as returned by the mutation
    pub transaction: Transaction,
    pub invalidation: Invalidation,
}

impl MutationOutcome {
    pub fn new(kind: MutationKind, transaction: Transaction) -> Self {
        Self {
            kind,
            transaction,
            invalidation: Invalidation::default(),
        }
    }
}

/// Mutation request derived from the modal, detached from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    Create(TransactionInput),
    Update { id: String, input: TransactionInput },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    generation: u64,
    pub request: SubmissionRequest,
}

/// The transaction form: explicit state, draft and last inline error
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionModal {
    state: ModalState,
    draft: TransactionDraft,
    error: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl TransactionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// Message shown inline after a failed field change or submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open an empty form, discarding whatever draft was there
    pub fn open_create(&mut self) {
        self.reset(ModalState::Creating, TransactionDraft::default());
    }

    /// Open the form seeded from `tx`
    pub fn open_edit(&mut self, tx: &Transaction) {
        self.reset(ModalState::Editing(tx.id.clone()), TransactionDraft::from_transaction(tx));
    }

    /// Discard the draft and hide the form
    pub fn close(&mut self) {
        self.reset(ModalState::Closed, TransactionDraft::default());
    }

    fn reset(&mut self, state: ModalState, draft: TransactionDraft) {
        self.state = state;
        self.draft = draft;
        self.error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Apply a field change to the open form
    pub fn apply(&mut self, field: DraftField) -> CoreResult<()> {
        if !self.is_open() {
            return Err(CoreError::invalid_state("the form is closed"));
        }
        match self.draft.apply(field) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn prepare_create(&self) -> CoreResult<Submission> {
        match self.state {
            ModalState::Creating => Ok(self.submission(SubmissionRequest::Create(self.draft.to_input()))),
            _ => Err(CoreError::invalid_state("create is only available on a new transaction")),
        }
    }

    /// Update the record with `id`, which must be the one the form edits
    pub fn prepare_update(&self, id: &str) -> CoreResult<Submission> {
        self.ensure_editing(id, "update")?;
        Ok(self.submission(SubmissionRequest::Update {
            id: id.to_string(),
            input: self.draft.to_input(),
        }))
    }

    /// Delete the record with `id`, which must be the one the form edits
    pub fn prepare_delete(&self, id: &str) -> CoreResult<Submission> {
        self.ensure_editing(id, "delete")?;
        Ok(self.submission(SubmissionRequest::Delete { id: id.to_string() }))
    }

    fn ensure_editing(&self, id: &str, action: &str) -> CoreResult<()> {
        match &self.state {
            ModalState::Editing(open) if open == id => Ok(()),
            ModalState::Editing(open) => Err(CoreError::invalid_state(format!(
                "cannot {} transaction {} while the form edits {}",
                action, id, open
            ))),
            _ => Err(CoreError::invalid_state(format!("{} requires an existing transaction", action))),
        }
    }

    fn submission(&self, request: SubmissionRequest) -> Submission {
        Submission {
            generation: self.generation,
            request,
        }
    }

    /// Record the outcome of a submission.
    ///
    /// Success clears and closes the form; failure keeps it open with the
    /// error inline. Outcomes of submissions from an earlier opening of
    /// the form are ignored.
    pub fn finish<T>(&mut self, submission: &Submission, result: &CoreResult<T>) {
        if submission.generation != self.generation {
            return;
        }
        match result {
            Ok(_) => self.close(),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
