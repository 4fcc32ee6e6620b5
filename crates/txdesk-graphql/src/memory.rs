//! In-memory implementation of the transactions API
//!
//! Behaves like the real API from the caller's point of view: reads return
//! nested summaries, mutations return flat records, unknown ids are
//! `NotFound`. Every call is recorded so callers can assert on exactly
//! which requests were issued.

use crate::error::{GraphqlError, GraphqlResult};
use crate::types::{Company, CompanySummary, Merchant, Transaction, TransactionInput, User};
use crate::TransactionApi;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Size of the call log; older entries are dropped first
pub const MAX_RECORDED_CALLS: usize = 256;

/// One request received by [`InMemoryApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Transactions,
    Users,
    Merchants,
    Companies,
    Create(TransactionInput),
    Update { id: String, input: TransactionInput },
    Delete { id: String },
}

impl RecordedCall {
    pub fn is_mutation(&self) -> bool {
        matches!(self, RecordedCall::Create(_) | RecordedCall::Update { .. } | RecordedCall::Delete { .. })
    }
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    merchants: Vec<Merchant>,
    companies: Vec<CompanySummary>,
    transactions: Vec<Transaction>,
    next_id: u64,
    calls: VecDeque<RecordedCall>,
    fail_reads: Option<GraphqlError>,
    fail_mutations: Option<GraphqlError>,
}

impl Store {
    fn record(&mut self, call: RecordedCall) {
        if self.calls.len() == MAX_RECORDED_CALLS {
            self.calls.pop_front();
        }
        self.calls.push_back(call);
    }

    /// Flat record plus nested summaries, as read queries return it
    fn expand(&self, tx: &Transaction) -> Transaction {
        let mut out = tx.clone();
        out.user = self.users.iter().find(|u| u.id == tx.user_id).cloned();
        out.merchant = self.merchants.iter().find(|m| m.id == tx.merchant_id).cloned();
        out.company = self.companies.iter().find(|c| c.id == tx.company_id).cloned();
        out
    }

    fn check_read(&self) -> GraphqlResult<()> {
        match &self.fail_reads {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn check_mutation(&self) -> GraphqlResult<()> {
        match &self.fail_mutations {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn flat(tx: &Transaction) -> Transaction {
    Transaction {
        user: None,
        merchant: None,
        company: None,
        ..tx.clone()
    }
}

fn from_input(id: String, input: &TransactionInput) -> Transaction {
    Transaction {
        id,
        user_id: input.user_id.clone(),
        company_id: input.company_id.clone(),
        merchant_id: input.merchant_id.clone(),
        description: input.description.clone(),
        amount: input.amount,
        debit: input.debit,
        credit: input.credit,
        user: None,
        merchant: None,
        company: None,
    }
}

/// First free id for generated `t<n>` records
fn next_id_after(transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .filter_map(|tx| tx.id.strip_prefix('t')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Thread-safe in-memory API
#[derive(Debug, Default)]
pub struct InMemoryApi {
    store: Mutex<Store>,
}

impl InMemoryApi {
    pub fn new(
        users: Vec<User>,
        merchants: Vec<Merchant>,
        companies: Vec<CompanySummary>,
        transactions: Vec<Transaction>,
    ) -> Self {
        let next_id = next_id_after(&transactions);
        Self {
            store: Mutex::new(Store {
                users,
                merchants,
                companies,
                transactions: transactions.iter().map(flat).collect(),
                next_id,
                ..Store::default()
            }),
        }
    }

    /// A small data set for running the UI without an API server
    pub fn with_demo_data() -> Self {
        let users = vec![
            User { id: "u1".into(), first_name: "Ada".into(), last_name: "Lovelace".into() },
            User { id: "u2".into(), first_name: "Grace".into(), last_name: "Hopper".into() },
        ];
        let merchants = vec![
            Merchant { id: "m1".into(), name: "Bean Bar".into() },
            Merchant { id: "m2".into(), name: "Office Supply Co".into() },
        ];
        let companies = vec![
            CompanySummary { id: "c1".into(), name: "Acme".into() },
            CompanySummary { id: "c2".into(), name: "Globex".into() },
        ];
        let tx = |id: &str, user: &str, merchant: &str, company: &str, description: &str, amount: i64, debit: bool| Transaction {
            id: id.into(),
            user_id: user.into(),
            company_id: company.into(),
            merchant_id: merchant.into(),
            description: description.into(),
            amount,
            debit,
            credit: !debit,
            user: None,
            merchant: None,
            company: None,
        };
        let transactions = vec![
            tx("t1", "u1", "m1", "c1", "Team coffee", 1994, true),
            tx("t2", "u2", "m2", "c1", "Printer paper", 944, false),
            tx("t3", "u1", "m2", "c2", "Desk lamp", 4500, true),
        ];
        Self::new(users, merchants, companies, transactions)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The last [`MAX_RECORDED_CALLS`] requests, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.iter().cloned().collect()
    }

    /// Only the mutations received so far
    pub fn mutations(&self) -> Vec<RecordedCall> {
        self.lock().calls.iter().filter(|c| c.is_mutation()).cloned().collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every read fail with the given error (`None` restores normal reads)
    pub fn fail_reads(&self, error: Option<GraphqlError>) {
        self.lock().fail_reads = error;
    }

    /// Make every mutation fail with the given error (`None` restores normal mutations)
    pub fn fail_mutations(&self, error: Option<GraphqlError>) {
        self.lock().fail_mutations = error;
    }

    /// Current flat records, bypassing the call log
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }
}

#[async_trait]
impl TransactionApi for InMemoryApi {
    async fn transactions(&self) -> GraphqlResult<Vec<Transaction>> {
        let mut store = self.lock();
        store.record(RecordedCall::Transactions);
        store.check_read()?;
        Ok(store.transactions.iter().map(|tx| store.expand(tx)).collect())
    }

    async fn users(&self) -> GraphqlResult<Vec<User>> {
        let mut store = self.lock();
        store.record(RecordedCall::Users);
        store.check_read()?;
        Ok(store.users.clone())
    }

    async fn merchants(&self) -> GraphqlResult<Vec<Merchant>> {
        let mut store = self.lock();
        store.record(RecordedCall::Merchants);
        store.check_read()?;
        Ok(store.merchants.clone())
    }

    async fn companies(&self) -> GraphqlResult<Vec<Company>> {
        let mut store = self.lock();
        store.record(RecordedCall::Companies);
        store.check_read()?;
        Ok(store
            .companies
            .iter()
            .map(|company| Company {
                id: company.id.clone(),
                name: company.name.clone(),
                transactions: store
                    .transactions
                    .iter()
                    .filter(|tx| tx.company_id == company.id)
                    .map(|tx| store.expand(tx))
                    .collect(),
            })
            .collect())
    }

    async fn create_transaction(&self, input: &TransactionInput) -> GraphqlResult<Transaction> {
        let mut store = self.lock();
        store.record(RecordedCall::Create(input.clone()));
        store.check_mutation()?;
        let id = format!("t{}", store.next_id);
        store.next_id += 1;
        let record = from_input(id, input);
        store.transactions.push(record.clone());
        Ok(record)
    }

    async fn update_transaction(&self, id: &str, input: &TransactionInput) -> GraphqlResult<Transaction> {
        let mut store = self.lock();
        store.record(RecordedCall::Update {
            id: id.to_string(),
            input: input.clone(),
        });
        store.check_mutation()?;
        let slot = store
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| GraphqlError::NotFound {
                message: format!("transaction {}", id),
            })?;
        *slot = from_input(id.to_string(), input);
        Ok(slot.clone())
    }

    async fn delete_transaction(&self, id: &str) -> GraphqlResult<Transaction> {
        let mut store = self.lock();
        store.record(RecordedCall::Delete { id: id.to_string() });
        store.check_mutation()?;
        let index = store
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| GraphqlError::NotFound {
                message: format!("transaction {}", id),
            })?;
        Ok(store.transactions.remove(index))
    }
}
