//! GraphQL client for the transactions API
//!
//! The rest of txdesk talks to the API only through [`TransactionApi`].
//! [`HttpGraphqlClient`] is the production implementation; [`InMemoryApi`]
//! serves seeded data for offline demos and tests.

use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
pub mod documents;
pub mod error;
pub mod memory;
pub mod types;

pub use client::{HttpGraphqlClient, RetryPolicy};
pub use error::{GraphqlError, GraphqlResult};
pub use memory::{InMemoryApi, RecordedCall};
pub use types::{Company, CompanySummary, Merchant, Transaction, TransactionInput, User};

/// Shared handle to an API implementation
pub type ApiRef = Arc<dyn TransactionApi>;

/// Queries and mutations offered by the transactions API
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// All transactions with nested user/merchant/company summaries
    async fn transactions(&self) -> GraphqlResult<Vec<Transaction>>;

    async fn users(&self) -> GraphqlResult<Vec<User>>;

    async fn merchants(&self) -> GraphqlResult<Vec<Merchant>>;

    /// All companies, each with its nested transactions
    async fn companies(&self) -> GraphqlResult<Vec<Company>>;

    async fn create_transaction(&self, input: &TransactionInput) -> GraphqlResult<Transaction>;

    async fn update_transaction(&self, id: &str, input: &TransactionInput) -> GraphqlResult<Transaction>;

    async fn delete_transaction(&self, id: &str) -> GraphqlResult<Transaction>;
}
