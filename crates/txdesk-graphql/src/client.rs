//! reqwest-backed client for the transactions GraphQL API

use crate::documents::*;
use crate::error::{GraphqlError, GraphqlResult};
use crate::types::{Company, Merchant, Transaction, TransactionInput, UpdateVariables, User};
use crate::TransactionApi;
use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Retry policy for read queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay after the given failed attempt (1-based), doubling each time
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

/// `{ data, errors }` response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl ErrorEntry {
    fn is_not_found(&self) -> bool {
        let code = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(|code| code.as_str())
            .unwrap_or("");
        code.eq_ignore_ascii_case("NOT_FOUND") || self.message.to_lowercase().contains("not found")
    }
}

/// Turn an HTTP status and body into the payload or a typed error
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> GraphqlResult<T> {
    // GraphQL servers often report errors with a 4xx status and a regular envelope
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            if !(200..300).contains(&status) {
                return Err(GraphqlError::Http { status });
            }
            return Err(GraphqlError::MalformedResponse { message: e.to_string() });
        }
    };

    if !envelope.errors.is_empty() {
        if let Some(entry) = envelope.errors.iter().find(|entry| entry.is_not_found()) {
            return Err(GraphqlError::NotFound { message: entry.message.clone() });
        }
        return Err(GraphqlError::Api {
            messages: envelope.errors.into_iter().map(|entry| entry.message).collect(),
        });
    }

    if !(200..300).contains(&status) {
        return Err(GraphqlError::Http { status });
    }

    envelope.data.ok_or_else(|| GraphqlError::MalformedResponse {
        message: "response carried neither data nor errors".to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct TransactionsData {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
struct UsersData {
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct MerchantsData {
    merchants: Vec<Merchant>,
}

#[derive(Debug, Deserialize)]
struct CompaniesData {
    companies: Vec<Company>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_transaction: Option<Transaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_transaction: Option<Transaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_transaction: Option<Transaction>,
}

/// GraphQL client over HTTP
#[derive(Debug, Clone)]
pub struct HttpGraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpGraphqlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> GraphqlResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one request, no retries
    async fn execute<T: DeserializeOwned>(&self, document: &str, variables: Value) -> GraphqlResult<T> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    /// Read query, retried with backoff on transient failures
    async fn query<T: DeserializeOwned>(&self, operation: &str, document: &str) -> GraphqlResult<T> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!("GraphQL query {} (attempt {}/{})", operation, attempt, max_attempts);
            match self.execute(document, json!({})).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    warn!("GraphQL query {} failed: {}. Retrying in {:?}", operation, e, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Mutations are sent exactly once
    async fn mutate<T: DeserializeOwned>(&self, operation: &str, document: &str, variables: Value) -> GraphqlResult<T> {
        debug!("GraphQL mutation {}", operation);
        self.execute(document, variables).await
    }
}

fn to_variables<T: serde::Serialize>(value: &T) -> GraphqlResult<Value> {
    serde_json::to_value(value).map_err(|e| GraphqlError::MalformedResponse { message: e.to_string() })
}

fn require_record(record: Option<Transaction>, operation: &str, id: Option<&str>) -> GraphqlResult<Transaction> {
    record.ok_or_else(|| match id {
        Some(id) => GraphqlError::NotFound {
            message: format!("transaction {}", id),
        },
        None => GraphqlError::MalformedResponse {
            message: format!("{} returned no record", operation),
        },
    })
}

#[async_trait]
impl TransactionApi for HttpGraphqlClient {
    async fn transactions(&self) -> GraphqlResult<Vec<Transaction>> {
        let data: TransactionsData = self.query("transactions", TRANSACTIONS_QUERY).await?;
        Ok(data.transactions)
    }

    async fn users(&self) -> GraphqlResult<Vec<User>> {
        let data: UsersData = self.query("users", USERS_QUERY).await?;
        Ok(data.users)
    }

    async fn merchants(&self) -> GraphqlResult<Vec<Merchant>> {
        let data: MerchantsData = self.query("merchants", MERCHANTS_QUERY).await?;
        Ok(data.merchants)
    }

    async fn companies(&self) -> GraphqlResult<Vec<Company>> {
        let data: CompaniesData = self.query("companies", COMPANIES_QUERY).await?;
        Ok(data.companies)
    }

    async fn create_transaction(&self, input: &TransactionInput) -> GraphqlResult<Transaction> {
        let data: CreateData = self
            .mutate("createTransaction", CREATE_TRANSACTION_MUTATION, to_variables(input)?)
            .await?;
        require_record(data.create_transaction, "createTransaction", None)
    }

    async fn update_transaction(&self, id: &str, input: &TransactionInput) -> GraphqlResult<Transaction> {
        let variables = to_variables(&UpdateVariables { id, input })?;
        let data: UpdateData = self
            .mutate("updateTransaction", UPDATE_TRANSACTION_MUTATION, variables)
            .await?;
        require_record(data.update_transaction, "updateTransaction", Some(id))
    }

    async fn delete_transaction(&self, id: &str) -> GraphqlResult<Transaction> {
        let data: DeleteData = self
            .mutate("deleteTransaction", DELETE_TRANSACTION_MUTATION, json!({ "id": id }))
            .await?;
        require_record(data.delete_transaction, "deleteTransaction", Some(id))
    }
}
