//! Home view: reference data, filters and the visible transaction set

use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use txdesk_graphql::{Company, Merchant, Transaction, TransactionApi, User};
use txdesk_utils::NumeralMode;

/// Process-local filter selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HomeFilters {
    /// Empty means all companies
    pub company_id: String,
    pub numeral_mode: NumeralMode,
}

impl HomeFilters {
    pub fn new(numeral_mode: NumeralMode) -> Self {
        Self {
            company_id: String::new(),
            numeral_mode,
        }
    }
}

/// Reference lists used by the form and for name resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub users: Vec<User>,
    pub merchants: Vec<Merchant>,
    pub companies: Vec<Company>,
}

impl ReferenceData {
    pub async fn load(api: &dyn TransactionApi) -> CoreResult<Self> {
        let (users, merchants, companies) = tokio::join!(api.users(), api.merchants(), api.companies());
        Ok(Self {
            users: users?,
            merchants: merchants?,
            companies: companies?,
        })
    }
}

/// Result of the four home reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    pub transactions: Vec<Transaction>,
    pub references: ReferenceData,
}

impl HomeData {
    /// Issue the four reads concurrently
    pub async fn load(api: &dyn TransactionApi) -> CoreResult<Self> {
        let (transactions, users, merchants, companies) =
            tokio::join!(api.transactions(), api.users(), api.merchants(), api.companies());
        Ok(Self {
            transactions: transactions?,
            references: ReferenceData {
                users: users?,
                merchants: merchants?,
                companies: companies?,
            },
        })
    }

    /// Transactions shown for the selected company.
    ///
    /// A known company id selects that company's nested list; an empty or
    /// unknown id selects everything.
    pub fn visible_transactions(&self, company_id: &str) -> &[Transaction] {
        if company_id.is_empty() {
            return &self.transactions;
        }
        self.references
            .companies
            .iter()
            .find(|company| company.id == company_id)
            .map(|company| company.transactions.as_slice())
            .unwrap_or(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txdesk_graphql::InMemoryApi;

    #[tokio::test]
    async fn test_load_issues_four_reads() {
        let api = InMemoryApi::with_demo_data();
        let data = HomeData::load(&api).await.unwrap();
        assert_eq!(data.transactions.len(), 3);
        assert_eq!(data.references.users.len(), 2);
        assert_eq!(api.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_company_filter() {
        let api = InMemoryApi::with_demo_data();
        let data = HomeData::load(&api).await.unwrap();

        let ids = |list: &[Transaction]| list.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(data.visible_transactions("c1")), vec!["t1", "t2"]);
        assert_eq!(ids(data.visible_transactions("c2")), vec!["t3"]);
        assert_eq!(data.visible_transactions("").len(), 3);
        assert_eq!(data.visible_transactions("c404").len(), 3);
    }

    #[tokio::test]
    async fn test_failed_read_fails_the_load() {
        let api = InMemoryApi::with_demo_data();
        api.fail_reads(Some(txdesk_graphql::GraphqlError::Network { message: "down".into() }));
        let err = HomeData::load(&api).await.unwrap_err();
        assert!(matches!(err, crate::CoreError::Network { .. }));
    }
}
