//! Table rows with resolved display names

use crate::draft::PaymentMethod;
use crate::home::ReferenceData;
use serde::Serialize;
use txdesk_graphql::Transaction;
use txdesk_utils::{format_numeral, NumeralMode};

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub user: String,
    pub company: String,
    pub merchant: String,
    pub description: String,
    pub payment: PaymentMethod,
    /// Amount formatted in the selected numeral mode
    pub amount: String,
}

impl TransactionRow {
    pub fn new(tx: &Transaction, refs: &ReferenceData, mode: NumeralMode) -> Self {
        Self {
            id: tx.id.clone(),
            user: user_name(tx, refs),
            company: company_name(tx, refs),
            merchant: merchant_name(tx, refs),
            description: tx.description.clone(),
            payment: PaymentMethod::from_flags(tx.debit, tx.credit),
            amount: format_numeral(tx.amount, mode),
        }
    }
}

// Nested summary first, then the reference list, then the raw id

fn user_name(tx: &Transaction, refs: &ReferenceData) -> String {
    tx.user
        .as_ref()
        .or_else(|| refs.users.iter().find(|u| u.id == tx.user_id))
        .map(|u| u.full_name())
        .unwrap_or_else(|| tx.user_id.clone())
}

fn merchant_name(tx: &Transaction, refs: &ReferenceData) -> String {
    tx.merchant
        .as_ref()
        .map(|m| m.name.clone())
        .or_else(|| refs.merchants.iter().find(|m| m.id == tx.merchant_id).map(|m| m.name.clone()))
        .unwrap_or_else(|| tx.merchant_id.clone())
}

fn company_name(tx: &Transaction, refs: &ReferenceData) -> String {
    tx.company
        .as_ref()
        .map(|c| c.name.clone())
        .or_else(|| refs.companies.iter().find(|c| c.id == tx.company_id).map(|c| c.name.clone()))
        .unwrap_or_else(|| tx.company_id.clone())
}

/// Rows for `transactions`, in order
pub fn build_rows(transactions: &[Transaction], refs: &ReferenceData, mode: NumeralMode) -> Vec<TransactionRow> {
    transactions.iter().map(|tx| TransactionRow::new(tx, refs, mode)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use txdesk_graphql::{Company, CompanySummary, Merchant, User};

    fn flat(id: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.into(),
            user_id: "u1".into(),
            company_id: "c1".into(),
            merchant_id: "m1".into(),
            description: "coffee".into(),
            amount,
            debit: true,
            credit: false,
            user: None,
            merchant: None,
            company: None,
        }
    }

    fn refs() -> ReferenceData {
        ReferenceData {
            users: vec![User { id: "u1".into(), first_name: "Ada".into(), last_name: "Lovelace".into() }],
            merchants: vec![Merchant { id: "m1".into(), name: "Bean Bar".into() }],
            companies: vec![Company { id: "c1".into(), name: "Acme".into(), transactions: vec![] }],
        }
    }

    #[test]
    fn test_names_from_reference_lists() {
        let row = TransactionRow::new(&flat("t1", 1994), &refs(), NumeralMode::Roman);
        assert_eq!(row.user, "Ada Lovelace");
        assert_eq!(row.merchant, "Bean Bar");
        assert_eq!(row.company, "Acme");
        assert_eq!(row.amount, "MCMXCIV");
        assert_eq!(row.payment, PaymentMethod::Debit);
    }

    #[test]
    fn test_nested_summary_wins() {
        let mut tx = flat("t1", 5);
        tx.company = Some(CompanySummary { id: "c1".into(), name: "Acme Holdings".into() });
        let row = TransactionRow::new(&tx, &refs(), NumeralMode::Decimal);
        assert_eq!(row.company, "Acme Holdings");
        assert_eq!(row.amount, "5");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_raw_id() {
        let mut tx = flat("t1", 5000);
        tx.user_id = "u404".into();
        tx.credit = true;
        tx.debit = false;
        let row = TransactionRow::new(&tx, &ReferenceData::default(), NumeralMode::Roman);
        assert_eq!(row.user, "u404");
        assert_eq!(row.merchant, "m1");
        assert_eq!(row.amount, "5000");
        assert_eq!(row.payment, PaymentMethod::Credit);
    }

    #[test]
    fn test_build_rows_keeps_order() {
        let rows = build_rows(&[flat("b", 1), flat("a", 2)], &refs(), NumeralMode::Decimal);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
