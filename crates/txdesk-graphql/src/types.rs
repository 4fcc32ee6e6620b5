//! Wire types shared by the GraphQL queries and mutations

use serde::{Deserialize, Deserializer, Serialize};

/// `null` and missing fields both become the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user as returned by `users` or nested in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A merchant as returned by `merchants` or nested in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Company reference nested in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A company with the transactions booked against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
}

/// A transaction record
///
/// Read queries also carry the nested `user`, `merchant` and `company`
/// summaries; mutation payloads only return the flat fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchant_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub debit: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Merchant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySummary>,
}

/// Variables of `createTransaction`, and of `updateTransaction` minus the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub user_id: String,
    pub description: String,
    pub merchant_id: String,
    pub debit: bool,
    pub credit: bool,
    pub company_id: String,
    pub amount: i64,
}

/// Variables of `updateTransaction`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateVariables<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub input: &'a TransactionInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_with_nested_summaries() {
        let json = serde_json::json!({
            "id": "t1",
            "userId": "u1",
            "companyId": "c1",
            "merchantId": "m1",
            "description": "coffee",
            "amount": 500,
            "debit": true,
            "credit": false,
            "user": { "id": "u1", "firstName": "Ada", "lastName": "Lovelace" },
            "merchant": { "id": "m1", "name": "Bean Bar" },
            "company": { "id": "c1", "name": "Acme" }
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.amount, 500);
        assert_eq!(tx.user.unwrap().full_name(), "Ada Lovelace");
        assert_eq!(tx.merchant.unwrap().name, "Bean Bar");
        assert_eq!(tx.company.unwrap().name, "Acme");
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let json = serde_json::json!({
            "id": "t2",
            "userId": null,
            "description": null,
            "amount": 12,
            "debit": false,
            "credit": true
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.user_id, "");
        assert_eq!(tx.description, "");
        assert!(tx.user.is_none());
    }

    #[test]
    fn test_update_variables_are_flat() {
        let input = TransactionInput {
            user_id: "u1".into(),
            description: "rent".into(),
            merchant_id: "m1".into(),
            debit: false,
            credit: true,
            company_id: "c1".into(),
            amount: 120000,
        };
        let value = serde_json::to_value(UpdateVariables { id: "t9", input: &input }).unwrap();
        assert_eq!(value["id"], "t9");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["amount"], 120000);
        assert_eq!(value["credit"], true);
    }
}
