//! Query and mutation documents sent to the transactions API

/// Selection set returned by every mutation
macro_rules! flat_transaction_fields {
    () => {
        "id amount companyId merchantId userId credit debit description"
    };
}

/// Selection set of read queries, with nested summaries for display
macro_rules! read_transaction_fields {
    () => {
        concat!(
            flat_transaction_fields!(),
            " user { id firstName lastName } merchant { id name } company { id name }"
        )
    };
}

pub const TRANSACTIONS_QUERY: &str =
    concat!("query GetTransactions { transactions { ", read_transaction_fields!(), " } }");

pub const USERS_QUERY: &str = "query GetUsers { users { id firstName lastName } }";

pub const MERCHANTS_QUERY: &str = "query GetMerchants { merchants { id name } }";

pub const COMPANIES_QUERY: &str = concat!(
    "query GetCompanies { companies { id name transactions { ",
    read_transaction_fields!(),
    " } } }"
);

pub const CREATE_TRANSACTION_MUTATION: &str = concat!(
    "mutation CreateTransaction($amount: Int!, $companyId: ID!, $merchantId: ID!, $userId: ID!, ",
    "$credit: Boolean!, $debit: Boolean!, $description: String!) { ",
    "createTransaction(amount: $amount, companyId: $companyId, merchantId: $merchantId, userId: $userId, ",
    "credit: $credit, debit: $debit, description: $description) { ",
    flat_transaction_fields!(),
    " } }"
);

pub const UPDATE_TRANSACTION_MUTATION: &str = concat!(
    "mutation UpdateTransaction($id: ID!, $amount: Int!, $companyId: ID!, $merchantId: ID!, $userId: ID!, ",
    "$credit: Boolean!, $debit: Boolean!, $description: String!) { ",
    "updateTransaction(id: $id, amount: $amount, companyId: $companyId, merchantId: $merchantId, userId: $userId, ",
    "credit: $credit, debit: $debit, description: $description) { ",
    flat_transaction_fields!(),
    " } }"
);

pub const DELETE_TRANSACTION_MUTATION: &str = concat!(
    "mutation DeleteTransaction($id: ID!) { deleteTransaction(id: $id) { ",
    flat_transaction_fields!(),
    " } }"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companies_query_nests_transactions() {
        assert!(COMPANIES_QUERY.contains("companies { id name transactions {"));
        assert!(COMPANIES_QUERY.contains("user { id firstName lastName }"));
    }

    #[test]
    fn test_mutations_declare_all_variables() {
        for var in ["$amount", "$companyId", "$merchantId", "$userId", "$credit", "$debit", "$description"] {
            assert!(CREATE_TRANSACTION_MUTATION.contains(var), "create missing {}", var);
            assert!(UPDATE_TRANSACTION_MUTATION.contains(var), "update missing {}", var);
        }
        assert!(UPDATE_TRANSACTION_MUTATION.contains("$id: ID!"));
        assert!(DELETE_TRANSACTION_MUTATION.contains("deleteTransaction(id: $id)"));
    }
}
