//! Draft state of the transaction form

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use txdesk_graphql::{Transaction, TransactionInput};

/// Form of payment. Exactly one of debit/credit is ever true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Debit,
    Credit,
}

impl PaymentMethod {
    /// `(debit, credit)` flags as sent to the API
    pub fn flags(self) -> (bool, bool) {
        match self {
            PaymentMethod::Debit => (true, false),
            PaymentMethod::Credit => (false, true),
        }
    }

    /// Only a lone credit flag reads as credit
    pub fn from_flags(debit: bool, credit: bool) -> Self {
        if credit && !debit {
            PaymentMethod::Credit
        } else {
            PaymentMethod::Debit
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(PaymentMethod::Debit),
            "credit" => Ok(PaymentMethod::Credit),
            other => Err(CoreError::validation("payment", format!("unknown form of payment '{}'", other))),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field change coming from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    User(String),
    Merchant(String),
    Company(String),
    Description(String),
    /// Raw amount text as typed
    Amount(String),
    Payment(PaymentMethod),
}

impl DraftField {
    /// Build a field change from a form field name and value
    pub fn from_form(name: &str, value: &str) -> CoreResult<Self> {
        match name {
            "userId" => Ok(DraftField::User(value.to_string())),
            "merchantId" => Ok(DraftField::Merchant(value.to_string())),
            "companyId" => Ok(DraftField::Company(value.to_string())),
            "description" => Ok(DraftField::Description(value.to_string())),
            "amount" => Ok(DraftField::Amount(value.to_string())),
            "payment" | "fop" => Ok(DraftField::Payment(value.parse()?)),
            other => Err(CoreError::validation(other, format!("unknown form field '{}'", other))),
        }
    }

    /// Form field name this change belongs to
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::User(_) => "userId",
            DraftField::Merchant(_) => "merchantId",
            DraftField::Company(_) => "companyId",
            DraftField::Description(_) => "description",
            DraftField::Amount(_) => "amount",
            DraftField::Payment(_) => "payment",
        }
    }
}

/// Parse amount text into whole minor units.
///
/// Accepts an optional sign and digits; a fractional part is truncated
/// toward zero. Anything else, or a value outside the `i32` range, is
/// rejected.
pub fn parse_amount(input: &str) -> CoreResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("amount", "amount is required"));
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return Err(CoreError::validation("amount", format!("'{}' is not a number", trimmed)));
    }

    // The API types amounts as a 32-bit GraphQL Int
    let out_of_range = || CoreError::validation("amount", format!("'{}' is out of range", trimmed));
    let magnitude: i64 = whole.parse().map_err(|_| out_of_range())?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| out_of_range())?;
    Ok(value)
}

/// Unsaved values of the transaction form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    /// Empty while creating
    pub id: String,
    pub user_id: String,
    pub merchant_id: String,
    pub company_id: String,
    pub description: String,
    pub amount: i64,
    pub payment: PaymentMethod,
}

impl TransactionDraft {
    /// Seed every field from an existing record
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            user_id: tx.user_id.clone(),
            merchant_id: tx.merchant_id.clone(),
            company_id: tx.company_id.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            payment: PaymentMethod::from_flags(tx.debit, tx.credit),
        }
    }

    pub fn debit(&self) -> bool {
        self.payment.flags().0
    }

    pub fn credit(&self) -> bool {
        self.payment.flags().1
    }

    /// Apply one field change. A rejected amount leaves the previous value.
    pub fn apply(&mut self, field: DraftField) -> CoreResult<()> {
        match field {
            DraftField::User(id) => self.user_id = id,
            DraftField::Merchant(id) => self.merchant_id = id,
            DraftField::Company(id) => self.company_id = id,
            DraftField::Description(text) => self.description = text,
            DraftField::Amount(text) => self.amount = parse_amount(&text)?,
            DraftField::Payment(method) => self.payment = method,
        }
        Ok(())
    }

    /// Mutation variables for this draft
    pub fn to_input(&self) -> TransactionInput {
        let (debit, credit) = self.payment.flags();
        TransactionInput {
            user_id: self.user_id.clone(),
            description: self.description.clone(),
            merchant_id: self.merchant_id.clone(),
            debit,
            credit,
            company_id: self.company_id.clone(),
            amount: self.amount,
        }
    }
}
