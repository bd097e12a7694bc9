//! Validation of raw user input. The messages here are shown to the user as-is.

use crate::error::{Error, Result};
use crate::model::Amount;
use std::str::FromStr;

/// A validated expense submission. The id is assigned later, when it is added to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub name: String,
    pub amount: Amount,
}

/// Parses the initial budget.
///
/// # Errors
/// - Returns a validation error unless `text` is a number greater than zero and no more than
///   `Amount::LIMIT`.
pub fn parse_total(text: &str) -> Result<Amount> {
    match Amount::from_str(text) {
        Ok(total) if total.is_positive() && total.is_within_limit() => Ok(total),
        _ => Err(Error::validation("Invalid budget")),
    }
}

/// Parses an expense submission. `name` is trimmed. An empty or unparseable amount counts as
/// missing, so that an entirely blank submission gets a single message.
///
/// # Errors
/// - Both fields missing: "Both fields are required"
/// - Empty name: "Expense name is empty"
/// - Amount not a number greater than zero, or above `Amount::LIMIT`: "Invalid amount"
pub fn parse_expense(name: &str, amount: &str) -> Result<ExpenseInput> {
    let name = name.trim();
    let parsed = Amount::from_str(amount).ok();
    let amount_missing = parsed.map_or(true, |a| a.is_zero());

    if name.is_empty() && amount_missing {
        return Err(Error::validation("Both fields are required"));
    }
    if name.is_empty() {
        return Err(Error::validation("Expense name is empty"));
    }
    match parsed {
        Some(amount) if amount.is_positive() && amount.is_within_limit() => Ok(ExpenseInput {
            name: name.to_string(),
            amount,
        }),
        _ => Err(Error::validation("Invalid amount")),
    }
}
