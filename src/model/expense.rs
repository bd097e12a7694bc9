use crate::error::{Error, Result};
use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifies an expense within a ledger. Ids are derived from the creation time in milliseconds
/// since the Unix epoch, see `Budget::next_expense_id`.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(ExpenseId)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A named deduction against the budget. An `Expense` cannot be changed after it is created.
///
/// Serialized as `{"expenseName": "coffee", "amount": 30, "id": 1760000000000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "expenseName")]
    name: String,
    amount: Amount,
    id: ExpenseId,
}

impl Expense {
    /// Creates an expense.
    ///
    /// # Errors
    /// - Returns a validation error if `name` is empty after trimming.
    /// - Returns a validation error if `amount` is not greater than zero or is above
    ///   `Amount::LIMIT`.
    pub fn new(id: ExpenseId, name: impl Into<String>, amount: Amount) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Expense name is empty"));
        }
        if !amount.is_positive() || !amount.is_within_limit() {
            return Err(Error::validation("Invalid amount"));
        }
        Ok(Self { name, amount, id })
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}
