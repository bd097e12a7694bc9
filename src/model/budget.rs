use crate::error::{Error, Result};
use crate::model::{Amount, Expense, ExpenseId, Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The ledger: a fixed total, the expenses recorded against it (newest first), and the remaining
/// balance.
///
/// `remaining` is recalculated from `total` and `expenses` after every mutation. When a `Budget`
/// is deserialized, the stored `remaining` is taken as-is and is not checked against the stored
/// expenses; use `drift` to find out whether the two disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    total: Amount,
    remaining: Amount,
    expenses: Vec<Expense>,
}

impl Budget {
    /// Creates a fresh ledger with `remaining == total` and no expenses.
    ///
    /// # Errors
    /// - Returns a validation error if `total` is not greater than zero or is above `Amount::LIMIT`.
    pub fn new(total: Amount) -> Result<Self> {
        if !total.is_positive() || !total.is_within_limit() {
            return Err(Error::validation("Invalid budget"));
        }
        Ok(Self {
            total,
            remaining: total,
            expenses: Vec::new(),
        })
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn remaining(&self) -> Amount {
        self.remaining
    }

    /// The expenses, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The sum of all expense amounts.
    pub fn spent(&self) -> Amount {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// Puts `expense` at the front of the list and recalculates `remaining`. Nothing stops
    /// `remaining` from going negative here; see `is_exhausted`.
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
        self.calc_remaining();
    }

    /// Removes every expense with the given `id` and recalculates `remaining`. Returns the number
    /// of expenses removed, which is zero when `id` is not present.
    pub fn delete_expense(&mut self, id: ExpenseId) -> usize {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id() != id);
        self.calc_remaining();
        before - self.expenses.len()
    }

    /// Sets `remaining` to `total` minus the sum of the expenses.
    pub fn calc_remaining(&mut self) {
        self.remaining = self.total - self.spent();
    }

    /// How far the stored `remaining` is from `total - spent`. This is always zero unless the
    /// ledger was loaded from a snapshot whose `remaining` had been edited.
    pub fn drift(&self) -> Amount {
        self.remaining - (self.total - self.spent())
    }

    /// `remaining` as a percentage of `total`. A zero `total` can only come from an edited
    /// snapshot; it yields zero. A ratio too large for `Decimal` is clamped to its bounds.
    pub fn percentage(&self) -> Decimal {
        let (remaining, total) = (self.remaining.value(), self.total.value());
        if total.is_zero() {
            return Decimal::ZERO;
        }
        match remaining
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        {
            Some(percentage) => percentage,
            None if remaining.is_sign_negative() != total.is_sign_negative() => Decimal::MIN,
            None => Decimal::MAX,
        }
    }

    pub fn status(&self) -> Status {
        Status::classify(self.percentage())
    }

    /// True when nothing is left. Callers should not accept new expenses while this holds.
    pub fn is_exhausted(&self) -> bool {
        !self.remaining.is_positive()
    }

    /// Chooses an id for a new expense. `now_millis` is normally the current time in milliseconds
    /// since the Unix epoch. If that is not greater than every existing id, the largest existing id
    /// plus one is used instead.
    pub fn next_expense_id(&self, now_millis: i64) -> ExpenseId {
        match self.expenses.iter().map(|e| e.id().value()).max() {
            Some(max) if max >= now_millis => ExpenseId::new(max.saturating_add(1)),
            _ => ExpenseId::new(now_millis),
        }
    }
}
