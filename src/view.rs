//! A read-only view of a ledger for display. Nothing here changes the ledger.

use crate::model::{Amount, Budget, Expense, ExpenseId, Status};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Everything the user sees about a budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetView {
    pub total: Amount,
    pub remaining: Amount,
    pub percentage: Decimal,
    pub status: Status,
    pub exhausted: bool,
    pub expenses: Vec<ExpenseView>,
}

/// One row of the expense list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub name: String,
    pub amount: Amount,
}

impl From<&Expense> for ExpenseView {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id(),
            name: e.name().to_string(),
            amount: e.amount(),
        }
    }
}

impl From<&Budget> for BudgetView {
    fn from(budget: &Budget) -> Self {
        Self {
            total: budget.total(),
            remaining: budget.remaining(),
            percentage: budget.percentage().round_dp(2),
            status: budget.status(),
            exhausted: budget.is_exhausted(),
            expenses: budget.expenses().iter().map(ExpenseView::from).collect(),
        }
    }
}

impl Display for BudgetView {
    /// ```text
    /// Budget: $100.00
    /// Remaining: $70.00 (70%, healthy)
    ///
    /// 1760000000000  coffee  $30.00
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Budget: {}", self.total)?;
        write!(
            f,
            "Remaining: {} ({}%, {})",
            self.remaining,
            self.percentage.normalize(),
            self.status
        )?;
        if self.exhausted {
            write!(f, "\nBudget exhausted")?;
        }
        if self.expenses.is_empty() {
            return write!(f, "\n\nNo expenses yet");
        }
        writeln!(f)?;
        let name_width = self
            .expenses
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or_default();
        for e in &self.expenses {
            write!(f, "\n{}  {:<name_width$}  {}", e.id, e.name, e.amount)?;
        }
        Ok(())
    }
}
