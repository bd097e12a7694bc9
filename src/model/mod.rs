//! Types that represent the core data model: the `Budget` ledger and the `Expense` rows in it.
mod amount;
mod budget;
mod expense;
mod status;

pub use amount::{Amount, AmountError};
pub use budget::Budget;
pub use expense::{Expense, ExpenseId};
pub use status::Status;
