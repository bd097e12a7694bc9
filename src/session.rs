//! The `Session` owns the one ledger of a budgeting session along with the place it is saved.
//! Every mutation goes through here so that it is validated and then saved right away.

use crate::error::{Error, ErrorType};
use crate::input::{self, ExpenseInput};
use crate::model::{Amount, Budget, Expense, ExpenseId};
use crate::store::Persistence;
use crate::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

/// A budgeting session: one `Budget` and the `Persistence` it is saved to after each change.
pub struct Session {
    budget: Budget,
    persistence: Persistence,
}

impl Session {
    /// Starts a fresh session with `total` and saves it, replacing any previous snapshot.
    ///
    /// # Errors
    /// - Returns a validation error if `total` is not greater than zero.
    /// - Returns a persistence error if the snapshot cannot be written.
    pub async fn start(mut persistence: Persistence, total: Amount) -> Result<Self> {
        let budget = Budget::new(total)?;
        persistence.save(&budget).await?;
        info!("Started a new budget of {total}");
        Ok(Self {
            budget,
            persistence,
        })
    }

    /// Resumes the session saved in `persistence`.
    ///
    /// # Errors
    /// - Returns a persistence error if there is no snapshot or it is malformed. Callers should
    ///   treat this as "no previous session" and use `start`.
    pub async fn resume(mut persistence: Persistence) -> Result<Self> {
        let budget = persistence.load().await?;
        debug!(
            "Resumed budget of {} with {} remaining",
            budget.total(),
            budget.remaining()
        );
        Ok(Self {
            budget,
            persistence,
        })
    }

    /// Resumes the saved session if there is a usable one, otherwise returns `persistence` so that
    /// the caller can start fresh.
    pub async fn try_resume(
        mut persistence: Persistence,
    ) -> Result<std::result::Result<Self, Persistence>> {
        match persistence.load().await {
            Ok(budget) => Ok(Ok(Self {
                budget,
                persistence,
            })),
            Err(e) if ErrorType::of(&e) == Some(ErrorType::Persistence) => {
                if persistence.exists().await? {
                    warn!("Ignoring the saved budget: {e:#}");
                }
                Ok(Err(persistence))
            }
            Err(e) => Err(e),
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// Validates the raw `name` and `amount`, adds the expense with a time-based id and saves.
    /// The ledger is left untouched when validation fails.
    ///
    /// # Errors
    /// - Returns a validation error for bad input, or if the budget is exhausted.
    /// - Returns a persistence error if the snapshot cannot be written.
    pub async fn add_expense(&mut self, name: &str, amount: &str) -> Result<&Expense> {
        let input = input::parse_expense(name, amount)?;
        self.add(input).await
    }

    /// Adds an already-validated expense and saves.
    ///
    /// # Errors
    /// - Returns a validation error if the budget is exhausted.
    /// - Returns a persistence error if the snapshot cannot be written.
    pub async fn add(&mut self, input: ExpenseInput) -> Result<&Expense> {
        if self.budget.is_exhausted() {
            return Err(Error::validation("Budget exhausted"));
        }
        let id = self
            .budget
            .next_expense_id(Utc::now().timestamp_millis());
        let expense = Expense::new(id, input.name, input.amount)?;
        self.budget.add_expense(expense);
        self.persistence.save(&self.budget).await?;
        // add_expense puts the new expense first.
        self.budget
            .expenses()
            .first()
            .ok_or_else(|| anyhow::anyhow!("The expense {id} was not added"))
    }

    /// Deletes the expense with `id` and saves. Returns how many expenses were removed; deleting
    /// an id that is not present is not an error.
    pub async fn delete_expense(&mut self, id: ExpenseId) -> Result<usize> {
        let removed = self.budget.delete_expense(id);
        self.persistence.save(&self.budget).await?;
        Ok(removed)
    }

    /// Gives back the ledger and its persistence.
    pub fn into_parts(self) -> (Budget, Persistence) {
        (self.budget, self.persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store, BUDGET_KEY};

    async fn session(total: i64) -> Session {
        Session::start(Persistence::in_memory(), Amount::from(total))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start() {
        let s = session(100).await;
        assert_eq!(s.budget().remaining(), Amount::from(100));
        assert!(s.budget().expenses().is_empty());
    }

    #[tokio::test]
    async fn test_start_rejects_bad_total() {
        let err = Session::start(Persistence::in_memory(), Amount::ZERO)
            .await
            .err()
            .unwrap();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_add_and_resume() {
        let mut s = session(100).await;
        let added = s.add_expense("coffee", "30").await.unwrap().clone();
        assert_eq!(added.name(), "coffee");
        s.add_expense("lunch", "12").await.unwrap();

        let (budget, persistence) = s.into_parts();
        let resumed = Session::resume(persistence).await.unwrap();
        assert_eq!(resumed.budget(), &budget);
        assert_eq!(resumed.budget().remaining(), Amount::from(58));
        assert_eq!(resumed.budget().expenses()[1], added);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let mut s = session(1000).await;
        for i in 0..20 {
            s.add_expense(&format!("item {i}"), "1").await.unwrap();
        }
        let mut ids: Vec<ExpenseId> = s.budget().expenses().iter().map(Expense::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_invalid_input_does_not_mutate() {
        let mut s = session(100).await;
        s.add_expense("coffee", "30").await.unwrap();
        let before = s.budget().clone();
        for (name, amount) in [("", "abc"), ("", "5"), ("tea", "abc"), ("tea", "-1")] {
            let err = s.add_expense(name, amount).await.unwrap_err();
            assert_eq!(ErrorType::of(&err), Some(ErrorType::Validation));
            assert_eq!(s.budget(), &before);
        }
    }

    #[tokio::test]
    async fn test_exhausted_blocks_additions() {
        let mut s = session(100).await;
        s.add_expense("everything", "100").await.unwrap();
        assert!(s.budget().is_exhausted());
        let err = s.add_expense("more", "1").await.unwrap_err();
        assert_eq!(err.to_string(), "Budget exhausted");
        assert_eq!(s.budget().expenses().len(), 1);

        // Deleting frees up room again.
        let id = s.budget().expenses()[0].id();
        assert_eq!(s.delete_expense(id).await.unwrap(), 1);
        assert!(s.add_expense("more", "1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_still_saves() {
        let mut s = session(100).await;
        s.add_expense("coffee", "30").await.unwrap();
        let before = s.budget().clone();
        assert_eq!(s.delete_expense(ExpenseId::new(1)).await.unwrap(), 0);
        assert_eq!(s.budget(), &before);
        let (_, persistence) = s.into_parts();
        assert_eq!(Session::resume(persistence).await.unwrap().budget(), &before);
    }

    #[tokio::test]
    async fn test_try_resume_missing() {
        let result = Session::try_resume(Persistence::in_memory()).await.unwrap();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_try_resume_malformed() {
        let mut store = MemoryStore::default();
        store.set(BUDGET_KEY, "not json").await.unwrap();
        let persistence = Persistence::new(Box::new(store), BUDGET_KEY);
        let Err(persistence) = Session::try_resume(persistence).await.unwrap() else {
            panic!("a malformed snapshot should not resume");
        };
        let s = Session::start(persistence, Amount::from(10)).await.unwrap();
        assert_eq!(s.budget().total(), Amount::from(10));
    }

    #[tokio::test]
    async fn test_try_resume_existing() {
        let s = session(100).await;
        let (_, persistence) = s.into_parts();
        let resumed = Session::try_resume(persistence).await.unwrap();
        assert!(resumed.is_ok());
    }
}
