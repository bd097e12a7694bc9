//! Durable string-keyed storage and the snapshot adapter that saves and loads a `Budget` with it.

mod file;
mod memory;

use crate::error::{Error, ErrorType, IntoResult};
use crate::model::Budget;
use crate::Result;
use anyhow::Context;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

/// The default key that the budget snapshot is stored under.
pub const BUDGET_KEY: &str = "budget";

/// A very simple key-value store. Values are strings; what they contain is up to the caller.
#[async_trait::async_trait]
pub trait Store {
    /// Returns the value stored under `key`, or `None` if nothing is stored there.
    async fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;
}

/// Saves and loads `Budget` snapshots under a single fixed key.
///
/// The snapshot is the JSON form of `Budget`:
/// ```json
/// { "total": 100.0, "remaining": 70.0,
///   "expenses": [{ "expenseName": "coffee", "amount": 30.0, "id": 1760000000000 }] }
/// ```
/// There is no version field.
pub struct Persistence {
    store: Box<dyn Store + Send>,
    key: String,
}

impl Persistence {
    /// Create a new `Persistence` object that will use a dynamically-dispatched `store` and save
    /// its snapshots under `key`.
    pub fn new(store: Box<dyn Store + Send>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// An in-memory `Persistence`, mostly useful in tests.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()), BUDGET_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes a snapshot of `budget`, overwriting the previous one.
    pub async fn save(&mut self, budget: &Budget) -> Result<()> {
        let json = serde_json::to_string_pretty(budget)
            .context("Failed to serialize the budget to JSON")
            .pub_result(ErrorType::Persistence)?;
        self.store
            .set(&self.key, &json)
            .await
            .with_context(|| format!("Unable to save the budget under '{}'", self.key))
            .pub_result(ErrorType::Persistence)?;
        debug!(
            "Saved budget under '{}' with {} expenses",
            self.key,
            budget.expenses().len()
        );
        Ok(())
    }

    /// Reads the snapshot back into a `Budget`. The stored `remaining` is used as-is, even if it
    /// does not agree with the stored expenses.
    ///
    /// # Errors
    /// - Returns a persistence error if there is no snapshot or it cannot be parsed.
    pub async fn load(&mut self) -> Result<Budget> {
        let json = self
            .store
            .get(&self.key)
            .await
            .pub_result(ErrorType::Persistence)?
            .ok_or_else(|| Error::persistence(format!("No budget saved under '{}'", self.key)))?;
        let budget: Budget = serde_json::from_str(&json)
            .with_context(|| format!("The budget saved under '{}' is malformed", self.key))
            .pub_result(ErrorType::Persistence)?;
        let drift = budget.drift();
        if !drift.is_zero() {
            warn!(
                "The saved remaining balance {} is off by {drift} from the saved expenses",
                budget.remaining()
            );
        }
        Ok(budget)
    }

    /// Whether a snapshot is present. This does not check that it can be parsed.
    pub async fn exists(&mut self) -> Result<bool> {
        Ok(self
            .store
            .get(&self.key)
            .await
            .pub_result(ErrorType::Persistence)?
            .is_some())
    }

    /// Removes the snapshot.
    pub async fn clear(&mut self) -> Result<()> {
        self.store
            .remove(&self.key)
            .await
            .pub_result(ErrorType::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input;
    use crate::model::{Amount, Expense, ExpenseId};
    use std::collections::HashMap;

    fn sample() -> Budget {
        let mut budget = Budget::new(Amount::from(100)).unwrap();
        budget.add_expense(Expense::new(ExpenseId::new(1), "coffee", Amount::from(30)).unwrap());
        budget.add_expense(
            Expense::new(ExpenseId::new(2), "lunch", "12.75".parse().unwrap()).unwrap(),
        );
        budget
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let mut p = Persistence::in_memory();
        let budget = sample();
        p.save(&budget).await.unwrap();
        let loaded = p.load().await.unwrap();
        assert_eq!(loaded, budget);
        assert_eq!(loaded.total(), budget.total());
        assert_eq!(loaded.remaining(), budget.remaining());
        let ids: Vec<i64> = loaded.expenses().iter().map(|e| e.id().value()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_every_decimal() {
        let mut budget = Budget::new(input::parse_total("100.123456789012345678").unwrap()).unwrap();
        let item = input::parse_expense("snack", "0.000000000000000001").unwrap();
        budget.add_expense(Expense::new(ExpenseId::new(1), item.name, item.amount).unwrap());

        let mut p = Persistence::in_memory();
        p.save(&budget).await.unwrap();
        let loaded = p.load().await.unwrap();
        assert_eq!(loaded, budget);
        assert_eq!(loaded.total().value().to_string(), "100.123456789012345678");
        assert_eq!(
            loaded.remaining().value().to_string(),
            "100.123456789012345677"
        );
        assert!(loaded.drift().is_zero());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let mut p = Persistence::in_memory();
        p.save(&sample()).await.unwrap();
        let fresh = Budget::new(Amount::from(40)).unwrap();
        p.save(&fresh).await.unwrap();
        assert_eq!(p.load().await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn test_load_missing() {
        let mut p = Persistence::in_memory();
        let err = p.load().await.unwrap_err();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Persistence));
        assert!(!p.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_load_malformed() {
        let mut store = MemoryStore::default();
        store.set(BUDGET_KEY, "{\"total\": \"lots\"").await.unwrap();
        let mut p = Persistence::new(Box::new(store), BUDGET_KEY);
        assert!(p.exists().await.unwrap());
        let err = p.load().await.unwrap_err();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Persistence));
        assert!(err.to_string().contains("malformed"));
    }

    #[tokio::test]
    async fn test_load_keeps_drifted_remaining() {
        let json = r#"{"total": 100, "remaining": 1,
            "expenses": [{"expenseName": "coffee", "amount": 30, "id": 5}]}"#;
        let store = MemoryStore::new(HashMap::from([(BUDGET_KEY.to_string(), json.to_string())]));
        let mut p = Persistence::new(Box::new(store), BUDGET_KEY);
        let budget = p.load().await.unwrap();
        assert_eq!(budget.remaining(), Amount::from(1));
        assert_eq!(budget.drift(), Amount::from(-69));
    }

    #[test]
    fn test_snapshot_layout() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["total"], 100.0);
        assert_eq!(value["remaining"], 57.25);
        assert_eq!(value["expenses"][0]["expenseName"], "lunch");
        assert_eq!(value["expenses"][1]["id"], 1);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_clear() {
        let mut p = Persistence::in_memory();
        p.save(&sample()).await.unwrap();
        p.clear().await.unwrap();
        assert!(!p.exists().await.unwrap());
    }
}
