//! Delete command handler.

use crate::commands::{resume, Out};
use crate::model::ExpenseId;
use crate::view::BudgetView;
use crate::{Config, Result};

/// Deletes the expense with `id` from the saved budget. An id that is not present leaves the
/// budget as it was and is reported, but is not an error.
pub async fn delete(config: Config, id: ExpenseId) -> Result<Out<BudgetView>> {
    let mut session = resume(&config).await?;
    let removed = session.delete_expense(id).await?;
    let view = BudgetView::from(session.budget());
    let message = if removed == 0 {
        format!("No expense with id {id}")
    } else {
        format!("Deleted expense {id}")
    };
    Ok(Out::new(format!("{message}\n\n{view}"), view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::Amount;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete() {
        let env = TestEnv::new("100").await;
        add(env.config(), "coffee", "30").await.unwrap();
        let id = env.budget().await.expenses()[0].id();

        let out = delete(env.config(), id).await.unwrap();
        assert!(out.message().starts_with(&format!("Deleted expense {id}")));
        assert_eq!(out.structure().unwrap().remaining, Amount::from(100));
        assert!(env.budget().await.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let env = TestEnv::new("100").await;
        add(env.config(), "coffee", "30").await.unwrap();
        let before = env.budget().await;

        let out = delete(env.config(), ExpenseId::new(42)).await.unwrap();
        assert!(out.message().starts_with("No expense with id 42"));
        assert_eq!(env.budget().await, before);
    }
}
