use crate::commands::{resume, Out};
use crate::view::BudgetView;
use crate::{Config, Result};

/// Records an expense against the saved budget.
///
/// # Arguments
/// - `name` - What the money was spent on. Surrounding whitespace is removed.
/// - `amount` - How much, as typed by the user, e.g. `12.50` or `$1,200`.
///
/// # Errors
/// - Returns a validation error if `name` is empty or `amount` is not a number greater than zero.
/// - Returns a validation error if the budget is already exhausted.
/// - Returns a persistence error if there is no saved budget or it cannot be written.
pub async fn add(config: Config, name: &str, amount: &str) -> Result<Out<BudgetView>> {
    let mut session = resume(&config).await?;
    let expense = session.add_expense(name, amount).await?;
    let mut message = format!("Expense saved: {} ({})", expense.name(), expense.id());
    let view = BudgetView::from(session.budget());
    if view.exhausted {
        message.push_str("\nBudget exhausted, no more expenses can be added");
    }
    Ok(Out::new(format!("{message}\n\n{view}"), view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::{Amount, Status};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_add() {
        let env = TestEnv::new("100").await;
        let out = add(env.config(), "coffee", "30").await.unwrap();
        assert!(out.message().starts_with("Expense saved: coffee"));
        let view = out.structure().unwrap();
        assert_eq!(view.remaining, Amount::from(70));
        assert_eq!(view.status, Status::Healthy);
        assert_eq!(env.budget().await.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_add_until_exhausted() {
        let env = TestEnv::new("100").await;
        let out = add(env.config(), "rent", "80").await.unwrap();
        let view = out.structure().unwrap();
        assert_eq!(view.status, Status::Danger);
        assert!(!view.exhausted);

        let out = add(env.config(), "food", "20").await.unwrap();
        assert!(out.message().contains("Budget exhausted"));
        assert!(out.structure().unwrap().exhausted);

        let err = add(env.config(), "snack", "1").await.unwrap_err();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Validation));
        assert_eq!(env.budget().await.expenses().len(), 2);
    }

    #[tokio::test]
    async fn test_add_invalid_input_is_not_saved() {
        let env = TestEnv::new("100").await;
        let err = add(env.config(), "", "abc").await.unwrap_err();
        assert_eq!(err.to_string(), "Both fields are required");
        assert!(env.budget().await.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_add_without_budget() {
        let env = TestEnv::empty().await;
        let err = add(env.config(), "coffee", "3").await.unwrap_err();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Persistence));
        assert!(err.to_string().contains("budget init"));
    }
}
