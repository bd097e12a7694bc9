use crate::commands::Out;
use crate::session::Session;
use crate::view::BudgetView;
use crate::{Config, Result};

/// Shows the saved budget: total, remaining, status and the expenses, newest first. When no usable
/// budget is saved the output says how to set one, with no structured data.
pub async fn show(config: Config) -> Result<Out<BudgetView>> {
    let persistence = config.persistence().await?;
    match Session::try_resume(persistence).await? {
        Ok(session) => {
            let view = BudgetView::from(session.budget());
            Ok(Out::new(view.to_string(), view))
        }
        Err(_) => Ok("No budget has been set, run 'budget init <TOTAL>' to set one".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::Status;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_show() {
        let env = TestEnv::new("100").await;
        add(env.config(), "coffee", "30").await.unwrap();
        add(env.config(), "lunch", "25").await.unwrap();

        let out = show(env.config()).await.unwrap();
        let view = out.structure().unwrap();
        assert_eq!(view.status, Status::Warning);
        assert_eq!(view.expenses[0].name, "lunch");
        assert!(out.message().contains("Remaining: $45.00 (45%, warning)"));
    }

    #[tokio::test]
    async fn test_show_without_budget() {
        let env = TestEnv::empty().await;
        let out = show(env.config()).await.unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().contains("budget init"));
    }
}
