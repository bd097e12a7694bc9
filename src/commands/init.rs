use crate::commands::Out;
use crate::error::Error;
use crate::session::Session;
use crate::view::BudgetView;
use crate::{input, Config, Result};
use std::path::Path;
use tracing::info;

/// Sets the initial budget. Creates the home directory and its `config.json` if this is the first
/// run.
///
/// # Arguments
/// - `budget_home` - The directory that holds the configuration and data, e.g. `$HOME/budget`
/// - `total` - The budget, as typed by the user, e.g. `1500` or `$1,500.00`
/// - `force` - Replace a budget that is already saved.
///
/// # Errors
/// - Returns a validation error if `total` is not a number greater than zero.
/// - Returns a conflict error if a budget is already saved and `force` is false.
/// - Returns an error if any file operations fail.
pub async fn init(budget_home: &Path, total: &str, force: bool) -> Result<Out<BudgetView>> {
    let total = input::parse_total(total)?;
    let config = Config::open(budget_home).await?;
    let persistence = config.persistence().await?;

    let persistence = match Session::try_resume(persistence).await? {
        Err(persistence) => persistence,
        Ok(previous) if force => {
            info!(
                "Replacing the saved budget of {}",
                previous.budget().total()
            );
            previous.into_parts().1
        }
        Ok(previous) => {
            return Err(Error::conflict(format!(
                "A budget of {} is already saved in {}, use --force to replace it",
                previous.budget().total(),
                config.root().display()
            )))
        }
    };

    let session = Session::start(persistence, total).await?;
    let view = BudgetView::from(session.budget());
    Ok(Out::new(format!("Budget saved\n\n{view}"), view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::Amount;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_home_and_budget() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("budget");
        let out = init(&home, "250", false).await.unwrap();
        assert!(out.message().starts_with("Budget saved"));
        assert_eq!(out.structure().unwrap().total, Amount::from(250));
        assert!(home.join("config.json").is_file());
        assert!(home.join("data").join("budget.json").is_file());
    }

    #[tokio::test]
    async fn test_init_rejects_bad_total() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("budget");
        for total in ["", "abc", "0", "-5"] {
            let err = init(&home, total, false).await.unwrap_err();
            assert_eq!(ErrorType::of(&err), Some(ErrorType::Validation));
        }
        assert!(!home.exists());
    }

    #[tokio::test]
    async fn test_init_refuses_to_replace_without_force() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "100", false).await.unwrap();
        let err = init(dir.path(), "200", false).await.unwrap_err();
        assert_eq!(ErrorType::of(&err), Some(ErrorType::Conflict));
        assert!(err.to_string().contains("--force"));
        let config = Config::load(dir.path()).await.unwrap();
        let budget = config.persistence().await.unwrap().load().await.unwrap();
        assert_eq!(budget.total(), Amount::from(100));

        let out = init(dir.path(), "200", true).await.unwrap();
        assert_eq!(out.structure().unwrap().total, Amount::from(200));
    }

    #[tokio::test]
    async fn test_init_replaces_malformed_snapshot() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "100", false).await.unwrap();
        let snapshot = dir.path().join("data").join("budget.json");
        std::fs::write(&snapshot, "{ not json").unwrap();

        let out = init(dir.path(), "300", false).await.unwrap();
        assert_eq!(out.structure().unwrap().remaining, Amount::from(300));
    }
}
