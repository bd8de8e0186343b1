mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserSettingsRepo;
use invoice_reminders_domain::{UserSettings, ID};
pub use postgres::PostgresUserSettingsRepo;

/// Settings that are stored for a user but could not be read back
#[derive(Debug)]
pub struct UnreadableSettings {
    pub user_id: ID,
    pub error: anyhow::Error,
}

#[async_trait::async_trait]
pub trait IUserSettingsRepo: Send + Sync {
    async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()>;
    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()>;
    /// `Ok(None)` only when nothing is stored for the user
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserSettings>>;
    /// Settings of every user with automated reminders enabled. A row that
    /// cannot be read is returned as an error instead of being skipped.
    async fn find_opted_in(&self) -> anyhow::Result<Vec<Result<UserSettings, UnreadableSettings>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_only_opted_in_users() {
        let repo = InMemoryUserSettingsRepo::new();
        let mut enabled = UserSettings::new(ID::new());
        enabled.reminder_policy.automated_reminders_enabled = true;
        let disabled = UserSettings::new(ID::new());
        repo.insert(&enabled).await.unwrap();
        repo.insert(&disabled).await.unwrap();

        let opted_in = repo.find_opted_in().await.unwrap();
        assert_eq!(opted_in.len(), 1);
        assert_eq!(opted_in[0].as_ref().unwrap().user_id, enabled.user_id);

        enabled.reminder_policy.automated_reminders_enabled = false;
        repo.save(&enabled).await.unwrap();
        assert!(repo.find_opted_in().await.unwrap().is_empty());
        assert!(repo.find(&disabled.user_id).await.unwrap().is_some());
        assert!(repo.find(&ID::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_settings() {
        let repo = InMemoryUserSettingsRepo::new();
        let settings = UserSettings::new(ID::new());
        repo.insert(&settings).await.unwrap();
        assert!(repo.insert(&settings).await.is_err());
        assert!(repo.save(&UserSettings::new(ID::new())).await.is_err());
    }
}
