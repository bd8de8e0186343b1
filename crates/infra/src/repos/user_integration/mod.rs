mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserIntegrationRepo;
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
pub use postgres::PostgresUserIntegrationRepo;

#[async_trait::async_trait]
pub trait IUserIntegrationRepo: Send + Sync {
    /// Inserts the integration or replaces the one for the same user and provider
    async fn save(&self, integration: &UserIntegration) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID, provider: IntegrationProvider) -> Option<UserIntegration>;
    /// Returns whether there was an integration to delete
    async fn delete(&self, user_id: &ID, provider: IntegrationProvider) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration(user_id: ID, access_token: &str) -> UserIntegration {
        UserIntegration {
            user_id,
            provider: IntegrationProvider::Gmail,
            sender_email: "me@example.com".into(),
            refresh_token: "refresh".into(),
            access_token: access_token.into(),
            access_token_expires_ts: 0,
        }
    }

    #[tokio::test]
    async fn upserts_and_deletes_integrations() {
        let repo = InMemoryUserIntegrationRepo::new();
        let user_id = ID::new();
        repo.save(&integration(user_id, "a")).await.unwrap();
        repo.save(&integration(user_id, "b")).await.unwrap();

        let found = repo.find(&user_id, IntegrationProvider::Gmail).await.unwrap();
        assert_eq!(found.access_token, "b");

        assert!(repo.delete(&user_id, IntegrationProvider::Gmail).await.unwrap());
        assert!(!repo.delete(&user_id, IntegrationProvider::Gmail).await.unwrap());
        assert!(repo.find(&user_id, IntegrationProvider::Gmail).await.is_none());
    }
}
