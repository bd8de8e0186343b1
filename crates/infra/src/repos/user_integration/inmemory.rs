use super::IUserIntegrationRepo;
use crate::repos::shared::inmemory_repo::*;
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};

pub struct InMemoryUserIntegrationRepo {
    integrations: std::sync::Mutex<Vec<UserIntegration>>,
}

impl InMemoryUserIntegrationRepo {
    pub fn new() -> Self {
        Self {
            integrations: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserIntegrationRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserIntegrationRepo for InMemoryUserIntegrationRepo {
    async fn save(&self, integration: &UserIntegration) -> anyhow::Result<()> {
        delete_by(&self.integrations, |i| {
            i.user_id == integration.user_id && i.provider == integration.provider
        });
        insert(integration, &self.integrations);
        Ok(())
    }

    async fn find(&self, user_id: &ID, provider: IntegrationProvider) -> Option<UserIntegration> {
        find_by(&self.integrations, |i| {
            i.user_id == *user_id && i.provider == provider
        })
        .pop()
    }

    async fn delete(&self, user_id: &ID, provider: IntegrationProvider) -> anyhow::Result<bool> {
        let deleted = delete_by(&self.integrations, |i| {
            i.user_id == *user_id && i.provider == provider
        });
        Ok(!deleted.is_empty())
    }
}
