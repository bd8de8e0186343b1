use super::{IUserSettingsRepo, UnreadableSettings};
use crate::repos::shared::inmemory_repo::*;
use invoice_reminders_domain::{UserSettings, ID};

pub struct InMemoryUserSettingsRepo {
    settings: std::sync::Mutex<Vec<UserSettings>>,
}

impl InMemoryUserSettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserSettingsRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserSettingsRepo for InMemoryUserSettingsRepo {
    async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()> {
        if find(&settings.user_id, &self.settings).is_some() {
            anyhow::bail!("Settings for user {} already exist", settings.user_id);
        }
        insert(settings, &self.settings);
        Ok(())
    }

    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
        if !save(settings, &self.settings) {
            anyhow::bail!("No settings stored for user {}", settings.user_id);
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserSettings>> {
        Ok(find(user_id, &self.settings))
    }

    async fn find_opted_in(&self) -> anyhow::Result<Vec<Result<UserSettings, UnreadableSettings>>> {
        let opted_in = find_by(&self.settings, |s| {
            s.reminder_policy.automated_reminders_enabled
        });
        Ok(opted_in.into_iter().map(Ok).collect())
    }
}
