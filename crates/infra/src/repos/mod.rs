mod invoice;
mod reminder;
mod shared;
mod user_integration;
mod user_settings;

pub use invoice::{IInvoiceRepo, InMemoryInvoiceRepo, PostgresInvoiceRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user_integration::{
    IUserIntegrationRepo, InMemoryUserIntegrationRepo, PostgresUserIntegrationRepo,
};
pub use user_settings::{
    IUserSettingsRepo, InMemoryUserSettingsRepo, PostgresUserSettingsRepo, UnreadableSettings,
};

#[derive(Clone)]
pub struct Repos {
    pub user_settings: Arc<dyn IUserSettingsRepo>,
    pub invoices: Arc<dyn IInvoiceRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub user_integrations: Arc<dyn IUserIntegrationRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            user_settings: Arc::new(PostgresUserSettingsRepo::new(pool.clone())),
            invoices: Arc::new(PostgresInvoiceRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            user_integrations: Arc::new(PostgresUserIntegrationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            user_settings: Arc::new(InMemoryUserSettingsRepo::new()),
            invoices: Arc::new(InMemoryInvoiceRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            user_integrations: Arc::new(InMemoryUserIntegrationRepo::new()),
        }
    }
}
