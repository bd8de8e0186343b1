mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, GoogleOAuthConfig, ReminderJobConfig};
pub use repos::{
    IInvoiceRepo, IReminderRepo, IUserIntegrationRepo, IUserSettingsRepo, InMemoryInvoiceRepo,
    InMemoryReminderRepo, InMemoryUserIntegrationRepo, InMemoryUserSettingsRepo, Repos,
    UnreadableSettings,
};
pub use services::email::{
    EmailMessage, GmailEmailSender, IEmailSender, InMemoryEmailSender, LogEmailSender, MessageId,
    SendError, SentEmail,
};
pub use services::google;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailSender>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

fn create_email_sender(config: &Config, repos: &Repos, sys: Arc<dyn ISys>) -> Arc<dyn IEmailSender> {
    match &config.google {
        Some(oauth) => Arc::new(GmailEmailSender::new(
            oauth.clone(),
            repos.user_integrations.clone(),
            sys,
        )),
        None => Arc::new(LogEmailSender {}),
    }
}

impl ReminderContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let email = create_email_sender(&config, &repos, sys.clone());
        Self {
            repos,
            config,
            sys,
            email,
        }
    }

    /// Context backed by in-memory repositories, for tests and local runs
    pub fn create_inmemory() -> Self {
        let repos = Repos::create_inmemory();
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let email = create_email_sender(&config, &repos, sys.clone());
        Self {
            repos,
            config,
            sys,
            email,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ReminderContext {
    ReminderContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await?;

    sqlx::migrate!().run(&pool).await
}
