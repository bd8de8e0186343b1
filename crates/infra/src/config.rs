use invoice_reminders_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

const API_SECRET_KEY_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// Key clients must send in the `x-api-key` header
    pub api_secret_key: String,
    /// Port for the application to run on
    pub port: usize,
    pub reminder_job: ReminderJobConfig,
    /// Reminders are sent through the users' Gmail accounts when this is set,
    /// otherwise they are only logged
    pub google: Option<GoogleOAuthConfig>,
}

#[derive(Debug, Clone)]
pub struct ReminderJobConfig {
    /// Whether the server runs the daily reminder campaign itself.
    /// Disable when an external cron invokes `send-reminders` instead.
    pub enabled: bool,
    /// Hour of the day (UTC) at which the campaign runs
    pub hour_utc: u32,
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

fn parse_env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let api_secret_key = match std::env::var("API_SECRET_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find API_SECRET_KEY environment variable. Going to create one.");
                let key = create_random_secret(API_SECRET_KEY_LEN);
                info!("Secret api key was generated and set to: {}", key);
                key
            }
        };
        let port = parse_env_or("PORT", 5000_usize);

        let mut hour_utc = parse_env_or("REMINDER_JOB_HOUR_UTC", 9_u32);
        if hour_utc > 23 {
            warn!(
                "REMINDER_JOB_HOUR_UTC: {} is not an hour of the day, falling back to 9.",
                hour_utc
            );
            hour_utc = 9;
        }
        let reminder_job = ReminderJobConfig {
            enabled: parse_env_or("REMINDER_JOB_ENABLED", true),
            hour_utc,
        };

        let google = match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleOAuthConfig {
                client_id,
                client_secret,
                redirect_uri: std::env::var("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            }),
            _ => {
                info!("Google OAuth credentials are not set. Reminder emails will only be logged.");
                None
            }
        };

        Self {
            api_secret_key,
            port,
            reminder_job,
            google,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
