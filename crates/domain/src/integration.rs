use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationProvider {
    Gmail,
}

impl IntegrationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gmail => "gmail",
        }
    }
}

impl Display for IntegrationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid integration provider: {0}")]
pub struct InvalidProviderError(String);

impl FromStr for IntegrationProvider {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gmail" => Ok(Self::Gmail),
            _ => Err(InvalidProviderError(s.to_string())),
        }
    }
}

/// OAuth credentials that let reminder emails be sent from the user's own mailbox
#[derive(Debug, Clone, PartialEq)]
pub struct UserIntegration {
    pub user_id: ID,
    pub provider: IntegrationProvider,
    /// Address reminders are sent from
    pub sender_email: String,
    pub refresh_token: String,
    pub access_token: String,
    /// Millis timestamp at which `access_token` expires
    pub access_token_expires_ts: i64,
}

impl UserIntegration {
    /// Treat tokens expiring within the next minute as expired
    pub fn access_token_valid_at(&self, now_ts: i64) -> bool {
        self.access_token_expires_ts - 60 * 1000 > now_ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_expires_with_margin() {
        let integration = UserIntegration {
            user_id: ID::new(),
            provider: IntegrationProvider::Gmail,
            sender_email: "me@example.com".into(),
            refresh_token: "refresh".into(),
            access_token: "access".into(),
            access_token_expires_ts: 1_000_000,
        };
        assert!(integration.access_token_valid_at(0));
        assert!(!integration.access_token_valid_at(1_000_000 - 30 * 1000));
        assert!(!integration.access_token_valid_at(2_000_000));
    }
}
