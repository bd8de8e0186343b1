use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
use serde::{Deserialize, Serialize};

/// A connected mailbox. Credentials are never exposed.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserIntegrationDTO {
    pub user_id: ID,
    pub provider: IntegrationProvider,
    pub sender_email: String,
}

impl UserIntegrationDTO {
    pub fn new(integration: UserIntegration) -> Self {
        Self {
            user_id: integration.user_id,
            provider: integration.provider,
            sender_email: integration.sender_email,
        }
    }
}
