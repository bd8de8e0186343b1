use crate::dtos::UserIntegrationDTO;
use invoice_reminders_domain::{UserIntegration, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIntegrationResponse {
    pub integration: UserIntegrationDTO,
}

impl UserIntegrationResponse {
    pub fn new(integration: UserIntegration) -> Self {
        Self {
            integration: UserIntegrationDTO::new(integration),
        }
    }
}

pub mod connect_gmail {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Authorization code from the Google OAuth consent redirect
        pub code: String,
    }

    pub type APIResponse = UserIntegrationResponse;
}

pub mod disconnect_gmail {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = UserIntegrationResponse;
}
