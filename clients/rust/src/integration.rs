use crate::{APIResponse, BaseClient};
use invoice_reminders_api_structs::*;
use invoice_reminders_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct IntegrationClient {
    base: Arc<BaseClient>,
}

impl IntegrationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// `code` is the authorization code Google redirected the user back with
    pub async fn connect_gmail(
        &self,
        user_id: ID,
        code: String,
    ) -> APIResponse<connect_gmail::APIResponse> {
        let body = connect_gmail::RequestBody { code };
        self.base
            .post(
                body,
                format!("user/{}/integrations/gmail", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn disconnect_gmail(&self, user_id: ID) -> APIResponse<disconnect_gmail::APIResponse> {
        self.base
            .delete(
                format!("user/{}/integrations/gmail", user_id),
                StatusCode::OK,
            )
            .await
    }
}
