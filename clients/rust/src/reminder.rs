use crate::{APIResponse, BaseClient};
use invoice_reminders_api_structs::*;
use invoice_reminders_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_history(
        &self,
        invoice_id: ID,
    ) -> APIResponse<get_invoice_reminders::APIResponse> {
        self.base
            .get(format!("invoices/{}/reminders", invoice_id), StatusCode::OK)
            .await
    }

    pub async fn get_decision(
        &self,
        invoice_id: ID,
    ) -> APIResponse<get_reminder_decision::APIResponse> {
        self.base
            .get(
                format!("invoices/{}/reminders/decision", invoice_id),
                StatusCode::OK,
            )
            .await
    }

    /// Runs a reminder campaign on the server right away
    pub async fn send_due_reminders(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .post((), "reminders/send".into(), StatusCode::OK)
            .await
    }
}
