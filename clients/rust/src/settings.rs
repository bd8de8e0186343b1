use crate::{APIResponse, BaseClient};
use invoice_reminders_api_structs::*;
use invoice_reminders_domain::{EmailTemplate, ReminderPolicyConfig, Tone, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct UpdateReminderSettingsInput {
    pub user_id: ID,
    pub business_name: Option<String>,
    pub reminder_policy: Option<ReminderPolicyConfig>,
    pub email_templates: Option<Vec<EmailTemplate>>,
    pub remove_templates: Option<Vec<Tone>>,
}

impl SettingsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_reminder_settings(
        &self,
        user_id: ID,
    ) -> APIResponse<get_reminder_settings::APIResponse> {
        self.base
            .get(
                format!("user/{}/settings/reminders", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update_reminder_settings(
        &self,
        input: UpdateReminderSettingsInput,
    ) -> APIResponse<update_reminder_settings::APIResponse> {
        let body = update_reminder_settings::RequestBody {
            business_name: input.business_name,
            reminder_policy: input.reminder_policy,
            email_templates: input.email_templates,
            remove_templates: input.remove_templates,
        };
        self.base
            .put(
                body,
                format!("user/{}/settings/reminders", input.user_id),
                StatusCode::OK,
            )
            .await
    }
}
