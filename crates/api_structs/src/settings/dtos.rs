use invoice_reminders_domain::{EmailTemplate, ReminderPolicyConfig, UserSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsDTO {
    pub user_id: ID,
    pub business_name: Option<String>,
    pub reminder_policy: ReminderPolicyConfig,
    pub email_templates: Vec<EmailTemplate>,
}

impl UserSettingsDTO {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            user_id: settings.user_id,
            business_name: settings.business_name,
            reminder_policy: settings.reminder_policy,
            email_templates: settings.email_templates,
        }
    }
}
