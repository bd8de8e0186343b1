use crate::dtos::UserSettingsDTO;
use invoice_reminders_domain::{UserSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsResponse {
    pub settings: UserSettingsDTO,
}

impl UserSettingsResponse {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings: UserSettingsDTO::new(settings),
        }
    }
}

pub mod get_reminder_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = UserSettingsResponse;
}

pub mod update_reminder_settings {
    use super::*;
    use invoice_reminders_domain::{EmailTemplate, ReminderPolicyConfig, Tone};

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    /// Fields that are left out are not changed
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// A blank name removes the business name
        #[serde(default)]
        pub business_name: Option<String>,
        #[serde(default)]
        pub reminder_policy: Option<ReminderPolicyConfig>,
        /// Replaces the custom template for each tone listed
        #[serde(default)]
        pub email_templates: Option<Vec<EmailTemplate>>,
        /// Tones that go back to the built-in template
        #[serde(default)]
        pub remove_templates: Option<Vec<Tone>>,
    }

    pub type APIResponse = UserSettingsResponse;
}
