mod base;
mod integration;
mod invoice;
mod reminder;
mod settings;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use integration::IntegrationClient;
use invoice::InvoiceClient;
pub use invoice::CreateInvoiceInput;
use reminder::ReminderClient;
use settings::SettingsClient;
pub use settings::UpdateReminderSettingsInput;
use status::StatusClient;
use std::sync::Arc;

pub use invoice_reminders_api_structs::dtos::*;
pub use invoice_reminders_domain::{
    CampaignError, CampaignErrorKind, CampaignResult, EmailTemplate, IntegrationProvider,
    InvoiceStatus, ReminderPolicyConfig, ReminderState, Tone, ToneSchedule, ID,
};

// Domain
pub use invoice_reminders_api_structs::dtos::InvoiceDTO as Invoice;
pub use invoice_reminders_api_structs::dtos::ReminderRecordDTO as ReminderRecord;
pub use invoice_reminders_api_structs::dtos::UserSettingsDTO as UserSettings;

/// Invoice Reminders Server SDK
///
/// The SDK contains methods for interacting with the Invoice Reminders server
/// API.
#[derive(Clone)]
pub struct ReminderSDK {
    pub integration: IntegrationClient,
    pub invoice: InvoiceClient,
    pub reminder: ReminderClient,
    pub settings: SettingsClient,
    pub status: StatusClient,
}

impl ReminderSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        let base = Arc::new(base);
        let integration = IntegrationClient::new(base.clone());
        let invoice = InvoiceClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let settings = SettingsClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            integration,
            invoice,
            reminder,
            settings,
            status,
        }
    }
}
