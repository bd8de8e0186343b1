mod campaign;
mod date;
mod integration;
mod invoice;
pub mod policy;
mod reminder;
mod settings;
mod shared;
pub mod template;

pub use campaign::{CampaignError, CampaignErrorKind, CampaignResult};
pub use date::{days_overdue, format_long_date, start_of_day, whole_days_between};
pub use integration::{IntegrationProvider, UserIntegration};
pub use invoice::{format_amount, Invoice, InvoiceStatus};
pub use policy::{check_history, decide, HistoryError};
pub use reminder::{ReminderDecision, ReminderRecord, ReminderState, Tone};
pub use settings::{InvalidPolicyError, ReminderPolicyConfig, ToneSchedule, UserSettings};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use template::{render, EmailTemplate, RenderedEmail};
