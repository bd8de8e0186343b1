use chrono::{DateTime, Utc};
use invoice_reminders_domain::{ReminderDecision, ReminderRecord, RenderedEmail, Tone, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecordDTO {
    pub id: ID,
    pub invoice_id: ID,
    pub user_id: ID,
    pub sequence_number: i64,
    pub tone: Tone,
    pub sent_at: DateTime<Utc>,
    pub message_id: Option<String>,
}

impl ReminderRecordDTO {
    pub fn new(record: ReminderRecord) -> Self {
        Self {
            id: record.id,
            invoice_id: record.invoice_id,
            user_id: record.user_id,
            sequence_number: record.sequence_number,
            tone: record.tone,
            sent_at: record.sent_at,
            message_id: record.message_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDecisionDTO {
    pub should_send: bool,
    pub sequence_number: i64,
    pub tone: Tone,
    pub days_overdue: i64,
}

impl ReminderDecisionDTO {
    pub fn new(decision: ReminderDecision) -> Self {
        Self {
            should_send: decision.should_send,
            sequence_number: decision.sequence_number,
            tone: decision.tone,
            days_overdue: decision.days_overdue,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEmailDTO {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
}

impl RenderedEmailDTO {
    pub fn new(to: String, email: RenderedEmail) -> Self {
        Self {
            to,
            subject: email.subject,
            body: email.body,
            is_html: email.is_html,
        }
    }
}
