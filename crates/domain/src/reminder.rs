use crate::{
    invoice::Invoice,
    settings::ReminderPolicyConfig,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The voice of a payment reminder email. Escalates with each reminder sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Polite,
    Firm,
    Urgent,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Firm => "firm",
            Self::Urgent => "urgent",
        }
    }
}

impl Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid tone: {0}")]
pub struct InvalidToneError(String);

impl FromStr for Tone {
    type Err = InvalidToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polite" => Ok(Self::Polite),
            "firm" => Ok(Self::Firm),
            "urgent" => Ok(Self::Urgent),
            _ => Err(InvalidToneError(s.to_string())),
        }
    }
}

/// A `ReminderRecord` is written once for every payment reminder that
/// was actually sent for an `Invoice`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub id: ID,
    pub invoice_id: ID,
    pub user_id: ID,
    /// 1-based position of this reminder for the invoice
    pub sequence_number: i64,
    pub tone: Tone,
    pub sent_at: DateTime<Utc>,
    /// Identifier returned by the email transport
    pub message_id: Option<String>,
}

impl ReminderRecord {
    pub fn new(
        invoice: &Invoice,
        decision: &ReminderDecision,
        sent_at: DateTime<Utc>,
        message_id: Option<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            invoice_id: invoice.id,
            user_id: invoice.user_id,
            sequence_number: decision.sequence_number,
            tone: decision.tone,
            sent_at,
            message_id,
        }
    }
}

impl Entity for ReminderRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Outcome of evaluating the reminder policy for one invoice at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderDecision {
    pub should_send: bool,
    /// The sequence number of the reminder to send, or of the last sent
    /// reminder when nothing should be sent (0 if none was ever sent)
    pub sequence_number: i64,
    pub tone: Tone,
    pub days_overdue: i64,
}

/// Where an invoice is in its reminder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "sequenceNumber", rename_all = "camelCase")]
pub enum ReminderState {
    NoReminderSent,
    Reminder(i64),
    Capped,
}

impl ReminderState {
    pub fn from_history(history: &[ReminderRecord], config: &ReminderPolicyConfig) -> Self {
        match history.iter().map(|r| r.sequence_number).max() {
            None => Self::NoReminderSent,
            Some(seq) if seq >= config.max_reminders => Self::Capped,
            Some(seq) => Self::Reminder(seq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: i64) -> ReminderRecord {
        ReminderRecord {
            id: ID::new(),
            invoice_id: ID::new(),
            user_id: ID::new(),
            sequence_number: seq,
            tone: Tone::Polite,
            sent_at: Utc::now(),
            message_id: None,
        }
    }

    #[test]
    fn state_follows_history() {
        let config = ReminderPolicyConfig {
            max_reminders: 3,
            ..Default::default()
        };
        assert_eq!(
            ReminderState::from_history(&[], &config),
            ReminderState::NoReminderSent
        );
        assert_eq!(
            ReminderState::from_history(&[record(1), record(2)], &config),
            ReminderState::Reminder(2)
        );
        assert_eq!(
            ReminderState::from_history(&[record(1), record(2), record(3)], &config),
            ReminderState::Capped
        );
    }

    #[test]
    fn rejects_unknown_tone() {
        assert!("angry".parse::<Tone>().is_err());
        assert_eq!("firm".parse::<Tone>().unwrap(), Tone::Firm);
    }
}
