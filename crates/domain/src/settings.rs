use crate::{
    reminder::Tone,
    shared::entity::{Entity, ID},
    template::EmailTemplate,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tones used for the first, second and third-or-later reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneSchedule {
    pub first: Tone,
    pub second: Tone,
    pub third: Tone,
}

impl ToneSchedule {
    /// Sequence numbers past 3 keep using the third tone
    pub fn tone_for_sequence(&self, sequence_number: i64) -> Tone {
        match sequence_number {
            i64::MIN..=1 => self.first,
            2 => self.second,
            _ => self.third,
        }
    }
}

impl Default for ToneSchedule {
    fn default() -> Self {
        Self {
            first: Tone::Polite,
            second: Tone::Firm,
            third: Tone::Urgent,
        }
    }
}

/// How and when a `User` wants payment reminders sent for their pending invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPolicyConfig {
    pub automated_reminders_enabled: bool,
    /// Positive: days before the due date, negative: days after the due date,
    /// zero: on the due date.
    /// Only the sign of a non-negative value is honored, every value >= 0
    /// triggers the first reminder on the due date.
    pub first_reminder_offset_days: i64,
    pub follow_up_interval_days: i64,
    pub max_reminders: i64,
    pub tones: ToneSchedule,
}

/// Largest accepted distance in days between the due date and the first reminder
pub const MAX_FIRST_REMINDER_OFFSET_DAYS: i64 = 365;

impl ReminderPolicyConfig {
    pub fn tone_for_sequence(&self, sequence_number: i64) -> Tone {
        self.tones.tone_for_sequence(sequence_number)
    }

    /// Clamps values that would make the policy meaningless.
    /// Stored settings may predate validation, so this is applied on every load.
    pub fn normalized(mut self) -> Self {
        self.follow_up_interval_days = self.follow_up_interval_days.max(1);
        self.max_reminders = self.max_reminders.max(1);
        self.first_reminder_offset_days = self.first_reminder_offset_days.clamp(
            -MAX_FIRST_REMINDER_OFFSET_DAYS,
            MAX_FIRST_REMINDER_OFFSET_DAYS,
        );
        self
    }

    pub fn validate(&self) -> Result<(), InvalidPolicyError> {
        if self.follow_up_interval_days < 1 {
            return Err(InvalidPolicyError::FollowUpInterval(
                self.follow_up_interval_days,
            ));
        }
        if self.max_reminders < 1 {
            return Err(InvalidPolicyError::MaxReminders(self.max_reminders));
        }
        let offset_range = -MAX_FIRST_REMINDER_OFFSET_DAYS..=MAX_FIRST_REMINDER_OFFSET_DAYS;
        if !offset_range.contains(&self.first_reminder_offset_days) {
            return Err(InvalidPolicyError::FirstReminderOffset(
                self.first_reminder_offset_days,
            ));
        }
        Ok(())
    }
}

impl Default for ReminderPolicyConfig {
    fn default() -> Self {
        Self {
            automated_reminders_enabled: false,
            first_reminder_offset_days: 0,
            follow_up_interval_days: 7,
            max_reminders: 3,
            tones: Default::default(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidPolicyError {
    #[error("followUpIntervalDays must be at least 1, got {0}")]
    FollowUpInterval(i64),
    #[error("maxReminders must be at least 1, got {0}")]
    MaxReminders(i64),
    #[error(
        "firstReminderOffsetDays must be between -{max} and {max}, got {0}",
        max = MAX_FIRST_REMINDER_OFFSET_DAYS
    )]
    FirstReminderOffset(i64),
}

/// Per user settings. Created with defaults the first time they are requested.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub user_id: ID,
    /// Signs off reminder emails
    pub business_name: Option<String>,
    pub reminder_policy: ReminderPolicyConfig,
    /// Overrides of the built-in template for a tone, at most one per tone
    pub email_templates: Vec<EmailTemplate>,
}

impl UserSettings {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            business_name: None,
            reminder_policy: Default::default(),
            email_templates: Vec::new(),
        }
    }

    pub fn template_for(&self, tone: Tone) -> Option<&EmailTemplate> {
        self.email_templates.iter().find(|t| t.tone == tone)
    }

    pub fn set_template(&mut self, template: EmailTemplate) {
        self.email_templates.retain(|t| t.tone != template.tone);
        self.email_templates.push(template);
    }

    pub fn remove_template(&mut self, tone: Tone) {
        self.email_templates.retain(|t| t.tone != tone);
    }
}

impl Entity for UserSettings {
    fn id(&self) -> &ID {
        &self.user_id
    }
}
