//! Decides whether a payment reminder is due for an invoice.
//!
//! [`decide`] is a pure function of the invoice's due date, the owner's
//! [`ReminderPolicyConfig`], the reminders already sent and the current
//! instant. It never looks at the invoice status: filtering to pending
//! invoices is done by the caller.

use crate::{
    date::{days_overdue, whole_days_between},
    invoice::Invoice,
    reminder::{ReminderDecision, ReminderRecord},
    settings::ReminderPolicyConfig,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The reminder with the highest sequence number, the latest sent one on ties
pub fn last_reminder(history: &[ReminderRecord]) -> Option<&ReminderRecord> {
    history
        .iter()
        .max_by_key(|r| (r.sequence_number, r.sent_at))
}

fn first_reminder_due(config: &ReminderPolicyConfig, days_overdue: i64) -> bool {
    if config.first_reminder_offset_days >= 0 {
        days_overdue >= 0
    } else {
        days_overdue >= 0
            && days_overdue.unsigned_abs() >= config.first_reminder_offset_days.unsigned_abs()
    }
}

pub fn decide(
    invoice: &Invoice,
    config: &ReminderPolicyConfig,
    history: &[ReminderRecord],
    now: DateTime<Utc>,
) -> ReminderDecision {
    let days_overdue = days_overdue(invoice.due_date, now);

    let last = match last_reminder(history) {
        Some(last) => last,
        None => {
            let should_send = first_reminder_due(config, days_overdue);
            return ReminderDecision {
                should_send,
                sequence_number: if should_send { 1 } else { 0 },
                tone: config.tone_for_sequence(1),
                days_overdue,
            };
        }
    };

    let hold = ReminderDecision {
        should_send: false,
        sequence_number: last.sequence_number,
        tone: last.tone,
        days_overdue,
    };

    if last.sequence_number >= config.max_reminders {
        return hold;
    }

    let days_since_last = whole_days_between(last.sent_at, now);
    if days_since_last < config.follow_up_interval_days {
        return hold;
    }

    let next = last.sequence_number + 1;
    ReminderDecision {
        should_send: true,
        sequence_number: next,
        tone: config.tone_for_sequence(next),
        days_overdue,
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Reminder sequence has a gap: expected {expected} but found {found}")]
    SequenceGap { expected: i64, found: i64 },
    #[error("Reminder sequence number {0} was recorded more than once")]
    DuplicateSequence(i64),
}

/// Checks that the sequence numbers of a reminder history are exactly `1..=N`.
///
/// A broken history is reported, never repaired: [`decide`] keeps treating the
/// highest recorded sequence number as authoritative.
pub fn check_history(history: &[ReminderRecord]) -> Result<(), HistoryError> {
    let mut sequence: Vec<i64> = history.iter().map(|r| r.sequence_number).collect();
    sequence.sort_unstable();

    let mut expected = 1;
    for found in sequence {
        if found == expected - 1 {
            return Err(HistoryError::DuplicateSequence(found));
        }
        if found != expected {
            return Err(HistoryError::SequenceGap { expected, found });
        }
        expected += 1;
    }
    Ok(())
}
