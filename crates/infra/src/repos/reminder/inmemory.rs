use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use invoice_reminders_domain::{ReminderRecord, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<ReminderRecord>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        let mut reminders = self.reminders.lock().unwrap();
        if reminders.iter().any(|r| {
            r.invoice_id == reminder.invoice_id && r.sequence_number == reminder.sequence_number
        }) {
            anyhow::bail!(
                "Reminder {} was already recorded for invoice {}",
                reminder.sequence_number,
                reminder.invoice_id
            );
        }
        reminders.push(reminder.clone());
        Ok(())
    }

    async fn find_by_invoice(&self, invoice_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
        let mut history = find_by(&self.reminders, |r| r.invoice_id == *invoice_id);
        history.sort_by_key(|r| (r.sent_at, r.sequence_number));
        Ok(history)
    }
}
