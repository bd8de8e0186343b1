mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use invoice_reminders_domain::{ReminderRecord, ID};
pub use postgres::PostgresReminderRepo;

/// Append-only history of sent reminders.
///
/// Implementations must reject a second record with the same
/// `(invoice_id, sequence_number)` so that concurrent campaign runs cannot
/// break the gapless sequence of an invoice.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;
    /// Ordered by `sent_at` ascending
    async fn find_by_invoice(&self, invoice_id: &ID) -> anyhow::Result<Vec<ReminderRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use invoice_reminders_domain::Tone;

    fn record(invoice_id: ID, seq: i64, days_ago: i64) -> ReminderRecord {
        ReminderRecord {
            id: ID::new(),
            invoice_id,
            user_id: ID::new(),
            sequence_number: seq,
            tone: Tone::Polite,
            sent_at: Utc::now() - Duration::days(days_ago),
            message_id: None,
        }
    }

    #[tokio::test]
    async fn returns_history_in_send_order() {
        let repo = InMemoryReminderRepo::new();
        let invoice_id = ID::new();
        repo.insert(&record(invoice_id, 2, 1)).await.unwrap();
        repo.insert(&record(invoice_id, 1, 8)).await.unwrap();
        repo.insert(&record(ID::new(), 1, 3)).await.unwrap();

        let history = repo.find_by_invoice(&invoice_id).await.unwrap();
        let seqs: Vec<_> = history.iter().map(|r| r.sequence_number).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[tokio::test]
    async fn rejects_duplicate_sequence_number() {
        let repo = InMemoryReminderRepo::new();
        let invoice_id = ID::new();
        repo.insert(&record(invoice_id, 1, 8)).await.unwrap();
        assert!(repo.insert(&record(invoice_id, 1, 0)).await.is_err());
        assert_eq!(repo.find_by_invoice(&invoice_id).await.unwrap().len(), 1);
    }
}
