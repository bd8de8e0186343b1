use super::IReminderRepo;
use chrono::{DateTime, Utc};
use invoice_reminders_domain::{ReminderRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    invoice_uid: Uuid,
    user_uid: Uuid,
    sequence_number: i64,
    tone: String,
    sent_at: DateTime<Utc>,
    message_id: Option<String>,
}

impl TryFrom<ReminderRaw> for ReminderRecord {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            invoice_id: raw.invoice_uid.into(),
            user_id: raw.user_uid.into(),
            sequence_number: raw.sequence_number,
            tone: raw.tone.parse()?,
            sent_at: raw.sent_at,
            message_id: raw.message_id,
        })
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        // (invoice_uid, sequence_number) is unique, see migrations
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, invoice_uid, user_uid, sequence_number, tone, sent_at, message_id)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.invoice_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.sequence_number)
        .bind(reminder.tone.as_str())
        .bind(reminder.sent_at)
        .bind(&reminder.message_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_invoice(&self, invoice_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE invoice_uid = $1
            ORDER BY sent_at, sequence_number
            "#,
        )
        .bind(invoice_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReminderRecord::try_from).collect()
    }
}
