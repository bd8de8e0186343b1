use super::IInvoiceRepo;
use chrono::NaiveDate;
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresInvoiceRepo {
    pool: PgPool,
}

impl PostgresInvoiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRaw {
    invoice_uid: Uuid,
    user_uid: Uuid,
    invoice_number: String,
    client_name: String,
    client_email: String,
    amount: i64,
    currency: String,
    due_date: NaiveDate,
    status: String,
    created: i64,
}

impl TryFrom<InvoiceRaw> for Invoice {
    type Error = anyhow::Error;

    fn try_from(raw: InvoiceRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.invoice_uid.into(),
            user_id: raw.user_uid.into(),
            invoice_number: raw.invoice_number,
            client_name: raw.client_name,
            client_email: raw.client_email,
            amount: raw.amount,
            currency: raw.currency,
            due_date: raw.due_date,
            status: raw.status.parse()?,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IInvoiceRepo for PostgresInvoiceRepo {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoices
            (invoice_uid, user_uid, invoice_number, client_name, client_email,
                amount, currency, due_date, status, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(invoice.id.inner_ref())
        .bind(invoice.user_id.inner_ref())
        .bind(&invoice.invoice_number)
        .bind(&invoice.client_name)
        .bind(&invoice.client_email)
        .bind(invoice.amount)
        .bind(&invoice.currency)
        .bind(invoice.due_date)
        .bind(invoice.status.as_str())
        .bind(invoice.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert invoice: {:?}. DB returned error: {:?}",
                invoice, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE invoices
            SET invoice_number = $2,
            client_name = $3,
            client_email = $4,
            amount = $5,
            currency = $6,
            due_date = $7,
            status = $8
            WHERE invoice_uid = $1
            "#,
        )
        .bind(invoice.id.inner_ref())
        .bind(&invoice.invoice_number)
        .bind(&invoice.client_name)
        .bind(&invoice.client_email)
        .bind(invoice.amount)
        .bind(&invoice.currency)
        .bind(invoice.due_date)
        .bind(invoice.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save invoice: {:?}. DB returned error: {:?}",
                invoice, e
            );
            e
        })?;
        if res.rows_affected() == 0 {
            anyhow::bail!("Invoice {} does not exist", invoice.id);
        }
        Ok(())
    }

    async fn find(&self, invoice_id: &ID) -> Option<Invoice> {
        let raw: InvoiceRaw = sqlx::query_as(
            r#"
            SELECT * FROM invoices
            WHERE invoice_uid = $1
            "#,
        )
        .bind(invoice_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find invoice with id: {:?} failed. DB returned error: {:?}",
                invoice_id, e
            );
            e
        })
        .ok()??;

        match Invoice::try_from(raw) {
            Ok(invoice) => Some(invoice),
            Err(e) => {
                error!("Stored invoice {} is corrupt: {:?}", invoice_id, e);
                None
            }
        }
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Invoice>> {
        let rows: Vec<InvoiceRaw> = sqlx::query_as(
            r#"
            SELECT * FROM invoices
            WHERE user_uid = $1 AND status = $2
            ORDER BY due_date, created
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(InvoiceStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Invoice::try_from).collect()
    }
}
