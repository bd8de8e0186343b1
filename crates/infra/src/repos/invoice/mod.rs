mod inmemory;
mod postgres;

pub use inmemory::InMemoryInvoiceRepo;
use invoice_reminders_domain::{Invoice, ID};
pub use postgres::PostgresInvoiceRepo;

#[async_trait::async_trait]
pub trait IInvoiceRepo: Send + Sync {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()>;
    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()>;
    async fn find(&self, invoice_id: &ID) -> Option<Invoice>;
    /// Invoices of the user that are awaiting payment, oldest due date first
    async fn find_pending_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Invoice>>;
}
