use super::IInvoiceRepo;
use crate::repos::shared::inmemory_repo::*;
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};

pub struct InMemoryInvoiceRepo {
    invoices: std::sync::Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceRepo {
    pub fn new() -> Self {
        Self {
            invoices: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryInvoiceRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IInvoiceRepo for InMemoryInvoiceRepo {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()> {
        insert(invoice, &self.invoices);
        Ok(())
    }

    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()> {
        if !save(invoice, &self.invoices) {
            anyhow::bail!("Invoice {} does not exist", invoice.id);
        }
        Ok(())
    }

    async fn find(&self, invoice_id: &ID) -> Option<Invoice> {
        find(invoice_id, &self.invoices)
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Invoice>> {
        let mut invoices = find_by(&self.invoices, |i| {
            i.user_id == *user_id && i.status == InvoiceStatus::Pending
        });
        invoices.sort_by_key(|i| (i.due_date, i.created));
        Ok(invoices)
    }
}
