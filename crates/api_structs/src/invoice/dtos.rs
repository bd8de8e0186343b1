use chrono::NaiveDate;
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDTO {
    pub id: ID,
    pub user_id: ID,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: i64,
    pub currency: String,
    /// `amount` formatted for display, e.g. `$1,234.56`
    pub formatted_amount: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created: i64,
}

impl InvoiceDTO {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            formatted_amount: invoice.formatted_amount(),
            id: invoice.id,
            user_id: invoice.user_id,
            invoice_number: invoice.invoice_number,
            client_name: invoice.client_name,
            client_email: invoice.client_email,
            amount: invoice.amount,
            currency: invoice.currency,
            due_date: invoice.due_date,
            status: invoice.status,
            created: invoice.created,
        }
    }
}
