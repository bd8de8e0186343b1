use crate::dtos::InvoiceDTO;
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub invoice: InvoiceDTO,
}

impl InvoiceResponse {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            invoice: InvoiceDTO::new(invoice),
        }
    }
}

pub mod create_invoice {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub invoice_number: String,
        pub client_name: String,
        pub client_email: String,
        pub amount: i64,
        pub currency: String,
        pub due_date: NaiveDate,
        /// Defaults to `pending`
        #[serde(default)]
        pub status: Option<InvoiceStatus>,
    }

    pub type APIResponse = InvoiceResponse;
}

pub mod get_invoice {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    pub type APIResponse = InvoiceResponse;
}

pub mod update_invoice_status {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: InvoiceStatus,
    }

    pub type APIResponse = InvoiceResponse;
}
