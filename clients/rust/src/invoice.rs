use crate::{APIResponse, BaseClient};
use chrono::NaiveDate;
use invoice_reminders_api_structs::*;
use invoice_reminders_domain::{InvoiceStatus, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct InvoiceClient {
    base: Arc<BaseClient>,
}

pub struct CreateInvoiceInput {
    pub user_id: ID,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: i64,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateInvoiceInput) -> APIResponse<create_invoice::APIResponse> {
        let body = create_invoice::RequestBody {
            invoice_number: input.invoice_number,
            client_name: input.client_name,
            client_email: input.client_email,
            amount: input.amount,
            currency: input.currency,
            due_date: input.due_date,
            status: input.status,
        };
        self.base
            .post(
                body,
                format!("user/{}/invoices", input.user_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, invoice_id: ID) -> APIResponse<get_invoice::APIResponse> {
        self.base
            .get(format!("invoices/{}", invoice_id), StatusCode::OK)
            .await
    }

    pub async fn update_status(
        &self,
        invoice_id: ID,
        status: InvoiceStatus,
    ) -> APIResponse<update_invoice_status::APIResponse> {
        let body = update_invoice_status::RequestBody { status };
        self.base
            .put(
                body,
                format!("invoices/{}/status", invoice_id),
                StatusCode::OK,
            )
            .await
    }
}
