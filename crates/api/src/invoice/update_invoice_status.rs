use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::update_invoice_status::{APIResponse, PathParams, RequestBody};
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};
use invoice_reminders_infra::ReminderContext;
use tracing::info;

pub async fn update_invoice_status_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = UpdateInvoiceStatusUseCase {
        invoice_id: path.invoice_id,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|invoice| HttpResponse::Ok().json(APIResponse::new(invoice)))
        .map_err(ApiError::from)
}

/// Moving an invoice out of `pending` stops its reminders. Moving it back
/// resumes them from the recorded history.
#[derive(Debug)]
struct UpdateInvoiceStatusUseCase {
    pub invoice_id: ID,
    pub status: InvoiceStatus,
}

#[derive(Debug, PartialEq)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(invoice_id) => Self::NotFound(format!(
                "The invoice with id: {}, was not found.",
                invoice_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateInvoiceStatusUseCase {
    type Response = Invoice;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateInvoiceStatus";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut invoice = match ctx.repos.invoices.find(&self.invoice_id).await {
            Some(invoice) => invoice,
            None => return Err(UseCaseError::NotFound(self.invoice_id)),
        };
        if invoice.status == self.status {
            return Ok(invoice);
        }

        info!(
            "Invoice {} moves from {} to {}",
            invoice.id, invoice.status, self.status
        );
        invoice.status = self.status;
        ctx.repos
            .invoices
            .save(&invoice)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[actix_web::test]
    async fn marks_invoice_paid() {
        let ctx = ReminderContext::create_inmemory();
        let invoice = Invoice {
            id: ID::new(),
            user_id: ID::new(),
            invoice_number: "INV-7".into(),
            client_name: "Jane Doe".into(),
            client_email: "jane@example.com".into(),
            amount: 500,
            currency: "EUR".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            status: InvoiceStatus::Pending,
            created: 0,
        };
        ctx.repos.invoices.insert(&invoice).await.unwrap();

        let mut usecase = UpdateInvoiceStatusUseCase {
            invoice_id: invoice.id,
            status: InvoiceStatus::Paid,
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert!(ctx
            .repos
            .invoices
            .find_pending_by_user(&invoice.user_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn rejects_unknown_invoice() {
        let ctx = ReminderContext::create_inmemory();
        let invoice_id = ID::new();
        let mut usecase = UpdateInvoiceStatusUseCase {
            invoice_id,
            status: InvoiceStatus::Paid,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(invoice_id)
        );
    }
}
