use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::get_invoice_reminders::{APIResponse, PathParams};
use invoice_reminders_domain::{ReminderRecord, ID};
use invoice_reminders_infra::ReminderContext;

pub async fn get_invoice_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetInvoiceRemindersUseCase {
        invoice_id: path.invoice_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct GetInvoiceRemindersUseCase {
    pub invoice_id: ID,
}

#[derive(Debug)]
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
impl UseCase for GetInvoiceRemindersUseCase {
    type Response = Vec<ReminderRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetInvoiceReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.invoices.find(&self.invoice_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.invoice_id));
        }
        ctx.repos
            .reminders
            .find_by_invoice(&self.invoice_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
