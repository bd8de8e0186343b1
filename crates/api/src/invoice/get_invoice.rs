use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::get_invoice::{APIResponse, PathParams};
use invoice_reminders_domain::{Invoice, ID};
use invoice_reminders_infra::ReminderContext;

pub async fn get_invoice_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetInvoiceUseCase {
        invoice_id: path.invoice_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|invoice| HttpResponse::Ok().json(APIResponse::new(invoice)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct GetInvoiceUseCase {
    pub invoice_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(invoice_id) => Self::NotFound(format!(
                "The invoice with id: {}, was not found.",
                invoice_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetInvoiceUseCase {
    type Response = Invoice;

    type Error = UseCaseError;

    const NAME: &'static str = "GetInvoice";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .invoices
            .find(&self.invoice_id)
            .await
            .ok_or(UseCaseError::NotFound(self.invoice_id))
    }
}
