use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use invoice_reminders_api_structs::create_invoice::{APIResponse, PathParams, RequestBody};
use invoice_reminders_domain::{Invoice, InvoiceStatus, ID};
use invoice_reminders_infra::ReminderContext;

pub async fn create_invoice_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let body = body.into_inner();
    let usecase = CreateInvoiceUseCase {
        user_id: path.user_id,
        invoice_number: body.invoice_number,
        client_name: body.client_name,
        client_email: body.client_email,
        amount: body.amount,
        currency: body.currency,
        due_date: body.due_date,
        status: body.status.unwrap_or(InvoiceStatus::Pending),
    };

    execute(usecase, &ctx)
        .await
        .map(|invoice| HttpResponse::Created().json(APIResponse::new(invoice)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct CreateInvoiceUseCase {
    pub user_id: ID,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: i64,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

#[derive(Debug, PartialEq)]
enum UseCaseError {
    InvalidInvoice(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInvoice(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn is_currency_code(currency: &str) -> bool {
    currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic())
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateInvoiceUseCase {
    type Response = Invoice;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateInvoice";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        if self.invoice_number.trim().is_empty() {
            return Err(UseCaseError::InvalidInvoice(
                "Invoice number must not be empty".into(),
            ));
        }
        let client_email = self.client_email.trim();
        if !client_email.contains('@') || client_email.contains(char::is_whitespace) {
            return Err(UseCaseError::InvalidInvoice(format!(
                "Invalid client email given: {:?}",
                self.client_email
            )));
        }
        if self.amount < 0 {
            return Err(UseCaseError::InvalidInvoice(format!(
                "Invoice amount must not be negative, got {}",
                self.amount
            )));
        }
        if !is_currency_code(&self.currency) {
            return Err(UseCaseError::InvalidInvoice(format!(
                "Invalid currency code given: {:?}",
                self.currency
            )));
        }

        let invoice = Invoice {
            id: Default::default(),
            user_id: self.user_id,
            invoice_number: self.invoice_number.trim().to_string(),
            client_name: self.client_name.clone(),
            client_email: self.client_email.trim().to_string(),
            amount: self.amount,
            currency: self.currency.to_ascii_uppercase(),
            due_date: self.due_date,
            status: self.status,
            created: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .invoices
            .insert(&invoice)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(invoice)
    }
}
