use crate::{
    error::ApiError,
    settings::find_or_create_settings,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::{
    dtos::{ReminderDecisionDTO, RenderedEmailDTO},
    get_reminder_decision::{APIResponse, PathParams},
};
use invoice_reminders_domain::{
    decide, render, ReminderDecision, ReminderState, RenderedEmail, ID,
};
use invoice_reminders_infra::ReminderContext;

pub async fn get_reminder_decision_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetReminderDecisionUseCase {
        invoice_id: path.invoice_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                eligible: res.eligible,
                decision: ReminderDecisionDTO::new(res.decision),
                state: res.state,
                preview: res
                    .preview
                    .map(|email| RenderedEmailDTO::new(res.recipient, email)),
            })
        })
        .map_err(ApiError::from)
}

/// What the next campaign would do for an invoice, without sending anything
#[derive(Debug)]
struct GetReminderDecisionUseCase {
    pub invoice_id: ID,
}

#[derive(Debug)]
struct UseCaseResponse {
    eligible: bool,
    decision: ReminderDecision,
    state: ReminderState,
    recipient: String,
    preview: Option<RenderedEmail>,
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
impl UseCase for GetReminderDecisionUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderDecision";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let invoice = match ctx.repos.invoices.find(&self.invoice_id).await {
            Some(invoice) => invoice,
            None => return Err(UseCaseError::NotFound(self.invoice_id)),
        };
        let settings = find_or_create_settings(&invoice.user_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let history = ctx
            .repos
            .reminders
            .find_by_invoice(&invoice.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let policy = &settings.reminder_policy;
        let decision = decide(&invoice, policy, &history, ctx.sys.now());
        let eligible = invoice.is_reminder_candidate() && policy.automated_reminders_enabled;
        let preview = if decision.should_send {
            Some(render(
                decision.tone,
                &invoice,
                &settings,
                decision.days_overdue,
            ))
        } else {
            None
        };

        Ok(UseCaseResponse {
            eligible,
            decision,
            state: ReminderState::from_history(&history, policy),
            recipient: invoice.client_email,
            preview,
        })
    }
}
