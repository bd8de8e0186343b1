use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::disconnect_gmail::{APIResponse, PathParams};
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
use invoice_reminders_infra::ReminderContext;

pub async fn disconnect_gmail_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = DisconnectGmailUseCase {
        user_id: path.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|integration| HttpResponse::Ok().json(APIResponse::new(integration)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct DisconnectGmailUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, has no Gmail account connected.",
                user_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DisconnectGmailUseCase {
    type Response = UserIntegration;

    type Error = UseCaseError;

    const NAME: &'static str = "DisconnectGmail";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let integrations = &ctx.repos.user_integrations;
        let integration = match integrations
            .find(&self.user_id, IntegrationProvider::Gmail)
            .await
        {
            Some(integration) => integration,
            None => return Err(UseCaseError::NotFound(self.user_id)),
        };

        integrations
            .delete(&self.user_id, IntegrationProvider::Gmail)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(integration)
    }
}
