use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::connect_gmail::{APIResponse, PathParams, RequestBody};
use invoice_reminders_domain::{UserIntegration, ID};
use invoice_reminders_infra::{google::authorize_gmail, ReminderContext};
use tracing::info;

pub async fn connect_gmail_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = ConnectGmailUseCase {
        user_id: path.user_id,
        code: body.into_inner().code,
    };

    execute(usecase, &ctx)
        .await
        .map(|integration| HttpResponse::Ok().json(APIResponse::new(integration)))
        .map_err(ApiError::from)
}

/// Lets reminders for the user's invoices be sent from their own Gmail account
#[derive(Debug)]
struct ConnectGmailUseCase {
    pub user_id: ID,
    pub code: String,
}

#[derive(Debug)]
enum UseCaseError {
    NotConfigured,
    OAuthFailed(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotConfigured => Self::Conflict(
                "Gmail integration is not configured on this server".to_string(),
            ),
            UseCaseError::OAuthFailed(msg) => Self::BadClientData(format!(
                "Unable to connect the Gmail account: {}",
                msg
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ConnectGmailUseCase {
    type Response = UserIntegration;

    type Error = UseCaseError;

    const NAME: &'static str = "ConnectGmail";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let oauth = match &ctx.config.google {
            Some(oauth) => oauth,
            None => return Err(UseCaseError::NotConfigured),
        };

        let integration = authorize_gmail(
            oauth,
            self.user_id,
            self.code.clone(),
            ctx.sys.get_timestamp_millis(),
        )
        .await
        .map_err(|e| UseCaseError::OAuthFailed(format!("{:#}", e)))?;

        ctx.repos
            .user_integrations
            .save(&integration)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "User {} connected Gmail account {}",
            integration.user_id, integration.sender_email
        );

        Ok(integration)
    }
}
