use super::find_or_create_settings;
use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::get_reminder_settings::{APIResponse, PathParams};
use invoice_reminders_domain::{UserSettings, ID};
use invoice_reminders_infra::ReminderContext;

pub async fn get_reminder_settings_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetReminderSettingsUseCase {
        user_id: path.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct GetReminderSettingsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSettingsUseCase {
    type Response = UserSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderSettings";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        find_or_create_settings(&self.user_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
