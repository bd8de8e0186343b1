use crate::error::ApiError;
use actix_web::HttpRequest;
use invoice_reminders_infra::ReminderContext;

const API_KEY_HEADER: &str = "x-api-key";

/// Only clients holding the server's secret api key get past this guard
pub fn protect_route(req: &HttpRequest, ctx: &ReminderContext) -> Result<(), ApiError> {
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(ApiError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(ApiError::Unauthorized(format!(
                "Unable to find api-key in {} header",
                API_KEY_HEADER
            )))
        }
    };

    if api_key != ctx.config.api_secret_key {
        return Err(ApiError::Unauthorized(format!(
            "Invalid api-key provided in {} header",
            API_KEY_HEADER
        )));
    }
    Ok(())
}
