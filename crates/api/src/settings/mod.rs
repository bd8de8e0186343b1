mod get_reminder_settings;
mod update_reminder_settings;

use actix_web::web;
use get_reminder_settings::get_reminder_settings_controller;
use invoice_reminders_domain::{UserSettings, ID};
use invoice_reminders_infra::ReminderContext;
use tracing::warn;
use update_reminder_settings::update_reminder_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/settings/reminders",
        web::get().to(get_reminder_settings_controller),
    );
    cfg.route(
        "/user/{user_id}/settings/reminders",
        web::put().to(update_reminder_settings_controller),
    );
}

/// Clamps a stored reminder policy that is out of range, logging what was changed
pub(crate) fn normalize_settings(mut settings: UserSettings) -> UserSettings {
    if let Err(e) = settings.reminder_policy.validate() {
        warn!(
            "Reminder policy of user {} is invalid and will be clamped: {}",
            settings.user_id, e
        );
        settings.reminder_policy = settings.reminder_policy.normalized();
    }
    settings
}

/// Settings are created with defaults the first time they are needed
pub(crate) async fn find_or_create_settings(
    user_id: &ID,
    ctx: &ReminderContext,
) -> anyhow::Result<UserSettings> {
    // A read failure must not be mistaken for missing settings and overwritten
    if let Some(settings) = ctx.repos.user_settings.find(user_id).await? {
        return Ok(normalize_settings(settings));
    }
    let settings = UserSettings::new(*user_id);
    ctx.repos.user_settings.insert(&settings).await?;
    Ok(settings)
}
