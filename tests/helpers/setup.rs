use invoice_reminders_api::Application;
use invoice_reminders_infra::{InMemoryEmailSender, ReminderContext};
use invoice_reminders_sdk::ReminderSDK;
use std::sync::Arc;

pub struct TestApp {
    pub email: Arc<InMemoryEmailSender>,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, ReminderSDK) {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.reminder_job.enabled = false;
    let email = Arc::new(InMemoryEmailSender::new());
    ctx.email = email.clone();

    let api_key = ctx.config.api_secret_key.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = ReminderSDK::new(address.clone(), api_key);
    let app = TestApp { email, address };
    (app, sdk)
}
