use invoice_reminders::telemetry::{get_subscriber, init_subscriber};
use invoice_reminders_api::Application;
use invoice_reminders_infra::{run_migration, setup_context};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("invoice_reminders".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    run_migration()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
