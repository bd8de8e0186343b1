//! Runs a single reminder campaign and prints its summary as JSON.
//!
//! Meant for an external scheduler (cron, Kubernetes CronJob) when the
//! server's own daily job is disabled with `REMINDER_JOB_ENABLED=false`.

use invoice_reminders::telemetry::{get_subscriber, init_subscriber};
use invoice_reminders_api::run_reminder_campaign;
use invoice_reminders_infra::setup_context;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    openssl_probe::init_ssl_cert_env_vars();

    // Logs go to stderr so that stdout only carries the summary
    let subscriber = get_subscriber("send_reminders".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let context = setup_context().await;
    let result = run_reminder_campaign(&context).await?;
    info!(
        "Sent {} reminders with {} errors",
        result.processed_count,
        result.errors.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
