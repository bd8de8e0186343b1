use super::{EmailMessage, IEmailSender, MessageId, SendError};
use invoice_reminders_domain::ID;
use invoice_reminders_utils::create_random_secret;
use tracing::info;

/// Transport used when no email provider is configured. Only logs the message.
pub struct LogEmailSender {}

#[async_trait::async_trait]
impl IEmailSender for LogEmailSender {
    async fn send(&self, user_id: &ID, message: &EmailMessage) -> Result<MessageId, SendError> {
        let message_id = format!("log-{}", create_random_secret(16));
        info!(
            message_id = %message_id,
            user_id = %user_id,
            to = %message.to,
            subject = %message.subject,
            "Email transport not configured, logging reminder instead of sending it"
        );
        Ok(message_id)
    }
}
