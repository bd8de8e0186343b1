mod gmail;
mod inmemory;
mod log_sender;

pub use gmail::GmailEmailSender;
pub use inmemory::{InMemoryEmailSender, SentEmail};
use invoice_reminders_domain::ID;
pub use log_sender::LogEmailSender;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
}

/// Identifier assigned to a sent message by the transport
pub type MessageId = String;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("User {0} has not connected an email account")]
    MissingIntegration(ID),
    #[error("The email provider refused our credentials: {0}")]
    Unauthorized(String),
    #[error("Unable to reach the email provider: {0}")]
    Transport(String),
    #[error("The email provider rejected the message with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Outbound email transport.
///
/// Messages are sent on behalf of `user_id`, which decides the sending mailbox
/// for transports that support it.
#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, user_id: &ID, message: &EmailMessage) -> Result<MessageId, SendError>;
}
