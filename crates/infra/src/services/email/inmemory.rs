use super::{EmailMessage, IEmailSender, MessageId, SendError};
use invoice_reminders_domain::ID;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub user_id: ID,
    pub message: EmailMessage,
    pub message_id: MessageId,
}

/// Keeps sent messages in memory. Recipients registered with
/// [`InMemoryEmailSender::fail_for`] are rejected, which lets tests
/// exercise delivery failures.
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailSender for InMemoryEmailSender {
    async fn send(&self, user_id: &ID, message: &EmailMessage) -> Result<MessageId, SendError> {
        if self
            .failing_recipients
            .lock()
            .unwrap()
            .contains(&message.to)
        {
            return Err(SendError::Rejected {
                status: 550,
                message: format!("Mailbox {} unavailable", message.to),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        let message_id = format!("inmemory-{}", sent.len() + 1);
        sent.push(SentEmail {
            user_id: *user_id,
            message: message.clone(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.into(),
            subject: "Subject".into(),
            body: "Body".into(),
            is_html: false,
        }
    }

    #[tokio::test]
    async fn records_and_fails_messages() {
        let sender = InMemoryEmailSender::new();
        sender.fail_for("bounce@example.com");
        let user_id = ID::new();

        let id = sender.send(&user_id, &message("ok@example.com")).await.unwrap();
        assert_eq!(id, "inmemory-1");
        assert!(matches!(
            sender.send(&user_id, &message("bounce@example.com")).await,
            Err(SendError::Rejected { status: 550, .. })
        ));

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message.to, "ok@example.com");
    }
}
