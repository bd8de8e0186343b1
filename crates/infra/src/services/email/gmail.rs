use super::{EmailMessage, IEmailSender, MessageId, SendError};
use crate::{
    config::GoogleOAuthConfig,
    repos::IUserIntegrationRepo,
    services::google::{refresh_access_token, RefreshTokenRequest},
    ISys,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine as _,
};
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

const SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    raw: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageResponse {
    id: String,
}

/// Sends reminders from the mailbox the user connected through Google OAuth
pub struct GmailEmailSender {
    client: Client,
    oauth: GoogleOAuthConfig,
    integrations: Arc<dyn IUserIntegrationRepo>,
    sys: Arc<dyn ISys>,
}

impl GmailEmailSender {
    pub fn new(
        oauth: GoogleOAuthConfig,
        integrations: Arc<dyn IUserIntegrationRepo>,
        sys: Arc<dyn ISys>,
    ) -> Self {
        Self {
            client: Client::new(),
            oauth,
            integrations,
            sys,
        }
    }

    async fn get_access_token(&self, user_id: &ID) -> Result<UserIntegration, SendError> {
        let mut integration = self
            .integrations
            .find(user_id, IntegrationProvider::Gmail)
            .await
            .ok_or(SendError::MissingIntegration(*user_id))?;

        let now = self.sys.get_timestamp_millis();
        if integration.access_token_valid_at(now) {
            return Ok(integration);
        }

        let refreshed = refresh_access_token(
            &self.client,
            RefreshTokenRequest {
                client_id: self.oauth.client_id.clone(),
                client_secret: self.oauth.client_secret.clone(),
                refresh_token: integration.refresh_token.clone(),
            },
        )
        .await
        .map_err(|e| SendError::Unauthorized(format!("{:#}", e)))?;

        integration.access_token = refreshed.access_token;
        integration.access_token_expires_ts = now + refreshed.expires_in * 1000;
        if let Err(e) = self.integrations.save(&integration).await {
            // The refreshed token is still usable for this send
            warn!(
                "Unable to store refreshed access token for user {}: {:?}",
                user_id, e
            );
        }
        Ok(integration)
    }
}

/// Line breaks would start a new header, so they are folded into spaces
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// RFC 2047 encoded-word for headers that are not plain ascii
fn encode_header(value: &str) -> String {
    let value = single_line(value);
    if value.is_ascii() {
        value
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value))
    }
}

/// RFC 2822 message as expected in the `raw` field of `users.messages.send`
pub(crate) fn build_raw_message(from: &str, message: &EmailMessage) -> String {
    let content_type = if message.is_html {
        "text/html"
    } else {
        "text/plain"
    };
    let mime = format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: {}; charset=\"UTF-8\"\r\nContent-Transfer-Encoding: base64\r\n\r\n{}",
        single_line(from),
        single_line(&message.to),
        encode_header(&message.subject),
        content_type,
        STANDARD.encode(&message.body),
    );
    URL_SAFE.encode(mime)
}

#[async_trait::async_trait]
impl IEmailSender for GmailEmailSender {
    async fn send(&self, user_id: &ID, message: &EmailMessage) -> Result<MessageId, SendError> {
        let integration = self.get_access_token(user_id).await?;

        let res = self
            .client
            .post(SEND_ENDPOINT)
            .bearer_auth(&integration.access_token)
            .json(&SendMessageRequest {
                raw: build_raw_message(&integration.sender_email, message),
            })
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SendError::Unauthorized(format!(
                "Gmail responded with {}",
                status
            )));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(
                "Gmail rejected reminder for user {} with status {}: {}",
                user_id, status, body
            );
            return Err(SendError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        res.json::<SendMessageResponse>()
            .await
            .map(|r| r.id)
            .map_err(|e| SendError::Transport(e.to_string()))
    }
}
