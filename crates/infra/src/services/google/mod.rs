mod oauth;

use crate::config::GoogleOAuthConfig;
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
pub use oauth::{
    exchange_code_token, get_gmail_address, refresh_access_token, CodeTokenRequest,
    CodeTokenResponse, RefreshTokenRequest, RefreshTokenResponse, REQUIRED_OAUTH_SCOPES,
};
use reqwest::Client;

/// Exchanges the authorization code from the consent redirect for tokens and
/// looks up the mailbox they grant access to
pub async fn authorize_gmail(
    oauth: &GoogleOAuthConfig,
    user_id: ID,
    code: String,
    now_ts: i64,
) -> anyhow::Result<UserIntegration> {
    let client = Client::new();
    let tokens = exchange_code_token(
        &client,
        CodeTokenRequest {
            client_id: oauth.client_id.clone(),
            client_secret: oauth.client_secret.clone(),
            redirect_uri: oauth.redirect_uri.clone(),
            code,
        },
    )
    .await?;
    let sender_email = get_gmail_address(&client, &tokens.access_token).await?;

    Ok(UserIntegration {
        user_id,
        provider: IntegrationProvider::Gmail,
        sender_email,
        refresh_token: tokens.refresh_token,
        access_token: tokens.access_token,
        access_token_expires_ts: now_ts + tokens.expires_in * 1000,
    })
}
