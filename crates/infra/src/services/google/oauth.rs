use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;

// https://developers.google.com/identity/protocols/oauth2/web-server#httprest_3

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const GMAIL_PROFILE_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/profile";
pub const REQUIRED_OAUTH_SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/gmail.send"];

pub struct RefreshTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub scope: String,
    pub token_type: String,
    // Access token expires in specified in seconds
    pub expires_in: i64,
}

pub async fn refresh_access_token(
    client: &Client,
    req: RefreshTokenRequest,
) -> anyhow::Result<RefreshTokenResponse> {
    let params = [
        ("client_id", req.client_id.as_str()),
        ("client_secret", req.client_secret.as_str()),
        ("refresh_token", req.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];
    client
        .post(TOKEN_ENDPOINT)
        .form(&params)
        .send()
        .await?
        .error_for_status()
        .context("Google refused to refresh the access token")?
        .json::<RefreshTokenResponse>()
        .await
        .context("Malformed refresh token response")
}

// Google api actually returns snake case response
pub struct CodeTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeTokenResponse {
    pub access_token: String,
    pub scope: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

pub async fn exchange_code_token(
    client: &Client,
    req: CodeTokenRequest,
) -> anyhow::Result<CodeTokenResponse> {
    let params = [
        ("client_id", req.client_id.as_str()),
        ("client_secret", req.client_secret.as_str()),
        ("redirect_uri", req.redirect_uri.as_str()),
        ("code", req.code.as_str()),
        ("grant_type", "authorization_code"),
    ];
    let res = client
        .post(TOKEN_ENDPOINT)
        .form(&params)
        .send()
        .await?
        .error_for_status()
        .context("Google refused the authorization code")?
        .json::<CodeTokenResponse>()
        .await
        .context("Malformed code exchange response")?;

    let granted: Vec<_> = res.scope.split(' ').collect();
    for scope in REQUIRED_OAUTH_SCOPES.iter() {
        if !granted.contains(scope) {
            anyhow::bail!("Missing required oauth scope: {}", scope);
        }
    }
    Ok(res)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailProfileResponse {
    email_address: String,
}

/// The address of the mailbox the access token belongs to
pub async fn get_gmail_address(client: &Client, access_token: &str) -> anyhow::Result<String> {
    let profile = client
        .get(GMAIL_PROFILE_ENDPOINT)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()
        .context("Unable to read the Gmail profile")?
        .json::<GmailProfileResponse>()
        .await?;
    Ok(profile.email_address)
}
