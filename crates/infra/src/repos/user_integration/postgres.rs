use super::IUserIntegrationRepo;
use invoice_reminders_domain::{IntegrationProvider, UserIntegration, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserIntegrationRepo {
    pool: PgPool,
}

impl PostgresUserIntegrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserIntegrationRaw {
    user_uid: Uuid,
    provider: String,
    sender_email: String,
    refresh_token: String,
    access_token: String,
    access_token_expires_ts: i64,
}

impl TryFrom<UserIntegrationRaw> for UserIntegration {
    type Error = anyhow::Error;

    fn try_from(raw: UserIntegrationRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: raw.user_uid.into(),
            provider: raw.provider.parse()?,
            sender_email: raw.sender_email,
            refresh_token: raw.refresh_token,
            access_token: raw.access_token,
            access_token_expires_ts: raw.access_token_expires_ts,
        })
    }
}

#[async_trait::async_trait]
impl IUserIntegrationRepo for PostgresUserIntegrationRepo {
    async fn save(&self, integration: &UserIntegration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_integrations
            (user_uid, provider, sender_email, refresh_token, access_token, access_token_expires_ts)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_uid, provider) DO UPDATE
            SET sender_email = EXCLUDED.sender_email,
            refresh_token = EXCLUDED.refresh_token,
            access_token = EXCLUDED.access_token,
            access_token_expires_ts = EXCLUDED.access_token_expires_ts
            "#,
        )
        .bind(integration.user_id.inner_ref())
        .bind(integration.provider.as_str())
        .bind(&integration.sender_email)
        .bind(&integration.refresh_token)
        .bind(&integration.access_token)
        .bind(integration.access_token_expires_ts)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save {} integration for user {}. DB returned error: {:?}",
                integration.provider, integration.user_id, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, user_id: &ID, provider: IntegrationProvider) -> Option<UserIntegration> {
        let raw: UserIntegrationRaw = sqlx::query_as(
            r#"
            SELECT * FROM user_integrations
            WHERE user_uid = $1 AND provider = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(provider.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find {} integration for user {} failed. DB returned error: {:?}",
                provider, user_id, e
            );
            e
        })
        .ok()??;

        UserIntegration::try_from(raw).ok()
    }

    async fn delete(&self, user_id: &ID, provider: IntegrationProvider) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM user_integrations
            WHERE user_uid = $1 AND provider = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(provider.as_str())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
