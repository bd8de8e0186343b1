use super::{IUserSettingsRepo, UnreadableSettings};
use invoice_reminders_domain::{
    EmailTemplate, ReminderPolicyConfig, ToneSchedule, UserSettings, ID,
};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresUserSettingsRepo {
    pool: PgPool,
}

impl PostgresUserSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserSettingsRaw {
    user_uid: Uuid,
    business_name: Option<String>,
    automated_reminders_enabled: bool,
    first_reminder_offset_days: i64,
    follow_up_interval_days: i64,
    max_reminders: i64,
    first_tone: String,
    second_tone: String,
    third_tone: String,
    email_templates: Json<Vec<EmailTemplate>>,
}

impl TryFrom<UserSettingsRaw> for UserSettings {
    type Error = anyhow::Error;

    fn try_from(raw: UserSettingsRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: raw.user_uid.into(),
            business_name: raw.business_name,
            reminder_policy: ReminderPolicyConfig {
                automated_reminders_enabled: raw.automated_reminders_enabled,
                first_reminder_offset_days: raw.first_reminder_offset_days,
                follow_up_interval_days: raw.follow_up_interval_days,
                max_reminders: raw.max_reminders,
                tones: ToneSchedule {
                    first: raw.first_tone.parse()?,
                    second: raw.second_tone.parse()?,
                    third: raw.third_tone.parse()?,
                },
            },
            email_templates: raw.email_templates.0,
        })
    }
}

const SELECT_SETTINGS: &str = r#"
    SELECT user_uid, business_name, automated_reminders_enabled,
        first_reminder_offset_days, follow_up_interval_days, max_reminders,
        first_tone, second_tone, third_tone, email_templates
    FROM user_settings
"#;

fn parse_row(raw: UserSettingsRaw) -> Result<UserSettings, UnreadableSettings> {
    let user_uid = raw.user_uid;
    UserSettings::try_from(raw).map_err(|e| {
        error!("Stored settings for user {} are corrupt: {:?}", user_uid, e);
        UnreadableSettings {
            user_id: user_uid.into(),
            error: e.context("Stored settings are corrupt"),
        }
    })
}

#[async_trait::async_trait]
impl IUserSettingsRepo for PostgresUserSettingsRepo {
    async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()> {
        let policy = &settings.reminder_policy;
        sqlx::query(
            r#"
            INSERT INTO user_settings
            (user_uid, business_name, automated_reminders_enabled, first_reminder_offset_days,
                follow_up_interval_days, max_reminders, first_tone, second_tone, third_tone,
                email_templates)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(settings.user_id.inner_ref())
        .bind(&settings.business_name)
        .bind(policy.automated_reminders_enabled)
        .bind(policy.first_reminder_offset_days)
        .bind(policy.follow_up_interval_days)
        .bind(policy.max_reminders)
        .bind(policy.tones.first.as_str())
        .bind(policy.tones.second.as_str())
        .bind(policy.tones.third.as_str())
        .bind(Json(&settings.email_templates))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert settings: {:?}. DB returned error: {:?}",
                settings, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
        let policy = &settings.reminder_policy;
        let res = sqlx::query(
            r#"
            UPDATE user_settings
            SET business_name = $2,
            automated_reminders_enabled = $3,
            first_reminder_offset_days = $4,
            follow_up_interval_days = $5,
            max_reminders = $6,
            first_tone = $7,
            second_tone = $8,
            third_tone = $9,
            email_templates = $10
            WHERE user_uid = $1
            "#,
        )
        .bind(settings.user_id.inner_ref())
        .bind(&settings.business_name)
        .bind(policy.automated_reminders_enabled)
        .bind(policy.first_reminder_offset_days)
        .bind(policy.follow_up_interval_days)
        .bind(policy.max_reminders)
        .bind(policy.tones.first.as_str())
        .bind(policy.tones.second.as_str())
        .bind(policy.tones.third.as_str())
        .bind(Json(&settings.email_templates))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save settings: {:?}. DB returned error: {:?}",
                settings, e
            );
            e
        })?;
        if res.rows_affected() == 0 {
            anyhow::bail!("No settings stored for user {}", settings.user_id);
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserSettings>> {
        let raw: Option<UserSettingsRaw> =
            sqlx::query_as(&format!("{} WHERE user_uid = $1", SELECT_SETTINGS))
                .bind(user_id.inner_ref())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!(
                        "Find settings for user {} failed. DB returned error: {:?}",
                        user_id, e
                    );
                    e
                })?;
        match raw {
            Some(raw) => parse_row(raw).map(Some).map_err(|e| e.error),
            None => Ok(None),
        }
    }

    async fn find_opted_in(&self) -> anyhow::Result<Vec<Result<UserSettings, UnreadableSettings>>> {
        let rows: Vec<UserSettingsRaw> = sqlx::query_as(&format!(
            "{} WHERE automated_reminders_enabled = true",
            SELECT_SETTINGS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(parse_row).collect())
    }
}
