use super::find_or_create_settings;
use crate::{
    error::ApiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use invoice_reminders_api_structs::update_reminder_settings::{
    APIResponse, PathParams, RequestBody,
};
use invoice_reminders_domain::{
    EmailTemplate, InvalidPolicyError, ReminderPolicyConfig, Tone, UserSettings, ID,
};
use invoice_reminders_infra::ReminderContext;

pub async fn update_reminder_settings_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    let body = body.into_inner();
    let usecase = UpdateReminderSettingsUseCase {
        user_id: path.user_id,
        business_name: body.business_name,
        reminder_policy: body.reminder_policy,
        email_templates: body.email_templates,
        remove_templates: body.remove_templates.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct UpdateReminderSettingsUseCase {
    pub user_id: ID,
    pub business_name: Option<String>,
    pub reminder_policy: Option<ReminderPolicyConfig>,
    pub email_templates: Option<Vec<EmailTemplate>>,
    pub remove_templates: Vec<Tone>,
}

#[derive(Debug, PartialEq)]
enum UseCaseError {
    InvalidPolicy(InvalidPolicyError),
    EmptyTemplateSubject(Tone),
    MultilineTemplateSubject(Tone),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPolicy(e) => Self::BadClientData(e.to_string()),
            UseCaseError::EmptyTemplateSubject(tone) => Self::BadClientData(format!(
                "The {} email template must have a subject",
                tone
            )),
            UseCaseError::MultilineTemplateSubject(tone) => Self::BadClientData(format!(
                "The subject of the {} email template must be a single line",
                tone
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderSettingsUseCase {
    type Response = UserSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminderSettings";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        if let Some(policy) = &self.reminder_policy {
            policy.validate().map_err(UseCaseError::InvalidPolicy)?;
        }
        if let Some(templates) = &self.email_templates {
            if let Some(template) = templates.iter().find(|t| t.subject.trim().is_empty()) {
                return Err(UseCaseError::EmptyTemplateSubject(template.tone));
            }
            if let Some(template) = templates
                .iter()
                .find(|t| t.subject.contains(|c| c == '\r' || c == '\n'))
            {
                return Err(UseCaseError::MultilineTemplateSubject(template.tone));
            }
        }

        let mut settings = find_or_create_settings(&self.user_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(business_name) = self.business_name.take() {
            let business_name = business_name.trim();
            settings.business_name = if business_name.is_empty() {
                None
            } else {
                Some(business_name.to_string())
            };
        }
        if let Some(policy) = self.reminder_policy.take() {
            settings.reminder_policy = policy;
        }
        for tone in &self.remove_templates {
            settings.remove_template(*tone);
        }
        if let Some(templates) = self.email_templates.take() {
            for template in templates {
                settings.set_template(template);
            }
        }

        ctx.repos
            .user_settings
            .save(&settings)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usecase(user_id: ID) -> UpdateReminderSettingsUseCase {
        UpdateReminderSettingsUseCase {
            user_id,
            business_name: None,
            reminder_policy: None,
            email_templates: None,
            remove_templates: vec![],
        }
    }

    #[actix_web::test]
    async fn updates_policy_and_business_name() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();
        let policy = ReminderPolicyConfig {
            automated_reminders_enabled: true,
            first_reminder_offset_days: -3,
            follow_up_interval_days: 5,
            max_reminders: 4,
            tones: Default::default(),
        };

        let mut usecase = UpdateReminderSettingsUseCase {
            business_name: Some("  Acme Studio ".into()),
            reminder_policy: Some(policy.clone()),
            ..usecase(user_id)
        };
        let settings = usecase.execute(&ctx).await.unwrap();
        assert_eq!(settings.business_name.as_deref(), Some("Acme Studio"));
        assert_eq!(settings.reminder_policy, policy);

        let stored = ctx.repos.user_settings.find(&user_id).await.unwrap().unwrap();
        assert_eq!(stored, settings);
    }

    #[actix_web::test]
    async fn blank_business_name_clears_it() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();

        let mut set = UpdateReminderSettingsUseCase {
            business_name: Some("Acme".into()),
            ..usecase(user_id)
        };
        set.execute(&ctx).await.unwrap();

        let mut clear = UpdateReminderSettingsUseCase {
            business_name: Some(" ".into()),
            ..usecase(user_id)
        };
        let settings = clear.execute(&ctx).await.unwrap();
        assert_eq!(settings.business_name, None);
    }

    #[actix_web::test]
    async fn rejects_invalid_policy_without_saving() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();
        let policy = ReminderPolicyConfig {
            max_reminders: 0,
            ..Default::default()
        };

        let mut usecase = UpdateReminderSettingsUseCase {
            reminder_policy: Some(policy),
            ..usecase(user_id)
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidPolicy(InvalidPolicyError::MaxReminders(0))
        );
        assert!(ctx.repos.user_settings.find(&user_id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn replaces_template_per_tone() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();
        let template = |subject: &str| EmailTemplate {
            tone: Tone::Firm,
            subject: subject.into(),
            body: "Please pay {invoice_number}".into(),
            is_html: false,
        };

        let mut first = UpdateReminderSettingsUseCase {
            email_templates: Some(vec![template("First")]),
            ..usecase(user_id)
        };
        first.execute(&ctx).await.unwrap();
        let mut second = UpdateReminderSettingsUseCase {
            email_templates: Some(vec![template("Second")]),
            ..usecase(user_id)
        };
        let settings = second.execute(&ctx).await.unwrap();

        assert_eq!(settings.email_templates.len(), 1);
        assert_eq!(settings.template_for(Tone::Firm).unwrap().subject, "Second");
    }

    #[actix_web::test]
    async fn removed_template_falls_back_to_builtin() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();
        let mut set = UpdateReminderSettingsUseCase {
            email_templates: Some(vec![EmailTemplate {
                tone: Tone::Polite,
                subject: "Hello".into(),
                body: "Hi {client_name}".into(),
                is_html: false,
            }]),
            ..usecase(user_id)
        };
        set.execute(&ctx).await.unwrap();

        let mut remove = UpdateReminderSettingsUseCase {
            remove_templates: vec![Tone::Polite],
            ..usecase(user_id)
        };
        let settings = remove.execute(&ctx).await.unwrap();
        assert!(settings.template_for(Tone::Polite).is_none());
    }

    #[actix_web::test]
    async fn rejects_template_without_subject() {
        let ctx = ReminderContext::create_inmemory();
        let mut usecase = UpdateReminderSettingsUseCase {
            email_templates: Some(vec![EmailTemplate {
                tone: Tone::Urgent,
                subject: "".into(),
                body: "Pay now".into(),
                is_html: false,
            }]),
            ..usecase(ID::new())
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmptyTemplateSubject(Tone::Urgent)
        );
    }

    #[actix_web::test]
    async fn rejects_template_subject_with_line_breaks() {
        let ctx = ReminderContext::create_inmemory();
        let user_id = ID::new();
        let mut usecase = UpdateReminderSettingsUseCase {
            email_templates: Some(vec![EmailTemplate {
                tone: Tone::Firm,
                subject: "Invoice due\r\nBcc: someone@example.com".into(),
                body: "Pay now".into(),
                is_html: false,
            }]),
            ..usecase(user_id)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::MultilineTemplateSubject(Tone::Firm)
        );
        assert!(ctx.repos.user_settings.find(&user_id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn rejects_out_of_range_first_reminder_offset() {
        let ctx = ReminderContext::create_inmemory();
        let mut usecase = UpdateReminderSettingsUseCase {
            reminder_policy: Some(ReminderPolicyConfig {
                first_reminder_offset_days: i64::MIN,
                ..Default::default()
            }),
            ..usecase(ID::new())
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidPolicy(InvalidPolicyError::FirstReminderOffset(i64::MIN))
        );
    }
}
