use crate::{
    error::ApiError,
    settings::normalize_settings,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use invoice_reminders_api_structs::send_reminders::APIResponse;
use invoice_reminders_domain::{
    check_history, decide, render, CampaignErrorKind, CampaignResult, Invoice, ReminderRecord,
    UserSettings,
};
use invoice_reminders_infra::{EmailMessage, ReminderContext, SendError};
use tracing::{error, info, warn};

pub async fn send_payment_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_route(&http_req, &ctx)?;

    execute(SendPaymentRemindersUseCase {}, &ctx)
        .await
        .map(|result: APIResponse| HttpResponse::Ok().json(result))
        .map_err(ApiError::from)
}

/// Runs one reminder campaign over every user that has automated reminders enabled
pub async fn run_reminder_campaign(ctx: &ReminderContext) -> anyhow::Result<CampaignResult> {
    execute(SendPaymentRemindersUseCase {}, ctx)
        .await
        .map_err(|e| anyhow::anyhow!("Reminder campaign failed: {:?}", e))
}

/// Evaluates the reminder policy for every pending invoice of every opted-in
/// user and sends the reminders that are due.
///
/// Users and invoices are processed one at a time. A failure for one of them
/// is collected in the result and never stops the campaign. Nothing is retried
/// within a run: the next run decides again from the persisted history, so an
/// email whose record could not be written may be sent twice.
#[derive(Debug)]
pub struct SendPaymentRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
enum ReminderFailure {
    Storage(anyhow::Error),
    Send(SendError),
}

impl ReminderFailure {
    fn kind(&self) -> CampaignErrorKind {
        match self {
            Self::Storage(_) => CampaignErrorKind::Storage,
            Self::Send(_) => CampaignErrorKind::Send,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Storage(e) => format!("{:#}", e),
            Self::Send(e) => e.to_string(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendPaymentRemindersUseCase {
    type Response = CampaignResult;

    type Error = UseCaseError;

    const NAME: &'static str = "SendPaymentReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let users = ctx
            .repos
            .user_settings
            .find_opted_in()
            .await
            .map_err(|e| {
                error!("Unable to load users with reminders enabled: {:?}", e);
                UseCaseError::StorageError
            })?;
        info!("Starting reminder campaign for {} users", users.len());

        let mut result = CampaignResult::default();
        for settings in users {
            let settings = match settings {
                Ok(settings) => normalize_settings(settings),
                Err(unreadable) => {
                    error!(
                        "Unable to read reminder settings of user {}: {:?}",
                        unreadable.user_id, unreadable.error
                    );
                    result.push_error(
                        unreadable.user_id,
                        None,
                        CampaignErrorKind::Storage,
                        format!("{:#}", unreadable.error),
                    );
                    continue;
                }
            };
            let invoices = match ctx
                .repos
                .invoices
                .find_pending_by_user(&settings.user_id)
                .await
            {
                Ok(invoices) => invoices,
                Err(e) => {
                    error!(
                        "Unable to load pending invoices of user {}: {:?}",
                        settings.user_id, e
                    );
                    result.push_error(
                        settings.user_id,
                        None,
                        CampaignErrorKind::Storage,
                        format!("{:#}", e),
                    );
                    continue;
                }
            };

            for invoice in invoices {
                result.invoices_evaluated += 1;
                match remind_if_due(&invoice, &settings, now, ctx).await {
                    Ok(true) => result.processed_count += 1,
                    Ok(false) => (),
                    Err(failure) => {
                        error!(
                            "Reminder for invoice {} of user {} failed: {}",
                            invoice.id,
                            invoice.user_id,
                            failure.message()
                        );
                        result.push_error(
                            invoice.user_id,
                            Some(invoice.id),
                            failure.kind(),
                            failure.message(),
                        );
                    }
                }
            }
        }

        info!(
            processed_count = result.processed_count,
            invoices_evaluated = result.invoices_evaluated,
            errors = result.errors.len(),
            "Reminder campaign finished"
        );
        Ok(result)
    }
}

/// Sends the next reminder for the invoice if the policy says it is due and
/// records it. Returns whether a reminder was sent.
async fn remind_if_due(
    invoice: &Invoice,
    settings: &UserSettings,
    now: DateTime<Utc>,
    ctx: &ReminderContext,
) -> Result<bool, ReminderFailure> {
    let history = ctx
        .repos
        .reminders
        .find_by_invoice(&invoice.id)
        .await
        .map_err(ReminderFailure::Storage)?;
    if let Err(e) = check_history(&history) {
        warn!(
            "Reminder history of invoice {} is corrupt, continuing from the highest sequence number: {}",
            invoice.id, e
        );
    }

    let decision = decide(invoice, &settings.reminder_policy, &history, now);
    if !decision.should_send {
        return Ok(false);
    }

    let email = render(decision.tone, invoice, settings, decision.days_overdue);
    let message = EmailMessage {
        to: invoice.client_email.clone(),
        subject: email.subject,
        body: email.body,
        is_html: email.is_html,
    };
    let message_id = ctx
        .email
        .send(&invoice.user_id, &message)
        .await
        .map_err(ReminderFailure::Send)?;

    let record = ReminderRecord::new(invoice, &decision, ctx.sys.now(), Some(message_id));
    ctx.repos.reminders.insert(&record).await.map_err(|e| {
        ReminderFailure::Storage(e.context(format!(
            "Reminder {} was sent but could not be recorded",
            record.sequence_number
        )))
    })?;

    info!(
        "Sent {} reminder {} for invoice {}",
        decision.tone, decision.sequence_number, invoice.id
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use invoice_reminders_domain::{InvoiceStatus, ReminderPolicyConfig, Tone, ID};
    use invoice_reminders_infra::{
        IInvoiceRepo, IReminderRepo, IUserSettingsRepo, InMemoryEmailSender,
        InMemoryUserSettingsRepo, StaticTimeSys, UnreadableSettings,
    };
    use std::sync::Arc;

    struct TestContext {
        ctx: ReminderContext,
        email: Arc<InMemoryEmailSender>,
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
    }

    fn setup_at(now: DateTime<Utc>) -> TestContext {
        let mut ctx = ReminderContext::create_inmemory();
        let email = Arc::new(InMemoryEmailSender::new());
        ctx.email = email.clone();
        ctx.sys = Arc::new(StaticTimeSys::at(now));
        TestContext { ctx, email }
    }

    fn policy() -> ReminderPolicyConfig {
        ReminderPolicyConfig {
            automated_reminders_enabled: true,
            first_reminder_offset_days: 0,
            follow_up_interval_days: 7,
            max_reminders: 3,
            tones: Default::default(),
        }
    }

    async fn insert_user(ctx: &ReminderContext, policy: ReminderPolicyConfig) -> UserSettings {
        let mut settings = UserSettings::new(ID::new());
        settings.business_name = Some("Acme Studio".into());
        settings.reminder_policy = policy;
        ctx.repos.user_settings.insert(&settings).await.unwrap();
        settings
    }

    async fn insert_invoice(ctx: &ReminderContext, user_id: ID, email: &str, due: NaiveDate) -> Invoice {
        let invoice = Invoice {
            id: ID::new(),
            user_id,
            invoice_number: "INV-0042".into(),
            client_name: "Jane Doe".into(),
            client_email: email.into(),
            amount: 123_456,
            currency: "USD".into(),
            due_date: due,
            status: InvoiceStatus::Pending,
            created: 0,
        };
        ctx.repos.invoices.insert(&invoice).await.unwrap();
        invoice
    }

    fn due(days_before_now: i64) -> NaiveDate {
        (now() - Duration::days(days_before_now)).date_naive()
    }

    #[actix_web::test]
    async fn sends_first_reminder_for_overdue_invoice() {
        let TestContext { ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        let invoice = insert_invoice(&ctx, user.user_id, "jane@example.com", due(5)).await;

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.invoices_evaluated, 1);
        assert!(result.errors.is_empty());

        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user_id, user.user_id);
        assert_eq!(sent[0].message.to, "jane@example.com");
        assert!(sent[0].message.subject.contains("INV-0042"));

        let history = ctx.repos.reminders.find_by_invoice(&invoice.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sequence_number, 1);
        assert_eq!(history[0].tone, Tone::Polite);
        assert_eq!(history[0].message_id, Some(sent[0].message_id.clone()));
    }

    #[actix_web::test]
    async fn second_run_on_same_day_sends_nothing() {
        let TestContext { ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        insert_invoice(&ctx, user.user_id, "jane@example.com", due(5)).await;

        run_reminder_campaign(&ctx).await.unwrap();
        let result = run_reminder_campaign(&ctx).await.unwrap();

        assert_eq!(result.processed_count, 0);
        assert_eq!(result.invoices_evaluated, 1);
        assert_eq!(email.sent().len(), 1);
    }

    #[actix_web::test]
    async fn escalates_until_capped() {
        let TestContext { mut ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        let invoice = insert_invoice(&ctx, user.user_id, "jane@example.com", due(1)).await;

        for week in 0..5 {
            ctx.sys = Arc::new(StaticTimeSys::at(now() + Duration::days(7 * week)));
            run_reminder_campaign(&ctx).await.unwrap();
        }

        let history = ctx.repos.reminders.find_by_invoice(&invoice.id).await.unwrap();
        let tones: Vec<_> = history.iter().map(|r| r.tone).collect();
        assert_eq!(tones, vec![Tone::Polite, Tone::Firm, Tone::Urgent]);
        assert_eq!(email.sent().len(), 3);
    }

    #[actix_web::test]
    async fn skips_users_without_automated_reminders() {
        let TestContext { ctx, email } = setup_at(now());
        let user = insert_user(
            &ctx,
            ReminderPolicyConfig {
                automated_reminders_enabled: false,
                ..policy()
            },
        )
        .await;
        insert_invoice(&ctx, user.user_id, "jane@example.com", due(30)).await;

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.invoices_evaluated, 0);
        assert!(email.sent().is_empty());
    }

    #[actix_web::test]
    async fn skips_invoices_that_are_not_pending() {
        let TestContext { ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        let mut invoice = insert_invoice(&ctx, user.user_id, "jane@example.com", due(30)).await;
        invoice.status = InvoiceStatus::Paid;
        ctx.repos.invoices.save(&invoice).await.unwrap();

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.invoices_evaluated, 0);
        assert!(email.sent().is_empty());
    }

    #[actix_web::test]
    async fn send_failure_is_collected_and_other_invoices_continue() {
        let TestContext { ctx, email } = setup_at(now());
        email.fail_for("bounce@example.com");
        let user = insert_user(&ctx, policy()).await;
        let failing = insert_invoice(&ctx, user.user_id, "bounce@example.com", due(10)).await;
        let ok = insert_invoice(&ctx, user.user_id, "jane@example.com", due(5)).await;

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.invoices_evaluated, 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].invoice_id, Some(failing.id));
        assert_eq!(result.errors[0].kind, CampaignErrorKind::Send);

        assert!(ctx
            .repos
            .reminders
            .find_by_invoice(&failing.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            ctx.repos.reminders.find_by_invoice(&ok.id).await.unwrap().len(),
            1
        );
    }

    struct FailingReminderRepo {}

    #[async_trait::async_trait]
    impl IReminderRepo for FailingReminderRepo {
        async fn insert(&self, _reminder: &ReminderRecord) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        async fn find_by_invoice(&self, _invoice_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
            Ok(vec![])
        }
    }

    #[actix_web::test]
    async fn record_failure_after_send_is_a_storage_error() {
        let TestContext { mut ctx, email } = setup_at(now());
        ctx.repos.reminders = Arc::new(FailingReminderRepo {});
        let user = insert_user(&ctx, policy()).await;
        let invoice = insert_invoice(&ctx, user.user_id, "jane@example.com", due(5)).await;

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.processed_count, 0);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].invoice_id, Some(invoice.id));
        assert_eq!(result.errors[0].kind, CampaignErrorKind::Storage);
        assert!(result.errors[0].message.contains("disk full"));
        // The email did go out and will be sent again by the next run
        assert_eq!(email.sent().len(), 1);
    }

    #[actix_web::test]
    async fn gapped_history_continues_from_highest_sequence_number() {
        let TestContext { ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        let invoice = insert_invoice(&ctx, user.user_id, "jane@example.com", due(30)).await;
        ctx.repos
            .reminders
            .insert(&ReminderRecord {
                id: ID::new(),
                invoice_id: invoice.id,
                user_id: user.user_id,
                sequence_number: 2,
                tone: Tone::Firm,
                sent_at: now() - Duration::days(8),
                message_id: None,
            })
            .await
            .unwrap();

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.processed_count, 1);

        let history = ctx.repos.reminders.find_by_invoice(&invoice.id).await.unwrap();
        assert_eq!(history.last().unwrap().sequence_number, 3);
        assert_eq!(history.last().unwrap().tone, Tone::Urgent);
        assert_eq!(email.sent().len(), 1);
    }

    /// Fails to list the pending invoices of one user
    struct InvoiceRepoFailingFor {
        user_id: ID,
        inner: Arc<dyn IInvoiceRepo>,
    }

    #[async_trait::async_trait]
    impl IInvoiceRepo for InvoiceRepoFailingFor {
        async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()> {
            self.inner.insert(invoice).await
        }

        async fn save(&self, invoice: &Invoice) -> anyhow::Result<()> {
            self.inner.save(invoice).await
        }

        async fn find(&self, invoice_id: &ID) -> Option<Invoice> {
            self.inner.find(invoice_id).await
        }

        async fn find_pending_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Invoice>> {
            if *user_id == self.user_id {
                anyhow::bail!("connection reset");
            }
            self.inner.find_pending_by_user(user_id).await
        }
    }

    #[actix_web::test]
    async fn invoice_load_failure_is_collected_and_other_users_continue() {
        let TestContext { mut ctx, email } = setup_at(now());
        let failing_user = insert_user(&ctx, policy()).await;
        let other_user = insert_user(&ctx, policy()).await;
        insert_invoice(&ctx, failing_user.user_id, "jane@example.com", due(5)).await;
        let invoice = insert_invoice(&ctx, other_user.user_id, "john@example.com", due(5)).await;
        ctx.repos.invoices = Arc::new(InvoiceRepoFailingFor {
            user_id: failing_user.user_id,
            inner: ctx.repos.invoices.clone(),
        });

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.invoices_evaluated, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].user_id, failing_user.user_id);
        assert_eq!(result.errors[0].invoice_id, None);
        assert_eq!(result.errors[0].kind, CampaignErrorKind::Storage);
        assert!(result.errors[0].message.contains("connection reset"));

        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user_id, other_user.user_id);
        assert_eq!(
            ctx.repos.reminders.find_by_invoice(&invoice.id).await.unwrap().len(),
            1
        );
    }

    /// Cannot read the reminder history of one invoice
    struct HistoryRepoFailingFor {
        invoice_id: ID,
        inner: Arc<dyn IReminderRepo>,
    }

    #[async_trait::async_trait]
    impl IReminderRepo for HistoryRepoFailingFor {
        async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
            self.inner.insert(reminder).await
        }

        async fn find_by_invoice(&self, invoice_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
            if *invoice_id == self.invoice_id {
                anyhow::bail!("relation does not exist");
            }
            self.inner.find_by_invoice(invoice_id).await
        }
    }

    #[actix_web::test]
    async fn history_read_failure_skips_only_that_invoice() {
        let TestContext { mut ctx, email } = setup_at(now());
        let user = insert_user(&ctx, policy()).await;
        let unreadable = insert_invoice(&ctx, user.user_id, "jane@example.com", due(5)).await;
        let readable = insert_invoice(&ctx, user.user_id, "john@example.com", due(5)).await;
        ctx.repos.reminders = Arc::new(HistoryRepoFailingFor {
            invoice_id: unreadable.id,
            inner: ctx.repos.reminders.clone(),
        });

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.invoices_evaluated, 2);
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].invoice_id, Some(unreadable.id));
        assert_eq!(result.errors[0].kind, CampaignErrorKind::Storage);

        // Nothing is sent when the history is unknown
        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message.to, "john@example.com");
        assert_eq!(
            ctx.repos.reminders.find_by_invoice(&readable.id).await.unwrap().len(),
            1
        );
    }

    /// Returns the stored settings plus one user whose row cannot be read
    struct SettingsRepoWithUnreadableRow {
        unreadable_user: ID,
        inner: InMemoryUserSettingsRepo,
    }

    #[async_trait::async_trait]
    impl IUserSettingsRepo for SettingsRepoWithUnreadableRow {
        async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()> {
            self.inner.insert(settings).await
        }

        async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
            self.inner.save(settings).await
        }

        async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserSettings>> {
            self.inner.find(user_id).await
        }

        async fn find_opted_in(
            &self,
        ) -> anyhow::Result<Vec<Result<UserSettings, UnreadableSettings>>> {
            let mut users = vec![Err(UnreadableSettings {
                user_id: self.unreadable_user,
                error: anyhow::anyhow!("unknown tone \"stern\""),
            })];
            users.extend(self.inner.find_opted_in().await?);
            Ok(users)
        }
    }

    #[actix_web::test]
    async fn unreadable_settings_are_reported_as_storage_errors() {
        let TestContext { mut ctx, email } = setup_at(now());
        let unreadable_user = ID::new();
        ctx.repos.user_settings = Arc::new(SettingsRepoWithUnreadableRow {
            unreadable_user,
            inner: InMemoryUserSettingsRepo::new(),
        });
        let user = insert_user(&ctx, policy()).await;
        insert_invoice(&ctx, unreadable_user, "jane@example.com", due(5)).await;
        insert_invoice(&ctx, user.user_id, "john@example.com", due(5)).await;

        let result = run_reminder_campaign(&ctx).await.unwrap();
        assert_eq!(result.invoices_evaluated, 1);
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].user_id, unreadable_user);
        assert_eq!(result.errors[0].invoice_id, None);
        assert_eq!(result.errors[0].kind, CampaignErrorKind::Storage);
        assert!(result.errors[0].message.contains("stern"));
        assert_eq!(email.sent().len(), 1);
    }
}
