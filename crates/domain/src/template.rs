use crate::{
    date::format_long_date, invoice::Invoice, reminder::Tone, settings::UserSettings,
};
use serde::{Deserialize, Serialize};

const FALLBACK_BUSINESS_NAME: &str = "The billing team";

/// Subject and body of a reminder email with `{placeholder}` markers.
///
/// Supported placeholders: `{client_name}`, `{invoice_number}`, `{amount}`,
/// `{due_date}`, `{days_overdue}` and `{business_name}`. Unknown
/// placeholders are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub tone: Tone,
    pub subject: String,
    pub body: String,
    /// The body is sent as html. Values are substituted as-is, without escaping.
    #[serde(default)]
    pub is_html: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
    pub is_html: bool,
}

impl EmailTemplate {
    pub fn builtin(tone: Tone) -> Self {
        let (subject, body) = match tone {
            Tone::Polite => (
                "Friendly reminder: invoice {invoice_number} from {business_name}",
                "Hi {client_name},\n\n\
                 This is a friendly reminder that invoice {invoice_number} for {amount} \
                 was due on {due_date}. If you have already sent the payment, please \
                 disregard this message.\n\n\
                 Thank you for your business!\n\n\
                 {business_name}",
            ),
            Tone::Firm => (
                "Payment overdue: invoice {invoice_number}",
                "Hello {client_name},\n\n\
                 Our records show that invoice {invoice_number} for {amount}, due on \
                 {due_date}, is now {days_overdue} days overdue. Please arrange payment \
                 at your earliest convenience.\n\n\
                 If there is a problem with this invoice, reply to this email so we can \
                 resolve it.\n\n\
                 {business_name}",
            ),
            Tone::Urgent => (
                "URGENT: invoice {invoice_number} is {days_overdue} days overdue",
                "{client_name},\n\n\
                 Invoice {invoice_number} for {amount} was due on {due_date} and remains \
                 unpaid after {days_overdue} days. Please settle the outstanding balance \
                 immediately.\n\n\
                 {business_name}",
            ),
        };
        Self {
            tone,
            subject: subject.into(),
            body: body.into(),
            is_html: false,
        }
    }
}

fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
}

/// Renders the reminder email for `tone`, preferring the user's own template
pub fn render(
    tone: Tone,
    invoice: &Invoice,
    settings: &UserSettings,
    days_overdue: i64,
) -> RenderedEmail {
    let template = settings
        .template_for(tone)
        .cloned()
        .unwrap_or_else(|| EmailTemplate::builtin(tone));

    let amount = invoice.formatted_amount();
    let due_date = format_long_date(invoice.due_date);
    let days_overdue = days_overdue.max(0).to_string();
    let business_name = settings
        .business_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(FALLBACK_BUSINESS_NAME);

    let values = [
        ("client_name", invoice.client_name.as_str()),
        ("invoice_number", invoice.invoice_number.as_str()),
        ("amount", amount.as_str()),
        ("due_date", due_date.as_str()),
        ("days_overdue", days_overdue.as_str()),
        ("business_name", business_name),
    ];

    RenderedEmail {
        subject: fill(&template.subject, &values),
        body: fill(&template.body, &values),
        is_html: template.is_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{invoice::InvoiceStatus, shared::entity::ID};

    fn invoice() -> Invoice {
        Invoice {
            id: ID::new(),
            user_id: ID::new(),
            invoice_number: "INV-0042".into(),
            client_name: "Jane Doe".into(),
            client_email: "jane@example.com".into(),
            amount: 123456,
            currency: "USD".into(),
            due_date: "2025-01-05".parse().unwrap(),
            status: InvoiceStatus::Pending,
            created: 0,
        }
    }

    fn settings() -> UserSettings {
        let mut settings = UserSettings::new(ID::new());
        settings.business_name = Some("Doe Consulting".into());
        settings
    }

    #[test]
    fn renders_polite_reminder() {
        let email = render(Tone::Polite, &invoice(), &settings(), 0);
        assert_eq!(
            email.subject,
            "Friendly reminder: invoice INV-0042 from Doe Consulting"
        );
        assert!(email.body.starts_with("Hi Jane Doe,"));
        assert!(email.body.contains("$1,234.56"));
        assert!(email.body.contains("January 5, 2025"));
        assert!(!email.body.contains('{'));
        assert!(!email.is_html);
    }

    #[test]
    fn renders_days_overdue_for_escalated_tones() {
        let firm = render(Tone::Firm, &invoice(), &settings(), 14);
        assert!(firm.body.contains("is now 14 days overdue"));

        let urgent = render(Tone::Urgent, &invoice(), &settings(), 30);
        assert_eq!(urgent.subject, "URGENT: invoice INV-0042 is 30 days overdue");
    }

    #[test]
    fn never_renders_negative_days() {
        let email = render(Tone::Urgent, &invoice(), &settings(), -3);
        assert!(email.subject.contains("is 0 days overdue"));
    }

    #[test]
    fn prefers_user_template() {
        let mut settings = settings();
        settings.set_template(EmailTemplate {
            tone: Tone::Firm,
            subject: "{invoice_number} / {unknown}".into(),
            body: "<p>{client_name} owes {amount}</p>".into(),
            is_html: true,
        });

        let email = render(Tone::Firm, &invoice(), &settings, 3);
        assert_eq!(email.subject, "INV-0042 / {unknown}");
        assert_eq!(email.body, "<p>Jane Doe owes $1,234.56</p>");
        assert!(email.is_html);

        let polite = render(Tone::Polite, &invoice(), &settings, 3);
        assert!(!polite.is_html);
    }

    #[test]
    fn falls_back_to_generic_business_name() {
        let mut settings = settings();
        settings.business_name = Some("  ".into());
        let email = render(Tone::Polite, &invoice(), &settings, 0);
        assert!(email.body.ends_with(FALLBACK_BUSINESS_NAME));
    }
}
