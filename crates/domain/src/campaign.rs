use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignErrorKind {
    /// Reading or writing reminder state failed
    Storage,
    /// The email transport did not accept the reminder
    Send,
}

/// A failure for a single user or invoice during a reminder campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignError {
    pub user_id: ID,
    /// Not set when the invoices of the user could not be loaded
    pub invoice_id: Option<ID>,
    pub kind: CampaignErrorKind,
    pub message: String,
}

/// Summary of one reminder campaign run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResult {
    /// Reminders that were both sent and recorded
    pub processed_count: usize,
    pub invoices_evaluated: usize,
    pub errors: Vec<CampaignError>,
}

impl CampaignResult {
    pub fn push_error(
        &mut self,
        user_id: ID,
        invoice_id: Option<ID>,
        kind: CampaignErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(CampaignError {
            user_id,
            invoice_id,
            kind,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_camel_case() {
        let mut result = CampaignResult {
            processed_count: 2,
            invoices_evaluated: 5,
            errors: vec![],
        };
        let user_id = ID::new();
        result.push_error(user_id, None, CampaignErrorKind::Storage, "db down");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["processedCount"], 2);
        assert_eq!(json["invoicesEvaluated"], 5);
        assert_eq!(json["errors"][0]["kind"], "storage");
        assert_eq!(json["errors"][0]["userId"], user_id.as_string());
        assert!(json["errors"][0]["invoiceId"].is_null());
    }
}
