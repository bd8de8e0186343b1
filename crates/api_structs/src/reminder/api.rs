use crate::dtos::{ReminderDecisionDTO, ReminderRecordDTO, RenderedEmailDTO};
use invoice_reminders_domain::ID;
use serde::{Deserialize, Serialize};

pub mod get_invoice_reminders {
    use super::*;
    use invoice_reminders_domain::ReminderRecord;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderRecordDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<ReminderRecord>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderRecordDTO::new).collect(),
            }
        }
    }
}

pub mod get_reminder_decision {
    use super::*;
    use invoice_reminders_domain::ReminderState;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Whether the campaign would consider the invoice at all, i.e. it is
        /// pending and its owner has automated reminders enabled
        pub eligible: bool,
        pub decision: ReminderDecisionDTO,
        pub state: ReminderState,
        /// The email the next campaign would send, if any
        pub preview: Option<RenderedEmailDTO>,
    }
}

pub mod send_reminders {
    use invoice_reminders_domain::CampaignResult;

    pub type APIResponse = CampaignResult;
}
