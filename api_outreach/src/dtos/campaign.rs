use serde::{Deserialize, Serialize};
use uuid::Uuid;

use db::models::campaign::{Campaign, SendResult};

/// Recipients arrive either as a JSON array or as one comma-separated
/// string, depending on the frontend form used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipientList {
    Many(Vec<String>),
    Csv(String),
}

impl RecipientList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            RecipientList::Many(list) => list
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            RecipientList::Csv(raw) => raw
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CampaignSendRequest {
    pub name: String,
    pub subject: String,
    pub smtp_id: Uuid,
    pub recipients: RecipientList,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CampaignSendResponse {
    pub message: String,
    pub total_recipients: usize,
    pub sent_count: usize,
    pub failed_count: usize,
    pub results: Vec<SendResult>,
    pub campaign: Campaign,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recipients_decode_from_array_or_csv() {
        let from_array: RecipientList =
            serde_json::from_value(json!(["a@x.com", " b@x.com "])).unwrap();
        assert_eq!(from_array.into_vec(), vec!["a@x.com", "b@x.com"]);

        let from_csv: RecipientList =
            serde_json::from_value(json!("a@x.com, b@x.com,,c@x.com ")).unwrap();
        assert_eq!(from_csv.into_vec(), vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn blank_entries_are_dropped_not_rejected() {
        let list: RecipientList = serde_json::from_value(json!([" ", ""])).unwrap();
        assert!(list.into_vec().is_empty());
    }
}
