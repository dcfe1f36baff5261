use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::JsonValue;
use uuid::Uuid;

/// Per-recipient delivery outcome recorded on the campaign row.
/// Status is one of "sent", "failed" or "blocked" (never attempted because it
/// fell outside the remaining quota).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    pub recipient: String,
    pub status: String,
}

impl SendResult {
    pub fn sent(recipient: String) -> Self {
        SendResult {
            recipient,
            status: "sent".to_string(),
        }
    }
    pub fn failed(recipient: String) -> Self {
        SendResult {
            recipient,
            status: "failed".to_string(),
        }
    }
    pub fn blocked(recipient: String) -> Self {
        SendResult {
            recipient,
            status: "blocked".to_string(),
        }
    }
}

/// Derives the final campaign status from the reconciled counters.
pub fn outcome_status(sent_count: usize, failed_count: usize) -> &'static str {
    if failed_count == 0 {
        "sent"
    } else if sent_count == 0 {
        "failed"
    } else {
        "partial"
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Campaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub subject: String,
    pub smtp_id: Uuid,
    pub recipients: Vec<String>,
    pub message: String,
    pub sent_count: i32,
    pub failed_count: i32,
    pub status: String,
    pub results: Option<JsonValue>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reflects_counters() {
        assert_eq!(outcome_status(5, 0), "sent");
        assert_eq!(outcome_status(0, 5), "failed");
        assert_eq!(outcome_status(2, 3), "partial");
        // nothing attempted yet still counts as a clean run
        assert_eq!(outcome_status(0, 0), "sent");
    }
}
