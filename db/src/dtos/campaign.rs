use uuid::Uuid;

use crate::models::campaign::SendResult;

#[derive(Debug)]
pub struct CampaignCreateRecord {
    pub user_id: Uuid,
    pub name: String,
    pub subject: String,
    pub smtp_id: Uuid,
    pub recipients: Vec<String>,
    pub message: String,
}

/// Reconciled counters written back after the delivery loop finishes.
#[derive(Debug)]
pub struct CampaignOutcome {
    pub sent_count: i32,
    pub failed_count: i32,
    pub status: String,
    pub results: Vec<SendResult>,
}
