use serde::{Deserialize, Serialize};
use uuid::Uuid;

use db::models::campaign::SendResult;
use db::models::sms_campaign::SmsCampaign;

#[derive(Debug, Deserialize)]
pub struct SmsCampaignSendRequest {
    pub title: String,
    pub gateway_id: Uuid,
    pub numbers: Vec<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSmsCampaignRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SmsCampaignSendResponse {
    pub message: String,
    pub total_contacts: usize,
    pub sent_count: usize,
    pub failed_count: usize,
    pub results: Vec<SendResult>,
    pub campaign: SmsCampaign,
}
