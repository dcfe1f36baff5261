use uuid::Uuid;

#[derive(Debug)]
pub struct SmsCampaignCreateRecord {
    pub user_id: Uuid,
    pub gateway_id: Uuid,
    pub title: String,
    pub numbers: Vec<String>,
    pub message: String,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct SmsCampaignUpdateRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}
