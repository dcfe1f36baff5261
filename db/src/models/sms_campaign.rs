use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::types::JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SmsCampaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gateway_id: Uuid,
    pub title: String,
    pub numbers: Vec<String>,
    pub message: String,
    pub total_contacts: i32,
    pub sent_count: i32,
    pub failed_count: i32,
    pub status: String,
    pub results: Option<JsonValue>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
