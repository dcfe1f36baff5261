use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// A catalog tier. The per-month columns are quota ceilings; -1 means
/// unlimited.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub currency: String,
    pub interval: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub emails_per_month: i32,
    pub sms_per_month: i32,
    pub smtp_configs: i32,
    pub android_gateways: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
