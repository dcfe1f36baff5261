use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    #[serde(skip_serializing)]
    pub signature: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment_method: String,
    pub payment_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
