use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// A user-supplied SMTP relay used for sending email campaigns.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SmtpConfig {
    pub id: Uuid,
    pub user_id: Uuid,
    pub host: String,
    pub port: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub from_email: String,
    pub secure: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
