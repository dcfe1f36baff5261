use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// An Android device running the SMS gateway app, addressed by ip:port on the
/// local network.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SmsGateway {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub contact_number: String,
    pub ip: String,
    pub port: i32,
    pub secure: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub const GATEWAY_CONNECTED: &str = "connected";
pub const GATEWAY_DISCONNECTED: &str = "disconnected";
