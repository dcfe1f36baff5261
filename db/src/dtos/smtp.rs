use uuid::Uuid;

#[derive(Debug)]
pub struct SmtpCreateRequest {
    pub user_id: Uuid,
    pub host: String,
    pub port: i32,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub secure: bool,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct SmtpUpdateRequest {
    pub host: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub secure: Option<bool>,
}
