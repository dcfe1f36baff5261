use uuid::Uuid;

#[derive(Debug)]
pub struct GatewayCreateRequest {
    pub user_id: Uuid,
    pub username: String,
    pub contact_number: String,
    pub ip: String,
    pub port: i32,
    pub secure: bool,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct GatewayUpdateRequest {
    pub username: Option<String>,
    pub contact_number: Option<String>,
    pub ip: Option<String>,
    pub port: Option<i32>,
    pub secure: Option<bool>,
}
