use serde::{Deserialize, Serialize};

use db::models::gateway::SmsGateway;

fn default_gateway_port() -> i32 {
    8080
}

fn default_secure() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateGatewayRequest {
    pub username: String,
    pub contact_number: String,
    pub ip: String,
    #[serde(default = "default_gateway_port")]
    pub port: i32,
    #[serde(default = "default_secure")]
    pub secure: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGatewayRequest {
    pub username: Option<String>,
    pub contact_number: Option<String>,
    pub ip: Option<String>,
    pub port: Option<i32>,
    pub secure: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GatewayResponse {
    pub message: String,
    pub gateway: SmsGateway,
}
