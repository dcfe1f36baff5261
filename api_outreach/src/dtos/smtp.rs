use serde::{Deserialize, Serialize};

use db::models::smtp::SmtpConfig;

#[derive(Debug, Deserialize)]
pub struct CreateSmtpRequest {
    pub host: String,
    pub port: i32,
    pub username: String,
    pub password: String,
    pub from_email: String,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSmtpRequest {
    pub host: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub secure: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SmtpResponse {
    pub message: String,
    pub smtp: SmtpConfig,
}
