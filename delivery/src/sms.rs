use std::time::Duration;

use common::error::Res;
use db::models::gateway::SmsGateway;
use serde::Deserialize;
use serde_json::json;

const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayStatusResponse {
    status: String,
}

/// HTTP client for the Android SMS gateway app reachable on the local
/// network at `http://{ip}:{port}`.
pub struct SmsGatewayClient {
    client: reqwest::Client,
}

impl SmsGatewayClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn base_url(gateway: &SmsGateway) -> String {
        format!("http://{}:{}", gateway.ip, gateway.port)
    }

    /// Posts one message to the device. Returns whether the gateway reported
    /// the message as sent or delivered; transport errors bubble up so the
    /// caller can classify the recipient as failed.
    pub async fn send_sms(&self, gateway: &SmsGateway, phone: &str, message: &str) -> Res<bool> {
        let response = self
            .client
            .post(format!("{}/send-sms", Self::base_url(gateway)))
            .json(&json!({ "phone": phone, "message": message }))
            .send()
            .await?;

        let http_ok = response.status().is_success();
        let status = response
            .json::<SendSmsResponse>()
            .await
            .ok()
            .and_then(|body| body.status)
            .unwrap_or_else(|| if http_ok { "sent" } else { "failed" }.to_string());

        Ok(status == "sent" || status == "delivered")
    }

    /// Health probe against the device's `/status` endpoint. Anything other
    /// than a timely `{"status":"online"}` counts as offline.
    pub async fn check_status(&self, gateway: &SmsGateway) -> bool {
        let response = self
            .client
            .get(format!("{}/status", Self::base_url(gateway)))
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => res
                .json::<GatewayStatusResponse>()
                .await
                .map(|body| body.status == "online")
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl Default for SmsGatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_at(ip: &str, port: i32) -> SmsGateway {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SmsGateway {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            contact_number: "+911234567890".to_string(),
            ip: ip.to_string(),
            port,
            secure: false,
            status: "disconnected".to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn gateway_for(server: &MockServer) -> SmsGateway {
        let addr = server.address();
        gateway_at(&addr.ip().to_string(), addr.port() as i32)
    }

    #[tokio::test]
    async fn send_sms_trusts_the_gateway_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-sms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "delivered"
            })))
            .mount(&server)
            .await;

        let client = SmsGatewayClient::new();
        let delivered = client
            .send_sms(&gateway_for(&server), "+911234567890", "hello")
            .await
            .unwrap();
        assert!(delivered);
    }

    #[tokio::test]
    async fn send_sms_reports_gateway_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-sms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "failed"
            })))
            .mount(&server)
            .await;

        let client = SmsGatewayClient::new();
        let delivered = client
            .send_sms(&gateway_for(&server), "+911234567890", "hello")
            .await
            .unwrap();
        assert!(!delivered);
    }

    #[tokio::test]
    async fn send_sms_falls_back_to_http_status() {
        // some gateway builds answer 200 with an empty body
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-sms"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = SmsGatewayClient::new();
        let delivered = client
            .send_sms(&gateway_for(&server), "+911234567890", "hello")
            .await
            .unwrap();
        assert!(delivered);
    }

    #[tokio::test]
    async fn send_sms_errors_when_device_is_unreachable() {
        let client = SmsGatewayClient::new();
        let result = client
            .send_sms(&gateway_at("127.0.0.1", 1), "+911234567890", "hello")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn status_probe_detects_online_device() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "online"
            })))
            .mount(&server)
            .await;

        let client = SmsGatewayClient::new();
        assert!(client.check_status(&gateway_for(&server)).await);
    }

    #[tokio::test]
    async fn status_probe_treats_errors_as_offline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SmsGatewayClient::new();
        assert!(!client.check_status(&gateway_for(&server)).await);
        assert!(!client.check_status(&gateway_at("127.0.0.1", 1)).await);
    }
}
