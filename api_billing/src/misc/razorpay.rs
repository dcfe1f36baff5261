use common::env_config::RazorpayConfig;
use common::error::{AppError, Res};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Client for the Razorpay Orders API. Orders are created with basic auth;
/// checkout results are confirmed offline by recomputing the HMAC signature.
pub struct RazorpayClient {
    client: reqwest::Client,
    config: RazorpayConfig,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    /// Amount in the smallest currency unit (paise for INR).
    amount: i64,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

pub fn create_client(config: &RazorpayConfig) -> RazorpayClient {
    RazorpayClient::new(config.clone())
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.key_id.is_empty() && !self.config.key_secret.is_empty()
    }

    /// Creates a new order. `amount` is in the smallest currency unit.
    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: Option<String>,
        notes: Option<serde_json::Value>,
    ) -> Res<RazorpayOrder> {
        if !self.is_configured() {
            return Err(AppError::ServiceUnavailable(
                "Payment gateway is not configured".to_string(),
            ));
        }

        let request = CreateOrderRequest {
            amount,
            currency: currency.to_string(),
            receipt,
            notes,
        };
        let url = format!("{}/orders", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let order: RazorpayOrder = serde_json::from_str(&body)
                .map_err(|e| AppError::Internal(format!("Failed to parse Razorpay order: {}", e)))?;
            log::info!("Razorpay order created: {}", order.id);
            Ok(order)
        } else {
            log::error!("Razorpay order creation failed ({}): {}", status, body);
            Err(AppError::Internal(format!("Razorpay error: {}", body)))
        }
    }

    /// Verifies the checkout signature, computed by Razorpay as
    /// `HMAC-SHA256(order_id + "|" + payment_id, key_secret)` and hex encoded.
    pub fn verify_payment_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Res<bool> {
        let payload = format!("{}|{}", order_id, payment_id);
        let expected = compute_signature(&payload, &self.config.key_secret)?;
        Ok(expected == signature)
    }
}

fn compute_signature(payload: &str, secret: &str) -> Res<String> {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal("Invalid HMAC key length".to_string()))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RazorpayConfig {
        RazorpayConfig {
            key_id: "rzp_test_123".to_string(),
            key_secret: "my_secret_key".to_string(),
            api_base_url: "https://api.razorpay.com/v1".to_string(),
        }
    }

    #[test]
    fn detects_missing_credentials() {
        assert!(RazorpayClient::new(test_config()).is_configured());

        let empty = RazorpayConfig {
            key_id: String::new(),
            key_secret: String::new(),
            api_base_url: String::new(),
        };
        assert!(!RazorpayClient::new(empty).is_configured());
    }

    #[test]
    fn accepts_matching_signature() {
        let client = RazorpayClient::new(test_config());

        let expected = compute_signature("order_123|pay_456", "my_secret_key").unwrap();
        assert!(
            client
                .verify_payment_signature("order_123", "pay_456", &expected)
                .unwrap()
        );
    }

    #[test]
    fn rejects_tampered_signature() {
        let client = RazorpayClient::new(test_config());

        assert!(
            !client
                .verify_payment_signature("order_123", "pay_456", "invalid_signature")
                .unwrap()
        );

        // signature over a different order must not validate this one
        let other = compute_signature("order_999|pay_456", "my_secret_key").unwrap();
        assert!(
            !client
                .verify_payment_signature("order_123", "pay_456", &other)
                .unwrap()
        );
    }
}
