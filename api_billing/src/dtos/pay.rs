use serde::{Deserialize, Serialize};
use uuid::Uuid;

use db::models::subscription::Subscription;

use crate::misc::razorpay::RazorpayOrder;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub plan_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub plan_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateOrderResponse {
    Free {
        message: String,
        subscription: Subscription,
    },
    Order {
        message: String,
        order: RazorpayOrder,
    },
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: String,
    pub subscription: Subscription,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub subscription: Subscription,
}
