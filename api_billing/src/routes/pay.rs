use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::env_config::Config;
use common::error::AppError;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;

use crate::dtos::pay::{CreateOrderRequest, SubscriptionResponse, VerifyPaymentRequest};
use crate::services;

/// Starts a plan purchase for the authenticated user.
///
/// # Input
/// - `claims`: JWT claims identifying the buyer
/// - `req`: JSON payload with the `plan_id` to purchase
/// - `pool`: Database connection pool
/// - `config`: Application configuration with Razorpay credentials
///
/// # Output
/// - Free plan: activates immediately and returns the new subscription
/// - Paid plan: returns the Razorpay order for the frontend checkout
/// - Error: 404 for an unknown plan, 503 when the gateway is not configured
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/payment/create-order', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({ plan_id: selectedPlanId })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   if (data.order) {
///     // Hand the order id to Razorpay checkout
///     openRazorpayCheckout(data.order.id);
///   }
/// }
/// ```
#[post("/create-order")]
pub async fn post_create_order(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateOrderRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let response =
        services::pay::create_order(pg_pool, &config, claims.user_id, req.plan_id).await?;
    Success::ok(response)
}

/// Confirms a Razorpay checkout and activates the purchased plan.
///
/// The signature is recomputed server-side as
/// HMAC-SHA256(`order_id|payment_id`) with the gateway secret; a mismatch is
/// rejected with 400 before anything is persisted. On success the user's
/// subscription is overwritten with the new plan's limits and zeroed usage.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/payment/verify-payment', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     razorpay_order_id: checkout.order_id,
///     razorpay_payment_id: checkout.payment_id,
///     razorpay_signature: checkout.signature,
///     plan_id: selectedPlanId
///   })
/// });
/// ```
#[post("/verify-payment")]
pub async fn post_verify_payment(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<VerifyPaymentRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let response =
        services::pay::verify_payment(pg_pool, &config, claims.user_id, req.into_inner()).await?;
    Success::ok(response)
}

/// Retrieves the authenticated user's subscription with its limits snapshot
/// and current usage counters.
#[get("/subscription")]
pub async fn get_subscription(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let subscription = services::sub::get_subscription(pg_pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No subscription found".to_string()))?;
    Success::ok(SubscriptionResponse { subscription })
}

/// Retrieves the authenticated user's payment history, newest first.
#[get("/history")]
pub async fn get_history(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let payments = db::payment::get_payments_by_user(pg_pool, claims.user_id).await?;
    Success::ok(payments)
}
