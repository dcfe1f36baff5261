use common::env_config::Config;
use common::error::{AppError, Res};
use db::dtos::payment::PaymentCreateRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::pay::{CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse};
use crate::misc::razorpay;
use crate::services::sub;

/// Starts a purchase. Free plans skip the payment gateway and activate the
/// subscription immediately; paid plans get a Razorpay order the frontend
/// completes via checkout.
pub async fn create_order(
    pool: &PgPool,
    config: &Config,
    user_id: Uuid,
    plan_id: Uuid,
) -> Res<CreateOrderResponse> {
    let plan = db::plan::get_plan_by_id(pool, plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    if plan.price == 0 {
        let subscription = sub::activate_subscription(pool, user_id, &plan).await?;
        db::payment::insert_payment(
            pool,
            PaymentCreateRequest {
                user_id,
                plan_id: plan.id,
                order_id: None,
                amount: 0,
                currency: plan.currency.clone(),
                status: "paid".to_string(),
                payment_method: "free".to_string(),
            },
        )
        .await?;
        log::info!(
            "Free subscription activated for user {} on plan {}",
            user_id,
            plan.name
        );
        return Ok(CreateOrderResponse::Free {
            message: "Free subscription activated successfully!".to_string(),
            subscription,
        });
    }

    let client = razorpay::create_client(&config.razorpay);
    let receipt = format!("order_rcpt_{}", Uuid::new_v4().simple());
    let notes = serde_json::json!({
        "plan_id": plan.id,
        "user_id": user_id,
        "plan_name": plan.name,
    });
    let order = client
        .create_order(plan.price, &plan.currency, Some(receipt), Some(notes))
        .await?;

    db::payment::insert_payment(
        pool,
        PaymentCreateRequest {
            user_id,
            plan_id: plan.id,
            order_id: Some(order.id.clone()),
            amount: plan.price,
            currency: plan.currency.clone(),
            status: "created".to_string(),
            payment_method: "razorpay".to_string(),
        },
    )
    .await?;

    Ok(CreateOrderResponse::Order {
        message: "Order created successfully".to_string(),
        order,
    })
}

/// Confirms a checkout by recomputing the payment signature, then activates
/// the purchased plan. Renewal semantics: the existing subscription row is
/// overwritten wholesale, so usage counters reset to zero.
pub async fn verify_payment(
    pool: &PgPool,
    config: &Config,
    user_id: Uuid,
    req: VerifyPaymentRequest,
) -> Res<VerifyPaymentResponse> {
    let client = razorpay::create_client(&config.razorpay);
    let valid = client.verify_payment_signature(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    )?;
    if !valid {
        return Err(AppError::BadRequest("Invalid payment signature".to_string()));
    }

    let updated = db::payment::mark_paid(
        pool,
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    )
    .await?;
    if updated.is_none() {
        // order rows are created by create_order; tolerate a missing one so a
        // verified payment still activates the plan
        log::warn!(
            "No payment record found for order {}",
            req.razorpay_order_id
        );
    }

    let plan = db::plan::get_plan_by_id(pool, req.plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;
    let subscription = sub::activate_subscription(pool, user_id, &plan).await?;

    Ok(VerifyPaymentResponse {
        message: "Payment verified & subscription activated".to_string(),
        subscription,
    })
}
