use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::error::AppError;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use db::dtos::sms_campaign::SmsCampaignUpdateRequest;

use crate::dtos::sms_campaign::{SmsCampaignSendRequest, UpdateSmsCampaignRequest};
use crate::services;

/// Sends a bulk SMS campaign through one of the user's gateway devices.
///
/// # Input
/// - `req`: JSON payload with `title`, `gateway_id`, `message` and `numbers`
///   (array of phone numbers)
///
/// # Output
/// - Success: the campaign record with per-number results. Numbers over the
///   remaining monthly quota come back with status "blocked" and are never
///   attempted.
/// - Error: 400 for a missing field or empty number list, 404 for an unknown
///   gateway, 403 when the SMS quota is fully exhausted, e.g.
///   `"SMS limit reached — cannot send any more messages this month"`
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/sms_campaign', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     title: 'Flash sale',
///     gateway_id: gatewayId,
///     numbers: ['+911234567890', '+919876543210'],
///     message: '50% off today only'
///   })
/// });
/// ```
#[post("")]
pub async fn post_send_sms_campaign(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<SmsCampaignSendRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let report =
        services::sms_campaign::send_bulk_sms(pg_pool, claims.user_id, req.into_inner()).await?;
    Success::created(report)
}

/// Lists the authenticated user's SMS campaigns, newest first.
#[get("")]
pub async fn get_my_sms_campaigns(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let campaigns = db::sms_campaign::get_by_user(pg_pool, claims.user_id).await?;
    Success::ok(campaigns)
}

/// Retrieves one SMS campaign by id.
#[get("/{id}")]
pub async fn get_sms_campaign(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let campaign = db::sms_campaign::get_owned(pg_pool, path.into_inner(), claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
    Success::ok(campaign)
}

/// Renames or edits the message of a saved SMS campaign. Counters and
/// results are read-only.
#[put("/{id}")]
pub async fn put_update_sms_campaign(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSmsCampaignRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    let campaign = db::sms_campaign::update_owned(
        pg_pool,
        path.into_inner(),
        claims.user_id,
        SmsCampaignUpdateRequest {
            title: req.title,
            message: req.message,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
    Success::ok(campaign)
}

/// Deletes one SMS campaign by id.
#[delete("/{id}")]
pub async fn delete_sms_campaign(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let deleted =
        db::sms_campaign::delete_owned(pg_pool, path.into_inner(), claims.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Campaign not found".to_string()));
    }
    Ok(Success::ok(
        serde_json::json!({ "message": "Campaign deleted" }),
    ))
}
