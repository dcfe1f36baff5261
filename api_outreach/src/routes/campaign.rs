use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::error::AppError;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::campaign::CampaignSendRequest;
use crate::services;

/// Sends an email campaign to a recipient list and saves the result.
///
/// # Input
/// - `req`: JSON payload with `name`, `subject`, `smtp_id`, `message` and
///   `recipients` (array of addresses, or one comma-separated string)
///
/// # Output
/// - Success: 201 with the campaign record, per-recipient results and the
///   reconciled `sent_count`/`failed_count`. Recipients over the remaining
///   monthly quota come back with status "blocked" and are never attempted;
///   campaign status is "sent", "partial" or "failed" accordingly.
/// - Error: 400 for a missing field or empty recipient list, 404 for an
///   unknown SMTP config, 403 when the email quota is fully exhausted
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/campaign', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     name: 'March launch',
///     subject: 'We are live!',
///     smtp_id: smtpConfigId,
///     recipients: ['a@example.com', 'b@example.com'],
///     message: 'Hello from ReachIQ'
///   })
/// });
///
/// if (response.ok) {
///   const report = await response.json();
///   console.log(`${report.sent_count} sent, ${report.failed_count} failed`);
///   // report.results: [{recipient, status: "sent" | "failed" | "blocked"}]
/// }
/// ```
#[post("")]
pub async fn post_send_campaign(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CampaignSendRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let report =
        services::campaign::create_and_send_campaign(pg_pool, claims.user_id, req.into_inner())
            .await?;
    Success::created(report)
}

/// Lists the authenticated user's campaigns, newest first.
#[get("")]
pub async fn get_my_campaigns(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let campaigns = db::campaign::get_by_user(pg_pool, claims.user_id).await?;
    Success::ok(campaigns)
}

/// Retrieves one campaign by id.
#[get("/{id}")]
pub async fn get_campaign(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let campaign = db::campaign::get_owned(pg_pool, path.into_inner(), claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
    Success::ok(campaign)
}

/// Deletes one campaign by id.
#[delete("/{id}")]
pub async fn delete_campaign(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let deleted = db::campaign::delete_owned(pg_pool, path.into_inner(), claims.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Campaign not found".to_string()));
    }
    Ok(Success::ok(
        serde_json::json!({ "message": "Campaign deleted successfully" }),
    ))
}
