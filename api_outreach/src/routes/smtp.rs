use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::error::AppError;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use db::dtos::smtp::{SmtpCreateRequest, SmtpUpdateRequest};
use quota::guard::{self, Resource};

use crate::dtos::smtp::{CreateSmtpRequest, SmtpResponse, UpdateSmtpRequest};

/// Creates an SMTP configuration for the authenticated user.
///
/// Creating a config consumes one `smtp_configs` quota slot. The slot claim
/// and the insert commit in the same transaction, so a denied request leaves
/// no trace and a crash cannot charge quota without creating the config.
///
/// # Output
/// - Success: 201 with the stored config
/// - Error: 403 when the plan's SMTP config limit is exhausted, e.g.
///   `"SMTP Config limit reached — your plan allows only 1 configs"`
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/smtp', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     host: 'smtp.example.com',
///     port: 587,
///     username: 'mailer@example.com',
///     password: 'app-password',
///     from_email: 'mailer@example.com',
///     secure: false
///   })
/// });
/// ```
#[post("")]
pub async fn post_create_smtp(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateSmtpRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let user_id = claims.user_id;

    let mut tx = guard::consume_config_slot(pg_pool, user_id, Resource::SmtpConfig).await?;
    let req = req.into_inner();
    let smtp = db::smtp::insert_smtp(
        &mut *tx,
        SmtpCreateRequest {
            user_id,
            host: req.host,
            port: req.port,
            username: req.username,
            password: req.password,
            from_email: req.from_email,
            secure: req.secure,
        },
    )
    .await?;
    tx.commit().await?;

    Success::created(SmtpResponse {
        message: "SMTP saved successfully".to_string(),
        smtp,
    })
}

/// Lists the authenticated user's SMTP configurations.
#[get("")]
pub async fn get_my_smtps(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let list = db::smtp::get_by_user(pg_pool, claims.user_id).await?;
    Success::ok(list)
}

/// Updates one of the user's SMTP configurations. Missing fields keep their
/// current value.
#[put("/{id}")]
pub async fn put_update_smtp(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSmtpRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    let smtp = db::smtp::update_owned(
        pg_pool,
        path.into_inner(),
        claims.user_id,
        SmtpUpdateRequest {
            host: req.host,
            port: req.port,
            username: req.username,
            password: req.password,
            from_email: req.from_email,
            secure: req.secure,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("SMTP not found".to_string()))?;

    Success::ok(SmtpResponse {
        message: "Updated successfully".to_string(),
        smtp,
    })
}

/// Deletes one of the user's SMTP configurations. Deleting a config does NOT
/// restore the consumed quota slot.
#[delete("/{id}")]
pub async fn delete_smtp(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let deleted = db::smtp::delete_owned(pg_pool, path.into_inner(), claims.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("SMTP not found".to_string()));
    }
    Ok(Success::ok(serde_json::json!({ "message": "Deleted successfully" })))
}
