use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::error::AppError;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use db::dtos::gateway::{GatewayCreateRequest, GatewayUpdateRequest};
use db::models::gateway::{GATEWAY_CONNECTED, GATEWAY_DISCONNECTED};
use delivery::sms::SmsGatewayClient;
use quota::guard::{self, Resource};

use crate::dtos::gateway::{CreateGatewayRequest, GatewayResponse, UpdateGatewayRequest};

/// Registers an Android SMS gateway device for the authenticated user.
///
/// Creating a gateway consumes one `android_gateways` quota slot, claimed in
/// the same transaction as the insert.
///
/// # Output
/// - Success: 201 with the stored config
/// - Error: 403 when the plan's gateway limit is exhausted, e.g.
///   `"Android Gateway limit reached — your plan allows only 1 gateways"`
#[post("")]
pub async fn post_create_gateway(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateGatewayRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let user_id = claims.user_id;

    let mut tx = guard::consume_config_slot(pg_pool, user_id, Resource::AndroidGateway).await?;
    let req = req.into_inner();
    let gateway = db::gateway::insert_gateway(
        &mut *tx,
        GatewayCreateRequest {
            user_id,
            username: req.username,
            contact_number: req.contact_number,
            ip: req.ip,
            port: req.port,
            secure: req.secure,
        },
    )
    .await?;
    tx.commit().await?;

    Success::created(GatewayResponse {
        message: "SMS Gateway config saved successfully".to_string(),
        gateway,
    })
}

/// Lists the authenticated user's gateway configurations.
#[get("")]
pub async fn get_my_gateways(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let list = db::gateway::get_by_user(pg_pool, claims.user_id).await?;
    Success::ok(list)
}

/// Probes the gateway device's `/status` endpoint (10 second timeout) and
/// persists the observed connectivity.
///
/// # Output
/// - Success: the gateway row with `status` set to "connected" or
///   "disconnected"
/// - Error: 404 when the gateway does not belong to the user
#[post("/{id}/status")]
pub async fn post_probe_status(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let gateway = db::gateway::get_owned(pg_pool, path.into_inner(), claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("SMS Gateway config not found".to_string()))?;

    let online = SmsGatewayClient::new().check_status(&gateway).await;
    let status = if online {
        GATEWAY_CONNECTED
    } else {
        GATEWAY_DISCONNECTED
    };

    let gateway = db::gateway::update_status(pg_pool, gateway.id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("SMS Gateway config not found".to_string()))?;
    Success::ok(gateway)
}

/// Updates one of the user's gateway configurations. Missing fields keep
/// their current value.
#[put("/{id}")]
pub async fn put_update_gateway(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateGatewayRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    let gateway = db::gateway::update_owned(
        pg_pool,
        path.into_inner(),
        claims.user_id,
        GatewayUpdateRequest {
            username: req.username,
            contact_number: req.contact_number,
            ip: req.ip,
            port: req.port,
            secure: req.secure,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("SMS Gateway config not found".to_string()))?;

    Success::ok(GatewayResponse {
        message: "Updated successfully".to_string(),
        gateway,
    })
}

/// Deletes one of the user's gateway configurations. The consumed quota slot
/// is not restored.
#[delete("/{id}")]
pub async fn delete_gateway(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let deleted = db::gateway::delete_owned(pg_pool, path.into_inner(), claims.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("SMS Gateway config not found".to_string()));
    }
    Ok(Success::ok(serde_json::json!({ "message": "Deleted successfully" })))
}
