use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::gateway::{GatewayCreateRequest, GatewayUpdateRequest},
    models::gateway::SmsGateway,
};

pub async fn insert_gateway<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: GatewayCreateRequest,
) -> Res<SmsGateway> {
    sqlx::query_as::<_, SmsGateway>(
        r#"
        INSERT INTO sms_gateways (user_id, username, contact_number, ip, port, secure)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.username)
    .bind(data.contact_number)
    .bind(data.ip)
    .bind(data.port)
    .bind(data.secure)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<SmsGateway>> {
    sqlx::query_as::<_, SmsGateway>(
        "SELECT * FROM sms_gateways WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Res<Option<SmsGateway>> {
    sqlx::query_as::<_, SmsGateway>("SELECT * FROM sms_gateways WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
    data: GatewayUpdateRequest,
) -> Res<Option<SmsGateway>> {
    sqlx::query_as::<_, SmsGateway>(
        r#"
        UPDATE sms_gateways
        SET username = COALESCE($3, username),
            contact_number = COALESCE($4, contact_number),
            ip = COALESCE($5, ip),
            port = COALESCE($6, port),
            secure = COALESCE($7, secure),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(data.username)
    .bind(data.contact_number)
    .bind(data.ip)
    .bind(data.port)
    .bind(data.secure)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    status: &str,
) -> Res<Option<SmsGateway>> {
    sqlx::query_as::<_, SmsGateway>(
        "UPDATE sms_gateways SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM sms_gateways WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
