use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::log::Log;

pub async fn insert_log<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    log: Log,
) -> Res<()> {
    sqlx::query(
        "INSERT INTO logs (timestamp, method, path, status_code, user_id, params, request_body, ip_address, user_agent)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(log.timestamp)
    .bind(&log.method)
    .bind(&log.path)
    .bind(log.status_code)
    .bind(log.user_id)
    .bind(log.params)
    .bind(log.request_body)
    .bind(log.ip_address)
    .bind(&log.user_agent)
    .execute(executor)
    .await
    .map_err(AppError::from)?;

    Ok(())
}
