use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::smtp::{SmtpCreateRequest, SmtpUpdateRequest},
    models::smtp::SmtpConfig,
};

pub async fn insert_smtp<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SmtpCreateRequest,
) -> Res<SmtpConfig> {
    sqlx::query_as::<_, SmtpConfig>(
        r#"
        INSERT INTO smtp_configs (user_id, host, port, username, password, from_email, secure)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.host)
    .bind(data.port)
    .bind(data.username)
    .bind(data.password)
    .bind(data.from_email)
    .bind(data.secure)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<SmtpConfig>> {
    sqlx::query_as::<_, SmtpConfig>(
        "SELECT * FROM smtp_configs WHERE user_id = $1 ORDER BY created_at DESC",
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
) -> Res<Option<SmtpConfig>> {
    sqlx::query_as::<_, SmtpConfig>("SELECT * FROM smtp_configs WHERE id = $1 AND user_id = $2")
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
    data: SmtpUpdateRequest,
) -> Res<Option<SmtpConfig>> {
    sqlx::query_as::<_, SmtpConfig>(
        r#"
        UPDATE smtp_configs
        SET host = COALESCE($3, host),
            port = COALESCE($4, port),
            username = COALESCE($5, username),
            password = COALESCE($6, password),
            from_email = COALESCE($7, from_email),
            secure = COALESCE($8, secure),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(data.host)
    .bind(data.port)
    .bind(data.username)
    .bind(data.password)
    .bind(data.from_email)
    .bind(data.secure)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM smtp_configs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
