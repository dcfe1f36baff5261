use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::campaign::{CampaignCreateRecord, CampaignOutcome},
    models::campaign::Campaign,
};

/// Inserts the campaign in `processing` state before any delivery is
/// attempted. The full recipient list (including anything later blocked) is
/// stored on the row.
pub async fn insert_campaign<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CampaignCreateRecord,
) -> Res<Campaign> {
    sqlx::query_as::<_, Campaign>(
        r#"
        INSERT INTO campaigns (user_id, name, subject, smtp_id, recipients, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'processing')
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.name)
    .bind(data.subject)
    .bind(data.smtp_id)
    .bind(data.recipients)
    .bind(data.message)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn finalize_campaign<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    outcome: CampaignOutcome,
) -> Res<Campaign> {
    let results = serde_json::to_value(&outcome.results)
        .map_err(|e| AppError::Internal(format!("Failed to serialize send results: {}", e)))?;

    sqlx::query_as::<_, Campaign>(
        r#"
        UPDATE campaigns
        SET sent_count = $2, failed_count = $3, status = $4, results = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(outcome.sent_count)
    .bind(outcome.failed_count)
    .bind(outcome.status)
    .bind(results)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Campaign>> {
    sqlx::query_as::<_, Campaign>(
        "SELECT * FROM campaigns WHERE user_id = $1 ORDER BY created_at DESC",
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
) -> Res<Option<Campaign>> {
    sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
