use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::{
        campaign::CampaignOutcome,
        sms_campaign::{SmsCampaignCreateRecord, SmsCampaignUpdateRequest},
    },
    models::sms_campaign::SmsCampaign,
};

pub async fn insert_campaign<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SmsCampaignCreateRecord,
) -> Res<SmsCampaign> {
    let total_contacts = data.numbers.len() as i32;
    sqlx::query_as::<_, SmsCampaign>(
        r#"
        INSERT INTO sms_campaigns (user_id, gateway_id, title, numbers, message, total_contacts, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'processing')
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.gateway_id)
    .bind(data.title)
    .bind(data.numbers)
    .bind(data.message)
    .bind(total_contacts)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn finalize_campaign<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    outcome: CampaignOutcome,
) -> Res<SmsCampaign> {
    let results = serde_json::to_value(&outcome.results)
        .map_err(|e| AppError::Internal(format!("Failed to serialize send results: {}", e)))?;

    sqlx::query_as::<_, SmsCampaign>(
        r#"
        UPDATE sms_campaigns
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
) -> Res<Vec<SmsCampaign>> {
    sqlx::query_as::<_, SmsCampaign>(
        "SELECT * FROM sms_campaigns WHERE user_id = $1 ORDER BY created_at DESC",
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
) -> Res<Option<SmsCampaign>> {
    sqlx::query_as::<_, SmsCampaign>("SELECT * FROM sms_campaigns WHERE id = $1 AND user_id = $2")
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
    data: SmsCampaignUpdateRequest,
) -> Res<Option<SmsCampaign>> {
    sqlx::query_as::<_, SmsCampaign>(
        r#"
        UPDATE sms_campaigns
        SET title = COALESCE($3, title),
            message = COALESCE($4, message),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(data.title)
    .bind(data.message)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM sms_campaigns WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
