use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::plan::PlanCreateRequest, models::plan::Plan};

pub async fn count_plans<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plans")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_active_plans<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE is_active = TRUE ORDER BY price")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_plan_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    plan_id: Uuid,
) -> Res<Option<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(plan_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PlanCreateRequest,
) -> Res<Plan> {
    sqlx::query_as::<_, Plan>(
        r#"
        INSERT INTO plans
            (name, price, currency, "interval", description, features,
             emails_per_month, sms_per_month, smtp_configs, android_gateways)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.price)
    .bind(data.currency)
    .bind(data.interval)
    .bind(data.description)
    .bind(data.features)
    .bind(data.emails_per_month)
    .bind(data.sms_per_month)
    .bind(data.smtp_configs)
    .bind(data.android_gateways)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
