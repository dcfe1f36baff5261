use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::subscription::SubscriptionActivation,
    models::subscription::{Subscription, SubscriptionStatus},
};

pub async fn get_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Fetches the user's active subscription row and takes a row lock on it.
/// Concurrent quota checks for the same user serialize on this lock, which is
/// what makes check-then-increment race free.
pub async fn lock_active_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        "SELECT * FROM subscriptions WHERE user_id = $1 AND subscription_status = $2 FOR UPDATE",
    )
    .bind(user_id)
    .bind(SubscriptionStatus::Active.as_str())
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Adds `delta` to one usage counter. `usage_column` is one of the four fixed
/// counter column names supplied by the quota guard, never user input.
pub async fn increment_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    usage_column: &str,
    delta: i32,
) -> Res<()> {
    let sql = format!(
        "UPDATE subscriptions SET {col} = {col} + $1, updated_at = NOW() WHERE user_id = $2",
        col = usage_column
    );
    sqlx::query(&sql)
        .bind(delta)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(())
}

/// Returns unused reserved quota after a delivery loop settles. Clamped at
/// zero so a stray release can never underflow the counter.
pub async fn release_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    usage_column: &str,
    delta: i32,
) -> Res<()> {
    let sql = format!(
        "UPDATE subscriptions SET {col} = GREATEST({col} - $1, 0), updated_at = NOW() WHERE user_id = $2",
        col = usage_column
    );
    sqlx::query(&sql)
        .bind(delta)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(())
}

/// Creates or fully overwrites the user's subscription on purchase/renewal:
/// fresh limits snapshot, zeroed usage, new period. No proration, no
/// carry-over of unused quota.
pub async fn upsert_active<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SubscriptionActivation,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions
            (user_id, plan_id, subscription_status,
             emails_per_month, sms_per_month, smtp_configs, android_gateways,
             emails_sent, sms_sent, smtp_configs_used, android_gateways_used,
             last_reset_date, start_date, end_date, auto_renew)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 0, 0, 0, $8, $8, $9, TRUE)
        ON CONFLICT (user_id) DO UPDATE SET
            plan_id = EXCLUDED.plan_id,
            subscription_status = EXCLUDED.subscription_status,
            emails_per_month = EXCLUDED.emails_per_month,
            sms_per_month = EXCLUDED.sms_per_month,
            smtp_configs = EXCLUDED.smtp_configs,
            android_gateways = EXCLUDED.android_gateways,
            emails_sent = 0,
            sms_sent = 0,
            smtp_configs_used = 0,
            android_gateways_used = 0,
            last_reset_date = EXCLUDED.last_reset_date,
            start_date = EXCLUDED.start_date,
            end_date = EXCLUDED.end_date,
            auto_renew = TRUE,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.plan_id)
    .bind(SubscriptionStatus::Active.as_str())
    .bind(data.plan_limits.emails_per_month)
    .bind(data.plan_limits.sms_per_month)
    .bind(data.plan_limits.smtp_configs)
    .bind(data.plan_limits.android_gateways)
    .bind(data.start_date)
    .bind(data.end_date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
