use chrono::{Months, Utc};
use common::error::Res;
use db::{
    dtos::subscription::SubscriptionActivation,
    models::{
        plan::Plan,
        subscription::{PlanLimits, Subscription},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

/// Activates (or renews) the user's subscription for the given plan.
///
/// The subscription row is fully overwritten: fresh limits snapshot, zeroed
/// usage counters and a new one-month period. Unused quota never carries
/// over, and there is no proration when switching plans mid-cycle.
pub async fn activate_subscription(pool: &PgPool, user_id: Uuid, plan: &Plan) -> Res<Subscription> {
    let now = Utc::now().naive_utc();
    let end = now
        .checked_add_months(Months::new(1))
        .unwrap_or(now + chrono::Duration::days(30));

    db::subscription::upsert_active(
        pool,
        SubscriptionActivation {
            user_id,
            plan_id: plan.id,
            plan_limits: PlanLimits::snapshot(plan),
            start_date: now,
            end_date: end,
        },
    )
    .await
}

pub async fn get_subscription(pool: &PgPool, user_id: Uuid) -> Res<Option<Subscription>> {
    db::subscription::get_by_user(pool, user_id).await
}
