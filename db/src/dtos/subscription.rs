use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::subscription::PlanLimits;

/// Full snapshot written on purchase or renewal. Usage counters are always
/// zeroed by the upsert, never carried over.
#[derive(Debug)]
pub struct SubscriptionActivation {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub plan_limits: PlanLimits,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}
