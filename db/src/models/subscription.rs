use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::Plan;

/// Lifecycle states of a subscription. `Active` is the only state in which
/// quota can be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Expired,
    PastDue,
    Inactive,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

/// Quota ceilings copied from the plan at purchase time. Editing the catalog
/// later must not change what an existing subscriber already paid for, so
/// these are a value snapshot rather than a live plan reference.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct PlanLimits {
    pub emails_per_month: i32,
    pub sms_per_month: i32,
    pub smtp_configs: i32,
    pub android_gateways: i32,
}

impl PlanLimits {
    pub fn snapshot(plan: &Plan) -> Self {
        PlanLimits {
            emails_per_month: plan.emails_per_month,
            sms_per_month: plan.sms_per_month,
            smtp_configs: plan.smtp_configs,
            android_gateways: plan.android_gateways,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PlanUsage {
    pub emails_sent: i32,
    pub sms_sent: i32,
    pub smtp_configs_used: i32,
    pub android_gateways_used: i32,
    pub last_reset_date: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub subscription_status: String,
    #[sqlx(flatten)]
    pub plan_limits: PlanLimits,
    #[sqlx(flatten)]
    pub plan_usage: PlanUsage,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub auto_renew: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscription {
    /// The canonical active-subscription predicate. Every quota decision goes
    /// through this, never through ad-hoc status string comparisons.
    pub fn is_active(&self) -> bool {
        self.subscription_status == SubscriptionStatus::Active.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn subscription_with_status(status: SubscriptionStatus) -> Subscription {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            subscription_status: status.as_str().to_string(),
            plan_limits: PlanLimits {
                emails_per_month: 500,
                sms_per_month: 100,
                smtp_configs: 1,
                android_gateways: 1,
            },
            plan_usage: PlanUsage {
                emails_sent: 0,
                sms_sent: 0,
                smtp_configs_used: 0,
                android_gateways_used: 0,
                last_reset_date: ts,
            },
            start_date: ts,
            end_date: ts,
            auto_renew: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn only_active_status_is_active() {
        assert!(subscription_with_status(SubscriptionStatus::Active).is_active());

        for status in [
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Expired,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Inactive,
        ] {
            assert!(!subscription_with_status(status).is_active());
        }
    }

    #[test]
    fn snapshot_copies_every_ceiling() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let plan = Plan {
            id: Uuid::new_v4(),
            name: "Professional".to_string(),
            price: 2900,
            currency: "INR".to_string(),
            interval: "month".to_string(),
            description: None,
            features: vec![],
            emails_per_month: 10000,
            sms_per_month: 2000,
            smtp_configs: 5,
            android_gateways: 3,
            is_active: true,
            created_at: ts,
            updated_at: ts,
        };

        let limits = PlanLimits::snapshot(&plan);
        assert_eq!(
            limits,
            PlanLimits {
                emails_per_month: 10000,
                sms_per_month: 2000,
                smtp_configs: 5,
                android_gateways: 3,
            }
        );
    }
}
