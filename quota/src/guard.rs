//! Check-and-increment gating for quota-consuming actions.
//!
//! Every metered action goes through one of two paths:
//! - configs (SMTP, Android gateway) claim exactly one slot inside the same
//!   transaction that inserts the config row;
//! - bulk sends reserve up to the remaining allowance before delivery and
//!   settle afterwards, so the counter nets out to the number of successful
//!   sends and failures are never charged.
//!
//! Both paths lock the subscription row while deciding, so two concurrent
//! requests from the same user cannot both pass the check and overrun the
//! limit.

use std::cmp::min;

use common::error::{AppError, Res};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use db::models::subscription::{PlanLimits, PlanUsage};

/// Sentinel limit value meaning "no ceiling".
pub const UNLIMITED: i32 = -1;

pub const NO_ACTIVE_SUBSCRIPTION: &str = "No active subscription";

/// The metered resources a plan puts a ceiling on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    SmtpConfig,
    AndroidGateway,
    Email,
    Sms,
}

impl Resource {
    pub fn limit(&self, limits: &PlanLimits) -> i32 {
        match self {
            Resource::SmtpConfig => limits.smtp_configs,
            Resource::AndroidGateway => limits.android_gateways,
            Resource::Email => limits.emails_per_month,
            Resource::Sms => limits.sms_per_month,
        }
    }

    pub fn used(&self, usage: &PlanUsage) -> i32 {
        match self {
            Resource::SmtpConfig => usage.smtp_configs_used,
            Resource::AndroidGateway => usage.android_gateways_used,
            Resource::Email => usage.emails_sent,
            Resource::Sms => usage.sms_sent,
        }
    }

    /// Counter column on the subscriptions row backing this resource.
    pub fn usage_column(&self) -> &'static str {
        match self {
            Resource::SmtpConfig => "smtp_configs_used",
            Resource::AndroidGateway => "android_gateways_used",
            Resource::Email => "emails_sent",
            Resource::Sms => "sms_sent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Resource::SmtpConfig => "SMTP Config",
            Resource::AndroidGateway => "Android Gateway",
            Resource::Email => "Email",
            Resource::Sms => "SMS",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Resource::SmtpConfig => "configs",
            Resource::AndroidGateway => "gateways",
            Resource::Email => "emails",
            Resource::Sms => "messages",
        }
    }
}

/// Remaining allowance for a resource; `None` means unlimited.
pub fn remaining(limit: i32, used: i32) -> Option<usize> {
    if limit == UNLIMITED {
        None
    } else {
        Some((limit - used).max(0) as usize)
    }
}

/// Splits a recipient list into the prefix that fits the granted quota and
/// the blocked tail. Duplicates are kept as-is; two occurrences cost two
/// sends.
pub fn partition(recipients: Vec<String>, granted: usize) -> (Vec<String>, Vec<String>) {
    let cut = min(granted, recipients.len());
    let mut to_send = recipients;
    let blocked = to_send.split_off(cut);
    (to_send, blocked)
}

pub(crate) fn config_limit_message(resource: Resource, limit: i32) -> String {
    format!(
        "{} limit reached — your plan allows only {} {}",
        resource.label(),
        limit,
        resource.unit()
    )
}

pub(crate) fn exhausted_message(resource: Resource) -> String {
    format!(
        "{} limit reached — cannot send any more {} this month",
        resource.label(),
        resource.unit()
    )
}

/// Outcome of a successful bulk reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub requested: usize,
    pub granted: usize,
}

impl Reservation {
    pub fn blocked(&self) -> usize {
        self.requested - self.granted
    }
}

/// Claims a single config slot for the user, or denies with 403 naming the
/// limit. Returns the still-open transaction so the caller can insert the
/// config row and commit the increment and the insert together.
pub async fn consume_config_slot(
    pool: &PgPool,
    user_id: Uuid,
    resource: Resource,
) -> Res<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;

    let subscription = db::subscription::lock_active_by_user(&mut *tx, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden(NO_ACTIVE_SUBSCRIPTION.to_string()))?;

    let limit = resource.limit(&subscription.plan_limits);
    let used = resource.used(&subscription.plan_usage);
    if remaining(limit, used) == Some(0) {
        return Err(AppError::Forbidden(config_limit_message(resource, limit)));
    }

    db::subscription::increment_usage(&mut *tx, user_id, resource.usage_column(), 1).await?;
    Ok(tx)
}

/// Reserves up to `requested` sends against the user's remaining allowance.
/// Commits immediately so the row lock is not held across the delivery loop.
/// Denies with 403 when there is no active subscription or nothing left to
/// grant.
pub async fn reserve(
    pool: &PgPool,
    user_id: Uuid,
    resource: Resource,
    requested: usize,
) -> Res<Reservation> {
    let mut tx = pool.begin().await?;

    let subscription = db::subscription::lock_active_by_user(&mut *tx, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden(NO_ACTIVE_SUBSCRIPTION.to_string()))?;

    let limit = resource.limit(&subscription.plan_limits);
    let used = resource.used(&subscription.plan_usage);
    let granted = match remaining(limit, used) {
        None => requested,
        Some(left) => min(requested, left),
    };

    if granted == 0 {
        return Err(AppError::Forbidden(exhausted_message(resource)));
    }

    db::subscription::increment_usage(&mut *tx, user_id, resource.usage_column(), granted as i32)
        .await?;
    tx.commit().await?;

    log::debug!(
        "Reserved {}/{} {} for user {}",
        granted,
        requested,
        resource.usage_column(),
        user_id
    );
    Ok(Reservation { requested, granted })
}

/// Returns the unsent part of a reservation so the counter nets out to
/// exactly the number of successful sends.
pub async fn settle(
    pool: &PgPool,
    user_id: Uuid,
    resource: Resource,
    reservation: Reservation,
    sent: usize,
) -> Res<()> {
    let unused = reservation.granted.saturating_sub(sent);
    if unused > 0 {
        db::subscription::release_usage(pool, user_id, resource.usage_column(), unused as i32)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipients(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("user{}@example.com", i)).collect()
    }

    #[test]
    fn remaining_handles_unlimited_and_overrun() {
        assert_eq!(remaining(UNLIMITED, 1_000_000), None);
        assert_eq!(remaining(500, 498), Some(2));
        assert_eq!(remaining(500, 500), Some(0));
        // defensive: a counter past its ceiling still reports zero left
        assert_eq!(remaining(500, 501), Some(0));
        assert_eq!(remaining(0, 0), Some(0));
    }

    #[test]
    fn partition_preserves_every_recipient() {
        for (total, granted) in [(5, 2), (5, 5), (5, 0), (5, 9), (0, 3)] {
            let (to_send, blocked) = partition(recipients(total), granted);
            assert_eq!(to_send.len() + blocked.len(), total);
            assert_eq!(to_send.len(), granted.min(total));
        }
    }

    #[test]
    fn partition_keeps_input_order_and_duplicates() {
        let list = vec![
            "a@x.com".to_string(),
            "b@x.com".to_string(),
            "a@x.com".to_string(),
        ];
        let (to_send, blocked) = partition(list, 2);
        assert_eq!(to_send, vec!["a@x.com", "b@x.com"]);
        assert_eq!(blocked, vec!["a@x.com"]);
    }

    #[test]
    fn near_exhausted_quota_grants_the_tail() {
        // plan allows 500, 498 already sent, 5 requested
        let left = remaining(500, 498).unwrap();
        let (to_send, blocked) = partition(recipients(5), left);
        assert_eq!(to_send.len(), 2);
        assert_eq!(blocked.len(), 3);
    }

    #[test]
    fn denial_messages_name_the_limit() {
        assert_eq!(
            config_limit_message(Resource::SmtpConfig, 1),
            "SMTP Config limit reached — your plan allows only 1 configs"
        );
        assert_eq!(
            config_limit_message(Resource::AndroidGateway, 3),
            "Android Gateway limit reached — your plan allows only 3 gateways"
        );
        assert_eq!(
            exhausted_message(Resource::Sms),
            "SMS limit reached — cannot send any more messages this month"
        );
        assert_eq!(
            exhausted_message(Resource::Email),
            "Email limit reached — cannot send any more emails this month"
        );
    }

    #[test]
    fn reservation_reports_blocked_count() {
        let reservation = Reservation {
            requested: 5,
            granted: 2,
        };
        assert_eq!(reservation.blocked(), 3);
    }
}
