use common::error::Res;
use db::dtos::plan::PlanCreateRequest;
use sqlx::PgPool;

/// Seeds the default plan catalog when the table is empty. Prices are in the
/// smallest currency unit; -1 means unlimited.
pub async fn seed_plans(pool: &PgPool) -> Res<()> {
    if db::plan::count_plans(pool).await? > 0 {
        log::info!("Plans already exist. Skipping seed.");
        return Ok(());
    }

    let defaults = vec![
        PlanCreateRequest {
            name: "Starter".to_string(),
            price: 0,
            currency: "INR".to_string(),
            interval: "month".to_string(),
            description: "Perfect for testing and small-scale campaigns".to_string(),
            features: vec![
                "Up to 500 emails/month".to_string(),
                "Up to 100 SMS/month".to_string(),
                "1 SMTP configuration".to_string(),
                "1 Android gateway connection".to_string(),
                "Basic analytics".to_string(),
                "Community support".to_string(),
            ],
            emails_per_month: 500,
            sms_per_month: 100,
            smtp_configs: 1,
            android_gateways: 1,
        },
        PlanCreateRequest {
            name: "Professional".to_string(),
            price: 2900,
            currency: "INR".to_string(),
            interval: "month".to_string(),
            description: "Ideal for growing businesses and marketing teams".to_string(),
            features: vec![
                "Up to 10,000 emails/month".to_string(),
                "Up to 2,000 SMS/month".to_string(),
                "5 SMTP configurations".to_string(),
                "3 Android gateway connections".to_string(),
                "Advanced analytics".to_string(),
                "Priority email support".to_string(),
                "Custom templates".to_string(),
            ],
            emails_per_month: 10000,
            sms_per_month: 2000,
            smtp_configs: 5,
            android_gateways: 3,
        },
        PlanCreateRequest {
            name: "Enterprise".to_string(),
            price: 9900,
            currency: "INR".to_string(),
            interval: "month".to_string(),
            description: "For agencies and high-volume senders".to_string(),
            features: vec![
                "Unlimited emails".to_string(),
                "Unlimited SMS".to_string(),
                "Unlimited SMTP configurations".to_string(),
                "Unlimited gateway connections".to_string(),
                "Real-time analytics".to_string(),
                "24/7 phone support".to_string(),
                "Custom integrations".to_string(),
                "Dedicated account manager".to_string(),
            ],
            emails_per_month: -1,
            sms_per_month: -1,
            smtp_configs: -1,
            android_gateways: -1,
        },
    ];

    for plan in defaults {
        db::plan::insert_plan(pool, plan).await?;
    }

    log::info!("Default plans seeded");
    Ok(())
}
