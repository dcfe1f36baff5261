use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::http::Success;
use sqlx::PgPool;

/// Retrieves all active subscription plans from the catalog.
///
/// # Input
/// - `pool`: Database connection pool
///
/// # Output
/// - Success: Returns a JSON array of active plans ordered by price
/// - Error: Returns 500 Internal Server Error if plans cannot be retrieved
///
/// # Frontend Example
/// ```javascript
/// // Using fetch API with authorization
/// const response = await fetch('/api/payment/plans', {
///   headers: {
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   }
/// });
///
/// if (response.ok) {
///   const plans = await response.json();
///   console.log('Available plans:', plans);
///   // Example response:
///   // [
///   //   {
///   //     id: "a1b2c3d4-...",
///   //     name: "Starter",
///   //     price: 0, // in the smallest currency unit
///   //     currency: "INR",
///   //     interval: "month",
///   //     emails_per_month: 500,
///   //     sms_per_month: 100,
///   //     smtp_configs: 1,
///   //     android_gateways: 1,
///   //     features: ["Up to 500 emails/month", ...]
///   //   },
///   //   // More plans... (-1 in a limit field means unlimited)
///   // ]
/// }
/// ```
#[get("/plans")]
pub async fn get_plans(pool: web::Data<Arc<PgPool>>) -> impl Responder {
    let pg_pool: &PgPool = &**pool;
    let plans = db::plan::get_active_plans(pg_pool).await?;
    Success::ok(plans)
}
