use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::payment::PaymentCreateRequest, models::payment::Payment};

pub async fn insert_payment<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PaymentCreateRequest,
) -> Res<Payment> {
    sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (user_id, plan_id, order_id, amount, currency, status, payment_method)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.plan_id)
    .bind(data.order_id)
    .bind(data.amount)
    .bind(data.currency)
    .bind(data.status)
    .bind(data.payment_method)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn mark_paid<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Res<Option<Payment>> {
    sqlx::query_as::<_, Payment>(
        r#"
        UPDATE payments
        SET payment_id = $2, signature = $3, status = 'paid',
            payment_date = NOW(), updated_at = NOW()
        WHERE order_id = $1
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(payment_id)
    .bind(signature)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_payments_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Payment>> {
    sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
