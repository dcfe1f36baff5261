use uuid::Uuid;

#[derive(Debug)]
pub struct PaymentCreateRequest {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub order_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment_method: String,
}
