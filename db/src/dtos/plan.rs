#[derive(Debug, Clone)]
pub struct PlanCreateRequest {
    pub name: String,
    pub price: i64,
    pub currency: String,
    pub interval: String,
    pub description: String,
    pub features: Vec<String>,
    pub emails_per_month: i32,
    pub sms_per_month: i32,
    pub smtp_configs: i32,
    pub android_gateways: i32,
}
