#[derive(Debug)]
pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub role: String,
}
