use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub admin: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStatus {
    /// The `admin` claim carried by the caller's token.
    pub claim: bool,
    /// Whether the `admins` mirror record marks the caller as admin.
    pub mirror: bool,
    pub is_admin: bool,
}
