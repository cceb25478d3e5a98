//! Authentication endpoints

use crate::api::types::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::client::{ApiClient, RequestSpec};
use crate::error::Result;

/// `POST /auth/login` — authenticate, returning the token and identity.
pub async fn login(client: &ApiClient, req: &LoginRequest) -> Result<LoginResponse> {
    client
        .send(RequestSpec::post("/auth/login").with_body(serde_json::to_value(req)?))
        .await
}

/// `POST /auth/logout` — invalidate the server-side session.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.send(RequestSpec::post("/auth/logout")).await
}

/// `POST /auth/register` — create an account.
pub async fn register(client: &ApiClient, req: &RegisterRequest) -> Result<UserInfo> {
    client
        .send(RequestSpec::post("/auth/register").with_body(serde_json::to_value(req)?))
        .await
}

/// `GET /users/me` — fetch the current identity.
pub async fn me(client: &ApiClient) -> Result<UserInfo> {
    client.send(RequestSpec::get("/users/me")).await
}

/// `GET /user/info` — legacy identity endpoint kept for older backends.
pub async fn user_info(client: &ApiClient) -> Result<UserInfo> {
    client.send(RequestSpec::get("/user/info")).await
}
