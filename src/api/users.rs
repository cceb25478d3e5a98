//! User administration and self-service endpoints

use crate::api::types::{ChangePasswordRequest, ProfileUpdate, UpdateUserRequest, UserInfo};
use crate::client::{ApiClient, RequestSpec};
use crate::error::Result;

/// `GET /users` — list all users (admin).
pub async fn list(client: &ApiClient) -> Result<Vec<UserInfo>> {
    client.send(RequestSpec::get("/users")).await
}

/// `PUT /users/{id}` — mutate a user record (admin).
pub async fn update(client: &ApiClient, id: i64, req: &UpdateUserRequest) -> Result<UserInfo> {
    client
        .send(RequestSpec::put(&format!("/users/{}", id)).with_body(serde_json::to_value(req)?))
        .await
}

/// `POST /users/{id}/toggle-status` — flip a user between active and
/// disabled (admin).
pub async fn toggle_status(client: &ApiClient, id: i64) -> Result<UserInfo> {
    client
        .send(RequestSpec::post(&format!("/users/{}/toggle-status", id)))
        .await
}

/// `POST /users/{id}/reset-password` — issue a new password (admin).
/// Returns the raw server payload since its shape varies by deployment.
pub async fn reset_password(client: &ApiClient, id: i64) -> Result<serde_json::Value> {
    client
        .send(RequestSpec::post(&format!("/users/{}/reset-password", id)))
        .await
}

/// `PUT /users/profile` — update the caller's own profile.
pub async fn update_profile(client: &ApiClient, req: &ProfileUpdate) -> Result<UserInfo> {
    client
        .send(RequestSpec::put("/users/profile").with_body(serde_json::to_value(req)?))
        .await
}

/// `PUT /users/password` — change the caller's own password.
pub async fn change_password(client: &ApiClient, req: &ChangePasswordRequest) -> Result<()> {
    client
        .send(RequestSpec::put("/users/password").with_body(serde_json::to_value(req)?))
        .await
}
