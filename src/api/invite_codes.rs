//! Invite-code management endpoints

use crate::api::types::{GenerateInviteRequest, InviteCode};
use crate::client::{ApiClient, RequestSpec};
use crate::error::Result;

/// `GET /invite-codes` — list all invite codes.
pub async fn list(client: &ApiClient) -> Result<Vec<InviteCode>> {
    client.send(RequestSpec::get("/invite-codes")).await
}

/// `POST /invite-codes/generate` — mint new invite codes.
pub async fn generate(client: &ApiClient, req: &GenerateInviteRequest) -> Result<Vec<InviteCode>> {
    client
        .send(RequestSpec::post("/invite-codes/generate").with_body(serde_json::to_value(req)?))
        .await
}

/// `DELETE /invite-codes/{id}` — revoke an invite code.
pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client
        .send(RequestSpec::delete(&format!("/invite-codes/{}", id)))
        .await
}
