//! Role management endpoints

use crate::api::types::{Role, RoleRequest};
use crate::client::{ApiClient, RequestSpec};
use crate::error::Result;

/// `GET /roles` — list role definitions.
pub async fn list(client: &ApiClient) -> Result<Vec<Role>> {
    client.send(RequestSpec::get("/roles")).await
}

/// `POST /roles` — create a role.
pub async fn create(client: &ApiClient, req: &RoleRequest) -> Result<Role> {
    client
        .send(RequestSpec::post("/roles").with_body(serde_json::to_value(req)?))
        .await
}

/// `PUT /roles/{id}` — update a role.
pub async fn update(client: &ApiClient, id: i64, req: &RoleRequest) -> Result<Role> {
    client
        .send(RequestSpec::put(&format!("/roles/{}", id)).with_body(serde_json::to_value(req)?))
        .await
}

/// `DELETE /roles/{id}` — delete a role.
pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client
        .send(RequestSpec::delete(&format!("/roles/{}", id)))
        .await
}
