//! First-run initialization and health endpoints

use crate::api::types::{
    CreateAdminRequest, DatabaseConfig, HealthReport, InitializeRequest, SystemStatus,
};
use crate::client::{ApiClient, RequestSpec};
use crate::error::Result;

/// `GET /system/status` — whether first-run initialization has completed.
///
/// Silent: the navigation guard probes this on its own and applies its own
/// fail-closed handling, so no user notification is raised here.
pub async fn check_status(client: &ApiClient) -> Result<SystemStatus> {
    client
        .send(RequestSpec::get("/system/status").silent())
        .await
}

/// `POST /system/initialize` — run full first-time setup.
pub async fn initialize(client: &ApiClient, req: &InitializeRequest) -> Result<()> {
    client
        .send(RequestSpec::post("/system/initialize").with_body(serde_json::to_value(req)?))
        .await
}

/// `POST /system/configure-database` — store database settings.
pub async fn configure_database(client: &ApiClient, req: &DatabaseConfig) -> Result<()> {
    client
        .send(RequestSpec::post("/system/configure-database").with_body(serde_json::to_value(req)?))
        .await
}

/// `POST /system/test-database` — verify database connectivity.
pub async fn test_database(client: &ApiClient, req: &DatabaseConfig) -> Result<()> {
    client
        .send(RequestSpec::post("/system/test-database").with_body(serde_json::to_value(req)?))
        .await
}

/// `POST /system/create-admin` — create the initial administrator.
pub async fn create_admin(client: &ApiClient, req: &CreateAdminRequest) -> Result<()> {
    client
        .send(RequestSpec::post("/system/create-admin").with_body(serde_json::to_value(req)?))
        .await
}

/// `GET /system/health-check` — liveness and component health.
pub async fn health_check(client: &ApiClient) -> Result<HealthReport> {
    client.send(RequestSpec::get("/system/health-check")).await
}
