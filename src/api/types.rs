//! Wire types shared by the API wrappers
//!
//! These map one-to-one onto the JSON bodies of the dashboard backend.
//! Optional fields default so that older backend builds that omit them still
//! deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated identity record returned by login and `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Server-assigned user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Role name; `"admin"` grants access to the admin section.
    pub role: String,
    /// Fine-grained permission strings, e.g. `invite-code:manage`.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account status, e.g. `active` / `inactive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: bearer token plus identity.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Required by deployments with invite-only registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

/// Payload for `PUT /users/profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for `PUT /users/password`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Admin-side mutation for `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A role definition from `/roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating or updating a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleRequest {
    pub name: String,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One invite code record from `/invite-codes`.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteCode {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub used_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /invite-codes/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateInviteRequest {
    /// Number of codes to mint in one call.
    pub count: u32,
}

/// Response of `GET /system/status`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SystemStatus {
    /// Whether first-run initialization has completed.
    pub initialized: bool,
}

/// Response of `GET /system/health-check`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Database connection settings for first-run setup.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Initial administrator account for first-run setup.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for `POST /system/initialize`.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeRequest {
    pub database: DatabaseConfig,
    pub admin: CreateAdminRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_deserializes_with_missing_optionals() {
        let json = r#"{"id": 7, "username": "ada", "role": "admin"}"#;
        let user: UserInfo = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.id, 7);
        assert_eq!(user.role, "admin");
        assert!(user.permissions.is_empty());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_login_response_shape() {
        let json = r#"{
            "token": "tok-123",
            "user": {"id": 1, "username": "ada", "role": "member", "permissions": ["trade:view"]}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(resp.token, "tok-123");
        assert_eq!(resp.user.permissions, vec!["trade:view".to_string()]);
    }

    #[test]
    fn test_register_request_omits_absent_invite_code() {
        let req = RegisterRequest {
            username: "ada".to_string(),
            password: "pw".to_string(),
            email: None,
            invite_code: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert!(json.get("invite_code").is_none());
    }

    #[test]
    fn test_system_status_deserializes() {
        let status: SystemStatus =
            serde_json::from_str(r#"{"initialized": true}"#).expect("deserialize");
        assert!(status.initialized);
    }
}
