//! Thin wrappers over the dashboard's REST endpoints
//!
//! Each function builds a [`crate::client::RequestSpec`] and delegates to
//! the shared [`crate::client::ApiClient`]; no business logic lives here.
//! Grouped by backend resource:
//!
//! - `auth`: login, logout, registration, current identity
//! - `users`: user administration and self-service profile mutation
//! - `roles`: role CRUD
//! - `invite_codes`: invite-code management
//! - `system`: first-run initialization and health probes

pub mod auth;
pub mod invite_codes;
pub mod roles;
pub mod system;
pub mod types;
pub mod users;
