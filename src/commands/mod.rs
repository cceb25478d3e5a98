/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `auth`    — login, logout, registration, identity display
- `profile` — self-service profile and password changes
- `system`  — first-run setup, status, and health probes
- `admin`   — user, role, and invite-code administration
- `logs`    — dump of the in-memory log buffer

The handlers are intentionally small: they navigate through the guarded
router where a page transition exists in the dashboard, call the thin API
wrappers, and render results with the display formatters.
*/

pub mod admin;
pub mod auth;
pub mod logs;
pub mod profile;
pub mod system;

use crate::app::App;
use crate::error::Result;
use crate::router::guard::RouteDecision;

/// Navigates to `path` through the guard, returning `Ok(true)` when the
/// navigation was allowed. Redirects have already surfaced their own
/// notification (admin denial, initialization warning, login redirect), so
/// callers only need to stop.
pub(crate) async fn enter(app: &App, path: &str) -> Result<bool> {
    match app.router.navigate(path).await? {
        RouteDecision::Allow => Ok(true),
        RouteDecision::Redirect(target) => {
            tracing::debug!("navigation to {} redirected to {}", path, target);
            Ok(false)
        }
        RouteDecision::Superseded => Ok(false),
    }
}
