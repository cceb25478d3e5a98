//! Self-service profile command handlers

use crate::api;
use crate::api::types::{ChangePasswordRequest, ProfileUpdate};
use crate::app::App;
use crate::error::Result;

/// Updates the caller's own profile fields.
pub async fn run_update(app: &App, email: Option<String>, phone: Option<String>) -> Result<()> {
    if !super::enter(app, "/profile/info").await? {
        return Ok(());
    }

    if email.is_none() && phone.is_none() {
        app.notifier.info("Nothing to update");
        return Ok(());
    }

    let user = api::users::update_profile(&app.client, &ProfileUpdate { email, phone }).await?;
    app.session.set_user(user)?;
    app.notifier.success("Profile updated");
    Ok(())
}

/// Changes the caller's own password.
pub async fn run_change_password(
    app: &App,
    old_password: String,
    new_password: String,
) -> Result<()> {
    if !super::enter(app, "/profile/password").await? {
        return Ok(());
    }

    api::users::change_password(
        &app.client,
        &ChangePasswordRequest {
            old_password,
            new_password,
        },
    )
    .await?;
    app.notifier.success("Password changed");
    Ok(())
}
