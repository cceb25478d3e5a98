//! Admin-section command handlers: users, roles, invite codes
//!
//! Every handler first navigates to the matching admin page through the
//! guarded router; a non-admin session is denied there (with an error
//! notice) before any API call is made.

use prettytable::{row, Table};

use crate::api;
use crate::api::types::{GenerateInviteRequest, RoleRequest, UpdateUserRequest};
use crate::app::App;
use crate::error::Result;
use crate::format::{format_date, format_status};

/// Lists all users.
pub async fn run_users_list(app: &App, json: bool) -> Result<()> {
    if !super::enter(app, "/admin/users").await? {
        return Ok(());
    }

    let users = api::users::list(&app.client).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let overrides = std::collections::HashMap::new();
    let mut table = Table::new();
    table.add_row(row!["ID", "USERNAME", "ROLE", "STATUS", "CREATED"]);
    for user in &users {
        let status = format_status(user.status.as_deref().unwrap_or("-"), &overrides);
        table.add_row(row![
            user.id,
            user.username,
            user.role,
            status.text,
            format_date(user.created_at, false),
        ]);
    }
    table.printstd();
    Ok(())
}

/// Updates a user's role, status, or email.
pub async fn run_user_update(
    app: &App,
    id: i64,
    role: Option<String>,
    status: Option<String>,
    email: Option<String>,
) -> Result<()> {
    if !super::enter(app, "/admin/users").await? {
        return Ok(());
    }

    if role.is_none() && status.is_none() && email.is_none() {
        app.notifier.info("Nothing to update");
        return Ok(());
    }

    let user = api::users::update(&app.client, id, &UpdateUserRequest { role, status, email })
        .await?;
    app.notifier
        .success(&format!("User {} updated", user.username));
    Ok(())
}

/// Toggles a user between active and disabled.
pub async fn run_user_toggle_status(app: &App, id: i64) -> Result<()> {
    if !super::enter(app, "/admin/users").await? {
        return Ok(());
    }

    let user = api::users::toggle_status(&app.client, id).await?;
    app.notifier.success(&format!(
        "User {} is now {}",
        user.username,
        user.status.as_deref().unwrap_or("updated")
    ));
    Ok(())
}

/// Resets a user's password.
pub async fn run_user_reset_password(app: &App, id: i64) -> Result<()> {
    if !super::enter(app, "/admin/users").await? {
        return Ok(());
    }

    let payload = api::users::reset_password(&app.client, id).await?;
    match payload.get("password").and_then(|p| p.as_str()) {
        Some(password) => println!("New password: {}", password),
        None => app.notifier.success("Password reset"),
    }
    Ok(())
}

/// Lists role definitions.
pub async fn run_roles_list(app: &App, json: bool) -> Result<()> {
    if !super::enter(app, "/admin/permissions").await? {
        return Ok(());
    }

    let roles = api::roles::list(&app.client).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&roles)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "NAME", "PERMISSIONS", "DESCRIPTION"]);
    for role in &roles {
        table.add_row(row![
            role.id,
            role.name,
            role.permissions.join(", "),
            role.description.as_deref().unwrap_or("-"),
        ]);
    }
    table.printstd();
    Ok(())
}

/// Creates a role.
pub async fn run_role_create(
    app: &App,
    name: String,
    permissions: Vec<String>,
    description: Option<String>,
) -> Result<()> {
    if !super::enter(app, "/admin/permissions").await? {
        return Ok(());
    }

    let role = api::roles::create(
        &app.client,
        &RoleRequest {
            name,
            permissions,
            description,
        },
    )
    .await?;
    app.notifier
        .success(&format!("Role {} created (id {})", role.name, role.id));
    Ok(())
}

/// Deletes a role.
pub async fn run_role_delete(app: &App, id: i64) -> Result<()> {
    if !super::enter(app, "/admin/permissions").await? {
        return Ok(());
    }

    api::roles::delete(&app.client, id).await?;
    app.notifier.success(&format!("Role {} deleted", id));
    Ok(())
}

/// Lists invite codes.
pub async fn run_invite_codes_list(app: &App, json: bool) -> Result<()> {
    if !super::enter(app, "/admin/invite-codes").await? {
        return Ok(());
    }

    let codes = api::invite_codes::list(&app.client).await?;
    if json {
        let raw: Vec<serde_json::Value> = codes
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "code": c.code,
                    "used": c.used,
                    "used_by": c.used_by,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "CODE", "USED", "USED BY", "CREATED"]);
    for code in &codes {
        table.add_row(row![
            code.id,
            code.code,
            if code.used { "yes" } else { "no" },
            code.used_by.as_deref().unwrap_or("-"),
            format_date(code.created_at, false),
        ]);
    }
    table.printstd();
    Ok(())
}

/// Generates new invite codes.
pub async fn run_invite_codes_generate(app: &App, count: u32) -> Result<()> {
    if !super::enter(app, "/admin/invite-codes").await? {
        return Ok(());
    }

    let codes =
        api::invite_codes::generate(&app.client, &GenerateInviteRequest { count }).await?;
    for code in &codes {
        println!("{}", code.code);
    }
    app.notifier
        .success(&format!("Generated {} invite code(s)", codes.len()));
    Ok(())
}

/// Revokes an invite code.
pub async fn run_invite_code_delete(app: &App, id: i64) -> Result<()> {
    if !super::enter(app, "/admin/invite-codes").await? {
        return Ok(());
    }

    api::invite_codes::delete(&app.client, id).await?;
    app.notifier.success(&format!("Invite code {} deleted", id));
    Ok(())
}
