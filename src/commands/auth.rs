//! Authentication command handlers

use prettytable::{row, Table};

use crate::api;
use crate::api::types::{LoginRequest, RegisterRequest};
use crate::app::App;
use crate::error::Result;
use crate::format::format_date;
use crate::router::LOGIN_PATH;

/// Signs in and stores the session durably.
///
/// The login page is entered through the guard first, so an existing
/// session short-circuits with a redirect home instead of re-authenticating.
pub async fn run_login(app: &App, username: String, password: String) -> Result<()> {
    if !super::enter(app, LOGIN_PATH).await? {
        app.notifier
            .warning("Already signed in; run `tradectl logout` first");
        return Ok(());
    }

    let resp = api::auth::login(
        &app.client,
        &LoginRequest { username, password },
    )
    .await?;

    app.session.set_token(&resp.token)?;
    app.session.set_user(resp.user.clone())?;
    app.notifier
        .success(&format!("Signed in as {} ({})", resp.user.username, resp.user.role));
    Ok(())
}

/// Signs out: best-effort server-side invalidation, then unconditional
/// local clear.
pub async fn run_logout(app: &App) -> Result<()> {
    if app.session.token().is_none() {
        app.notifier.info("Not signed in");
        return Ok(());
    }

    if let Err(e) = api::auth::logout(&app.client).await {
        // The local session is cleared regardless; the server-side session
        // will age out on its own.
        app.logger
            .warn(&format!("server-side logout failed: {}", e), None);
    }
    app.session.clear()?;
    app.notifier.success("Signed out");
    Ok(())
}

/// Shows the current identity, re-fetching it from the backend.
pub async fn run_whoami(app: &App, json: bool) -> Result<()> {
    if app.session.token().is_none() {
        app.notifier.info("Not signed in");
        return Ok(());
    }

    let user = api::auth::me(&app.client).await?;
    app.session.set_user(user.clone())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["id", user.id]);
    table.add_row(row!["username", user.username]);
    table.add_row(row!["role", user.role]);
    table.add_row(row!["permissions", user.permissions.join(", ")]);
    table.add_row(row!["email", user.email.as_deref().unwrap_or("-")]);
    table.add_row(row!["created", format_date(user.created_at, true)]);
    table.printstd();
    Ok(())
}

/// Creates an account.
pub async fn run_register(
    app: &App,
    username: String,
    password: String,
    email: Option<String>,
    invite_code: Option<String>,
) -> Result<()> {
    if !super::enter(app, "/register").await? {
        return Ok(());
    }

    let user = api::auth::register(
        &app.client,
        &RegisterRequest {
            username,
            password,
            email,
            invite_code,
        },
    )
    .await?;

    app.notifier
        .success(&format!("Account {} created; sign in to continue", user.username));
    Ok(())
}
