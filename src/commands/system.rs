//! System setup and health command handlers

use prettytable::{row, Table};

use crate::api;
use crate::api::types::{CreateAdminRequest, DatabaseConfig, InitializeRequest};
use crate::app::App;
use crate::error::Result;
use crate::router::INITIALIZE_PATH;

/// Prints the first-run initialization status.
pub async fn run_status(app: &App) -> Result<()> {
    let status = api::system::check_status(&app.client).await?;
    app.system.set_initialized(status.initialized);

    if status.initialized {
        println!("System is initialized");
    } else {
        println!("System is NOT initialized; run `tradectl system init`");
    }
    Ok(())
}

/// Prints the backend health report.
pub async fn run_health(app: &App) -> Result<()> {
    let report = api::system::health_check(&app.client).await?;

    let mut table = Table::new();
    table.add_row(row!["status", report.status]);
    table.add_row(row!["database", report.database.as_deref().unwrap_or("-")]);
    table.add_row(row!["version", report.version.as_deref().unwrap_or("-")]);
    table.printstd();
    Ok(())
}

/// Parameters for [`run_init`].
pub struct InitParams {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub admin_user: String,
    pub admin_password: String,
    pub test_only: bool,
}

/// Runs first-time initialization (or only a database connectivity test).
///
/// The initialization page is entered through the guard first: an already
/// initialized system warns and goes home, and a failed status probe lands
/// on the login page, in which case nothing is attempted here.
pub async fn run_init(app: &App, params: InitParams) -> Result<()> {
    if !super::enter(app, INITIALIZE_PATH).await? {
        return Ok(());
    }

    let database = DatabaseConfig {
        host: params.db_host,
        port: params.db_port,
        username: params.db_user,
        password: params.db_password,
        database: params.db_name,
    };

    if params.test_only {
        api::system::test_database(&app.client, &database).await?;
        app.notifier.success("Database connection OK");
        return Ok(());
    }

    api::system::initialize(
        &app.client,
        &InitializeRequest {
            database,
            admin: CreateAdminRequest {
                username: params.admin_user,
                password: params.admin_password,
                email: None,
            },
        },
    )
    .await?;

    app.system.set_initialized(true);
    app.notifier
        .success("System initialized; sign in with the administrator account");
    Ok(())
}
