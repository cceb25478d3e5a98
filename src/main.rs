//! tradectl - Trading admin dashboard client
//!
#![doc = "tradectl - Trading admin dashboard client"]
#![doc = "Main entry point for the tradectl application."]

use std::path::PathBuf;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tradectl::cli::{
    Cli, Commands, InviteCodeCommand, ProfileCommand, RoleCommand, SystemCommand, UserCommand,
};
use tradectl::commands;
use tradectl::commands::system::InitParams;
use tradectl::config::{default_config_path, Config, ConfigOverrides};
use tradectl::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let overrides = ConfigOverrides {
        api_url: cli.api_url.clone(),
        verbose: cli.verbose,
    };
    let config = Config::load(&config_path, &overrides)?;

    // Validate configuration
    config.validate()?;

    // Restore the durable session and wire the client context
    let app = App::bootstrap(config)?;

    // Run the background session validity poll for the lifetime of the
    // command; long-running invocations get the same idle/external-logout
    // handling as the rest of the client.
    let cancel = CancellationToken::new();
    let monitor = tokio::spawn(app.monitor.clone().run(cancel.clone()));

    // Execute command
    let result = match cli.command {
        Commands::Login { username, password } => {
            commands::auth::run_login(&app, username, password).await
        }
        Commands::Logout => commands::auth::run_logout(&app).await,
        Commands::Whoami { json } => commands::auth::run_whoami(&app, json).await,
        Commands::Register {
            username,
            password,
            email,
            invite_code,
        } => commands::auth::run_register(&app, username, password, email, invite_code).await,
        Commands::Profile { command } => match command {
            ProfileCommand::Update { email, phone } => {
                commands::profile::run_update(&app, email, phone).await
            }
            ProfileCommand::Passwd {
                old_password,
                new_password,
            } => commands::profile::run_change_password(&app, old_password, new_password).await,
        },
        Commands::System { command } => match command {
            SystemCommand::Status => commands::system::run_status(&app).await,
            SystemCommand::Health => commands::system::run_health(&app).await,
            SystemCommand::Init {
                db_host,
                db_port,
                db_user,
                db_password,
                db_name,
                admin_user,
                admin_password,
                test_only,
            } => {
                commands::system::run_init(
                    &app,
                    InitParams {
                        db_host,
                        db_port,
                        db_user,
                        db_password,
                        db_name,
                        admin_user,
                        admin_password,
                        test_only,
                    },
                )
                .await
            }
        },
        Commands::Users { command } => match command {
            UserCommand::List { json } => commands::admin::run_users_list(&app, json).await,
            UserCommand::Update {
                id,
                role,
                status,
                email,
            } => commands::admin::run_user_update(&app, id, role, status, email).await,
            UserCommand::ToggleStatus { id } => {
                commands::admin::run_user_toggle_status(&app, id).await
            }
            UserCommand::ResetPassword { id } => {
                commands::admin::run_user_reset_password(&app, id).await
            }
        },
        Commands::Roles { command } => match command {
            RoleCommand::List { json } => commands::admin::run_roles_list(&app, json).await,
            RoleCommand::Create {
                name,
                permission,
                description,
            } => commands::admin::run_role_create(&app, name, permission, description).await,
            RoleCommand::Delete { id } => commands::admin::run_role_delete(&app, id).await,
        },
        Commands::InviteCodes { command } => match command {
            InviteCodeCommand::List { json } => {
                commands::admin::run_invite_codes_list(&app, json).await
            }
            InviteCodeCommand::Generate { count } => {
                commands::admin::run_invite_codes_generate(&app, count).await
            }
            InviteCodeCommand::Delete { id } => {
                commands::admin::run_invite_code_delete(&app, id).await
            }
        },
        Commands::Logs { json } => commands::logs::run_logs(&app, json),
    };

    cancel.cancel();
    let _ = monitor.await;

    result
}

/// Initializes the tracing subscriber with env-filter support.
///
/// `RUST_LOG` controls the emitted level; the in-memory buffer records
/// independently of this filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
