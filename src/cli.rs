//! Command-line interface definition for tradectl
//!
//! This module defines the CLI structure using clap's derive API, providing
//! commands for authentication, profile management, system setup, and the
//! admin section (users, roles, invite codes).

use clap::{Parser, Subcommand};

/// tradectl - Trading admin dashboard client
///
/// Talk to the dashboard backend from the terminal: sign in, inspect the
/// system, and manage users, roles, and invite codes.
#[derive(Parser, Debug, Clone)]
#[command(name = "tradectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Backend API base URL override
    #[arg(long, env = "TRADECTL_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for tradectl
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the current identity
    Whoami {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Register {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Invite code, for invite-only deployments
        #[arg(long)]
        invite_code: Option<String>,
    },

    /// Self-service profile management
    Profile {
        /// Profile subcommand
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// System setup and health
    System {
        /// System subcommand
        #[command(subcommand)]
        command: SystemCommand,
    },

    /// User administration (admin only)
    Users {
        /// Users subcommand
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Role administration (admin only)
    Roles {
        /// Roles subcommand
        #[command(subcommand)]
        command: RoleCommand,
    },

    /// Invite-code administration (admin only)
    InviteCodes {
        /// Invite-code subcommand
        #[command(subcommand)]
        command: InviteCodeCommand,
    },

    /// Dump the in-memory log buffer for this invocation
    Logs {
        /// Emit JSON instead of formatted lines
        #[arg(long)]
        json: bool,
    },
}

/// Self-service profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Update profile fields
    Update {
        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Change the account password
    Passwd {
        /// Current password
        #[arg(long)]
        old_password: String,

        /// New password
        #[arg(long)]
        new_password: String,
    },
}

/// System setup and health subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SystemCommand {
    /// Query first-run initialization status
    Status,

    /// Query backend health
    Health,

    /// Run first-time initialization
    Init {
        /// Database host
        #[arg(long, default_value = "localhost")]
        db_host: String,

        /// Database port
        #[arg(long, default_value_t = 5432)]
        db_port: u16,

        /// Database user
        #[arg(long)]
        db_user: String,

        /// Database password
        #[arg(long)]
        db_password: String,

        /// Database name
        #[arg(long)]
        db_name: String,

        /// Initial administrator login name
        #[arg(long)]
        admin_user: String,

        /// Initial administrator password
        #[arg(long)]
        admin_password: String,

        /// Only test the database connection, do not initialize
        #[arg(long)]
        test_only: bool,
    },
}

/// User administration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// List all users
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Update a user's role, status, or email
    Update {
        /// User id
        id: i64,

        /// New role name
        #[arg(long)]
        role: Option<String>,

        /// New status (active / inactive)
        #[arg(long)]
        status: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Toggle a user between active and disabled
    ToggleStatus {
        /// User id
        id: i64,
    },

    /// Reset a user's password
    ResetPassword {
        /// User id
        id: i64,
    },
}

/// Role administration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RoleCommand {
    /// List role definitions
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a role
    Create {
        /// Role name
        #[arg(long)]
        name: String,

        /// Permission strings granted to the role
        #[arg(long)]
        permission: Vec<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a role
    Delete {
        /// Role id
        id: i64,
    },
}

/// Invite-code administration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum InviteCodeCommand {
    /// List invite codes
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate new invite codes
    Generate {
        /// Number of codes to mint
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },

    /// Revoke an invite code
    Delete {
        /// Invite-code id
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
