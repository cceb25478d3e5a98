//! tradectl - Trading admin dashboard client library
//!
//! This library provides the client side of the trading admin dashboard:
//! session management, a guarded client-side router, the shared HTTP wrapper
//! with its interceptor chains, error classification and reporting, the
//! bounded log buffer, and display formatters.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Thin typed wrappers over the backend HTTP endpoints
//! - `app`: Context assembly wiring every component together
//! - `client`: Shared HTTP wrapper with request/response interceptors
//! - `router`: Route table, navigation guard, and navigator abstraction
//! - `store`: Session, system-status, and session-monitor state
//! - `error`: Error types, classification, and the central reporter
//! - `logger`: Bounded in-memory log buffer with error de-duplication
//! - `format`: Display formatters for dates, money, and masked identifiers
//! - `config`: Configuration loading and validation
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use tradectl::{App, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.session.storage = "memory".to_string();
//!     config.validate()?;
//!
//!     let app = App::bootstrap(config)?;
//!     assert!(app.session.token().is_none());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod notify;
pub mod router;
pub mod store;

// Re-export commonly used types
pub use app::App;
pub use client::ApiClient;
pub use config::Config;
pub use error::{classify, Classification, ErrorKind, Result, TradectlError};
pub use logger::{LogEntry, LogLevel, Logger};
pub use store::session::SessionStore;

#[cfg(test)]
pub mod test_utils;
