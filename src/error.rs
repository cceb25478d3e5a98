//! Error types and classification for tradectl
//!
//! This module defines the crate-wide error enum (via `thiserror`), the
//! five-way failure taxonomy shared with the backend dashboard, and the
//! [`ErrorReporter`] that centralizes logging, user notification, and the
//! global auth-failure policy.

use std::sync::Arc;

use thiserror::Error;

use crate::logger::Logger;
use crate::notify::Notifier;
use crate::router::{Navigator, LOGIN_PATH};
use crate::store::session::SessionStore;

/// Main error type for tradectl operations.
#[derive(Error, Debug)]
pub enum TradectlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A response arrived with a non-success HTTP status. `message` carries
    /// the server-supplied explanation when the body had one.
    #[error("API error: status={status}{}", .message.as_deref().map(|m| format!(", {}", m)).unwrap_or_default())]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-supplied message, if any.
        message: Option<String>,
    },

    /// Transport-level HTTP errors (no response reached the client)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session invariant violations
    #[error("Session error: {0}")]
    Session(String),

    /// Navigation to a path with no matching route
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

/// Result type alias for tradectl operations
///
/// Uses `anyhow::Error` so call sites get rich context and easy propagation.
pub type Result<T> = anyhow::Result<T>;

/// The five-way failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client.
    Network,
    /// Status >= 500.
    Server,
    /// Status 401 or 403.
    Auth,
    /// Status 422.
    Validation,
    /// Any other failure, including remaining 4xx statuses.
    Business,
}

impl ErrorKind {
    /// Uppercase tag used in log payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK",
            ErrorKind::Server => "SERVER",
            ErrorKind::Auth => "AUTH",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Business => "BUSINESS",
        }
    }

    /// Default user-facing message template for this kind.
    fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network connection failed, check your connection",
            ErrorKind::Server => "Server error, please try again later",
            ErrorKind::Auth => "Authentication failed, please sign in again",
            ErrorKind::Validation => "Submitted data failed validation",
            ErrorKind::Business => "Operation failed",
        }
    }
}

/// A classified failure: its kind plus the message to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub message: String,
}

/// Classifies an error into the five-way taxonomy.
///
/// Pure: repeated calls on the same error yield the same classification and
/// nothing is mutated. The server-supplied message, when present, overrides
/// the default template for the kind.
///
/// # Examples
///
/// ```
/// use tradectl::error::{classify, ErrorKind, TradectlError};
///
/// let err = TradectlError::Api { status: 503, message: None };
/// assert_eq!(classify(&err).kind, ErrorKind::Server);
///
/// let err = TradectlError::Api { status: 422, message: Some("bad email".into()) };
/// let c = classify(&err);
/// assert_eq!(c.kind, ErrorKind::Validation);
/// assert_eq!(c.message, "bad email");
/// ```
pub fn classify(err: &TradectlError) -> Classification {
    let (kind, server_message) = match err {
        // Transport failures never carried a response.
        TradectlError::Http(_) => (ErrorKind::Network, None),
        TradectlError::Api { status, message } => {
            let kind = match *status {
                s if s >= 500 => ErrorKind::Server,
                401 | 403 => ErrorKind::Auth,
                422 => ErrorKind::Validation,
                _ => ErrorKind::Business,
            };
            (kind, message.clone())
        }
        _ => (ErrorKind::Business, None),
    };

    Classification {
        message: server_message.unwrap_or_else(|| kind.default_message().to_string()),
        kind,
    }
}

/// Central failure handler: log, notify, and apply the global auth policy.
///
/// Only `handle` mutates state; [`classify`] never does. The auth policy is
/// unconditional: a per-call opt-out exists for the notification, never for
/// the session clear and login redirect.
pub struct ErrorReporter {
    logger: Arc<Logger>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    session: Arc<SessionStore>,
}

impl ErrorReporter {
    pub fn new(
        logger: Arc<Logger>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            logger,
            notifier,
            navigator,
            session,
        }
    }

    /// Handles one failure end to end and returns its classification.
    ///
    /// Logs the error (name, message, and context) through the buffered
    /// logger, surfaces the classified message as an error notice unless
    /// `notify` is false, and on [`ErrorKind::Auth`] clears the session
    /// (including the durable token) and navigates to the login page unless
    /// already there.
    pub fn handle(&self, err: &TradectlError, context: &str, notify: bool) -> Classification {
        let classification = classify(err);

        self.logger.error(
            &err.to_string(),
            Some(serde_json::json!({
                "context": context,
                "kind": classification.kind.as_str(),
            })),
        );

        if notify {
            self.notifier.error(&classification.message);
        }

        if classification.kind == ErrorKind::Auth {
            if let Err(clear_err) = self.session.clear() {
                self.logger
                    .warn(&format!("failed to clear session: {}", clear_err), None);
            }
            if self.navigator.current_path() != LOGIN_PATH {
                self.navigator.push(LOGIN_PATH);
            }
        }

        classification
    }
}
