//! User-facing notification surface
//!
//! The guard, the error reporter, and the session monitor all emit transient
//! notices to whoever is driving the client. [`Notifier`] abstracts the
//! surface so the CLI can print to the terminal while tests capture the
//! notices in memory (see `test_utils::RecordingNotifier`).

use colored::Colorize;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Lowercase name used when recording notices.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

/// Sink for transient user-facing notices.
pub trait Notifier: Send + Sync {
    /// Emits one notice at the given severity.
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Convenience wrapper for success notices.
    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    /// Convenience wrapper for informational notices.
    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    /// Convenience wrapper for warnings.
    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    /// Convenience wrapper for errors.
    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Prints notices to stderr with a colored severity tag.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let tag = match level {
            NoticeLevel::Success => "ok".green().bold(),
            NoticeLevel::Info => "info".cyan().bold(),
            NoticeLevel::Warning => "warn".yellow().bold(),
            NoticeLevel::Error => "error".red().bold(),
        };
        eprintln!("{}: {}", tag, message);
    }
}
