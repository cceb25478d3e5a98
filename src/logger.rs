//! Bounded in-memory log buffer for tradectl
//!
//! Every component funnels its observability records through [`Logger`],
//! which keeps a FIFO ring of [`LogEntry`] values. Error-level entries are
//! de-duplicated by message within a fixed time window so that a flapping
//! request does not flood the buffer. Entries at or above the configured
//! minimum level are additionally mirrored to `tracing`; the buffer itself
//! always records regardless of level so the `logs` command can dump a full
//! capture.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum number of buffered entries before FIFO eviction kicks in.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Window during which a repeated error-level message is suppressed.
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_secs(5);

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    /// Verbose diagnostic output.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// A failure that was surfaced to the user or swallowed a request.
    Error,
}

impl LogLevel {
    /// Uppercase name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parses a case-insensitive level name, defaulting to `Info` for
    /// unknown input (mirrors the permissive config handling).
    pub fn parse_or_default(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// One buffered observability record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// UTC time the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// Severity of the entry.
    pub level: LogLevel,
    /// Human-readable message. For error entries this doubles as the
    /// de-duplication signature.
    pub message: String,
    /// Optional structured payload (request metadata, error context).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

struct LoggerInner {
    entries: VecDeque<LogEntry>,
    /// Error signature -> time of last accepted error entry.
    recent_errors: HashMap<String, Instant>,
}

/// Process-wide log buffer with level-filtered console mirroring.
///
/// The buffer is bounded: once `capacity` entries are held, appending a new
/// entry evicts the oldest (FIFO, not severity-based). `get_logs` hands out a
/// defensive copy so callers can never mutate the buffer through a snapshot.
///
/// # Examples
///
/// ```
/// use tradectl::logger::{Logger, LogLevel};
///
/// let logger = Logger::new();
/// logger.info("session restored", None);
/// let logs = logger.get_logs();
/// assert_eq!(logs.len(), 1);
/// assert_eq!(logs[0].level, LogLevel::Info);
/// ```
pub struct Logger {
    capacity: usize,
    dedup_window: Duration,
    min_level: RwLock<LogLevel>,
    inner: Mutex<LoggerInner>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger with the default capacity (1000), de-duplication
    /// window (5 s), and minimum mirrored level (`Info`).
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_CAPACITY, DEFAULT_DEDUP_WINDOW, LogLevel::Info)
    }

    /// Creates a logger with explicit capacity, de-duplication window, and
    /// minimum mirrored level.
    ///
    /// A zero capacity is coerced to 1 so the buffer can always hold the most
    /// recent entry.
    pub fn with_settings(capacity: usize, dedup_window: Duration, min_level: LogLevel) -> Self {
        Self {
            capacity: capacity.max(1),
            dedup_window,
            min_level: RwLock::new(min_level),
            inner: Mutex::new(LoggerInner {
                entries: VecDeque::new(),
                recent_errors: HashMap::new(),
            }),
        }
    }

    /// Changes the minimum level mirrored to `tracing`. Buffering is not
    /// affected.
    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write().expect("logger level lock poisoned") = level;
    }

    /// Currently configured minimum mirrored level.
    pub fn level(&self) -> LogLevel {
        *self.min_level.read().expect("logger level lock poisoned")
    }

    /// Appends an entry, returning it on success.
    ///
    /// Returns `None` when `level` is [`LogLevel::Error`] and an entry with
    /// the same message was accepted within the de-duplication window; the
    /// call is then a complete no-op.
    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        details: Option<serde_json::Value>,
    ) -> Option<LogEntry> {
        let mut inner = self.inner.lock().expect("logger lock poisoned");

        if level == LogLevel::Error && !Self::accept_error(&mut inner, self.dedup_window, message) {
            return None;
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            details,
        };

        inner.entries.push_back(entry.clone());
        while inner.entries.len() > self.capacity {
            inner.entries.pop_front();
        }
        drop(inner);

        if level >= self.level() {
            self.mirror(&entry);
        }

        Some(entry)
    }

    /// Appends a `Debug` entry.
    pub fn debug(&self, message: &str, details: Option<serde_json::Value>) -> Option<LogEntry> {
        self.log(LogLevel::Debug, message, details)
    }

    /// Appends an `Info` entry.
    pub fn info(&self, message: &str, details: Option<serde_json::Value>) -> Option<LogEntry> {
        self.log(LogLevel::Info, message, details)
    }

    /// Appends a `Warn` entry.
    pub fn warn(&self, message: &str, details: Option<serde_json::Value>) -> Option<LogEntry> {
        self.log(LogLevel::Warn, message, details)
    }

    /// Appends an `Error` entry, subject to de-duplication.
    pub fn error(&self, message: &str, details: Option<serde_json::Value>) -> Option<LogEntry> {
        self.log(LogLevel::Error, message, details)
    }

    /// Returns a defensive copy of the buffer in insertion order.
    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .expect("logger lock poisoned")
            .entries
            .iter()
            .cloned()
            .collect()
    }

    /// Empties the buffer and the de-duplication cache unconditionally.
    pub fn clear_logs(&self) {
        let mut inner = self.inner.lock().expect("logger lock poisoned");
        inner.entries.clear();
        inner.recent_errors.clear();
    }

    /// Returns `true` when an error with `signature` may be recorded, and
    /// marks the signature as seen. Stale signatures are purged lazily.
    fn accept_error(inner: &mut LoggerInner, window: Duration, signature: &str) -> bool {
        let now = Instant::now();
        inner
            .recent_errors
            .retain(|_, seen| now.duration_since(*seen) < window);

        if inner.recent_errors.contains_key(signature) {
            return false;
        }
        inner.recent_errors.insert(signature.to_string(), now);
        true
    }

    /// Mirrors an accepted entry to the `tracing` subscriber.
    fn mirror(&self, entry: &LogEntry) {
        let details = entry
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        match entry.level {
            LogLevel::Debug => tracing::debug!(target: "tradectl", %details, "{}", entry.message),
            LogLevel::Info => tracing::info!(target: "tradectl", %details, "{}", entry.message),
            LogLevel::Warn => tracing::warn!(target: "tradectl", %details, "{}", entry.message),
            LogLevel::Error => tracing::error!(target: "tradectl", %details, "{}", entry.message),
        }
    }
}
