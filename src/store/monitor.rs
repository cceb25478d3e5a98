//! Background session validity monitor
//!
//! Polls the session at a fixed interval independent of user action. Each
//! tick reconciles the in-memory session with durable storage (an external
//! actor may have logged out) and enforces the idle timeout: once no
//! activity has been recorded for the configured window, the session is
//! cleared, a warning is surfaced, and the client is sent to the login
//! page. Every check is idempotent and safe to run concurrently with any
//! navigation.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::notify::Notifier;
use crate::router::{Navigator, LOGIN_PATH};
use crate::store::session::SessionStore;

/// Idle window after which the session is expired.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Interval between background validity checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Background watchdog over a [`SessionStore`].
pub struct SessionMonitor {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    idle_timeout: Duration,
    poll_interval: Duration,
    last_activity: Mutex<Instant>,
}

impl SessionMonitor {
    pub fn new(
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        idle_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
            idle_timeout,
            poll_interval,
            last_activity: Mutex::new(Instant::now()),
        }
    }

    /// Records user activity, resetting the idle clock.
    pub fn touch(&self) {
        *self.last_activity.lock().expect("monitor lock poisoned") = Instant::now();
    }

    /// Whether the idle window has elapsed since the last recorded activity.
    pub fn idle_expired(&self) -> bool {
        self.last_activity
            .lock()
            .expect("monitor lock poisoned")
            .elapsed()
            >= self.idle_timeout
    }

    /// Runs one validity check. Returns `true` when the session was
    /// invalidated (externally or by idle timeout).
    ///
    /// Checking an already-empty session is a no-op, so overlapping checks
    /// and checks racing a navigation are harmless.
    pub fn check(&self) -> Result<bool> {
        if self.session.token().is_none() {
            return Ok(false);
        }

        if self.session.sync_from_storage()? {
            self.notifier
                .warning("Signed out in another session, please sign in again");
            self.redirect_to_login();
            return Ok(true);
        }

        if self.idle_expired() {
            self.session.clear()?;
            self.notifier.warning("Session expired, please sign in again");
            self.redirect_to_login();
            return Ok(true);
        }

        Ok(false)
    }

    fn redirect_to_login(&self) {
        if self.navigator.current_path() != LOGIN_PATH {
            self.navigator.push(LOGIN_PATH);
        }
    }

    /// Polls [`check`](Self::check) until `cancel` fires.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately; consume it
        // so the first real check happens one full interval in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => {
                    if let Err(e) = self.check() {
                        tracing::warn!(target: "tradectl", "session check failed: {}", e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::MemoryNavigator;
    use crate::store::storage::{MemoryStorage, TokenStorage, TOKEN_KEY};
    use crate::test_utils::RecordingNotifier;

    fn monitor(
        idle_timeout: Duration,
    ) -> (
        Arc<SessionMonitor>,
        Arc<SessionStore>,
        Arc<MemoryStorage>,
        Arc<RecordingNotifier>,
        Arc<MemoryNavigator>,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Arc::new(SessionStore::new(storage.clone() as Arc<dyn TokenStorage>));
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(MemoryNavigator::new());
        let monitor = Arc::new(SessionMonitor::new(
            session.clone(),
            notifier.clone(),
            navigator.clone(),
            idle_timeout,
            DEFAULT_POLL_INTERVAL,
        ));
        (monitor, session, storage, notifier, navigator)
    }

    #[test]
    fn test_check_noop_without_session() {
        let (monitor, _, _, notifier, _) = monitor(Duration::from_secs(0));
        assert!(!monitor.check().expect("check"));
        assert!(notifier.recorded().is_empty());
    }

    #[test]
    fn test_check_expires_idle_session() {
        let (monitor, session, _, notifier, navigator) = monitor(Duration::from_secs(0));
        session.set_token("tok").expect("set token");

        assert!(monitor.check().expect("check"));
        assert!(session.token().is_none());
        assert_eq!(navigator.current_path(), LOGIN_PATH);
        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].1.contains("Session expired"));
    }

    #[test]
    fn test_touch_defers_expiry() {
        let (monitor, session, _, _, _) = monitor(Duration::from_secs(3600));
        session.set_token("tok").expect("set token");
        monitor.touch();
        assert!(!monitor.check().expect("check"));
        assert!(session.token().is_some());
    }

    #[test]
    fn test_check_detects_external_logout() {
        let (monitor, session, storage, notifier, navigator) = monitor(Duration::from_secs(3600));
        session.set_token("tok").expect("set token");
        storage.remove(TOKEN_KEY).expect("external remove");

        assert!(monitor.check().expect("check"));
        assert!(session.token().is_none());
        assert_eq!(navigator.current_path(), LOGIN_PATH);
        assert!(notifier.recorded()[0].1.contains("another session"));
    }

    #[test]
    fn test_check_is_idempotent_after_expiry() {
        let (monitor, session, _, notifier, _) = monitor(Duration::from_secs(0));
        session.set_token("tok").expect("set token");

        assert!(monitor.check().expect("first check"));
        assert!(!monitor.check().expect("second check"));
        assert_eq!(notifier.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let (monitor, _, _, _, _) = monitor(Duration::from_secs(3600));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(monitor.run(cancel.clone()));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor should stop promptly")
            .expect("monitor task should not panic");
    }
}
