//! Navigation guard state machine
//!
//! Every navigation attempt passes through [`NavigationGuard::before_each`],
//! which evaluates a fixed rule order against the session and system stores
//! and may call the backend (the `/system/status` probe for the first-run
//! page). The outcome is a [`RouteDecision`].
//!
//! Rule order for a navigation to target `T`:
//!
//! 1. `T` requires auth and no token is present -> redirect to login.
//! 2. `T` is the login page and a token is present -> redirect home.
//! 3. `T` is the initialization page -> query system status, store it; if
//!    already initialized, warn and redirect home. A failed query redirects
//!    to login (fail-closed).
//! 4. `T` is admin-only and the session is not admin -> error notice and
//!    redirect home.
//! 5. Otherwise the navigation is allowed.
//!
//! A navigation that awaits the status query can be superseded by a newer
//! one; the stale attempt resolves to [`RouteDecision::Superseded`] and its
//! result is discarded instead of being applied out of order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api;
use crate::client::ApiClient;
use crate::logger::Logger;
use crate::notify::Notifier;
use crate::router::{Route, HOME_PATH, INITIALIZE_PATH, LOGIN_PATH};
use crate::store::session::SessionStore;
use crate::store::system::SystemStatusStore;

/// Outcome of one guarded navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Proceed to the requested route.
    Allow,
    /// Go to this path instead.
    Redirect(String),
    /// A newer navigation started while this one awaited the backend; the
    /// attempt is void and nothing was applied.
    Superseded,
}

/// Pre-navigation hook enforcing authentication, the admin section, and the
/// one-time initialization redirect.
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    system: Arc<SystemStatusStore>,
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    logger: Arc<Logger>,
    /// Monotonic navigation ticket; the latest ticket wins.
    nav_seq: AtomicU64,
}

impl NavigationGuard {
    pub fn new(
        session: Arc<SessionStore>,
        system: Arc<SystemStatusStore>,
        client: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            session,
            system,
            client,
            notifier,
            logger,
            nav_seq: AtomicU64::new(0),
        }
    }

    /// Evaluates the guard rules for a navigation to `to`.
    pub async fn before_each(&self, to: &Route) -> RouteDecision {
        let ticket = self.nav_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let has_token = self.session.token().is_some();

        if to.meta.requires_auth && !has_token {
            return RouteDecision::Redirect(LOGIN_PATH.to_string());
        }

        if to.path == LOGIN_PATH && has_token {
            return RouteDecision::Redirect(HOME_PATH.to_string());
        }

        if to.path == INITIALIZE_PATH {
            return self.check_initialization(ticket).await;
        }

        if to.meta.requires_admin && !self.session.is_admin() {
            self.notifier.error("Administrator privileges required");
            return RouteDecision::Redirect(HOME_PATH.to_string());
        }

        RouteDecision::Allow
    }

    /// Rule 3: probe `/system/status` before entering the first-run page.
    ///
    /// The probe result is applied only when this navigation is still the
    /// newest one; a superseded attempt discards it. Probe failures are
    /// fail-closed: the user lands on the login page, never on the
    /// initialization page.
    async fn check_initialization(&self, ticket: u64) -> RouteDecision {
        match api::system::check_status(&self.client).await {
            Ok(status) => {
                if self.superseded(ticket) {
                    return RouteDecision::Superseded;
                }
                self.system.set_initialized(status.initialized);
                if status.initialized {
                    self.notifier.warning("System is already initialized");
                    return RouteDecision::Redirect(HOME_PATH.to_string());
                }
                RouteDecision::Allow
            }
            Err(e) => {
                if self.superseded(ticket) {
                    return RouteDecision::Superseded;
                }
                self.logger.error(
                    &format!("system status check failed: {}", e),
                    Some(serde_json::json!({ "target": INITIALIZE_PATH })),
                );
                RouteDecision::Redirect(LOGIN_PATH.to_string())
            }
        }
    }

    fn superseded(&self, ticket: u64) -> bool {
        self.nav_seq.load(Ordering::SeqCst) != ticket
    }
}

// Guard behavior is covered end to end in tests/guard_navigation_test.rs,
// which drives it through the Router against a wiremock backend.
