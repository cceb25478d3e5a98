//! Page graph and navigation for the dashboard client
//!
//! The dashboard is a graph of pages; every transition passes through the
//! navigation guard (see [`guard`]) before it is committed to the
//! [`Navigator`]. The route table mirrors the backend's page layout: trade
//! screens for everyone, an admin-only section, profile pages, and the
//! public login / register / first-run initialization pages.

pub mod guard;

use std::sync::{Arc, RwLock};

use crate::error::{Result, TradectlError};
use guard::{NavigationGuard, RouteDecision};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the dashboard home.
pub const HOME_PATH: &str = "/";

/// Path of the one-time system initialization page.
pub const INITIALIZE_PATH: &str = "/system/initialize";

/// Per-route requirements consulted by the guard.
#[derive(Debug, Clone, Copy)]
pub struct RouteMeta {
    /// Whether the route is reachable only with a token.
    pub requires_auth: bool,
    /// Whether the route additionally requires the admin role.
    pub requires_admin: bool,
}

impl RouteMeta {
    const fn public() -> Self {
        Self {
            requires_auth: false,
            requires_admin: false,
        }
    }

    const fn authed() -> Self {
        Self {
            requires_auth: true,
            requires_admin: false,
        }
    }

    const fn admin() -> Self {
        Self {
            requires_auth: true,
            requires_admin: true,
        }
    }
}

/// One node of the page graph.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

/// The full page graph of the dashboard.
const ROUTES: &[Route] = &[
    Route {
        path: HOME_PATH,
        name: "dashboard",
        meta: RouteMeta::authed(),
    },
    Route {
        path: "/trade/strategy",
        name: "trade-strategy",
        meta: RouteMeta::authed(),
    },
    Route {
        path: "/trade/positions",
        name: "trade-positions",
        meta: RouteMeta::authed(),
    },
    Route {
        path: "/trade/orders",
        name: "trade-orders",
        meta: RouteMeta::authed(),
    },
    Route {
        path: "/admin/users",
        name: "admin-users",
        meta: RouteMeta::admin(),
    },
    Route {
        path: "/admin/permissions",
        name: "admin-permissions",
        meta: RouteMeta::admin(),
    },
    Route {
        path: "/admin/invite-codes",
        name: "admin-invite-codes",
        meta: RouteMeta::admin(),
    },
    Route {
        path: "/admin/monitor",
        name: "admin-monitor",
        meta: RouteMeta::admin(),
    },
    Route {
        path: "/profile/info",
        name: "profile-info",
        meta: RouteMeta::authed(),
    },
    Route {
        path: "/profile/password",
        name: "profile-password",
        meta: RouteMeta::authed(),
    },
    Route {
        path: LOGIN_PATH,
        name: "login",
        meta: RouteMeta::public(),
    },
    Route {
        path: "/register",
        name: "register",
        meta: RouteMeta::public(),
    },
    Route {
        path: INITIALIZE_PATH,
        name: "system-initialize",
        meta: RouteMeta::public(),
    },
];

/// Returns the static route table.
pub fn route_table() -> &'static [Route] {
    ROUTES
}

/// Looks up a route by exact path.
pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.path == path)
}

/// Where the client currently "is" and how it moves.
///
/// A trait so the CLI, the guard, the error reporter, and the tests share
/// one substitutable location object.
pub trait Navigator: Send + Sync {
    /// The path currently displayed.
    fn current_path(&self) -> String;

    /// Commits a transition to `path`.
    fn push(&self, path: &str);
}

/// Navigator keeping the visited history in memory.
///
/// Starts at `/`. The history is observable so tests can assert that a
/// redirect (say, to the login page) was actually issued.
pub struct MemoryNavigator {
    history: RwLock<Vec<String>>,
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self {
            history: RwLock::new(vec![HOME_PATH.to_string()]),
        }
    }

    /// Full visited history, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .expect("navigator lock poisoned")
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history
            .read()
            .expect("navigator lock poisoned")
            .last()
            .cloned()
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    fn push(&self, path: &str) {
        tracing::debug!(target: "tradectl", "navigate -> {}", path);
        self.history
            .write()
            .expect("navigator lock poisoned")
            .push(path.to_string());
    }
}

/// The router: resolves paths, runs the guard, and commits allowed or
/// redirected transitions to the navigator.
pub struct Router {
    guard: NavigationGuard,
    navigator: Arc<dyn Navigator>,
}

impl Router {
    pub fn new(guard: NavigationGuard, navigator: Arc<dyn Navigator>) -> Self {
        Self { guard, navigator }
    }

    /// Navigates to `path`, running the guard first.
    ///
    /// The guard's decision is committed to the navigator: an allowed
    /// navigation moves to the target, a redirect moves to the redirect
    /// target, and a superseded navigation moves nowhere.
    ///
    /// # Errors
    ///
    /// Returns [`TradectlError::UnknownRoute`] when `path` matches no route.
    pub async fn navigate(&self, path: &str) -> Result<RouteDecision> {
        let route =
            resolve(path).ok_or_else(|| TradectlError::UnknownRoute(path.to_string()))?;

        let decision = self.guard.before_each(route).await;
        match &decision {
            RouteDecision::Allow => self.navigator.push(route.path),
            RouteDecision::Redirect(target) => self.navigator.push(target),
            RouteDecision::Superseded => {}
        }
        Ok(decision)
    }
}
