//! Application wiring
//!
//! [`App::bootstrap`] assembles the whole client from a [`Config`]: durable
//! storage, the restored session, the system-status store, the log buffer,
//! the shared HTTP client, the guarded router, and the session monitor. The
//! CLI commands (and embedders) consume the client exclusively through this
//! context, so nothing in the crate is a process-wide singleton.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{ErrorReporter, Result};
use crate::logger::Logger;
use crate::notify::{Notifier, TerminalNotifier};
use crate::router::guard::NavigationGuard;
use crate::router::{MemoryNavigator, Navigator, Router};
use crate::store::monitor::SessionMonitor;
use crate::store::session::SessionStore;
use crate::store::storage::{KeyringStorage, MemoryStorage, TokenStorage};
use crate::store::system::SystemStatusStore;

/// Fully wired client context.
pub struct App {
    pub config: Config,
    pub logger: Arc<Logger>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<MemoryNavigator>,
    pub session: Arc<SessionStore>,
    pub system: Arc<SystemStatusStore>,
    pub client: Arc<ApiClient>,
    pub router: Router,
    pub monitor: Arc<SessionMonitor>,
}

impl App {
    /// Builds the client context, restoring any durable session.
    pub fn bootstrap(config: Config) -> Result<Self> {
        let storage: Arc<dyn TokenStorage> = match config.session.storage.as_str() {
            "memory" => Arc::new(MemoryStorage::new()),
            _ => Arc::new(KeyringStorage::new(&config.session.keyring_service)),
        };

        let logger = Arc::new(Logger::with_settings(
            config.logging.buffer_capacity,
            config.logging.dedup_window(),
            config.logging.min_level(),
        ));
        let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
        let navigator = Arc::new(MemoryNavigator::new());
        let session = Arc::new(SessionStore::restore(storage)?);
        let system = Arc::new(SystemStatusStore::new());

        let client = Arc::new(ApiClient::new(
            &config.api.base_url,
            config.api.timeout(),
            session.clone(),
            navigator.clone() as Arc<dyn Navigator>,
            notifier.clone(),
            logger.clone(),
        )?);

        let guard = NavigationGuard::new(
            session.clone(),
            system.clone(),
            client.clone(),
            notifier.clone(),
            logger.clone(),
        );
        let router = Router::new(guard, navigator.clone() as Arc<dyn Navigator>);

        let monitor = Arc::new(SessionMonitor::new(
            session.clone(),
            notifier.clone(),
            navigator.clone() as Arc<dyn Navigator>,
            config.session.idle_timeout(),
            config.session.poll_interval(),
        ));

        Ok(Self {
            config,
            logger,
            notifier,
            navigator,
            session,
            system,
            client,
            router,
            monitor,
        })
    }

    /// Standalone error reporter sharing this context's sinks, for callers
    /// handling failures outside the HTTP wrapper.
    pub fn reporter(&self) -> ErrorReporter {
        ErrorReporter::new(
            self.logger.clone(),
            self.notifier.clone(),
            self.navigator.clone() as Arc<dyn Navigator>,
            self.session.clone(),
        )
    }
}
