//! Shared harness for the integration suite
//!
//! Wires a full client stack (memory storage, recording notifier, memory
//! navigator, log buffer, guarded router) against an arbitrary base URL,
//! usually a wiremock server.

// Each test binary uses a different slice of the harness.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tradectl::api::types::UserInfo;
use tradectl::client::ApiClient;
use tradectl::logger::Logger;
use tradectl::notify::{Notifier, NoticeLevel};
use tradectl::router::guard::NavigationGuard;
use tradectl::router::{MemoryNavigator, Navigator, Router};
use tradectl::store::session::SessionStore;
use tradectl::store::storage::{MemoryStorage, TokenStorage};
use tradectl::store::system::SystemStatusStore;

/// Notifier that records every notice instead of printing it.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().expect("notifier lock poisoned").clone()
    }

    pub fn messages_at(&self, level: NoticeLevel) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .push((level, message.to_string()));
    }
}

/// Fully wired client stack over fakes.
pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<SessionStore>,
    pub system: Arc<SystemStatusStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<MemoryNavigator>,
    pub logger: Arc<Logger>,
    pub client: Arc<ApiClient>,
    pub router: Router,
}

/// Builds a harness pointed at `base_url`.
pub fn harness(base_url: &str) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(SessionStore::new(storage.clone() as Arc<dyn TokenStorage>));
    let system = Arc::new(SystemStatusStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(MemoryNavigator::new());
    let logger = Arc::new(Logger::new());

    let client = Arc::new(
        ApiClient::new(
            base_url,
            Duration::from_secs(5),
            session.clone(),
            navigator.clone() as Arc<dyn Navigator>,
            notifier.clone() as Arc<dyn Notifier>,
            logger.clone(),
        )
        .expect("client"),
    );

    let guard = NavigationGuard::new(
        session.clone(),
        system.clone(),
        client.clone(),
        notifier.clone() as Arc<dyn Notifier>,
        logger.clone(),
    );
    let router = Router::new(guard, navigator.clone() as Arc<dyn Navigator>);

    Harness {
        storage,
        session,
        system,
        notifier,
        navigator,
        logger,
        client,
        router,
    }
}

/// Canned identity with the given role.
pub fn user_with_role(role: &str) -> UserInfo {
    UserInfo {
        id: 1,
        username: "ada".to_string(),
        role: role.to_string(),
        permissions: vec![],
        email: None,
        status: Some("active".to_string()),
        created_at: None,
    }
}

/// Signs the harness session in with the given role.
pub fn sign_in(h: &Harness, role: &str) {
    h.session.set_token("tok-test").expect("set token");
    h.session.set_user(user_with_role(role)).expect("set user");
}
