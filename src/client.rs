//! Shared HTTP client wrapper
//!
//! One [`ApiClient`] instance serves every API call. It wraps a
//! `reqwest::Client` with two explicit, ordered interceptor lists:
//!
//! - pre-send interceptors run synchronously before the request leaves
//!   (bearer credential attachment first, then traffic logging);
//! - post-receive interceptors run synchronously on the response status
//!   before the result is handed to the caller (the 401 handler clears the
//!   session and redirects to login; the call still fails so the caller can
//!   react locally).
//!
//! Every failed call is routed through the [`ErrorReporter`] so failures are
//! classified and logged centrally; the user-facing notification can be
//! suppressed per request via [`RequestSpec::silent`], the auth redirect
//! cannot.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{ErrorReporter, Result, TradectlError};
use crate::logger::Logger;
use crate::notify::Notifier;
use crate::router::{Navigator, LOGIN_PATH};
use crate::store::session::SessionStore;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One outbound request: method, path, optional JSON payload, optional
/// header overrides, and the error-notification switch.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/auth/login`.
    pub path: String,
    pub body: Option<serde_json::Value>,
    /// Extra headers; a header set here wins over interceptor-set ones.
    pub headers: Vec<(String, String)>,
    /// When false, the central error notification is suppressed for this
    /// call. Classification, logging, and the auth redirect still happen.
    pub notify_on_error: bool,
}

impl RequestSpec {
    /// Creates a spec with the given method and path.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
            headers: Vec::new(),
            notify_on_error: true,
        }
    }

    /// Shorthand for a GET spec.
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a POST spec.
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a PUT spec.
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a DELETE spec.
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header override.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Suppresses the central error notification for this call.
    pub fn silent(mut self) -> Self {
        self.notify_on_error = false;
        self
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Hook run synchronously before a request is sent. Hooks run in list
/// order and may mutate the spec.
pub trait RequestInterceptor: Send + Sync {
    fn before_send(&self, spec: &mut RequestSpec);
}

/// Response metadata handed to post-receive hooks.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub status: u16,
    pub path: String,
}

/// Hook run synchronously after a response arrives and before the result is
/// returned to the caller. Hooks run in list order.
pub trait ResponseInterceptor: Send + Sync {
    fn after_receive(&self, ctx: &ResponseContext);
}

/// Attaches the session's bearer token as `Authorization: Bearer <token>`.
/// A caller-supplied Authorization header wins.
pub struct BearerAuth {
    session: Arc<SessionStore>,
}

impl BearerAuth {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn before_send(&self, spec: &mut RequestSpec) {
        if spec.has_header("authorization") {
            return;
        }
        if let Some(token) = self.session.token() {
            spec.headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
    }
}

/// Records outbound traffic in the log buffer.
pub struct TrafficLog {
    logger: Arc<Logger>,
}

impl TrafficLog {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl RequestInterceptor for TrafficLog {
    fn before_send(&self, spec: &mut RequestSpec) {
        self.logger.info(
            "API request",
            Some(serde_json::json!({
                "method": spec.method.as_str(),
                "path": spec.path,
            })),
        );
    }
}

/// Global 401 policy: the token is no longer valid, so the session is
/// cleared and the client is sent to the login page. The triggering call
/// still returns an error to its caller.
pub struct AuthExpiry {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    logger: Arc<Logger>,
}

impl AuthExpiry {
    pub fn new(
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            session,
            navigator,
            logger,
        }
    }
}

impl ResponseInterceptor for AuthExpiry {
    fn after_receive(&self, ctx: &ResponseContext) {
        if ctx.status != 401 {
            return;
        }
        if let Err(e) = self.session.clear() {
            self.logger
                .warn(&format!("failed to clear session: {}", e), None);
        }
        if self.navigator.current_path() != LOGIN_PATH {
            self.navigator.push(LOGIN_PATH);
        }
    }
}

/// The single shared HTTP client used by every API wrapper.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pre_send: Vec<Box<dyn RequestInterceptor>>,
    post_receive: Vec<Box<dyn ResponseInterceptor>>,
    reporter: ErrorReporter,
}

impl ApiClient {
    /// Builds the shared client and installs the interceptor chain in its
    /// fixed order: bearer attachment, then traffic logging, before send;
    /// auth expiry after receive.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        logger: Arc<Logger>,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(TradectlError::Http)?;

        let pre_send: Vec<Box<dyn RequestInterceptor>> = vec![
            Box::new(BearerAuth::new(session.clone())),
            Box::new(TrafficLog::new(logger.clone())),
        ];
        let post_receive: Vec<Box<dyn ResponseInterceptor>> = vec![Box::new(AuthExpiry::new(
            session.clone(),
            navigator.clone(),
            logger.clone(),
        ))];

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            pre_send,
            post_receive,
            reporter: ErrorReporter::new(logger, notifier, navigator, session),
        })
    }

    /// Sends one request and deserializes the response body into `T`.
    ///
    /// An empty success body deserializes as JSON `null`, which covers
    /// endpoints returning `204 No Content` when `T` is `()`.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`TradectlError::Http`]; non-success
    /// statuses as [`TradectlError::Api`] carrying the server's `message`
    /// field when the body had one. Every failure has already been run
    /// through the central reporter by the time it reaches the caller.
    pub async fn send<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let mut spec = spec;
        let context = format!("{} {}", spec.method, spec.path);
        match self.dispatch(&mut spec).await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.reporter.handle(&err, &context, spec.notify_on_error);
                Err(err.into())
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        spec: &mut RequestSpec,
    ) -> std::result::Result<T, TradectlError> {
        for interceptor in &self.pre_send {
            interceptor.before_send(spec);
        }

        let url = format!("{}{}", self.base_url, spec.path);
        let mut request = self.http.request(spec.method.clone(), &url);
        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let ctx = ResponseContext {
            status: status.as_u16(),
            path: spec.path.clone(),
        };
        let text = response.text().await?;

        for interceptor in &self.post_receive {
            interceptor.after_receive(&ctx);
        }

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(serde_json::from_str("null")?);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));
        Err(TradectlError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
