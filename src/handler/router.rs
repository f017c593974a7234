//! Request routing module
//!
//! Entry point for proxy invocations: built-in health check, exact-match
//! registry lookup, then dispatch or `404`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::dispatch::dispatch;
use super::outcome::RouteOutcome;
use super::resource::Resource;
use crate::context::InvocationContext;
use crate::error::RouteError;
use crate::http::{ProxyRequest, ProxyResponse, ACCEPT, ALLOW, APPLICATION_JSON};
use crate::logger;

/// Built-in health check route, answered before the registry is consulted
pub const PING_PATH: &str = "/ping";
const PING_METHOD: &str = "GET";

/// Registry of resources keyed by their exact resource key
///
/// Built once at startup and shared read-only afterwards. Keys are matched
/// character for character, so `/task/{taskId}` only matches a request whose
/// resource key is literally `/task/{taskId}`.
#[derive(Clone, Default)]
pub struct Handlers {
    routes: HashMap<String, Arc<dyn Resource>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, resource: impl Resource + 'static) -> Self {
        self.insert(key, Arc::new(resource));
        self
    }

    /// Register a resource, returning the one previously stored under `key`
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        resource: Arc<dyn Resource>,
    ) -> Option<Arc<dyn Resource>> {
        self.routes.insert(key.into(), resource)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn Resource>> {
        self.routes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Route without a caller-supplied context
    pub fn route(&self, request: &ProxyRequest) -> RouteOutcome {
        self.route_with_context(&InvocationContext::background(), request)
    }

    /// Route with a context that is passed through to resource callbacks
    ///
    /// Precedence: `GET /ping`, then an exact registry match, then `404`.
    pub fn route_with_context(&self, ctx: &InvocationContext, request: &ProxyRequest) -> RouteOutcome {
        let key = request.resource_key();

        if is_ping(request) {
            return ping_response();
        }

        if let Some(resource) = self.routes.get(key) {
            return dispatch(resource.as_ref(), ctx, request);
        }

        not_found(key)
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("routes", &self.keys())
            .finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Arc<dyn Resource>)> for Handlers {
    fn from_iter<I: IntoIterator<Item = (K, Arc<dyn Resource>)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}

fn is_ping(request: &ProxyRequest) -> bool {
    request.resource_key() == PING_PATH && request.method() == PING_METHOD
}

fn ping_response() -> RouteOutcome {
    let mut response = ProxyResponse::new();
    response.set_header(ALLOW, PING_METHOD);
    response.set_header(ACCEPT, APPLICATION_JSON);
    match response.set_status(200) {
        Ok(()) => RouteOutcome::ok(response),
        Err(e) => RouteOutcome::failed(response, e),
    }
}

fn not_found(key: &str) -> RouteOutcome {
    let mut response = ProxyResponse::new();
    if let Err(e) = response.set_status(404) {
        logger::log_error(&format!("Failed to build 404 body: {e}"));
    }

    let error = RouteError::UndeclaredRoute {
        resource: key.to_string(),
    };
    logger::log_route_rejected(&error);
    RouteOutcome::failed(response, error)
}
