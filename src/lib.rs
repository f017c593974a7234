//! Request routing for API Gateway style proxy invocations.
//!
//! A [`Handlers`] registry maps exact resource keys to [`Resource`]
//! implementations. Each invocation is checked against the built-in `GET /ping`
//! route, then looked up in the registry and dispatched to the verb callback
//! the resource declares, producing a JSON [`ProxyResponse`] and, when
//! something was rejected or failed, a [`RouteError`] next to it.
//!
//! Requests are the platform's API Gateway proxy events; [`lambda::run`] serves
//! a registry as a Lambda function and [`server`] hosts it locally over HTTP.
//!
//! ```
//! use proxy_router::http::Method;
//! use proxy_router::{Handlers, InvocationContext, ProxyRequest, ProxyResponse, Resource, RouteError};
//!
//! struct Task;
//!
//! impl Resource for Task {
//!     fn allowed_methods(&self) -> &[&str] {
//!         &["GET"]
//!     }
//!
//!     fn get(&self, _ctx: &InvocationContext, req: &ProxyRequest, res: &mut ProxyResponse) -> Result<(), RouteError> {
//!         res.status_code = 200;
//!         res.set_body(&serde_json::json!({ "taskId": req.path_parameter("taskId") }))
//!     }
//! }
//!
//! let handlers = Handlers::new().with("/task/{taskId}", Task);
//! let outcome = handlers.route(
//!     &ProxyRequest::new("/task/{taskId}", Method::GET).with_path_parameter("taskId", "7"),
//! );
//! assert_eq!(outcome.response.status_code, 200);
//! assert_eq!(outcome.response.body, r#"{"taskId":"7"}"#);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod http;
pub mod lambda;
pub mod logger;
pub mod server;

pub use context::InvocationContext;
pub use error::{BoxError, RouteError};
pub use handler::{dispatch, BaseResource, Handlers, Resource, RouteOutcome, Verb, PING_PATH};
pub use http::{ProxyRequest, ProxyResponse};
