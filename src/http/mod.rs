//! Proxy protocol layer module
//!
//! Request and response envelopes exchanged with the invoking platform, plus
//! the status message table used for standardized bodies.

pub mod request;
pub mod response;
pub mod status;

// Re-export commonly used types
pub use aws_lambda_events::http::Method;
pub use request::ProxyRequest;
pub use response::{ProxyResponse, ACCEPT, ALLOW, APPLICATION_JSON, CONTENT_TYPE};
pub use status::{status_message, STATUS_MESSAGES};
