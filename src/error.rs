//! Routing error types
//!
//! Every error is reported next to a best-effort response, never instead of one.

use thiserror::Error;

/// Boxed error returned by resource callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RouteError {
    /// Resource key has no entry in the registry
    #[error("undeclared handler `{resource}`")]
    UndeclaredRoute { resource: String },

    /// Method is absent from the resource's allow-list
    #[error("not in `AllowedMethods`. rejected request `{resource}`:`{method}`")]
    MethodNotDeclared { resource: String, method: String },

    /// Method is on the allow-list but is not one of the routable verbs
    #[error("explicitly rejected request `{resource}`:`{method}`")]
    MethodExplicitlyRejected { resource: String, method: String },

    /// Envelope header that is not valid HTTP
    #[error("invalid response header `{name}`")]
    InvalidHeader { name: String },

    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error raised by a resource callback, displayed verbatim
    #[error("{0}")]
    Handler(#[source] BoxError),
}

impl RouteError {
    /// Wrap an arbitrary callback error
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }

    /// Short variant name, used as `errorType` in invocation payloads
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UndeclaredRoute { .. } => "UndeclaredRoute",
            Self::MethodNotDeclared { .. } => "MethodNotDeclared",
            Self::MethodExplicitlyRejected { .. } => "MethodExplicitlyRejected",
            Self::InvalidHeader { .. } => "InvalidHeader",
            Self::Serialization(_) => "SerializationError",
            Self::Handler(_) => "HandlerError",
        }
    }
}
