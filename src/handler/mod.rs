//! Request handler module
//!
//! Resource contract, method dispatch and the resource registry.

pub mod dispatch;
pub mod outcome;
pub mod resource;
pub mod router;

// Re-export main entry points
pub use dispatch::dispatch;
pub use outcome::RouteOutcome;
pub use resource::{BaseResource, Resource, UnknownVerb, Verb};
pub use router::{Handlers, PING_PATH};
