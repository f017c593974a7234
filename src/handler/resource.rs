//! Resource contract module
//!
//! A resource declares the methods it accepts and implements one callback per
//! routable verb. Every callback defaults to a `405` so a resource only
//! overrides the verbs it actually serves.

use std::fmt;
use std::str::FromStr;

use crate::context::InvocationContext;
use crate::error::RouteError;
use crate::http::{ProxyRequest, ProxyResponse};

/// The verbs a resource can implement a callback for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method string that is not one of the routable verbs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    /// Case-sensitive: `get` is not `GET`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

/// A routable endpoint
///
/// Instances are shared across concurrent invocations, so any mutable state
/// must bring its own synchronization.
pub trait Resource: Send + Sync {
    /// Accepted methods in declaration order; joined into the `Allow` header
    fn allowed_methods(&self) -> &[&str] {
        &[]
    }

    fn get(
        &self,
        _ctx: &InvocationContext,
        _req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        method_not_allowed(res)
    }

    fn post(
        &self,
        _ctx: &InvocationContext,
        _req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        method_not_allowed(res)
    }

    fn put(
        &self,
        _ctx: &InvocationContext,
        _req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        method_not_allowed(res)
    }

    fn patch(
        &self,
        _ctx: &InvocationContext,
        _req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        method_not_allowed(res)
    }

    fn delete(
        &self,
        _ctx: &InvocationContext,
        _req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        method_not_allowed(res)
    }
}

/// Fallback for a verb that is declared but not overridden
fn method_not_allowed(res: &mut ProxyResponse) -> Result<(), RouteError> {
    res.set_status(405)
}

/// Resource that allows nothing; every method is rejected
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseResource;

impl Resource for BaseResource {}
