//! Method dispatch module
//!
//! Enforces a resource's allow-list and hands the request to the matching
//! verb callback. Owns the `405` decisions.

use super::outcome::RouteOutcome;
use super::resource::{Resource, Verb};
use crate::context::InvocationContext;
use crate::error::RouteError;
use crate::http::{ProxyRequest, ProxyResponse, ACCEPT, ALLOW, APPLICATION_JSON};
use crate::logger;

/// Dispatch `request` to `resource`
///
/// `Allow` and `Accept` are set before any decision is made, so they are
/// present on rejections too.
pub fn dispatch(
    resource: &dyn Resource,
    ctx: &InvocationContext,
    request: &ProxyRequest,
) -> RouteOutcome {
    let mut response = ProxyResponse::new();
    let allowed = resource.allowed_methods();

    response.set_header(ALLOW, allowed.join(", "));
    response.set_header(ACCEPT, APPLICATION_JSON);

    let Some(&method) = allowed.iter().find(|&&m| m == request.method()) else {
        return reject(
            response,
            RouteError::MethodNotDeclared {
                resource: request.resource_key().to_string(),
                method: request.method().to_string(),
            },
        );
    };

    let Ok(verb) = method.parse::<Verb>() else {
        return reject(
            response,
            RouteError::MethodExplicitlyRejected {
                resource: request.resource_key().to_string(),
                method: request.method().to_string(),
            },
        );
    };

    let result = match verb {
        Verb::Get => resource.get(ctx, request, &mut response),
        Verb::Post => resource.post(ctx, request, &mut response),
        Verb::Put => resource.put(ctx, request, &mut response),
        Verb::Patch => resource.patch(ctx, request, &mut response),
        Verb::Delete => resource.delete(ctx, request, &mut response),
    };

    RouteOutcome::from_result(response, result)
}

/// Standard `405` with the rejection reason as the reported error
fn reject(mut response: ProxyResponse, error: RouteError) -> RouteOutcome {
    if let Err(e) = response.set_status(405) {
        logger::log_error(&format!("Failed to build 405 body: {e}"));
    }
    logger::log_route_rejected(&error);
    RouteOutcome::failed(response, error)
}
