//! Lambda runtime entry point
//!
//! Serves a handler registry as the function handler when the process runs
//! inside the Lambda execution environment. A routing error fails the
//! invocation, the same way event mode does on the local host.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use chrono::{DateTime, Utc};
use lambda_runtime::{service_fn, Context, LambdaEvent};
use std::sync::Arc;
use std::time::Instant;

use crate::config::LoggingConfig;
use crate::context::InvocationContext;
use crate::error::RouteError;
use crate::handler::{Handlers, RouteOutcome};
use crate::http::ProxyRequest;
use crate::logger::{self, InvocationLogEntry};

pub use lambda_runtime::Error;

/// Set by the execution environment for every function process
pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

pub fn is_lambda_environment() -> bool {
    std::env::var_os(RUNTIME_API_ENV).is_some()
}

/// Poll the runtime API until the process is shut down
pub async fn run(handlers: Handlers, logging: LoggingConfig) -> Result<(), Error> {
    let handlers = Arc::new(handlers);
    let logging = Arc::new(logging);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let handlers = Arc::clone(&handlers);
        let logging = Arc::clone(&logging);
        async move { handle_event(&handlers, &logging, event) }
    }))
    .await
}

/// Route one invocation
pub fn handle_event(
    handlers: &Handlers,
    logging: &LoggingConfig,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let started = Instant::now();
    let (request, context) = event.into_parts();

    let ctx = invocation_context(&request, &context);
    let outcome = handlers.route_with_context(&ctx, &request);
    if logging.access_log {
        log_invocation(&ctx, &request, &outcome, started, &logging.access_log_format);
    }

    let response = outcome.into_result()?;
    Ok(ApiGatewayProxyResponse::try_from(response)?)
}

/// Gateway request id first, then the invocation id; deadline from the runtime
fn invocation_context(request: &ProxyRequest, context: &Context) -> InvocationContext {
    let request_id = request.request_id().unwrap_or(context.request_id.as_str());
    let ctx = InvocationContext::new(request_id);

    match i64::try_from(context.deadline)
        .ok()
        .filter(|&millis| millis > 0)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    {
        Some(deadline) => ctx.with_deadline(deadline),
        None => ctx,
    }
}

fn log_invocation(
    ctx: &InvocationContext,
    request: &ProxyRequest,
    outcome: &RouteOutcome,
    started: Instant,
    format: &str,
) {
    let mut entry = InvocationLogEntry::new(
        ctx.request_id().to_string(),
        request.method().to_string(),
        request.resource_key().to_string(),
    );
    if let Some(source_ip) = &request.request_context.identity.source_ip {
        entry.remote_addr.clone_from(source_ip);
    }
    entry.path = request.path().to_string();
    entry.status = outcome.status_code();
    entry.body_bytes = outcome.response.body.len();
    entry.error = outcome.error.as_ref().map(RouteError::to_string);
    entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_invocation(&entry, format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::Resource;
    use crate::http::{Method, ProxyResponse};
    use aws_lambda_events::encodings::Body;

    /// Answers with the request id and whether a deadline was set
    struct Whoami;

    impl Resource for Whoami {
        fn allowed_methods(&self) -> &[&str] {
            &["GET"]
        }

        fn get(
            &self,
            ctx: &InvocationContext,
            _req: &ProxyRequest,
            res: &mut ProxyResponse,
        ) -> Result<(), RouteError> {
            res.status_code = 200;
            res.set_body(&serde_json::json!({
                "requestId": ctx.request_id(),
                "deadline": ctx.deadline().is_some(),
            }))
        }
    }

    fn logging() -> LoggingConfig {
        Config::load_from("does-not-exist/proxy-router").unwrap().logging
    }

    fn invoke(request: ProxyRequest, deadline: u64) -> Result<ApiGatewayProxyResponse, Error> {
        let mut context = Context::default();
        context.request_id = "lambda-req".to_string();
        context.deadline = deadline;

        let handlers = Handlers::new().with("/whoami", Whoami);
        handle_event(&handlers, &logging(), LambdaEvent::new(request, context))
    }

    #[test]
    fn test_ping_over_lambda() {
        let response = invoke(ProxyRequest::new("/ping", Method::GET), 0).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["allow"], "GET");
        assert_eq!(response.headers["accept"], "application/json");
        assert_eq!(response.body, Some(Body::Text(r#"{"message":"OK"}"#.to_string())));
    }

    #[test]
    fn test_routing_error_fails_invocation() {
        let err = invoke(ProxyRequest::new("/nope", Method::GET), 0).unwrap_err();
        assert_eq!(err.to_string(), "undeclared handler `/nope`");
    }

    #[test]
    fn test_invocation_id_and_deadline_reach_callback() {
        let response = invoke(ProxyRequest::new("/whoami", Method::GET), 0).unwrap();
        assert_eq!(
            response.body,
            Some(Body::Text(r#"{"deadline":false,"requestId":"lambda-req"}"#.to_string()))
        );

        let deadline = u64::try_from(Utc::now().timestamp_millis() + 3_000).unwrap();
        let response = invoke(ProxyRequest::new("/whoami", Method::GET), deadline).unwrap();
        assert_eq!(
            response.body,
            Some(Body::Text(r#"{"deadline":true,"requestId":"lambda-req"}"#.to_string()))
        );
    }

    #[test]
    fn test_gateway_request_id_wins() {
        let mut request = ProxyRequest::new("/whoami", Method::GET);
        request.request_context.request_id = Some("gw-7".to_string());

        let response = invoke(request, 0).unwrap();
        assert_eq!(
            response.body,
            Some(Body::Text(r#"{"deadline":false,"requestId":"gw-7"}"#.to_string()))
        );
    }
}
