//! Invocation glue module
//!
//! Turns HTTP traffic into router invocations, in one of two modes:
//! - event mode: `POST <event_path>` carrying a proxy event as JSON, answered
//!   with the proxy response (or an error payload) as JSON
//! - direct mode: any other request, resolved against the registered resource
//!   keys the way the gateway does and answered with the envelope's status,
//!   headers and body

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::query_map::QueryMap;
use chrono::TimeDelta;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::state::HostState;
use crate::context::InvocationContext;
use crate::error::RouteError;
use crate::handler::{Handlers, RouteOutcome};
use crate::http::{ProxyRequest, ProxyResponse, APPLICATION_JSON, CONTENT_TYPE};
use crate::logger::{self, InvocationLogEntry};

/// Header carrying the caller's request id, if any
const REQUEST_ID_HEADER: &str = "x-amzn-requestid";
const FUNCTION_ERROR_HEADER: &str = "X-Amz-Function-Error";

/// Error payload returned in event mode when routing reports an error
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvocationError {
    error_message: String,
    error_type: &'static str,
}

impl From<&RouteError> for InvocationError {
    fn from(err: &RouteError) -> Self {
        Self {
            error_message: err.to_string(),
            error_type: err.kind(),
        }
    }
}

/// Main entry point for HTTP requests reaching the host
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<HostState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let is_event = parts.method == Method::POST && parts.uri.path() == state.config.invoke.event_path;
    if !is_event && !state.config.invoke.direct_routes {
        return Ok(status_response(404));
    }

    let body = match read_body(body, state.config.invoke.max_body_size).await {
        Ok(body) => body,
        Err(status) => return Ok(status_response(status)),
    };

    let caller_id = parts
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let response = if is_event {
        invoke_event(caller_id, &body, peer_addr, started, &state)
    } else {
        let ctx = invocation_context(caller_id, &state);
        invoke_direct(&ctx, &parts, &body, peer_addr, started, &state)
    };
    Ok(response)
}

/// Event mode: body is a proxy event, response is the serialized outcome
///
/// The event's own `requestContext.requestId` wins over the caller's header.
fn invoke_event(
    caller_id: Option<&str>,
    body: &Bytes,
    peer_addr: SocketAddr,
    started: Instant,
    state: &HostState,
) -> Response<Full<Bytes>> {
    let event: ProxyRequest = match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(e) => {
            logger::log_warning(&format!("Malformed proxy event: {e}"));
            return status_response(400);
        }
    };

    let ctx = invocation_context(event.request_id().or(caller_id), state);
    let outcome = state.handlers.route_with_context(&ctx, &event);
    log_invocation(&ctx, &event, &outcome, peer_addr, started, state);
    event_response(outcome)
}

/// Direct mode: the HTTP request itself is the event
fn invoke_direct(
    ctx: &InvocationContext,
    parts: &Parts,
    body: &Bytes,
    peer_addr: SocketAddr,
    started: Instant,
    state: &HostState,
) -> Response<Full<Bytes>> {
    let request = proxy_request_from_parts(parts, body, ctx, peer_addr, &state.handlers);
    let outcome = state.handlers.route_with_context(ctx, &request);
    log_invocation(ctx, &request, &outcome, peer_addr, started, state);

    if let Some(err) = &outcome.error {
        logger::log_debug(&format!("[{}] {}: {err}", ctx.request_id(), err.kind()));
    }
    into_http_response(outcome.response)
}

fn invocation_context(request_id: Option<&str>, state: &HostState) -> InvocationContext {
    let request_id = request_id.map_or_else(|| state.next_request_id(), ToString::to_string);

    let timeout_ms = i64::try_from(state.config.performance.invocation_timeout_ms).unwrap_or(i64::MAX);
    match TimeDelta::try_milliseconds(timeout_ms) {
        Some(timeout) if timeout_ms > 0 => InvocationContext::new(request_id).with_timeout(timeout),
        _ => InvocationContext::new(request_id),
    }
}

/// Collect the body, mapping an oversize body to 413 and a broken one to 400
async fn read_body(body: Incoming, max_body_size: u64) -> Result<Bytes, u16> {
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!("Request body too large (max: {max_body_size})"));
            Err(413)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(400)
        }
    }
}

/// Build the proxy event a gateway would have sent for this request
pub fn proxy_request_from_parts(
    parts: &Parts,
    body: &[u8],
    ctx: &InvocationContext,
    peer_addr: SocketAddr,
    handlers: &Handlers,
) -> ProxyRequest {
    let segments: Vec<String> = parts
        .uri
        .path()
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();
    let path = segments.join("/");
    let (resource, path_parameters) = resolve_resource(handlers, &path, &segments);

    let mut request = ProxyRequest::new(resource.clone(), parts.method.clone()).with_path(path);
    request.path_parameters = path_parameters;
    request.headers = parts.headers.clone();
    request.multi_value_headers = parts.headers.clone();

    if let Some(query) = parts.uri.query() {
        let (single, multi) = parse_query(query);
        request.query_string_parameters = single;
        request.multi_value_query_string_parameters = multi;
    }

    if !body.is_empty() {
        request.body = Some(String::from_utf8_lossy(body).into_owned());
    }

    let context = &mut request.request_context;
    context.request_id = Some(ctx.request_id().to_string());
    context.stage = Some("local".to_string());
    context.resource_path = Some(resource);
    context.http_method = parts.method.clone();
    context.identity.source_ip = Some(peer_addr.ip().to_string());
    request
}

/// Resource key and path parameters for a decoded path
///
/// A registered key equal to the path wins. Otherwise keys are read as
/// templates where `{name}` takes one segment and a trailing `{name+}` takes
/// the rest; the template with the most literal segments wins. An unmatched
/// path is its own key.
pub fn resolve_resource(
    handlers: &Handlers,
    path: &str,
    segments: &[String],
) -> (String, HashMap<String, String>) {
    if handlers.contains(path) {
        return (path.to_string(), HashMap::new());
    }

    let mut best: Option<(usize, &str, HashMap<String, String>)> = None;
    for key in handlers.keys() {
        let Some((literals, params)) = match_template(key, segments) else {
            continue;
        };
        if best.as_ref().map_or(true, |(most, _, _)| literals > *most) {
            best = Some((literals, key, params));
        }
    }

    match best {
        Some((_, key, params)) => (key.to_string(), params),
        None => (path.to_string(), HashMap::new()),
    }
}

fn match_template(template: &str, segments: &[String]) -> Option<(usize, HashMap<String, String>)> {
    let parts: Vec<&str> = template.split('/').collect();
    let mut params = HashMap::new();
    let mut literals = 0;

    for (i, part) in parts.iter().enumerate() {
        if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix("+}")) {
            let rest = segments.get(i..)?.join("/");
            if i + 1 != parts.len() || rest.is_empty() {
                return None;
            }
            params.insert(name.to_string(), rest);
            return Some((literals, params));
        }

        let segment = segments.get(i)?;
        if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            if segment.is_empty() {
                return None;
            }
            params.insert(name.to_string(), segment.clone());
        } else if part == segment {
            literals += 1;
        } else {
            return None;
        }
    }

    (parts.len() == segments.len()).then_some((literals, params))
}

/// Decode a query string; the single-value map keeps the last occurrence
pub fn parse_query(query: &str) -> (QueryMap, QueryMap) {
    let mut single: HashMap<String, Vec<String>> = HashMap::new();
    let mut multi: HashMap<String, Vec<String>> = HashMap::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        multi
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        single.insert(key.into_owned(), vec![value.into_owned()]);
    }

    (QueryMap::from(single), QueryMap::from(multi))
}

/// Event-mode reply: the gateway response on success, an error payload otherwise
pub fn event_response(outcome: RouteOutcome) -> Response<Full<Bytes>> {
    let result = outcome
        .into_result()
        .and_then(ApiGatewayProxyResponse::try_from);

    let (payload, function_error) = match &result {
        Ok(gateway) => (serde_json::to_vec(gateway), false),
        Err(err) => (serde_json::to_vec(&InvocationError::from(err)), true),
    };

    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize invocation result: {e}"));
            return bad_gateway();
        }
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, APPLICATION_JSON);
    if function_error {
        builder = builder.header(FUNCTION_ERROR_HEADER, "Unhandled");
    }

    builder
        .body(Full::new(Bytes::from(payload)))
        .unwrap_or_else(|e| {
            log_build_error("event", &e);
            bad_gateway()
        })
}

/// Write the envelope back as a plain HTTP response
///
/// An envelope the gateway could not forward (bad status code or header)
/// becomes a `502`.
pub fn into_http_response(response: ProxyResponse) -> Response<Full<Bytes>> {
    let Ok(status) = StatusCode::from_u16(response.status_code) else {
        logger::log_error(&format!(
            "Malformed proxy response: invalid status code {}",
            response.status_code
        ));
        return bad_gateway();
    };

    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            bad_gateway()
        })
}

/// Standardized `{"message": ...}` response for host-level failures
fn status_response(code: u16) -> Response<Full<Bytes>> {
    let mut response = ProxyResponse::new();
    if let Err(e) = response.set_status(code) {
        logger::log_error(&format!("Failed to build {code} body: {e}"));
    }
    into_http_response(response)
}

/// What API Gateway answers when the function result is unusable
fn bad_gateway() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(
        br#"{"message": "Internal server error"}"#,
    )));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static(APPLICATION_JSON),
    );
    response
}

fn log_invocation(
    ctx: &InvocationContext,
    request: &ProxyRequest,
    outcome: &RouteOutcome,
    peer_addr: SocketAddr,
    started: Instant,
    state: &HostState,
) {
    if !state.config.logging.access_log {
        return;
    }

    let mut entry = InvocationLogEntry::new(
        ctx.request_id().to_string(),
        request.method().to_string(),
        request.resource_key().to_string(),
    );
    entry.remote_addr = peer_addr.ip().to_string();
    entry.path = request.path().to_string();
    entry.status = outcome.status_code();
    entry.body_bytes = outcome.response.body.len();
    entry.error = outcome.error.as_ref().map(RouteError::to_string);
    entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_invocation(&entry, &state.config.logging.access_log_format);
}

fn log_build_error(kind: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::Resource;
    use crate::server::connection;
    use hyper_util::rt::TokioIo;
    use tokio::net::{TcpListener, TcpStream};

    struct Task;

    impl Resource for Task {
        fn allowed_methods(&self) -> &[&str] {
            &["GET"]
        }

        fn get(
            &self,
            _ctx: &InvocationContext,
            req: &ProxyRequest,
            res: &mut ProxyResponse,
        ) -> Result<(), RouteError> {
            res.status_code = 200;
            res.set_body(&serde_json::json!({ "taskId": req.path_parameter("taskId") }))
        }
    }

    /// Answers with the request id it was handed
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
            res.set_body(&serde_json::json!({ "requestId": ctx.request_id() }))
        }
    }

    fn test_handlers() -> Handlers {
        Handlers::new()
            .with("/task/{taskId}", Task)
            .with("/whoami", Whoami)
            .with("/files/{proxy+}", Task)
    }

    fn test_config() -> Config {
        Config::load_from("does-not-exist/proxy-router").unwrap()
    }

    fn peer() -> SocketAddr {
        "10.0.0.7:51000".parse().unwrap()
    }

    fn parts(method: &str, uri: &str) -> Parts {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .header("X-Trace", "a")
            .header("X-Trace", "b")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(ToString::to_string).collect()
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Serve `config` on an ephemeral port through the regular accept path
    async fn spawn_host(config: Config) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(HostState::new(config, test_handlers()));

        tokio::spawn(async move {
            while let Ok((stream, peer_addr)) = listener.accept().await {
                connection::accept_connection(stream, peer_addr, &state);
            }
        });
        addr
    }

    async fn send(addr: SocketAddr, request: Request<Full<Bytes>>) -> (StatusCode, String) {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(conn);

        let response = sender.send_request(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_event(body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method("POST")
            .uri(crate::config::DEFAULT_EVENT_PATH)
            .header("x-amzn-requestid", "hdr-1")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[test]
    fn test_parse_query_decodes_and_keeps_repeats() {
        let (single, multi) = parse_query("name=a%20b&tag=x&tag=y&flag");
        assert_eq!(single.first("name"), Some("a b"));
        assert_eq!(single.first("tag"), Some("y"));
        assert_eq!(single.first("flag"), Some(""));
        assert_eq!(multi.all("tag"), Some(vec!["x", "y"]));
    }

    #[test]
    fn test_proxy_request_from_parts() {
        let ctx = InvocationContext::new("req-9");
        let parts = parts("POST", "/echo?x=1");
        let req = proxy_request_from_parts(&parts, br#"{"a":1}"#, &ctx, peer(), &test_handlers());

        assert_eq!(req.resource_key(), "/echo");
        assert_eq!(req.path(), "/echo");
        assert_eq!(req.method(), "POST");
        assert_eq!(req.query_parameter("x"), Some("1"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.multi_value_headers.get_all("x-trace").iter().count(), 2);
        assert_eq!(req.body(), Some(r#"{"a":1}"#));
        assert_eq!(req.request_id(), Some("req-9"));
        assert_eq!(req.request_context.identity.source_ip.as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn test_empty_body_is_none() {
        let ctx = InvocationContext::background();
        let req = proxy_request_from_parts(&parts("GET", "/ping"), b"", &ctx, peer(), &Handlers::new());
        assert!(req.body().is_none());
        assert_eq!(req.resource_key(), "/ping");
    }

    #[test]
    fn test_direct_path_resolves_template_key() {
        let ctx = InvocationContext::background();
        let req = proxy_request_from_parts(&parts("GET", "/task/5"), b"", &ctx, peer(), &test_handlers());
        assert_eq!(req.resource_key(), "/task/{taskId}");
        assert_eq!(req.path(), "/task/5");
        assert_eq!(req.path_parameter("taskId"), Some("5"));
    }

    #[test]
    fn test_direct_path_is_percent_decoded() {
        let ctx = InvocationContext::background();
        let handlers = test_handlers();

        let req = proxy_request_from_parts(&parts("GET", "/task/%7BtaskId%7D"), b"", &ctx, peer(), &handlers);
        assert_eq!(req.resource_key(), "/task/{taskId}");
        assert_eq!(req.path_parameter("taskId"), None);

        let req = proxy_request_from_parts(&parts("GET", "/task/a%20b"), b"", &ctx, peer(), &handlers);
        assert_eq!(req.path_parameter("taskId"), Some("a b"));
    }

    #[test]
    fn test_resolve_resource_rules() {
        let handlers = test_handlers();

        let (key, params) = resolve_resource(&handlers, "/files/a/b.txt", &segments("/files/a/b.txt"));
        assert_eq!(key, "/files/{proxy+}");
        assert_eq!(params["proxy"], "a/b.txt");

        let (key, params) = resolve_resource(&handlers, "/task/", &segments("/task/"));
        assert_eq!(key, "/task/");
        assert!(params.is_empty());

        let (key, _) = resolve_resource(&handlers, "/task/1/extra", &segments("/task/1/extra"));
        assert_eq!(key, "/task/1/extra");
    }

    #[test]
    fn test_literal_segments_beat_parameters() {
        let handlers = Handlers::new()
            .with("/task/{taskId}", Task)
            .with("/task/latest", Whoami);
        let (key, params) = resolve_resource(&handlers, "/task/latest", &segments("/task/latest"));
        assert_eq!(key, "/task/latest");
        assert!(params.is_empty());

        let handlers = Handlers::new()
            .with("/{kind}/{id}", Task)
            .with("/task/{taskId}", Task);
        let (key, _) = resolve_resource(&handlers, "/task/9", &segments("/task/9"));
        assert_eq!(key, "/task/{taskId}");
    }

    #[tokio::test]
    async fn test_into_http_response_copies_envelope() {
        let outcome = Handlers::new().route(&ProxyRequest::new("/ping", Method::GET));
        let response = into_http_response(outcome.response);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Allow"], "GET");
        assert_eq!(response.headers()["Accept"], "application/json");
        assert_eq!(body_string(response).await, r#"{"message":"OK"}"#);
    }

    #[tokio::test]
    async fn test_invalid_status_becomes_bad_gateway() {
        let response = into_http_response(ProxyResponse::new());
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_string(response).await,
            r#"{"message": "Internal server error"}"#
        );
    }

    #[tokio::test]
    async fn test_event_response_success() {
        let req = ProxyRequest::new("/task/{taskId}", Method::GET).with_path_parameter("taskId", "3");
        let response = event_response(test_handlers().route(&req));

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(FUNCTION_ERROR_HEADER).is_none());
        let payload: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(payload["statusCode"], 200);
        assert_eq!(payload["body"], r#"{"taskId":"3"}"#);
        assert_eq!(payload["headers"]["allow"], "GET");
    }

    #[tokio::test]
    async fn test_event_response_error_payload() {
        let response = event_response(test_handlers().route(&ProxyRequest::new("/nope", Method::GET)));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[FUNCTION_ERROR_HEADER], "Unhandled");
        let payload: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(payload["errorMessage"], "undeclared handler `/nope`");
        assert_eq!(payload["errorType"], "UndeclaredRoute");
    }

    #[tokio::test]
    async fn test_event_response_invalid_header_is_an_error() {
        let mut response = ProxyResponse::new();
        response.set_status(200).unwrap();
        response.set_header("Bad Header", "x");

        let response = event_response(RouteOutcome::ok(response));
        assert_eq!(response.headers()[FUNCTION_ERROR_HEADER], "Unhandled");
        let payload: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(payload["errorType"], "InvalidHeader");
    }

    #[tokio::test]
    async fn test_status_response_uses_table() {
        let response = status_response(413);
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_string(response).await,
            r#"{"message":"Request Entity Too Large"}"#
        );
    }

    #[tokio::test]
    async fn test_host_rejects_malformed_event() {
        let addr = spawn_host(test_config()).await;
        let (status, body) = send(addr, post_event("{bad")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message":"Bad Request"}"#);
    }

    #[tokio::test]
    async fn test_host_rejects_oversize_body() {
        let mut config = test_config();
        config.invoke.max_body_size = 8;
        let addr = spawn_host(config).await;

        let (status, body) = send(addr, post_event(r#"{"resource": "/whoami"}"#)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, r#"{"message":"Request Entity Too Large"}"#);
    }

    #[tokio::test]
    async fn test_host_without_direct_routes_is_404() {
        let mut config = test_config();
        config.invoke.direct_routes = false;
        let addr = spawn_host(config).await;

        let (status, body) = send(addr, get("/task/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"message":"Not Found"}"#);

        let event = r#"{"resource": "/task/{taskId}", "httpMethod": "GET",
            "pathParameters": {"taskId": "1"}, "requestContext": {"httpMethod": "GET"}}"#;
        let (status, body) = send(addr, post_event(event)).await;
        assert_eq!(status, StatusCode::OK);
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["body"], r#"{"taskId":"1"}"#);
    }

    #[tokio::test]
    async fn test_host_direct_route_reaches_template() {
        let addr = spawn_host(test_config()).await;
        let (status, body) = send(addr, get("/task/5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"taskId":"5"}"#);
    }

    #[tokio::test]
    async fn test_host_event_request_id_precedence() {
        let addr = spawn_host(test_config()).await;

        let event = r#"{"resource": "/whoami", "httpMethod": "GET",
            "requestContext": {"httpMethod": "GET", "requestId": "gw-123"}}"#;
        let (_, body) = send(addr, post_event(event)).await;
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["body"], r#"{"requestId":"gw-123"}"#);

        let event = r#"{"resource": "/whoami", "httpMethod": "GET",
            "requestContext": {"httpMethod": "GET"}}"#;
        let (_, body) = send(addr, post_event(event)).await;
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["body"], r#"{"requestId":"hdr-1"}"#);
    }
}
