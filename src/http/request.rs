//! Proxy request module
//!
//! Inbound view of an API Gateway proxy event. The event itself is the
//! platform's `ApiGatewayProxyRequest`; this wrapper adds the accessors the
//! router needs. The resource key is taken verbatim from the event and path
//! parameters are carried through unparsed.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_lambda_events::http::{HeaderName, HeaderValue, Method};
use aws_lambda_events::query_map::QueryMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProxyRequest(ApiGatewayProxyRequest);

impl ProxyRequest {
    /// Request for `resource` whose concrete path is the resource key itself
    pub fn new(resource: impl Into<String>, method: Method) -> Self {
        let resource = resource.into();
        Self(ApiGatewayProxyRequest {
            path: Some(resource.clone()),
            resource: Some(resource),
            http_method: method,
            ..ApiGatewayProxyRequest::default()
        })
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.0.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.path_parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.0.multi_value_headers.append(name.clone(), value.clone());
        self.0.headers.insert(name, value);
        self
    }

    /// Replaces both query maps with the given single values
    #[must_use]
    pub fn with_query_parameters<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params: HashMap<String, Vec<String>> = params
            .into_iter()
            .map(|(k, v)| (k.into(), vec![v.into()]))
            .collect();
        self.0.query_string_parameters = QueryMap::from(params.clone());
        self.0.multi_value_query_string_parameters = QueryMap::from(params);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.0.body = Some(body.into());
        self
    }

    /// Key used for the registry lookup, no normalization applied
    pub fn resource_key(&self) -> &str {
        self.0.resource.as_deref().unwrap_or_default()
    }

    /// Method exactly as received; `get` stays `get`
    pub fn method(&self) -> &str {
        self.0.http_method.as_str()
    }

    /// Concrete request path, e.g. `/task/42`
    pub fn path(&self) -> &str {
        self.0.path.as_deref().unwrap_or_default()
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.0.path_parameters.get(name).map(String::as_str)
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.0.query_string_parameters.first(name)
    }

    /// Header lookup, names compare case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.0.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> Option<&str> {
        self.0.body.as_deref()
    }

    /// Gateway request id from the event's request context
    pub fn request_id(&self) -> Option<&str> {
        self.0
            .request_context
            .request_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    pub fn into_inner(self) -> ApiGatewayProxyRequest {
        self.0
    }
}

impl From<ApiGatewayProxyRequest> for ProxyRequest {
    fn from(event: ApiGatewayProxyRequest) -> Self {
        Self(event)
    }
}

impl Deref for ProxyRequest {
    type Target = ApiGatewayProxyRequest;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProxyRequest {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::http::header::CONTENT_TYPE;

    #[test]
    fn test_parse_event_with_null_maps() {
        let event = r#"{
            "resource": "/task/{taskId}",
            "path": "/task/1",
            "httpMethod": "GET",
            "headers": null,
            "multiValueHeaders": null,
            "queryStringParameters": null,
            "multiValueQueryStringParameters": null,
            "pathParameters": {"taskId": "1"},
            "stageVariables": null,
            "requestContext": {"stage": "dev", "requestId": "c6af9ac6", "httpMethod": "GET"},
            "body": null,
            "isBase64Encoded": false
        }"#;
        let req: ProxyRequest = serde_json::from_str(event).unwrap();
        assert_eq!(req.resource_key(), "/task/{taskId}");
        assert_eq!(req.path(), "/task/1");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path_parameter("taskId"), Some("1"));
        assert!(req.headers.is_empty());
        assert!(req.query_string_parameters.is_empty());
        assert!(req.body().is_none());
        assert_eq!(req.request_context.stage.as_deref(), Some("dev"));
        assert_eq!(req.request_id(), Some("c6af9ac6"));
    }

    #[test]
    fn test_parse_event_keeps_method_case() {
        let req: ProxyRequest = serde_json::from_str(
            r#"{"resource": "/ping", "httpMethod": "get", "requestContext": {"httpMethod": "get"}}"#,
        )
        .unwrap();
        assert_eq!(req.resource_key(), "/ping");
        assert_eq!(req.method(), "get");
        assert_eq!(req.path(), "");
        assert!(req.request_id().is_none());
    }

    #[test]
    fn test_resource_key_is_verbatim() {
        let req = ProxyRequest::new("/Task/{taskId}/", Method::GET);
        assert_eq!(req.resource_key(), "/Task/{taskId}/");
        assert_eq!(req.path(), "/Task/{taskId}/");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = ProxyRequest::new("/echo", Method::POST)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_query_parameters() {
        let req = ProxyRequest::new("/echo", Method::GET).with_query_parameters([("q", "rust")]);
        assert_eq!(req.query_parameter("q"), Some("rust"));
        assert_eq!(req.query_parameter("missing"), None);
    }
}
