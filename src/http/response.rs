//! Proxy response module
//!
//! The JSON response envelope. Created empty per invocation, mutated by the
//! dispatcher and by resource callbacks, returned once. Header names keep the
//! case they were set with; the platform's `ApiGatewayProxyResponse` is only
//! built when the envelope leaves the process.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use aws_lambda_events::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::collections::HashMap;

use super::status::status_message;
use crate::error::RouteError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW: &str = "Allow";
pub const ACCEPT: &str = "Accept";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status_code: u16,
    /// Header names are stored exactly as supplied
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Body of a standardized status response
#[derive(Serialize)]
struct StatusBody<'a> {
    message: &'a str,
}

impl ProxyResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Serialize `value` as the JSON body
    ///
    /// On failure the body is left empty and the error is returned; the
    /// content type is set either way.
    pub fn set_body<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), RouteError> {
        self.set_header(CONTENT_TYPE, APPLICATION_JSON);

        match serde_json::to_string(value) {
            Ok(json) => {
                self.body = json;
                Ok(())
            }
            Err(e) => {
                self.body.clear();
                Err(RouteError::Serialization(e))
            }
        }
    }

    /// Set the status and the standardized `{"message": ...}` body
    ///
    /// Codes missing from the status table produce an empty message.
    pub fn set_status(&mut self, code: u16) -> Result<(), RouteError> {
        self.status_code = code;
        self.set_body(&StatusBody {
            message: status_message(code).unwrap_or_default(),
        })
    }
}

impl TryFrom<ProxyResponse> for ApiGatewayProxyResponse {
    type Error = RouteError;

    /// Fails on a header name or value that cannot travel over HTTP
    fn try_from(response: ProxyResponse) -> Result<Self, Self::Error> {
        let mut headers = HeaderMap::with_capacity(response.headers.len());
        for (name, value) in response.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RouteError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| RouteError::InvalidHeader { name })?;
            headers.insert(header_name, header_value);
        }

        Ok(Self {
            status_code: i64::from(response.status_code),
            headers,
            multi_value_headers: HeaderMap::new(),
            body: Some(Body::Text(response.body)),
            is_base64_encoded: response.is_base64_encoded,
        })
    }
}
