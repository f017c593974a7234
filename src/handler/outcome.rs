//! Invocation outcome
//!
//! A response is always produced; an error, when present, travels next to it.

use crate::error::RouteError;
use crate::http::ProxyResponse;

#[derive(Debug)]
pub struct RouteOutcome {
    pub response: ProxyResponse,
    pub error: Option<RouteError>,
}

impl RouteOutcome {
    pub const fn ok(response: ProxyResponse) -> Self {
        Self {
            response,
            error: None,
        }
    }

    pub const fn failed(response: ProxyResponse, error: RouteError) -> Self {
        Self {
            response,
            error: Some(error),
        }
    }

    /// Pair a response with the result of the callback that filled it
    pub fn from_result(response: ProxyResponse, result: Result<(), RouteError>) -> Self {
        Self {
            response,
            error: result.err(),
        }
    }

    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub const fn status_code(&self) -> u16 {
        self.response.status_code
    }

    pub fn into_parts(self) -> (ProxyResponse, Option<RouteError>) {
        (self.response, self.error)
    }

    /// Drop the response when an error is present
    pub fn into_result(self) -> Result<ProxyResponse, RouteError> {
        match self.error {
            None => Ok(self.response),
            Some(err) => Err(err),
        }
    }
}
