//! Invocation log format module
//!
//! Supported formats:
//! - `combined`: access-log style line with request id and routing error
//! - `common`: access-log style line without the extras
//! - `json`: one JSON object per line
//! - custom patterns with `$variable` placeholders

use chrono::{DateTime, Local};
use serde::Serialize;

/// One routed invocation
#[derive(Debug, Clone, Serialize)]
pub struct InvocationLogEntry {
    pub request_id: String,
    pub time: DateTime<Local>,
    /// Peer address for direct requests, `-` otherwise
    pub remote_addr: String,
    pub method: String,
    /// Resource key the request was routed on
    pub resource: String,
    /// Concrete path, may differ from the resource key
    pub path: String,
    pub status: u16,
    pub body_bytes: usize,
    /// Routing or callback error, if any
    pub error: Option<String>,
    pub duration_us: u64,
}

impl InvocationLogEntry {
    pub fn new(request_id: String, method: String, resource: String) -> Self {
        Self {
            request_id,
            time: Local::now(),
            remote_addr: "-".to_string(),
            method,
            path: resource.clone(),
            resource,
            status: 0,
            body_bytes: 0,
            error: None,
            duration_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// `$remote_addr - [$time_local] "$method $resource" $status $body_bytes $request_id $duration "$error"`
    fn format_combined(&self) -> String {
        format!(
            "{} - [{}] \"{} {}\" {} {} {} {:.3} \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.resource,
            self.status,
            self.body_bytes,
            if self.request_id.is_empty() { "-" } else { self.request_id.as_str() },
            self.duration_secs(),
            self.error.as_deref().unwrap_or("-"),
        )
    }

    fn format_common(&self) -> String {
        format!(
            "{} - [{}] \"{} {}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.resource,
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"log_error":"{}"}}"#, e.to_string().replace('"', "'"))
        })
    }

    /// Custom pattern
    ///
    /// Variables: `$request_id`, `$time_local`, `$time_iso8601`,
    /// `$remote_addr`, `$method`, `$resource`, `$path`, `$status`,
    /// `$body_bytes`, `$duration`, `$error`. The pattern is scanned once, so a
    /// value that itself contains `$name` is written as is. Unknown names are
    /// kept literally.
    fn format_custom(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 64);
        let mut rest = pattern;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];
            let len = tail
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(tail.len());
            let name = &tail[..len];

            match self.variable(name) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('$');
                    out.push_str(name);
                }
            }
            rest = &tail[len..];
        }

        out.push_str(rest);
        out
    }

    fn variable(&self, name: &str) -> Option<String> {
        let value = match name {
            "request_id" => self.request_id.clone(),
            "time_local" => self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            "time_iso8601" => self.time.to_rfc3339(),
            "remote_addr" => self.remote_addr.clone(),
            "method" => self.method.clone(),
            "resource" => self.resource.clone(),
            "path" => self.path.clone(),
            "status" => self.status.to_string(),
            "body_bytes" => self.body_bytes.to_string(),
            "duration" => format!("{:.3}", self.duration_secs()),
            "error" => self.error.clone().unwrap_or_else(|| "-".to_string()),
            _ => return None,
        };
        Some(value)
    }

    #[allow(clippy::cast_precision_loss)]
    fn duration_secs(&self) -> f64 {
        self.duration_us as f64 / 1_000_000.0
    }
}
