// Configuration types module
// Defines the invocation host's configuration structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub invoke: InvokeConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads, CPU count when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// error, warn, info or debug
    pub level: String,
    /// Log one line per routed invocation
    pub access_log: bool,
    /// Invocation log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection handling configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound for serving one connection, in seconds
    pub read_timeout: u64,
    /// Deadline handed to resources through the invocation context
    pub invocation_timeout_ms: u64,
    #[serde(default)]
    pub max_connections: Option<usize>,
    pub backlog: u32,
}

/// Invocation endpoint configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct InvokeConfig {
    /// Path accepting `POST`ed proxy events
    pub event_path: String,
    pub max_body_size: u64,
    /// Route plain HTTP requests using their path as the resource key
    pub direct_routes: bool,
}
