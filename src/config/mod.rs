// Configuration module entry point
// Layers config file, environment and compiled defaults for the invocation host

mod types;

use std::net::SocketAddr;

pub use types::{Config, InvokeConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Endpoint used by the Lambda runtime interface emulator
pub const DEFAULT_EVENT_PATH: &str = "/2015-03-31/functions/function/invocations";

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error; `ROUTER__SECTION__KEY` environment
    /// variables override file values.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.invocation_timeout_ms", 3000)?
            .set_default("performance.backlog", 128)?
            .set_default("invoke.event_path", DEFAULT_EVENT_PATH)?
            .set_default("invoke.max_body_size", 6_291_456)? // 6MB, the synchronous payload cap
            .set_default("invoke.direct_routes", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("ROUTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
