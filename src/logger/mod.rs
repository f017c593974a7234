//! Logger module
//!
//! Provides logging utilities for the router and the local host including:
//! - Host lifecycle logging
//! - Invocation logging with multiple formats
//! - Routing rejections, errors and warnings
//! - File-based logging support

mod format;
pub mod writer;

pub use format::InvocationLogEntry;
pub use writer::Level;

use crate::config::Config;
use crate::error::RouteError;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level: Level = config.logging.level.parse().unwrap_or_else(|e| {
        eprintln!("[WARN] {e}, falling back to info");
        Level::Info
    });
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    if !writer::enabled(Level::Info) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(level: Level, message: &str) {
    if !writer::enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &[&str]) {
    write_info("======================================");
    write_info("Invocation host started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!(
        "Event endpoint: POST http://{addr}{}",
        config.invoke.event_path
    ));
    if config.invoke.direct_routes {
        write_info("Direct routing: enabled (request path is the resource key)");
    }
    write_info(&format!("Registered resources: {}", routes.len()));
    for route in routes {
        write_info(&format!("  - {route}"));
    }
    write_info("======================================\n");
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Stopping, {active_connections} connection(s) still active"
    ));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(Level::Error, &format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(Level::Warn, &format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if writer::enabled(Level::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

/// Request turned away by the router (unknown key or method)
pub fn log_route_rejected(err: &RouteError) {
    write_error(Level::Warn, &format!("[Route] {err}"));
}

/// Log formatted invocation entry
pub fn log_invocation(entry: &InvocationLogEntry, format: &str) {
    write_info(&entry.format(format));
}
