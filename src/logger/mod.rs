//! Logger module
//!
//! Logging for the dev server: lifecycle lines on stdout, warnings and
//! errors on stderr, per-request access logging on stdout.

mod format;

pub use format::AccessLogEntry;

use crate::config::{LogFormat, ServerConfig};
use std::net::SocketAddr;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

/// The two startup lines: bound address and the configured index filename.
pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    write_info(&format!(
        "Serving HTTP on {} port {} (http://{}/)",
        addr.ip(),
        addr.port(),
        addr
    ));
    write_info(&format!("Default index file: {}", config.index_files[0]));
}

pub fn log_server_stopped() {
    write_info("\nServer stopped.");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_accept_error(err: &std::io::Error) {
    write_error(&format!("[ERROR] Failed to accept connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: LogFormat) {
    match format {
        LogFormat::Common => write_info(&entry.format_common()),
        LogFormat::Json => write_info(&entry.format_json()),
    }
}
