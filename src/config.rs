// Configuration module
// Holds everything the responder needs, resolved once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Port used when no positional argument is given.
pub const DEFAULT_PORT: u16 = 8012;

/// The index file this server exists to prefer.
pub const PREFERRED_INDEX: &str = "index-sqlite.html";

/// Conventional fallback index, tried after the preferred one.
pub const FALLBACK_INDEX: &str = "index.html";

/// Access log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Common,
    Json,
}

/// Server configuration, fixed for the process lifetime.
///
/// The served root and index filenames are explicit fields rather than
/// ambient process state so that path resolution can be unit tested
/// without spawning a server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Canonicalized directory all request paths resolve under.
    pub root: PathBuf,
    /// Index filenames tried in order when a directory is requested.
    pub index_files: Vec<String>,
    pub access_log: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Build the configuration for the given port, serving the current
    /// working directory.
    pub fn from_cwd(port: u16) -> std::io::Result<Self> {
        let root = std::env::current_dir()?.canonicalize()?;
        Ok(Self {
            host: "0.0.0.0".to_string(),
            port,
            root,
            index_files: vec![PREFERRED_INDEX.to_string(), FALLBACK_INDEX.to_string()],
            access_log: true,
            log_format: log_format_from_env(),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// `DEVHTTPD_LOG_FORMAT=json` switches the access log to JSON lines.
fn log_format_from_env() -> LogFormat {
    match std::env::var("DEVHTTPD_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Common,
    }
}
