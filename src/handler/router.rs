//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! dispatch to the static file responder, and access logging.

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context handed to the static file responder.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub config: &'a ServerConfig,
}

/// Main entry point for HTTP request handling.
///
/// Per-request errors are translated into status responses here or below;
/// nothing propagates out, so the connection task never sees a failure
/// from request handling itself.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();

    let response = match method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: &path,
                is_head: method == Method::HEAD,
                config: &config,
            };
            static_files::serve_path(&ctx).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    if config.access_log {
        let body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.http_version = format!("{version:?}").replace("HTTP/", "");
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, config.log_format);
    }

    Ok(response)
}
