// Connection handling module
// Serves a single accepted TCP connection over HTTP/1.1.

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;

/// Serve one connection in a spawned task.
///
/// Each request on the connection goes through the request handler with a
/// shared, read-only config. If the client disconnects mid-transfer hyper
/// aborts the connection future and the task ends, dropping any open file
/// state with it.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&config);
                async move { handler::handle_request(req, peer_addr, config).await }
            }),
        );

        if let Err(err) = conn.await {
            // Early client disconnects are routine for a dev server.
            logger::log_connection_error(&err);
        }
    });
}
