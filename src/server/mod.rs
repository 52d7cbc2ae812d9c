// Server module entry point
// Listener creation, the accept loop, connection handling and signals.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;
pub use signal::{start_signal_handler, SignalHandler};

use crate::config::ServerConfig;
use crate::logger;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections forever, spawning one task per connection.
///
/// Accept errors are logged and the loop continues; they never take the
/// server down. Runs until the surrounding task is cancelled (used
/// directly by the end-to-end tests, and under a shutdown `select!` by
/// `main`).
pub async fn run_accept_loop(listener: TcpListener, config: Arc<ServerConfig>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::handle_connection(stream, peer_addr, Arc::clone(&config));
            }
            Err(e) => logger::log_accept_error(&e),
        }
    }
}

/// Serve until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, config: Arc<ServerConfig>) {
    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(&signals);

    tokio::select! {
        () = run_accept_loop(listener, config) => {}
        () = signals.shutdown.notified() => {
            logger::log_server_stopped();
        }
    }
}
