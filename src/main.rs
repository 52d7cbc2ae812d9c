use devhttpd::config::{ServerConfig, DEFAULT_PORT};
use devhttpd::{logger, server};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let port = match parse_port(std::env::args().nth(1)) {
        Ok(p) => p,
        Err(arg) => {
            eprintln!("Invalid port '{arg}'");
            eprintln!("Usage: devhttpd [port]   (default: {DEFAULT_PORT})");
            return ExitCode::from(2);
        }
    };

    let config = match ServerConfig::from_cwd(port) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cannot resolve working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(config))
}

/// Parse the single optional positional argument: the listening port.
fn parse_port(arg: Option<String>) -> Result<u16, String> {
    match arg {
        None => Ok(DEFAULT_PORT),
        Some(s) => s.parse::<u16>().map_err(|_| s),
    }
}

async fn run(config: ServerConfig) -> ExitCode {
    let addr = match config.socket_addr() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Bind failure is fatal before serving begins.
    let listener = match server::create_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    logger::log_server_start(&addr, &config);

    server::serve(listener, Arc::new(config)).await;
    ExitCode::SUCCESS
}
