//! devhttpd - a small HTTP server for local development.
//!
//! Serves the working directory it is launched from, with one twist over a
//! plain static file server: a directory that contains `index-sqlite.html`
//! serves that file as its index, ahead of `index.html` and ahead of the
//! auto-generated directory listing.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
