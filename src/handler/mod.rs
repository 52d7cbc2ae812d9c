//! Request handler module
//!
//! Path resolution, static file serving and request dispatch.

pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use resolve::{resolve, Resolved, ResolveError};
pub use router::handle_request;
