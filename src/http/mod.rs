//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the request handler: MIME detection
//! and canned status responses, decoupled from path resolution.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
};
