//! Static file serving module
//!
//! Turns a [`Resolved`](crate::handler::resolve::Resolved) target into an
//! HTTP response: streams file bytes, renders directory listings, and maps
//! resolution errors onto status responses.

use crate::handler::resolve::{resolve, Resolved, ResolveError};
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Resolve the request path and serve whatever it maps to.
pub async fn serve_path(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    match resolve(ctx.path, &ctx.config.root, &ctx.config.index_files) {
        Ok(Resolved::File(path)) => serve_file(ctx, &path).await,
        Ok(Resolved::Listing(dir)) => serve_listing(ctx, &dir).await,
        Ok(Resolved::Redirect(location)) => http::build_redirect_response(&location),
        Err(ResolveError::NotFound) => http::build_404_response(),
        Err(ResolveError::Forbidden) => {
            logger::log_warning(&format!("Blocked path escaping served root: {}", ctx.path));
            http::build_403_response()
        }
        Err(ResolveError::Unreadable(e)) => {
            logger::log_error(&format!("Cannot stat '{}': {e}", ctx.path));
            http::build_500_response()
        }
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type, ctx.is_head)
        }
        // The file vanished between resolution and read.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match render_listing(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
            http::build_500_response()
        }
    }
}

/// Render a plain directory listing: entries as relative links, sorted by
/// name, directories suffixed with `/`. No styling.
pub async fn render_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = html_escape(request_path);
    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Directory listing for {title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n"));
    for (name, is_dir) in &entries {
        let display = if *is_dir {
            format!("{name}/")
        } else {
            name.clone()
        };
        html.push_str(&format!(
            "<li><a href=\"{href}\">{text}</a></li>\n",
            href = html_escape(&display),
            text = html_escape(&display),
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn listing_links_entries_sorted() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("b.txt"), "b").unwrap();
        std_fs::write(dir.path().join("a.txt"), "a").unwrap();
        std_fs::create_dir(dir.path().join("sub")).unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        let a = html.find("a.txt").unwrap();
        let b = html.find("b.txt").unwrap();
        assert!(a < b);
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
        assert!(html.contains("Directory listing for /"));
    }

    #[tokio::test]
    async fn listing_escapes_entry_names() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("a<b>.txt"), "x").unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        assert!(html.contains("a&lt;b&gt;.txt"));
        assert!(!html.contains("a<b>.txt"));
    }

    #[tokio::test]
    async fn listing_missing_directory_errors() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone");
        assert!(render_listing(&gone, "/gone/").await.is_err());
    }
}
