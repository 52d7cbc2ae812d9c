//! Path resolution module
//!
//! Maps an untrusted request path to a concrete filesystem target under
//! the served root. This is where the one rule this server exists for
//! lives: a directory containing `index-sqlite.html` serves that file as
//! its index, ahead of `index.html` and ahead of the generated listing.
//!
//! Resolution is a pure function of the request path and the filesystem;
//! nothing persists across requests.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a resolution attempt can produce.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Neither the candidate path nor any index fallback exists.
    #[error("no such file or directory")]
    NotFound,

    /// The normalized path escapes the served root.
    #[error("path escapes the served root")]
    Forbidden,

    /// The target exists but cannot be read.
    #[error("unreadable path: {0}")]
    Unreadable(#[source] io::Error),
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Stream this regular file.
    File(PathBuf),
    /// Render a listing of this directory.
    Listing(PathBuf),
    /// Directory requested without a trailing slash; redirect to this
    /// location so relative links inside the index page resolve.
    Redirect(String),
}

/// Resolve `request_path` against `root`, applying the index rule.
///
/// * A direct file request returns that file, bypassing the index rule.
/// * A directory request tries `index_files` in order, then falls back
///   to a listing.
/// * Traversal outside `root` fails with [`ResolveError::Forbidden`].
pub fn resolve(
    request_path: &str,
    root: &Path,
    index_files: &[String],
) -> Result<Resolved, ResolveError> {
    let decoded = percent_decode(request_path).ok_or(ResolveError::Forbidden)?;
    if decoded.contains('\0') {
        return Err(ResolveError::Forbidden);
    }

    // Collapse "." and ".." lexically; popping past the root is traversal.
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(ResolveError::Forbidden);
                }
            }
            s => segments.push(s),
        }
    }

    let mut candidate = root.to_path_buf();
    for segment in &segments {
        candidate.push(segment);
    }

    let metadata = match std::fs::metadata(&candidate) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ResolveError::NotFound),
        Err(e) => return Err(ResolveError::Unreadable(e)),
    };

    // Symlinks can point anywhere; the canonical path must stay under the
    // (already canonical) root.
    let canonical = candidate.canonicalize().map_err(ResolveError::Unreadable)?;
    if !canonical.starts_with(root) {
        return Err(ResolveError::Forbidden);
    }

    if metadata.is_file() {
        return Ok(Resolved::File(candidate));
    }
    if !metadata.is_dir() {
        // Sockets, fifos and friends are not servable.
        return Err(ResolveError::NotFound);
    }

    if !decoded.ends_with('/') && !segments.is_empty() {
        return Ok(Resolved::Redirect(format!("{request_path}/")));
    }

    for index in index_files {
        let index_path = candidate.join(index);
        if index_path.is_file() {
            return Ok(Resolved::File(index_path));
        }
    }

    Ok(Resolved::Listing(candidate))
}

/// Decode percent escapes in a request path.
///
/// Returns `None` for truncated or non-hex escapes and for sequences
/// that do not form valid UTF-8.
pub fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FALLBACK_INDEX, PREFERRED_INDEX};
    use std::fs;
    use tempfile::TempDir;

    fn index_files() -> Vec<String> {
        vec![PREFERRED_INDEX.to_string(), FALLBACK_INDEX.to_string()]
    }

    /// Fixture tree:
    ///   a/index-sqlite.html
    ///   a/index.html
    ///   b/index.html
    ///   c/           (empty)
    ///   file.txt
    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("a").join(PREFERRED_INDEX), "<h1>Hi</h1>").unwrap();
        fs::write(root.join("a").join(FALLBACK_INDEX), "plain index").unwrap();
        fs::create_dir(root.join("b")).unwrap();
        fs::write(root.join("b").join(FALLBACK_INDEX), "b index").unwrap();
        fs::create_dir(root.join("c")).unwrap();
        fs::write(root.join("file.txt"), "hello").unwrap();
        dir
    }

    fn canonical_root(dir: &TempDir) -> PathBuf {
        // macOS puts tempdirs behind /private symlinks.
        dir.path().canonicalize().unwrap()
    }

    #[test]
    fn preferred_index_wins_over_fallback() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/a/", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::File(root.join("a").join(PREFERRED_INDEX)));
    }

    #[test]
    fn fallback_index_when_preferred_absent() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/b/", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::File(root.join("b").join(FALLBACK_INDEX)));
    }

    #[test]
    fn empty_directory_falls_back_to_listing() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/c/", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::Listing(root.join("c")));
    }

    #[test]
    fn direct_file_request_bypasses_index_rule() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/a/index.html", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::File(root.join("a").join(FALLBACK_INDEX)));
    }

    #[test]
    fn direct_request_for_preferred_index_is_idempotent() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let direct = resolve("/a/index-sqlite.html", &root, &index_files()).unwrap();
        let via_dir = resolve("/a/", &root, &index_files()).unwrap();
        assert_eq!(direct, via_dir);
    }

    #[test]
    fn directory_without_trailing_slash_redirects() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/a", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::Redirect("/a/".to_string()));
    }

    #[test]
    fn root_request_never_redirects() {
        let dir = fixture();
        let root = canonical_root(&dir);
        // Root has no index file, so the listing is the fallback.
        let resolved = resolve("/", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::Listing(root.clone()));
    }

    #[test]
    fn traversal_is_forbidden() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let err = resolve("/../../etc/passwd", &root, &index_files()).unwrap_err();
        assert!(matches!(err, ResolveError::Forbidden));
    }

    #[test]
    fn encoded_traversal_is_forbidden() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let err = resolve("/%2e%2e/%2e%2e/etc/passwd", &root, &index_files()).unwrap_err();
        assert!(matches!(err, ResolveError::Forbidden));
    }

    #[test]
    fn interior_dotdot_staying_inside_root_is_allowed() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let resolved = resolve("/a/../file.txt", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::File(root.join("file.txt")));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let err = resolve("/missing", &root, &index_files()).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[test]
    fn percent_decoded_names_resolve() {
        let dir = fixture();
        let root = canonical_root(&dir);
        fs::write(root.join("with space.txt"), "x").unwrap();
        let resolved = resolve("/with%20space.txt", &root, &index_files()).unwrap();
        assert_eq!(resolved, Resolved::File(root.join("with space.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_root_is_forbidden() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), root.join("leak")).unwrap();
        let err = resolve("/leak", &root, &index_files()).unwrap_err();
        assert!(matches!(err, ResolveError::Forbidden));
    }

    #[test]
    fn decode_rejects_bad_escapes() {
        assert_eq!(percent_decode("/a%2Fb"), Some("/a/b".to_string()));
        assert_eq!(percent_decode("/a%2"), None);
        assert_eq!(percent_decode("/a%zz"), None);
        assert_eq!(percent_decode("/plain"), Some("/plain".to_string()));
    }

    #[test]
    fn nul_byte_is_forbidden() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let err = resolve("/a%00b", &root, &index_files()).unwrap_err();
        assert!(matches!(err, ResolveError::Forbidden));
    }
}
