//! Maps a request's host and URL onto a file inside that host's document root.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::http::request::Request;
use crate::vhost::VirtualHosts;

/// File served for URLs naming a directory.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute, canonical path of a regular file inside the document root
    Found(PathBuf),
    NotFound,
}

#[derive(Clone)]
pub struct Router {
    hosts: Arc<VirtualHosts>,
}

impl Router {
    pub fn new(hosts: Arc<VirtualHosts>) -> Self {
        Self { hosts }
    }

    pub async fn resolve(&self, request: &Request) -> Resolution {
        let Some(root) = self.hosts.root(&request.host) else {
            tracing::debug!(host = %request.host, "unknown virtual host");
            return Resolution::NotFound;
        };

        let Some(target) = lexical_target(root, &request.url) else {
            tracing::debug!(url = %request.url, "path escapes document root");
            return Resolution::NotFound;
        };

        // Canonicalizing follows symlinks, so containment is checked again.
        let canonical = match tokio::fs::canonicalize(&target).await {
            Ok(path) => path,
            Err(_) => return Resolution::NotFound,
        };
        if !is_contained(root, &canonical) {
            tracing::debug!(path = %canonical.display(), "symlink escapes document root");
            return Resolution::NotFound;
        }

        match tokio::fs::metadata(&canonical).await {
            Ok(meta) if meta.is_file() => Resolution::Found(canonical),
            _ => Resolution::NotFound,
        }
    }
}

/// Joins `url` onto `root` and folds `.`/`..` segments without touching the
/// filesystem. A trailing `/` selects [`INDEX_FILE`].
///
/// Returns `None` when the result would lie outside `root`.
pub fn lexical_target(root: &Path, url: &str) -> Option<PathBuf> {
    let mut relative = url.trim_start_matches('/').to_string();
    if url.ends_with('/') {
        relative.push_str(INDEX_FILE);
    }

    let mut path = root.to_path_buf();
    for component in Path::new(&relative).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::ParentDir => {
                path.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    is_contained(root, &path).then_some(path)
}

/// Boundary-aware containment: `path` equals `root` or continues it with a
/// separator. `/srv/www2/x` is not inside `/srv/www`.
pub fn is_contained(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root).is_ok()
}
