//! Shared fixtures: throwaway directory trees under the system temp dir.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vhttpd::vhost::VirtualHosts;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A directory removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "vhttpd-{}-{}-{}",
            label,
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `contents` at `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let file = self.path.join(rel);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, contents).unwrap();
        file
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.path.join(rel);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A sandbox containing `www/` (doc root for `a.com`) with an index page,
/// plus `secret.txt` next to it and a sibling `www2/` directory.
pub struct Site {
    pub dir: TempDir,
    pub hosts: Arc<VirtualHosts>,
}

pub const INDEX_BODY: &[u8] = b"<html><body>hello</body></html>\n";

impl Site {
    pub fn new(label: &str) -> Self {
        let dir = TempDir::new(label);
        dir.write("www/index.html", INDEX_BODY);
        dir.write("www/style.css", b"body { color: red; }\n");
        dir.write("www/docs/index.html", b"docs\n");
        dir.write("secret.txt", b"top secret\n");
        dir.write("www2/secret.txt", b"sibling secret\n");

        let hosts = VirtualHosts::new([("a.com".to_string(), dir.path().join("www"))]).unwrap();
        Self {
            dir,
            hosts: Arc::new(hosts),
        }
    }

    pub fn root(&self) -> PathBuf {
        self.hosts.root("a.com").unwrap().to_path_buf()
    }
}
