//! Virtual host table.
//!
//! Built and validated once at startup, then shared read-only by every
//! connection.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

#[derive(Debug, Clone, Default)]
pub struct VirtualHosts {
    roots: HashMap<String, PathBuf>,
}

impl VirtualHosts {
    /// Validates each document root and stores it canonicalized.
    ///
    /// Fails if any root is missing or is not a directory.
    pub fn new<I, P>(entries: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, P)>,
        P: AsRef<Path>,
    {
        let mut roots = HashMap::new();

        for (host, root) in entries {
            let root = root.as_ref();
            let meta = std::fs::metadata(root)
                .with_context(|| format!("doc root {} for host {host}", root.display()))?;
            if !meta.is_dir() {
                bail!("doc root {} for host {host} isn't a directory", root.display());
            }

            let canonical = root
                .canonicalize()
                .with_context(|| format!("canonicalizing {}", root.display()))?;
            tracing::info!(host = %host, root = %canonical.display(), "virtual host");
            roots.insert(host, canonical);
        }

        Ok(Self { roots })
    }

    pub fn from_config(hosts: &BTreeMap<String, PathBuf>) -> anyhow::Result<Self> {
        Self::new(hosts.iter().map(|(h, p)| (h.clone(), p.as_path())))
    }

    /// Canonical document root for `host`.
    pub fn root(&self, host: &str) -> Option<&Path> {
        self.roots.get(host).map(|p| p.as_path())
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(|h| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
