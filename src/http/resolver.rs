//! Maps requests onto files under per-host document roots.
//!
//! A request for `/a/b.html` with `Host: example.com` is served from
//! `<root>/example.com/a/b.html`. Every virtual host gets its own subtree.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;

use crate::http::request::Request;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Missing, unreadable, or outside the host's root
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Builds `<root>/<host>/<segments...>` for a request.
    ///
    /// Empty segments and literal `..` segments of the target are dropped.
    /// The result is not canonicalized here, see [`FileResolver::load`].
    pub fn resolve(&self, request: &Request) -> Result<PathBuf, ResolveError> {
        let host_root = self.host_root(&request.host)?;

        let path = request
            .path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "..")
            .fold(host_root, |mut path, segment| {
                path.push(segment);
                path
            });

        Ok(path)
    }

    /// Resolves a request and reads the whole file into memory.
    ///
    /// The canonical file path must stay under the canonical host root, so
    /// symlinks pointing outside the host's subtree are refused.
    pub fn load(&self, request: &Request) -> Result<Bytes, ResolveError> {
        let path = self.resolve(request)?;
        let not_found = || ResolveError::NotFound(path.clone());

        let host_root = self
            .host_root(&request.host)?
            .canonicalize()
            .map_err(|_| not_found())?;
        let canonical = path.canonicalize().map_err(|_| not_found())?;

        if !canonical.starts_with(&host_root) {
            tracing::warn!(
                path = %path.display(),
                resolved = %canonical.display(),
                "Refusing path outside host root"
            );
            return Err(not_found());
        }

        // Directories (including a bare `/` target) are not servable.
        if !canonical.is_file() {
            return Err(not_found());
        }

        let mut file = File::open(&canonical).map_err(|_| not_found())?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|source| ResolveError::Io { path: canonical, source })?;

        Ok(Bytes::from(contents))
    }

    fn host_root(&self, host: &str) -> Result<PathBuf, ResolveError> {
        if host.is_empty() || host == "." || host == ".." || host.contains(['/', '\\']) {
            return Err(ResolveError::NotFound(self.root.clone()));
        }
        Ok(self.root.join(host))
    }
}
