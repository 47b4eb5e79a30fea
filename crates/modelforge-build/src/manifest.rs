//! Output sinks for build artifacts.
//!
//! A manifest is the one channel a plugin has for producing files. Plugins
//! receive it as an opaque `Arc<dyn FileManifest>` handle; contexts compare
//! manifests by identity, never by contents, so two contexts share "the
//! same" manifest only when they share the same allocation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

/// Errors raised while writing build artifacts.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The artifact path escapes the manifest base directory.
    #[error("artifact path `{}` escapes the manifest base directory", path.display())]
    PathOutsideBaseDir {
        /// The rejected path.
        path: PathBuf,
    },

    /// The underlying filesystem write failed.
    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        /// Path of the artifact being written.
        path: PathBuf,
        /// Filesystem error.
        #[source]
        source: io::Error,
    },
}

/// An opaque sink for files produced by a build plugin.
pub trait FileManifest: fmt::Debug + Send + Sync {
    /// Directory all relative artifact paths resolve against.
    fn base_dir(&self) -> &Path;

    /// Writes `contents` to `path`, resolved against the base directory,
    /// and returns the resolved path.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the path escapes the base directory
    /// or the write itself fails.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf, ManifestError>;

    /// Returns every path written so far, sorted.
    fn files(&self) -> Vec<PathBuf>;
}

/// Joins `path` onto `base`, rejecting `..` components and absolute paths
/// that point outside `base`.
fn resolve_within(base: &Path, path: &Path) -> Result<PathBuf, ManifestError> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ManifestError::PathOutsideBaseDir {
            path: path.to_path_buf(),
        });
    }
    if path.is_absolute() {
        if path.starts_with(base) {
            return Ok(path.to_path_buf());
        }
        return Err(ManifestError::PathOutsideBaseDir {
            path: path.to_path_buf(),
        });
    }
    Ok(base.join(path))
}

/// In-memory manifest used by tests and dry runs.
///
/// Contents are kept in a map keyed by resolved path; nothing touches the
/// filesystem.
#[derive(Debug, Default)]
pub struct MockManifest {
    base_dir: PathBuf,
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MockManifest {
    /// Creates an empty mock manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contents written to `path`, if any.
    #[must_use]
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.get(&self.base_dir.join(path)).cloned()
    }

    /// Returns the UTF-8 contents written to `path`, if any.
    #[must_use]
    pub fn get_file_string(&self, path: &Path) -> Option<String> {
        self.get_file(path)
            .and_then(|contents| String::from_utf8(contents).ok())
    }

    /// Returns true when something was written to `path`.
    #[must_use]
    pub fn has_file(&self, path: &Path) -> bool {
        self.get_file(path).is_some()
    }
}

impl FileManifest for MockManifest {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf, ManifestError> {
        let resolved = self.base_dir.join(path);
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.insert(resolved.clone(), contents.to_vec());
        Ok(resolved)
    }

    fn files(&self) -> Vec<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.keys().cloned().collect()
    }
}

/// Manifest that writes artifacts beneath a base directory on disk.
///
/// Parent directories are created as needed. Paths containing `..` or
/// absolute paths outside the base directory are rejected before anything
/// is written.
#[derive(Debug)]
pub struct DirectoryManifest {
    base_dir: PathBuf,
    files: Mutex<BTreeSet<PathBuf>>,
}

impl DirectoryManifest {
    /// Creates a manifest rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files: Mutex::new(BTreeSet::new()),
        }
    }
}

impl FileManifest for DirectoryManifest {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf, ManifestError> {
        let resolved = resolve_within(&self.base_dir, path)?;
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).map_err(|source| ManifestError::Io {
                path: resolved.clone(),
                source,
            })?;
        }
        fs::write(&resolved, contents).map_err(|source| ManifestError::Io {
            path: resolved.clone(),
            source,
        })?;
        debug!(path = %resolved.display(), bytes = contents.len(), "wrote build artifact");

        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.insert(resolved.clone());
        Ok(resolved)
    }

    fn files(&self) -> Vec<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_manifest_records_writes() {
        let manifest = MockManifest::new();
        manifest
            .write_file(Path::new("src/client.rs"), b"pub struct Client;")
            .unwrap();

        assert!(manifest.has_file(Path::new("src/client.rs")));
        assert_eq!(
            manifest.get_file_string(Path::new("src/client.rs")).unwrap(),
            "pub struct Client;"
        );
        assert_eq!(manifest.files(), [PathBuf::from("src/client.rs")]);
    }

    #[test]
    fn mock_manifest_overwrites_existing_files() {
        let manifest = MockManifest::new();
        manifest.write_file(Path::new("out.txt"), b"first").unwrap();
        manifest.write_file(Path::new("out.txt"), b"second").unwrap();

        assert_eq!(
            manifest.get_file_string(Path::new("out.txt")).unwrap(),
            "second"
        );
        assert_eq!(manifest.files().len(), 1);
    }

    #[test]
    fn directory_manifest_writes_under_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = DirectoryManifest::new(dir.path());

        let written = manifest
            .write_file(Path::new("gen/types.rs"), b"pub struct City;")
            .unwrap();

        assert!(written.starts_with(dir.path()));
        assert_eq!(fs::read_to_string(&written).unwrap(), "pub struct City;");
        assert_eq!(manifest.files(), [written]);
    }

    #[test]
    fn directory_manifest_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = DirectoryManifest::new(dir.path());

        let err = manifest
            .write_file(Path::new("../outside.txt"), b"nope")
            .unwrap_err();
        assert!(matches!(err, ManifestError::PathOutsideBaseDir { .. }));

        let err = manifest
            .write_file(Path::new("/etc/outside.txt"), b"nope")
            .unwrap_err();
        assert!(matches!(err, ManifestError::PathOutsideBaseDir { .. }));
    }

    #[test]
    fn directory_manifest_accepts_absolute_paths_inside_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = DirectoryManifest::new(dir.path());

        let inside = dir.path().join("inside.txt");
        let written = manifest.write_file(&inside, b"ok").unwrap();
        assert_eq!(written, inside);
        assert_eq!(fs::read_to_string(&inside).unwrap(), "ok");
    }
}
