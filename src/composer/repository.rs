//! Access to the Composer files of an inspected project.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::{InstalledSet, LockFile, ManifestFile};
use crate::error::InfoError;
use crate::runtime::Runtime;

/// Paths and manifest loading for a project directory.
///
/// Layout:
/// - `<project_dir>/composer.lock`
/// - `<project_dir>/composer.json`
/// - `<project_dir>/vendor/<vendor>/<package>`
pub struct ProjectRepository<'a, R: Runtime> {
    runtime: &'a R,
    project_dir: PathBuf,
}

impl<'a, R: Runtime> ProjectRepository<'a, R> {
    pub fn new(runtime: &'a R, project_dir: PathBuf) -> Self {
        Self {
            runtime,
            project_dir,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns: `<project_dir>/composer.lock`
    pub fn lock_path(&self) -> PathBuf {
        self.project_dir.join("composer.lock")
    }

    /// Returns: `<project_dir>/composer.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("composer.json")
    }

    /// Returns: `<project_dir>/vendor`
    pub fn vendor_dir(&self) -> PathBuf {
        self.project_dir.join("vendor")
    }

    /// Read both manifests into a fresh [`InstalledSet`].
    ///
    /// The lock manifest is required; the package manifest is optional.
    #[tracing::instrument(skip(self))]
    pub fn load_installed(&self) -> Result<InstalledSet, InfoError> {
        let lock_path = self.lock_path();
        let content = self.read_required(&lock_path)?;
        let lock = LockFile::parse(&content).map_err(|e| InfoError::ManifestInvalid {
            path: lock_path.clone(),
            reason: e.to_string(),
        })?;

        let manifest_path = self.manifest_path();
        let manifest = if self.runtime.exists(&manifest_path) {
            let content = self.read_required(&manifest_path)?;
            Some(
                ManifestFile::parse(&content).map_err(|e| InfoError::ManifestInvalid {
                    path: manifest_path.clone(),
                    reason: e.to_string(),
                })?,
            )
        } else {
            debug!("No package manifest at {:?}", manifest_path);
            None
        };

        let installed = lock.into_installed(manifest);
        debug!(
            "Loaded {} packages from {:?}",
            installed.len(),
            lock_path
        );
        Ok(installed)
    }

    fn read_required(&self, path: &Path) -> Result<String, InfoError> {
        if !self.runtime.exists(path) {
            return Err(InfoError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        self.runtime.read_to_string(path).map_err(|e| {
            if is_undecodable(&e) {
                InfoError::ManifestInvalid {
                    path: path.to_path_buf(),
                    reason: format!("{:#}", e),
                }
            } else {
                InfoError::Io {
                    path: path.to_path_buf(),
                    reason: format!("{:#}", e),
                }
            }
        })
    }
}

/// A file that was read but is not valid UTF-8.
fn is_undecodable(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::InvalidData)
}
