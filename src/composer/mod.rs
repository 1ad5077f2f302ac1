//! Composer manifests of the inspected project.
//!
//! This module reads `composer.lock` and `composer.json` into an
//! [`InstalledSet`] and derives the aggregate stability of the product
//! packages from it.

mod lock;
mod repository;
mod stability;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::InfoError;

pub use lock::{LockFile, ManifestFile};
pub use repository::ProjectRepository;
pub use stability::{PACKAGE_WATCH_REGEX, Stability, compute_stability};
pub(crate) use stability::parse_declared;

/// A package recorded in the lock manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Stability label as recorded, validated when evaluated.
    pub stability: Option<String>,
    /// Composer package type (`library`, `symfony-bundle`, ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Installed through `packages-dev`
    pub dev: bool,
    /// Source reference (usually a commit hash)
    pub reference: Option<String>,
}

impl Package {
    /// The validated stability of this package, if one is recorded.
    pub fn stability_level(&self) -> Result<Option<Stability>, InfoError> {
        self.stability
            .as_deref()
            .map(|value| stability::parse_declared(&self.name, value))
            .transpose()
    }

    /// Version with a leading `v` removed (`v4.6.3` -> `4.6.3`).
    pub fn normalized_version(&self) -> &str {
        self.version.strip_prefix('v').unwrap_or(&self.version)
    }
}

/// Installed packages keyed by name, plus the root project's minimum stability.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstalledSet {
    packages: HashMap<String, Package>,
    minimum_stability: Option<String>,
}

impl InstalledSet {
    /// Build a set from packages; a later package with the same name replaces an earlier one.
    pub fn new(packages: Vec<Package>, minimum_stability: Option<String>) -> Self {
        Self {
            packages: packages
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
            minimum_stability,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Whether any of the given package names is installed.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Packages sorted by name.
    pub fn sorted_packages(&self) -> Vec<&Package> {
        let mut packages: Vec<&Package> = self.packages.values().collect();
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        packages
    }

    pub fn minimum_stability(&self) -> Option<&str> {
        self.minimum_stability.as_deref()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
