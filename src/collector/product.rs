//! Product information: edition, version, lifecycle and stability.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use crate::composer::{
    InstalledSet, PACKAGE_WATCH_REGEX, ProjectRepository, Stability, compute_stability,
};
use crate::error::InfoError;
use crate::product::{
    COMMERCE_PACKAGES, CORE_PACKAGE, ENTERPRISE_PACKAGES, ProductVariant, evaluate_lifecycle,
    release_date, release_key, resolve_identity,
};
use crate::runtime::Runtime;

use super::{PRODUCT, SystemInfo, SystemInfoCollector};

/// Version reported when neither configuration nor the lock file provide one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Aggregated product information for one collection request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoSnapshot {
    pub product_name: String,
    pub product_version: String,
    /// "major.minor" key of the version
    pub release: String,
    /// Publication date of the release, if it is a known one
    pub release_date: Option<DateTime<Utc>>,
    /// Edition detected from the vendor directory
    pub variant: ProductVariant,
    pub is_end_of_maintenance: bool,
    pub end_of_maintenance_date: Option<DateTime<Utc>>,
    pub is_end_of_life: bool,
    pub end_of_life_date: Option<DateTime<Utc>>,
    /// Enterprise packages found in the lock file
    pub is_enterprise: bool,
    /// Commerce packages found in the lock file
    pub is_commerce: bool,
    pub stability: Stability,
}

/// Collector composing manifests, vendor directory and release tables into an [`InfoSnapshot`].
pub struct ProductCollector<'a, R: Runtime> {
    runtime: &'a R,
    project: ProjectRepository<'a, R>,
    version_override: Option<String>,
    watch: Regex,
}

impl<'a, R: Runtime> ProductCollector<'a, R> {
    pub fn new(runtime: &'a R, project_dir: PathBuf) -> Self {
        Self {
            runtime,
            project: ProjectRepository::new(runtime, project_dir),
            version_override: None,
            watch: PACKAGE_WATCH_REGEX.clone(),
        }
    }

    /// Report this version instead of the one found in the lock file.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_override = Some(version.into());
        self
    }

    /// Use a different pattern for packages whose stability is watched.
    pub fn with_watch_pattern(mut self, watch: Regex) -> Self {
        self.watch = watch;
        self
    }

    /// Collect a fresh snapshot.
    ///
    /// A missing or unparseable manifest degrades to defaults; an unknown
    /// stability level is an error.
    #[tracing::instrument(skip(self))]
    pub fn snapshot(&self) -> Result<InfoSnapshot, InfoError> {
        let installed = match self.project.load_installed() {
            Ok(installed) => Some(installed),
            Err(e) if e.is_manifest_unavailable() => {
                warn!("Continuing without manifest data: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        let stability = match &installed {
            Some(installed) => compute_stability(installed, &self.watch)?,
            None => Stability::Stable,
        };

        let version = self.product_version(installed.as_ref());
        let lifecycle = evaluate_lifecycle(&version, self.runtime.now());
        let variant = resolve_identity(self.runtime, &self.project.vendor_dir());
        debug!("Detected {} {} ({})", variant.product_name(), version, stability);

        let (is_enterprise, is_commerce) = installed
            .as_ref()
            .map(|i| (i.contains_any(ENTERPRISE_PACKAGES), i.contains_any(COMMERCE_PACKAGES)))
            .unwrap_or((false, false));

        Ok(InfoSnapshot {
            product_name: variant.product_name(),
            release: release_key(&version),
            release_date: release_date(&version),
            product_version: version,
            variant,
            is_end_of_maintenance: lifecycle.is_end_of_maintenance,
            end_of_maintenance_date: lifecycle.eom_date,
            is_end_of_life: lifecycle.is_end_of_life,
            end_of_life_date: lifecycle.eol_date,
            is_enterprise,
            is_commerce,
            stability,
        })
    }

    fn product_version(&self, installed: Option<&InstalledSet>) -> String {
        if let Some(version) = &self.version_override {
            return version.clone();
        }
        installed
            .and_then(|i| i.get(CORE_PACKAGE))
            .map(|p| p.normalized_version().to_string())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }
}

impl<R: Runtime> SystemInfoCollector for ProductCollector<'_, R> {
    fn identifier(&self) -> &str {
        PRODUCT
    }

    fn collect(&self) -> Result<SystemInfo, InfoError> {
        self.snapshot().map(SystemInfo::Product)
    }
}
