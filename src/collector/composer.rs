//! Composer report: every locked package with its validated stability.

use std::path::PathBuf;

use serde::Serialize;

use crate::composer::{ProjectRepository, Stability, parse_declared};
use crate::error::InfoError;
use crate::runtime::Runtime;

use super::{COMPOSER, SystemInfo, SystemInfoCollector};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerPackage {
    pub name: String,
    pub version: String,
    pub stability: Option<Stability>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub dev: bool,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerInfo {
    pub minimum_stability: Stability,
    /// Sorted by name
    pub packages: Vec<ComposerPackage>,
}

pub struct ComposerCollector<'a, R: Runtime> {
    project: ProjectRepository<'a, R>,
}

impl<'a, R: Runtime> ComposerCollector<'a, R> {
    pub fn new(runtime: &'a R, project_dir: PathBuf) -> Self {
        Self {
            project: ProjectRepository::new(runtime, project_dir),
        }
    }

    /// Read the manifests. Unlike the product report, missing manifests are errors here.
    #[tracing::instrument(skip(self))]
    pub fn info(&self) -> Result<ComposerInfo, InfoError> {
        let installed = self.project.load_installed()?;

        let minimum_stability = match installed.minimum_stability() {
            Some(declared) => parse_declared("minimum-stability", declared)?,
            None => Stability::Stable,
        };

        let packages = installed
            .sorted_packages()
            .into_iter()
            .map(|p| {
                Ok(ComposerPackage {
                    name: p.name.clone(),
                    version: p.version.clone(),
                    stability: p.stability_level()?,
                    kind: p.kind.clone(),
                    dev: p.dev,
                    reference: p.reference.clone(),
                })
            })
            .collect::<Result<Vec<_>, InfoError>>()?;

        Ok(ComposerInfo {
            minimum_stability,
            packages,
        })
    }
}

impl<R: Runtime> SystemInfoCollector for ComposerCollector<'_, R> {
    fn identifier(&self) -> &str {
        COMPOSER
    }

    fn collect(&self) -> Result<SystemInfo, InfoError> {
        self.info().map(SystemInfo::Composer)
    }
}
