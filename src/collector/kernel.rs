//! Framework kernel report: environment, debug mode and active bundles.

use std::path::PathBuf;

use log::warn;
use serde::Serialize;

use crate::composer::ProjectRepository;
use crate::error::InfoError;
use crate::runtime::Runtime;

use super::{KERNEL, SystemInfo, SystemInfoCollector};

const DEFAULT_ENVIRONMENT: &str = "prod";
const BUNDLE_PACKAGE_TYPE: &str = "symfony-bundle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelInfo {
    pub environment: String,
    pub debug: bool,
    /// Names of installed bundle packages, sorted
    pub bundles: Vec<String>,
}

pub struct KernelCollector<'a, R: Runtime> {
    runtime: &'a R,
    project: ProjectRepository<'a, R>,
}

impl<'a, R: Runtime> KernelCollector<'a, R> {
    pub fn new(runtime: &'a R, project_dir: PathBuf) -> Self {
        Self {
            runtime,
            project: ProjectRepository::new(runtime, project_dir),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn info(&self) -> Result<KernelInfo, InfoError> {
        let environment = self
            .runtime
            .env_var("APP_ENV")
            .ok()
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let debug = match self.runtime.env_var("APP_DEBUG") {
            Ok(value) => parse_flag(&value).unwrap_or(environment == "dev"),
            Err(_) => environment == "dev",
        };

        let bundles = match self.project.load_installed() {
            Ok(installed) => installed
                .sorted_packages()
                .into_iter()
                .filter(|p| p.kind.as_deref() == Some(BUNDLE_PACKAGE_TYPE))
                .map(|p| p.name.clone())
                .collect(),
            Err(e) if e.is_manifest_unavailable() => {
                warn!("Cannot list bundles: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(KernelInfo {
            environment,
            debug,
            bundles,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl<R: Runtime> SystemInfoCollector for KernelCollector<'_, R> {
    fn identifier(&self) -> &str {
        KERNEL
    }

    fn collect(&self) -> Result<SystemInfo, InfoError> {
        self.info().map(SystemInfo::Kernel)
    }
}
