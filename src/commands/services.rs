//! Builds the collector registry from configuration.

use log::debug;

use crate::collector::{CollectorRegistry, ComposerCollector, KernelCollector, ProductCollector};
use crate::runtime::Runtime;

use super::config::Config;

/// Build a registry with all available collectors.
pub fn build_registry<'a, R: Runtime>(runtime: &'a R, config: &Config) -> CollectorRegistry<'a> {
    let mut registry = CollectorRegistry::new();

    let mut product = ProductCollector::new(runtime, config.project_dir.clone());
    if let Some(version) = &config.product_version {
        product = product.with_version(version.clone());
    }
    registry.register(Box::new(product));
    registry.register(Box::new(ComposerCollector::new(
        runtime,
        config.project_dir.clone(),
    )));
    registry.register(Box::new(KernelCollector::new(
        runtime,
        config.project_dir.clone(),
    )));

    debug!("Registered collectors: {:?}", registry.identifiers());
    registry
}
