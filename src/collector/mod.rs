//! System information collectors.
//!
//! Each collector produces one report about the inspected project. Collectors
//! are looked up by identifier through a [`CollectorRegistry`].

mod composer;
mod kernel;
mod powered_by;
mod product;
mod registry;

use serde::Serialize;

use crate::error::InfoError;

pub use composer::{ComposerCollector, ComposerInfo, ComposerPackage};
pub use kernel::{KernelCollector, KernelInfo};
pub use powered_by::{ReleaseDisplay, powered_by};
pub use product::{InfoSnapshot, ProductCollector, UNKNOWN_VERSION};
pub use registry::CollectorRegistry;

/// Identifier of the product collector.
pub const PRODUCT: &str = "ibexa";
/// Identifier of the Composer collector.
pub const COMPOSER: &str = "composer";
/// Identifier of the framework kernel collector.
pub const KERNEL: &str = "symfony_kernel";

/// A report produced by a collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SystemInfo {
    Product(InfoSnapshot),
    Composer(ComposerInfo),
    Kernel(KernelInfo),
}

/// A source of system information.
#[cfg_attr(test, mockall::automock)]
pub trait SystemInfoCollector: Send + Sync {
    /// Identifier the collector is registered under.
    fn identifier(&self) -> &str;

    /// Build a fresh report. Nothing is cached between calls.
    fn collect(&self) -> Result<SystemInfo, InfoError>;
}
