//! Product edition and release lifecycle.

mod lifecycle;

use std::fmt;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::runtime::Runtime;

pub use lifecycle::{LifecycleStatus, evaluate_lifecycle, release_date, release_key};

/// Vendor name shared by all product packages.
pub const VENDOR: &str = "Ibexa";

/// Package whose version is the product version.
pub const CORE_PACKAGE: &str = "ibexa/core";

/// Edition marker packages, tested in this order.
pub const EDITION_MARKERS: [(ProductVariant, &str); 3] = [
    (ProductVariant::Commerce, "ibexa/commerce"),
    (ProductVariant::Experience, "ibexa/experience"),
    (ProductVariant::Content, "ibexa/content"),
];

/// Packages only shipped with the paid editions.
pub const ENTERPRISE_PACKAGES: &[&str] = &[
    "ibexa/experience",
    "ibexa/commerce",
    "ibexa/page-builder",
    "ibexa/calendar",
    "ibexa/workflow",
];

/// Packages only shipped with the Commerce edition.
pub const COMMERCE_PACKAGES: &[&str] = &[
    "ibexa/commerce",
    "ibexa/cart",
    "ibexa/checkout",
    "ibexa/order-management",
];

/// Installed product edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductVariant {
    Commerce,
    Experience,
    Content,
    #[default]
    #[serde(rename = "oss")]
    OpenSource,
}

impl ProductVariant {
    /// Edition name as shown to administrators.
    pub fn edition(&self) -> &'static str {
        match self {
            ProductVariant::Commerce => "Commerce",
            ProductVariant::Experience => "Experience",
            ProductVariant::Content => "Content",
            ProductVariant::OpenSource => "OSS",
        }
    }

    /// Full product name, e.g. "Ibexa Experience".
    pub fn product_name(&self) -> String {
        format!("{} {}", VENDOR, self.edition())
    }
}

impl fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductVariant::Commerce => write!(f, "commerce"),
            ProductVariant::Experience => write!(f, "experience"),
            ProductVariant::Content => write!(f, "content"),
            ProductVariant::OpenSource => write!(f, "oss"),
        }
    }
}

/// Classify the installation by which edition marker is present under `vendor_dir`.
///
/// This only looks at the vendor directory; it may disagree with the lock file.
#[tracing::instrument(skip(runtime))]
pub fn resolve_identity<R: Runtime>(runtime: &R, vendor_dir: &Path) -> ProductVariant {
    for (variant, package) in EDITION_MARKERS {
        if runtime.is_dir(&vendor_dir.join(package)) {
            debug!("Found {} marker {}", variant, package);
            return variant;
        }
    }
    ProductVariant::OpenSource
}
