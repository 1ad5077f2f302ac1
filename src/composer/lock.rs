//! Raw `composer.lock` and `composer.json` documents.

use std::collections::HashMap;

use serde::Deserialize;

use super::{InstalledSet, Package, Stability};

/// The parts of `composer.lock` this crate reads.
#[derive(Debug, Clone, Deserialize)]
pub struct LockFile {
    pub packages: Vec<LockPackage>,
    #[serde(rename = "packages-dev", default)]
    pub packages_dev: Option<Vec<LockPackage>>,
    #[serde(rename = "stability-flags", default)]
    pub stability_flags: Option<FlagTable>,
    #[serde(rename = "minimum-stability", default)]
    pub minimum_stability: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockPackage {
    pub name: String,
    pub version: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub source: Option<LockSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockSource {
    #[serde(default)]
    pub reference: Option<String>,
}

/// `stability-flags` is an object, or `[]` when PHP encodes an empty table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagTable {
    Map(HashMap<String, StabilityFlag>),
    Empty(Vec<serde_json::Value>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StabilityFlag {
    Code(i64),
    Name(String),
}

impl StabilityFlag {
    /// Label for the flag; unknown codes are kept verbatim so evaluation can reject them.
    fn label(&self) -> String {
        match self {
            StabilityFlag::Code(code) => Stability::from_flag(*code)
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| code.to_string()),
            StabilityFlag::Name(name) => name.clone(),
        }
    }
}

/// The parts of `composer.json` this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestFile {
    #[serde(rename = "minimum-stability", default)]
    pub minimum_stability: Option<String>,
}

impl LockFile {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Flatten into an [`InstalledSet`].
    ///
    /// The package manifest's minimum stability takes precedence over the copy in the lock file.
    pub fn into_installed(self, manifest: Option<ManifestFile>) -> InstalledSet {
        let flags = match self.stability_flags {
            Some(FlagTable::Map(map)) => map,
            _ => HashMap::new(),
        };

        let to_package = |raw: LockPackage, dev: bool| {
            let stability = match flags.get(&raw.name) {
                Some(flag) => Some(flag.label()),
                None if !raw.version.is_empty() => {
                    Some(Stability::of_version(&raw.version).as_str().to_string())
                }
                None => None,
            };
            Package {
                name: raw.name,
                version: raw.version,
                stability,
                kind: raw.kind,
                dev,
                reference: raw.source.and_then(|s| s.reference),
            }
        };

        let mut packages: Vec<Package> = self
            .packages
            .into_iter()
            .map(|p| to_package(p, false))
            .collect();
        packages.extend(
            self.packages_dev
                .unwrap_or_default()
                .into_iter()
                .map(|p| to_package(p, true)),
        );

        let minimum_stability = manifest
            .and_then(|m| m.minimum_stability)
            .or(self.minimum_stability);

        InstalledSet::new(packages, minimum_stability)
    }
}

impl ManifestFile {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
