//! Package stability levels and the aggregate stability of watched packages.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::Serialize;

use super::InstalledSet;
use crate::error::InfoError;

/// Packages whose stability counts towards the product stability.
pub static PACKAGE_WATCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ibexa|ezsystems|silversolutions)/").expect("watch regex is valid")
});

static VERSION_STABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[._-]?(?:(stable|beta|b|rc|alpha|a|patch|pl|p)(?:[.-]?\d+)*)?([.-]?dev)?$")
        .expect("version stability regex is valid")
});

/// Package maturity, ordered from least stable (`Dev`) to most stable (`Stable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stability {
    #[serde(rename = "dev")]
    Dev,
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "beta")]
    Beta,
    #[serde(rename = "RC")]
    RC,
    #[serde(rename = "stable")]
    Stable,
}

impl Stability {
    pub const ALL: [Stability; 5] = [
        Stability::Dev,
        Stability::Alpha,
        Stability::Beta,
        Stability::RC,
        Stability::Stable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Dev => "dev",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::RC => "RC",
            Stability::Stable => "stable",
        }
    }

    /// Map a numeric stability flag as written to `composer.lock`.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Stability::Stable),
            5 => Some(Stability::RC),
            10 => Some(Stability::Beta),
            15 => Some(Stability::Alpha),
            20 => Some(Stability::Dev),
            _ => None,
        }
    }

    /// Derive the stability implied by a version string.
    ///
    /// `dev-main` and `4.6.x-dev` are dev, `1.0.0-beta2` is beta, `v4.6.3` is stable.
    pub fn of_version(version: &str) -> Self {
        let version = version.trim();
        let lower = version.to_ascii_lowercase();
        if lower.starts_with("dev-") || lower.ends_with("-dev") {
            return Stability::Dev;
        }

        let Some(caps) = VERSION_STABILITY_RE.captures(version) else {
            return Stability::Stable;
        };
        if caps.get(2).is_some() {
            return Stability::Dev;
        }
        match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(m) if m == "beta" || m == "b" => Stability::Beta,
            Some(m) if m == "alpha" || m == "a" => Stability::Alpha,
            Some(m) if m == "rc" => Stability::RC,
            _ => Stability::Stable,
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Stability::Dev),
            "alpha" => Ok(Stability::Alpha),
            "beta" => Ok(Stability::Beta),
            "rc" => Ok(Stability::RC),
            "stable" => Ok(Stability::Stable),
            _ => anyhow::bail!(
                "Unknown stability: {}. Expected dev, alpha, beta, RC or stable.",
                s
            ),
        }
    }
}

/// Parse a declared stability, attributing a failure to `owner`.
pub(crate) fn parse_declared(owner: &str, value: &str) -> Result<Stability, InfoError> {
    value
        .parse()
        .map_err(|_| InfoError::UnknownStabilityLevel {
            package: owner.to_string(),
            value: value.to_string(),
        })
}

/// Compute the least stable level among watched packages.
///
/// Starts from the root project's minimum stability (`stable` when undeclared)
/// and only ever moves towards `dev`.
pub fn compute_stability(installed: &InstalledSet, watch: &Regex) -> Result<Stability, InfoError> {
    let mut result = match installed.minimum_stability() {
        Some(declared) => parse_declared("minimum-stability", declared)?,
        None => Stability::Stable,
    };

    for package in installed.packages() {
        if !watch.is_match(&package.name) {
            continue;
        }
        let Some(level) = package.stability_level()? else {
            continue;
        };
        if level == Stability::Stable {
            continue;
        }
        if level < result {
            debug!("{} pulls stability down to {}", package.name, level);
            result = level;
        }
    }

    Ok(result)
}
