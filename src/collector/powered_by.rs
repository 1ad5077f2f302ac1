//! "Powered by" footer text.

use std::fmt;
use std::str::FromStr;

use crate::composer::Stability;

use super::{InfoSnapshot, UNKNOWN_VERSION};

/// How much of the version the footer reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseDisplay {
    /// Product name only
    None,
    /// "Ibexa Experience v4"
    #[default]
    Major,
    /// "Ibexa Experience v4.6"
    Minor,
}

impl fmt::Display for ReleaseDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDisplay::None => write!(f, "none"),
            ReleaseDisplay::Major => write!(f, "major"),
            ReleaseDisplay::Minor => write!(f, "minor"),
        }
    }
}

impl FromStr for ReleaseDisplay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(ReleaseDisplay::None),
            "major" => Ok(ReleaseDisplay::Major),
            "minor" => Ok(ReleaseDisplay::Minor),
            _ => anyhow::bail!(
                "Unknown release display: {}. Expected none, major, or minor.",
                s
            ),
        }
    }
}

/// Build the footer text, e.g. "Ibexa Content v4.6 beta".
///
/// Without a known version only the product name is shown.
pub fn powered_by(snapshot: &InfoSnapshot, display: ReleaseDisplay) -> String {
    let name = &snapshot.product_name;
    if snapshot.product_version == UNKNOWN_VERSION {
        return name.clone();
    }
    let mut parts = snapshot.product_version.split('.');
    let major = parts.next().unwrap_or_default();

    let version = match display {
        ReleaseDisplay::None => return name.clone(),
        ReleaseDisplay::Major => major.to_string(),
        ReleaseDisplay::Minor => match parts.next() {
            Some(minor) => format!("{}.{}", major, minor),
            None => major.to_string(),
        },
    };

    if snapshot.stability == Stability::Stable {
        format!("{} v{}", name, version)
    } else {
        format!("{} v{} {}", name, version, snapshot.stability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductVariant;

    fn snapshot(version: &str, stability: Stability) -> InfoSnapshot {
        InfoSnapshot {
            product_name: "Ibexa Content".into(),
            product_version: version.into(),
            release: crate::product::release_key(version),
            release_date: crate::product::release_date(version),
            variant: ProductVariant::Content,
            is_end_of_maintenance: false,
            end_of_maintenance_date: None,
            is_end_of_life: false,
            end_of_life_date: None,
            is_enterprise: false,
            is_commerce: false,
            stability,
        }
    }

    #[test]
    fn test_release_display_parse() {
        assert_eq!("none".parse::<ReleaseDisplay>().unwrap(), ReleaseDisplay::None);
        assert_eq!("Major".parse::<ReleaseDisplay>().unwrap(), ReleaseDisplay::Major);
        assert_eq!("minor".parse::<ReleaseDisplay>().unwrap(), ReleaseDisplay::Minor);
        assert!("patch".parse::<ReleaseDisplay>().is_err());
        assert_eq!(ReleaseDisplay::default().to_string(), "major");
    }

    #[test]
    fn test_powered_by_stable() {
        let s = snapshot("4.6.3", Stability::Stable);
        assert_eq!(powered_by(&s, ReleaseDisplay::None), "Ibexa Content");
        assert_eq!(powered_by(&s, ReleaseDisplay::Major), "Ibexa Content v4");
        assert_eq!(powered_by(&s, ReleaseDisplay::Minor), "Ibexa Content v4.6");
    }

    #[test]
    fn test_powered_by_unstable_appends_stability() {
        let s = snapshot("5.0.0", Stability::Beta);
        assert_eq!(powered_by(&s, ReleaseDisplay::Minor), "Ibexa Content v5.0 beta");
        assert_eq!(powered_by(&s, ReleaseDisplay::Major), "Ibexa Content v5 beta");
        assert_eq!(powered_by(&s, ReleaseDisplay::None), "Ibexa Content");
    }

    #[test]
    fn test_powered_by_unknown_version_shows_name_only() {
        let s = snapshot(UNKNOWN_VERSION, Stability::Stable);
        assert_eq!(powered_by(&s, ReleaseDisplay::Major), "Ibexa Content");
        assert_eq!(powered_by(&s, ReleaseDisplay::Minor), "Ibexa Content");

        let s = snapshot(UNKNOWN_VERSION, Stability::Dev);
        assert_eq!(powered_by(&s, ReleaseDisplay::Major), "Ibexa Content");
    }

    #[test]
    fn test_powered_by_short_version() {
        let s = snapshot("4", Stability::RC);
        assert_eq!(powered_by(&s, ReleaseDisplay::Minor), "Ibexa Content v4 RC");
    }
}
