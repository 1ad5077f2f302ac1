//! Release, end-of-maintenance and end-of-life tables per "major.minor" release.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

const RELEASES: &[(&str, &str)] = &[
    ("2.5", "2019-03-29T23:59:59+00:00"),
    ("3.3", "2021-01-28T23:59:59+00:00"),
    ("4.0", "2022-02-15T23:59:59+00:00"),
    ("4.1", "2022-04-28T23:59:59+00:00"),
    ("4.2", "2022-08-18T23:59:59+00:00"),
    ("4.3", "2022-11-28T23:59:59+00:00"),
    ("4.4", "2023-02-09T23:59:59+00:00"),
    ("4.5", "2023-05-30T23:59:59+00:00"),
    ("4.6", "2023-11-30T23:59:59+00:00"),
    ("5.0", "2025-06-25T23:59:59+00:00"),
];

const END_OF_MAINTENANCE: &[(&str, &str)] = &[
    ("2.5", "2022-03-29T23:59:59+00:00"),
    ("3.3", "2023-12-30T23:59:59+00:00"),
    ("4.0", "2022-04-30T23:59:59+00:00"),
    ("4.1", "2022-08-31T23:59:59+00:00"),
    ("4.2", "2022-11-30T23:59:59+00:00"),
    ("4.3", "2023-02-28T23:59:59+00:00"),
    ("4.4", "2023-05-31T23:59:59+00:00"),
    ("4.5", "2023-11-30T23:59:59+00:00"),
    ("4.6", "2026-11-30T23:59:59+00:00"),
    ("5.0", "2028-06-30T23:59:59+00:00"),
];

const END_OF_LIFE: &[(&str, &str)] = &[
    ("2.5", "2024-03-29T23:59:59+00:00"),
    ("3.3", "2025-12-30T23:59:59+00:00"),
    ("4.0", "2022-04-30T23:59:59+00:00"),
    ("4.1", "2022-08-31T23:59:59+00:00"),
    ("4.2", "2022-11-30T23:59:59+00:00"),
    ("4.3", "2023-02-28T23:59:59+00:00"),
    ("4.4", "2023-05-31T23:59:59+00:00"),
    ("4.5", "2023-11-30T23:59:59+00:00"),
    ("4.6", "2028-11-30T23:59:59+00:00"),
    ("5.0", "2030-06-30T23:59:59+00:00"),
];

type DateTable = HashMap<&'static str, DateTime<Utc>>;

fn parse_table(name: &str, raw: &[(&'static str, &str)]) -> DateTable {
    raw.iter()
        .map(|(release, date)| {
            let parsed = DateTime::parse_from_rfc3339(date)
                .unwrap_or_else(|e| panic!("invalid {} date for {}: {}", name, release, e));
            (*release, parsed.with_timezone(&Utc))
        })
        .collect()
}

static RELEASE_DATES: LazyLock<DateTable> = LazyLock::new(|| parse_table("release", RELEASES));
static EOM_DATES: LazyLock<DateTable> =
    LazyLock::new(|| parse_table("end of maintenance", END_OF_MAINTENANCE));
static EOL_DATES: LazyLock<DateTable> = LazyLock::new(|| parse_table("end of life", END_OF_LIFE));

/// Where a release stands relative to its maintenance and life windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LifecycleStatus {
    pub is_end_of_maintenance: bool,
    pub is_end_of_life: bool,
    pub eom_date: Option<DateTime<Utc>>,
    pub eol_date: Option<DateTime<Utc>>,
}

/// Build the "major.minor" lookup key; missing parts are empty ("3" -> "3.").
pub fn release_key(version: &str) -> String {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    format!("{}.{}", major, minor)
}

/// Date the given release was published, if it is a known release.
pub fn release_date(version: &str) -> Option<DateTime<Utc>> {
    RELEASE_DATES.get(release_key(version).as_str()).copied()
}

/// Evaluate a version against the maintenance and life tables at `now`.
///
/// A release missing from a table is treated as not yet past that milestone.
pub fn evaluate_lifecycle(version: &str, now: DateTime<Utc>) -> LifecycleStatus {
    let key = release_key(version);
    let mut status = LifecycleStatus::default();

    if let Some(eom) = EOM_DATES.get(key.as_str()) {
        status.eom_date = Some(*eom);
        status.is_end_of_maintenance = *eom < now;
    }
    if let Some(eol) = EOL_DATES.get(key.as_str()) {
        status.eol_date = Some(*eol);
        status.is_end_of_life = *eol < now;
    }

    status
}
