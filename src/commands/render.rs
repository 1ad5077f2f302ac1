//! Human-readable rendering of collector reports.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::collector::{ComposerInfo, InfoSnapshot, KernelInfo, SystemInfo};

pub(crate) fn render<W: Write>(out: &mut W, info: &SystemInfo) -> Result<()> {
    match info {
        SystemInfo::Product(snapshot) => render_product(out, snapshot),
        SystemInfo::Composer(composer) => render_composer(out, composer),
        SystemInfo::Kernel(kernel) => render_kernel(out, kernel),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn milestone(date: Option<DateTime<Utc>>, passed: bool) -> String {
    match date {
        Some(date) if passed => format!("{} (passed)", date.format("%Y-%m-%d")),
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

fn render_product<W: Write>(out: &mut W, snapshot: &InfoSnapshot) -> Result<()> {
    writeln!(out, "Product: {}", snapshot.product_name)?;
    writeln!(
        out,
        "Version: {} (release {})",
        snapshot.product_version, snapshot.release
    )?;
    writeln!(out, "Released: {}", milestone(snapshot.release_date, false))?;
    writeln!(out, "Edition: {}", snapshot.variant)?;
    writeln!(out, "Stability: {}", snapshot.stability)?;
    writeln!(out, "Enterprise: {}", yes_no(snapshot.is_enterprise))?;
    writeln!(out, "Commerce: {}", yes_no(snapshot.is_commerce))?;
    writeln!(
        out,
        "End of maintenance: {}",
        milestone(
            snapshot.end_of_maintenance_date,
            snapshot.is_end_of_maintenance
        )
    )?;
    writeln!(
        out,
        "End of life: {}",
        milestone(snapshot.end_of_life_date, snapshot.is_end_of_life)
    )?;
    Ok(())
}

fn render_composer<W: Write>(out: &mut W, composer: &ComposerInfo) -> Result<()> {
    writeln!(out, "Minimum stability: {}", composer.minimum_stability)?;
    writeln!(out, "Packages:")?;
    for package in &composer.packages {
        let mut flags = Vec::new();
        if let Some(stability) = package.stability {
            flags.push(stability.to_string());
        }
        if package.dev {
            flags.push("dev".to_string());
        }
        if flags.is_empty() {
            writeln!(out, "  {} {}", package.name, package.version)?;
        } else {
            writeln!(
                out,
                "  {} {} ({})",
                package.name,
                package.version,
                flags.join(", ")
            )?;
        }
    }
    if composer.packages.is_empty() {
        writeln!(out, "  (none)")?;
    }
    Ok(())
}

fn render_kernel<W: Write>(out: &mut W, kernel: &KernelInfo) -> Result<()> {
    writeln!(out, "Environment: {}", kernel.environment)?;
    writeln!(out, "Debug: {}", yes_no(kernel.debug))?;
    writeln!(out, "Bundles:")?;
    for bundle in &kernel.bundles {
        writeln!(out, "  {}", bundle)?;
    }
    if kernel.bundles.is_empty() {
        writeln!(out, "  (none)")?;
    }
    Ok(())
}
