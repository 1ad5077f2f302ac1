//! Command implementations behind the CLI.

use std::io::Write;

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::collector::{PRODUCT, SystemInfo, powered_by as render_powered_by};
use crate::runtime::Runtime;

pub mod config;
mod render;
mod services;

pub use services::build_registry;

use config::{Config, OutputFormat};

/// Print the report of one collector, or of every collector when `all` is set.
#[tracing::instrument(skip(runtime, config, out))]
pub fn show<R: Runtime, W: Write>(
    runtime: &R,
    config: &Config,
    identifier: Option<&str>,
    all: bool,
    out: &mut W,
) -> Result<()> {
    let registry = build_registry(runtime, config);

    if all {
        let reports = registry.collect_all()?;
        return match config.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = reports
                    .into_iter()
                    .map(|(id, info)| Ok((id, serde_json::to_value(info)?)))
                    .collect::<Result<_>>()?;
                write_json(out, &map)
            }
            OutputFormat::Text => {
                for (i, (id, info)) in reports.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "[{}]", id)?;
                    render::render(out, info)?;
                }
                Ok(())
            }
        };
    }

    let identifier = identifier.unwrap_or(PRODUCT);
    debug!("Collecting {}", identifier);
    let info = registry
        .collect(identifier)
        .with_context(|| format!("Failed to collect '{}' system info", identifier))?;

    match config.format {
        OutputFormat::Json => write_json(out, &info),
        OutputFormat::Text => render::render(out, &info),
    }
}

/// Print the registered collector identifiers.
pub fn list<R: Runtime, W: Write>(runtime: &R, config: &Config, out: &mut W) -> Result<()> {
    let registry = build_registry(runtime, config);
    for identifier in registry.identifiers() {
        writeln!(out, "{}", identifier)?;
    }
    Ok(())
}

/// Print the "powered by" footer text.
pub fn powered_by<R: Runtime, W: Write>(runtime: &R, config: &Config, out: &mut W) -> Result<()> {
    let registry = build_registry(runtime, config);
    let snapshot = match registry.collect(PRODUCT)? {
        SystemInfo::Product(snapshot) => snapshot,
        other => anyhow::bail!("Unexpected report from '{}': {:?}", PRODUCT, other),
    };

    let text = render_powered_by(&snapshot, config.release_display);
    match config.format {
        OutputFormat::Json => write_json(out, &serde_json::json!({ "powered_by": text })),
        OutputFormat::Text => {
            writeln!(out, "{}", text)?;
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ReleaseDisplay;
    use crate::runtime::MockRuntime;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;
    use std::path::PathBuf;

    const LOCK: &str = r#"{
        "packages": [
            {"name": "ibexa/core", "version": "v4.6.3", "type": "symfony-bundle"},
            {"name": "ibexa/content", "version": "v4.6.3", "type": "metapackage"}
        ]
    }"#;

    fn project() -> PathBuf {
        PathBuf::from("/srv/site")
    }

    fn config(format: OutputFormat, display: ReleaseDisplay) -> Config {
        Config {
            project_dir: project(),
            product_version: None,
            release_display: display,
            format,
        }
    }

    fn configure_project(runtime: &mut MockRuntime) {
        runtime
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        runtime
            .expect_exists()
            .with(eq(project().join("composer.lock")))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(project().join("composer.json")))
            .returning(|_| false);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(LOCK.to_string()));
        runtime
            .expect_is_dir()
            .returning(|p| p == project().join("vendor/ibexa/content"));
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_defaults_to_product() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Text, ReleaseDisplay::Major);

        let text = output(|out| show(&runtime, &config, None, false, out));
        assert!(text.contains("Product: Ibexa Content"));
        assert!(text.contains("Version: 4.6.3 (release 4.6)"));
    }

    #[test]
    fn test_show_json() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Json, ReleaseDisplay::Major);

        let text = output(|out| show(&runtime, &config, Some("symfony_kernel"), false, out));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["environment"], "prod");
        assert_eq!(json["bundles"][0], "ibexa/core");
    }

    #[test]
    fn test_show_all_json() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Json, ReleaseDisplay::Major);

        let text = output(|out| show(&runtime, &config, None, true, out));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["ibexa"]["variant"], "content");
        assert_eq!(json["composer"]["packages"].as_array().unwrap().len(), 2);
        assert_eq!(json["symfony_kernel"]["debug"], false);
    }

    #[test]
    fn test_show_all_text_sections() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Text, ReleaseDisplay::Major);

        let text = output(|out| show(&runtime, &config, None, true, out));
        assert!(text.starts_with("[composer]\n"));
        assert!(text.contains("\n[ibexa]\n"));
        assert!(text.contains("\n[symfony_kernel]\n"));
    }

    #[test]
    fn test_show_unknown_identifier() {
        let runtime = MockRuntime::new();
        let config = config(OutputFormat::Text, ReleaseDisplay::Major);

        let mut out = Vec::new();
        let err = show(&runtime, &config, Some("php"), false, &mut out).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("php"));
        assert!(msg.contains("No system info collector registered"));
    }

    #[test]
    fn test_list() {
        let runtime = MockRuntime::new();
        let config = config(OutputFormat::Text, ReleaseDisplay::Major);

        let text = output(|out| list(&runtime, &config, out));
        assert_eq!(text, "composer\nibexa\nsymfony_kernel\n");
    }

    #[test]
    fn test_powered_by() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Text, ReleaseDisplay::Minor);

        let text = output(|out| powered_by(&runtime, &config, out));
        assert_eq!(text, "Ibexa Content v4.6\n");
    }

    #[test]
    fn test_powered_by_json() {
        let mut runtime = MockRuntime::new();
        configure_project(&mut runtime);
        let config = config(OutputFormat::Json, ReleaseDisplay::None);

        let text = output(|out| powered_by(&runtime, &config, out));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["powered_by"], "Ibexa Content");
    }
}
