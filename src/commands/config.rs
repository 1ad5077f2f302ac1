use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use log::debug;

use crate::collector::ReleaseDisplay;
use crate::runtime::Runtime;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Unknown output format: {}. Expected text or json.", s),
        }
    }
}

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub project_dir: PathBuf,
    pub product_version: Option<String>,
    pub release_display: ReleaseDisplay,
    pub format: OutputFormat,
}

impl Config {
    /// Resolve settings, defaulting the project directory to the current directory.
    pub fn new<R: Runtime>(
        runtime: &R,
        project_dir: Option<PathBuf>,
        product_version: Option<String>,
        release_display: ReleaseDisplay,
        format: OutputFormat,
    ) -> Result<Self> {
        let project_dir = match project_dir {
            Some(path) => path,
            None => runtime.current_dir()?,
        };
        debug!("Using project directory: {:?}", project_dir);

        Ok(Self {
            project_dir,
            product_version,
            release_display,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn test_config_defaults_to_current_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .returning(|| Ok(PathBuf::from("/var/www/project")));

        let config = Config::new(
            &runtime,
            None,
            None,
            ReleaseDisplay::default(),
            OutputFormat::default(),
        )
        .unwrap();
        assert_eq!(config.project_dir, PathBuf::from("/var/www/project"));
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_explicit_project_dir() {
        let runtime = MockRuntime::new(); // current_dir must not be called

        let config = Config::new(
            &runtime,
            Some(PathBuf::from("/srv/site")),
            Some("4.6.3".into()),
            ReleaseDisplay::Minor,
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(config.project_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.product_version.as_deref(), Some("4.6.3"));
    }

    #[test]
    fn test_config_current_dir_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .returning(|| Err(anyhow::anyhow!("cwd removed")));

        let result = Config::new(
            &runtime,
            None,
            None,
            ReleaseDisplay::default(),
            OutputFormat::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
