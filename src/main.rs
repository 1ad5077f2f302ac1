use anyhow::Result;
use clap::Parser;
use dxp_info::collector::ReleaseDisplay;
use dxp_info::commands::{self, config::Config, config::OutputFormat};
use std::io;
use std::path::PathBuf;

/// dxp-info - Ibexa DXP system information
///
/// Reports the product edition, version, maintenance status and package
/// stability of an Ibexa DXP project.
///
/// Examples:
///   dxp-info show                 # Product report for the current directory
///   dxp-info -p /srv/site show composer --format json
#[derive(Parser, Debug)]
#[command(author, version = env!("DXP_INFO_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory containing composer.lock (defaults to the current directory)
    #[arg(
        long = "project-dir",
        short = 'p',
        env = "DXP_PROJECT_DIR",
        value_name = "PATH",
        global = true
    )]
    pub project_dir: Option<PathBuf>,

    /// Report this product version instead of the one in composer.lock
    #[arg(long = "product-version", value_name = "VERSION", global = true)]
    pub product_version: Option<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show a system info report
    Show(ShowArgs),

    /// Print the "powered by" footer text
    PoweredBy(PoweredByArgs),

    /// List available report identifiers
    List,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Report identifier (ibexa, composer, symfony_kernel)
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: Option<String>,

    /// Show every report
    #[arg(long, conflicts_with = "identifier")]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct PoweredByArgs {
    /// How much of the release to reveal: none, major or minor
    #[arg(long, default_value = "major")]
    pub release: ReleaseDisplay,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let runtime = dxp_info::runtime::RealRuntime;
    let release_display = match &cli.command {
        Commands::PoweredBy(args) => args.release,
        _ => ReleaseDisplay::default(),
    };
    let config = Config::new(
        &runtime,
        cli.project_dir,
        cli.product_version,
        release_display,
        cli.format,
    )?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Show(args) => commands::show(
            &runtime,
            &config,
            args.identifier.as_deref(),
            args.all,
            &mut stdout,
        )?,
        Commands::PoweredBy(_) => commands::powered_by(&runtime, &config, &mut stdout)?,
        Commands::List => commands::list(&runtime, &config, &mut stdout)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_show_parsing() {
        let cli = Cli::try_parse_from(["dxp-info", "show", "composer"]).unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.identifier.as_deref(), Some("composer"));
                assert!(!args.all);
            }
            _ => panic!("Expected Show command"),
        }
        assert_eq!(cli.project_dir, None);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_show_all_conflicts_with_identifier() {
        assert!(Cli::try_parse_from(["dxp-info", "show", "composer", "--all"]).is_err());
        assert!(Cli::try_parse_from(["dxp-info", "show", "--all"]).is_ok());
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "dxp-info",
            "--project-dir",
            "/srv/site",
            "list",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.project_dir, Some(PathBuf::from("/srv/site")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_powered_by_release() {
        let cli = Cli::try_parse_from(["dxp-info", "powered-by", "--release", "minor"]).unwrap();
        match cli.command {
            Commands::PoweredBy(args) => assert_eq!(args.release, ReleaseDisplay::Minor),
            _ => panic!("Expected PoweredBy command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["dxp-info", "list", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["dxp-info"]).is_err());
    }
}
