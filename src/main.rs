//! Build configuration CLI
//!
//! Entry point for the `build` command-line tool.

use clap::error::ErrorKind;
use clap::Parser;
use ext_build_config::{ConfigUpdater, Environment, Settings, SettingsOverrides, UpdateError};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "build")]
#[command(about = "Switch the extension build between development and production", version)]
struct Cli {
    /// Target environment: development or production [default: development]
    environment: Option<String>,

    /// Project root that relative paths resolve against
    #[arg(long, short = 'C', default_value = ".")]
    root: PathBuf,

    /// Path to settings file (default: <root>/build.toml if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Environment table (default: env.json)
    #[arg(long)]
    env_config: Option<PathBuf>,

    /// Extension manifest (default: manifest.json)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Environment marker script (default: env.js)
    #[arg(long)]
    marker: Option<PathBuf>,

    /// Generated version stamp (default: version.js)
    #[arg(long)]
    version_file: Option<PathBuf>,

    /// Do not regenerate the version stamp
    #[arg(long)]
    no_version_info: bool,

    /// Log each step to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                println!("Error: {}", usage_error_line(&e));
                process::exit(1);
            }
        },
    };

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "ext_build_config={}",
            log_level
        )))
        .with_writer(std::io::stderr)
        .init();

    // Validate before anything touches the filesystem
    let env = match Environment::from_arg(cli.environment.as_deref()) {
        Ok(env) => env,
        Err(e) => {
            println!("Error: {}", e);
            process::exit(1);
        }
    };

    match run(&cli, env) {
        Ok(()) => println!("Configuration updated for the {} environment", env),
        Err(e) => {
            println!("Failed to update configuration: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, env: Environment) -> Result<(), UpdateError> {
    let overrides = SettingsOverrides {
        env_config: cli.env_config.clone(),
        manifest: cli.manifest.clone(),
        marker: cli.marker.clone(),
        version_info: cli.version_file.clone(),
        version_info_enabled: cli.no_version_info.then_some(false),
    };
    let settings = Settings::load(&cli.root, cli.config.as_deref(), &overrides)?;

    let report = ConfigUpdater::new(settings).run(env)?;
    tracing::debug!(?report, "run finished");
    Ok(())
}

/// First line of a clap error, without its `error: ` prefix
fn usage_error_line(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let line = rendered
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("invalid arguments");
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
