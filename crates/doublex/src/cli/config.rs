//! The `doublex config` command for configuration management.

use anyhow::Context;
use clap::{Args, Subcommand};
use doublex_core::config::expand_path;
use doublex_core::{Config, ProgressMode};
use std::path::{Path, PathBuf};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,

    /// Show config file path
    Path,

    /// Validate a config file and summarize what a compose run would use
    Check {
        /// File to check (defaults to the standard location)
        path: Option<PathBuf>,
    },

    /// Write a config file with the default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

const CONFIG_HEADER: &str = "\
# doublex configuration
# Missing keys fall back to their defaults.

";

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", describe_source(&Config::default_path()));
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Check { path } => {
            let path = path
                .map(|p| expand_path(&p.to_string_lossy()))
                .unwrap_or_else(Config::default_path);
            println!("{}", check(&path)?);
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(&path, format!("{CONFIG_HEADER}{toml}"))?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Comment line naming where `config show` values come from.
fn describe_source(path: &Path) -> String {
    if path.exists() {
        format!("# Loaded from {}", path.display())
    } else {
        format!("# No config file at {}; showing defaults", path.display())
    }
}

/// Load and validate `path`, then describe the settings a run would use.
fn check(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!(
            "No config file at {}\n\n  Hint: Run `doublex config init` to create one.",
            path.display()
        );
    }
    let config =
        Config::load_from(path).with_context(|| format!("{} is not valid", path.display()))?;

    let seed = config
        .pairing
        .seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());
    let progress = match config.progress.mode {
        ProgressMode::Percent => "progress bar",
        ProgressMode::Verbose => "status lines",
    };

    Ok(format!(
        "{} is valid\n  \
         Pairs:    {} files (seed: {})\n  \
         Blend:    brightness x{}, JPEG quality {}\n  \
         Resize:   longest edge / {}\n  \
         Progress: {}",
        path.display(),
        config.pairing.supported_formats.join(", "),
        seed,
        config.compose.brightness,
        config.compose.jpeg_quality,
        config.compose.resize_divisor,
        progress,
    ))
}
