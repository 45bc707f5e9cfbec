//! doublex CLI - create double exposure images from randomly paired photos.
//!
//! Pick two folders of JPEGs (or one, split in half at random), and every
//! random pair is blended into a single "double exposure" image.
//!
//! # Usage
//!
//! ```bash
//! # Blend pairs drawn across two folders
//! doublex compose ./city --with ./forest --output ./out
//!
//! # Split one folder in two, downsample and convert to greyscale
//! doublex compose ./roll --output ./out --resize --greyscale
//!
//! # Preview the pairing without writing anything
//! doublex pairs ./city --with ./forest --seed 7
//!
//! # Guided mode
//! doublex
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// doublex - create double exposure images from randomly paired photos.
#[derive(Parser, Debug)]
#[command(name = "doublex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Pair images and write double exposures
    Compose(cli::compose::ComposeArgs),

    /// Print the pairing a run would use, without writing images
    Pairs(cli::pairs::PairsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match doublex_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `doublex config path`."
            );
            doublex_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("doublex v{}", doublex_core::VERSION);

    match cli.command {
        Some(Commands::Compose(args)) => cli::compose::execute(args, &config).await,
        Some(Commands::Pairs(args)) => cli::pairs::execute(args, &config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
