//! OGDL CLI - Command line interface for graph documents

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, eval, get, set, show};
use config::{config_file_path, Config};
use ogdl_core::EvalOptions;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "ogdl")]
#[command(author, version, about = "Query and evaluate ordered graph documents")]
pub struct Cli {
    /// Config file
    #[arg(long, env = "OGDL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Report malformed path indices as strings instead of failing
    #[arg(long, global = true)]
    pub legacy_errors: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a JSON document as OGDL text
    Show(show::ShowArgs),
    /// Resolve a path in a document
    Get(get::GetArgs),
    /// Write a value at a path and print the document
    Set(set::SetArgs),
    /// Evaluate an expression against a document
    Eval(eval::EvalArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings resolved from the config file and global flags
pub struct AppContext {
    pub format: OutputFormat,
    pub options: EvalOptions,
    pub include_root: bool,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);
        let config = Config::load(&path)?;

        let format = cli.format.as_deref().unwrap_or(&config.format);
        let options =
            EvalOptions::new().with_legacy_errors(cli.legacy_errors || config.legacy_errors);

        Ok(Self {
            format: OutputFormat::from(format),
            options,
            include_root: config.include_root,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting ogdl CLI");

    match &cli.command {
        Commands::Config(args) => return config_cmd::run(args, &cli.config_path()),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Show(args) => show::run(args, &ctx)?,
        Commands::Get(args) => get::run(args, &ctx)?,
        Commands::Set(args) => set::run(args, &ctx)?,
        Commands::Eval(args) => eval::run(args, &ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
