//! Config command for the settings file
//!
//! Keys: `legacy_errors`, `include_root`, `format`. The file is the one
//! named by `--config` / `OGDL_CONFIG`, or the per-user default.

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a key (legacy_errors, include_root, format)
    Get { key: String },
    /// Change a key and write the file
    Set { key: String, value: String },
    /// Reset a key to its default
    Unset { key: String },
    /// List every key with its value and meaning
    List,
    /// Print the settings file location
    Path,
    /// Write a settings file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            let value = config
                .get(key)
                .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => update(path, |c| c.set(key, value))?,
        ConfigCommands::Unset { key } => update(path, |c| c.reset(key))?,
        ConfigCommands::List => list(&Config::load(path)?),
        ConfigCommands::Path => {
            let state = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), state);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save(path)?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}

/// Load, apply `change`, save, then echo the resulting settings
fn update(
    path: &Path,
    change: impl FnOnce(&mut Config) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let mut config = Config::load(path)?;
    change(&mut config)?;
    config.save(path)?;
    tracing::debug!("Saved config to {:?}", path);
    list(&config);
    Ok(())
}

fn list(config: &Config) {
    let defaults = Config::default();
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_default();
        let marker = if defaults.get(key).as_deref() == Some(value.as_str()) {
            " (default)"
        } else {
            ""
        };
        let help = Config::describe(key).unwrap_or_default();
        println!("{:<14} = {:<6}{:<10}  # {}", key, value, marker, help);
    }
}
