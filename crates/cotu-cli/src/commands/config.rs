//! Config command - manage configuration.

use std::fs;

use clap::{Args, Subcommand};
use console::style;

use cotu_core::models::config::AppConfig;

use super::paths::{config_file, load_config, store_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file with defaults
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (ultima_carpeta, formato_resumido,
        /// solo_carpetas_cotu)
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init { force } => init_config(config_path, force),
        ConfigCommand::Set { key, value } => set_config(config_path, &key, &value),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    if !config_file(config_path).exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_config(config_path);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(config_path: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config_file(config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    AppConfig::default().save(&path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn set_config(config_path: Option<&str>, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = load_config(config_path);

    match key {
        "ultima_carpeta" => config.last_folder = value.to_string(),
        "formato_resumido" => config.condensed = parse_bool(value)?,
        "solo_carpetas_cotu" => config.only_cotu = parse_bool(value)?,
        other => anyhow::bail!(
            "unknown configuration key: {other} (known keys: ultima_carpeta, formato_resumido, solo_carpetas_cotu)"
        ),
    }

    store_config(&config, config_path)?;
    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "si" | "sí" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("expected a boolean value, got: {other}"),
    }
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'cotu config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("sí").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("tal vez").is_err());
    }
}
