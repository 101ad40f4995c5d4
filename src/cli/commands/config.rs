//! Configuration command implementations
//!
//! Commands for inspecting the merged hooklint configuration.

use crate::cli::Output;
use crate::config::HooklintConfig;
use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::path::Path;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Check that the configuration loads and is valid
    Validate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// Execute config commands
pub async fn execute(args: ConfigArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = HooklintConfig::load_with_custom_config(config_path)?;

    match args.command {
        ConfigCommands::Show { format } => {
            print!("{}", render(&config, format)?);
            Ok(())
        }
        ConfigCommands::Validate => {
            output.success("Configuration is valid");
            output.table_row(
                "Categories enabled",
                &config
                    .enabled_categories()
                    .iter()
                    .map(|c| c.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if let Some(dir) = config.shared_override_dir() {
                output.table_row("Shared overrides", &dir.display().to_string());
            }
            Ok(())
        }
    }
}

fn render(config: &HooklintConfig, format: ConfigFormat) -> Result<String> {
    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config).context("Failed to render TOML")?,
        ConfigFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(config).context("Failed to render JSON")?;
            json.push('\n');
            json
        }
        ConfigFormat::Yaml => serde_yml::to_string(config).context("Failed to render YAML")?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let config = HooklintConfig::load().unwrap();

        let toml_text = render(&config, ConfigFormat::Toml).unwrap();
        assert!(toml_text.contains("[categories.go]"));
        assert!(toml_text.contains("program = \"go\""));

        let json_text = render(&config, ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();
        assert_eq!(value["categories"]["shell"]["prepare_commit_msg"][0]["program"], "shellcheck");

        let yaml_text = render(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml_text.contains("shellcheck"));
    }
}
