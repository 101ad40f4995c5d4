//! Configuration management for hooklint
//!
//! Configuration is layered with figment: the embedded defaults, then an
//! optional file passed on the command line, then `HOOKLINT_*` environment
//! variables. Nothing is ever written back.

use crate::categories::{FileCategory, Phase};
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod smart_load;

#[cfg(test)]
mod tests;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment overrides, e.g. `HOOKLINT_GENERAL__COMMENT_CHAR`
pub const ENV_PREFIX: &str = "HOOKLINT_";

/// Main configuration structure for hooklint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooklintConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Per-category settings keyed by category slug
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Marker prefixed to diagnostic lines written into the commit message
    #[serde(default)]
    pub comment_char: String,

    /// Directory searched for override scripts after the repository root
    #[serde(default)]
    pub shared_override_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Commands run in the pre-commit phase
    #[serde(default)]
    pub pre_commit: Vec<ToolCommand>,

    /// Commands run in the prepare-commit-msg phase
    #[serde(default)]
    pub prepare_commit_msg: Vec<ToolCommand>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            pre_commit: Vec::new(),
            prepare_commit_msg: Vec::new(),
        }
    }
}

/// A generic external tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Append the category's matched files to `args`
    #[serde(default)]
    pub pass_files: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str], pass_files: bool) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            pass_files,
        }
    }

    /// Command line as shown to users, without the file arguments
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_enabled() -> bool {
    true
}

impl HooklintConfig {
    /// Load defaults merged with environment overrides
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Load configuration, layering `custom_config` between defaults and env
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(path) = custom_config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(smart_load::auto(path));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: HooklintConfig = figment
            .extract()
            .context("Failed to parse hooklint configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unknown categories and empty program names
    pub fn validate(&self) -> Result<()> {
        for (slug, category) in &self.categories {
            slug.parse::<FileCategory>()
                .with_context(|| format!("Invalid [categories.{slug}] table"))?;
            for command in category.pre_commit.iter().chain(&category.prepare_commit_msg) {
                if command.program.trim().is_empty() {
                    anyhow::bail!("Empty program name in [categories.{slug}]");
                }
            }
        }
        Ok(())
    }

    /// Settings for `category`, falling back to an enabled empty entry
    pub fn category(&self, category: FileCategory) -> CategoryConfig {
        self.categories
            .get(category.slug())
            .cloned()
            .unwrap_or_default()
    }

    /// Categories that are not switched off
    pub fn enabled_categories(&self) -> Vec<FileCategory> {
        FileCategory::ALL
            .into_iter()
            .filter(|c| self.category(*c).enabled)
            .collect()
    }

    /// Generic commands for `category` in `phase`
    pub fn commands(&self, category: FileCategory, phase: Phase) -> Vec<ToolCommand> {
        let config = self.category(category);
        match phase {
            Phase::PreCommit => config.pre_commit,
            Phase::PrepareCommitMsg => config.prepare_commit_msg,
        }
    }

    /// Configured comment marker, if any
    pub fn comment_char(&self) -> Option<&str> {
        let marker = self.general.comment_char.trim();
        (!marker.is_empty()).then_some(marker)
    }

    /// Directory holding shared override scripts
    pub fn shared_override_dir(&self) -> Option<PathBuf> {
        let configured = self.general.shared_override_dir.trim();
        if !configured.is_empty() {
            return Some(expand_home(configured));
        }
        dirs::config_dir().map(|dir| dir.join("hooklint").join("overrides"))
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}
