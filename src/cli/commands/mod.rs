//! Command implementations for hooklint CLI
//!
//! Each command is organized into its own module with its clap arguments.

use crate::config::HooklintConfig;
use crate::hooks::HookContext;
use anyhow::Result;
use std::path::Path;

pub mod config;
pub mod detect;
pub mod install;
pub mod pre_commit;
pub mod prepare_commit_msg;
pub mod uninstall;

/// Load configuration and build the hook context for the current directory
pub(crate) fn load_context(config_path: Option<&Path>) -> Result<HookContext> {
    let config = HooklintConfig::load_with_custom_config(config_path)?;
    let current_dir = std::env::current_dir()?;
    HookContext::load(&current_dir, config)
}
