//! Git hook entry points
//!
//! Both hooks share a [`HookContext`] built once per run: the repository
//! root, the tracked file snapshot and the loaded configuration. Stages read
//! everything they need from it.

use crate::categories::{CategoryDetector, DetectedCategories};
use crate::config::HooklintConfig;
use crate::git::GitOperations;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod pre_commit;
pub mod prepare_commit_msg;
pub mod router;

/// Fallback comment marker when neither config nor git sets one
pub const DEFAULT_COMMENT_CHAR: &str = "#";

/// Everything a hook run needs, computed once
#[derive(Debug, Clone)]
pub struct HookContext {
    pub repo_root: PathBuf,
    pub tracked_files: Vec<PathBuf>,
    pub config: HooklintConfig,
    pub shared_override_dir: Option<PathBuf>,
    pub comment_char: String,
}

impl HookContext {
    /// Build a context for the repository containing `start`
    pub fn load(start: &Path, config: HooklintConfig) -> Result<Self> {
        let git = GitOperations::discover_from(start)?;
        let repo_root = git.workdir()?.to_path_buf();
        let tracked_files = git.tracked_files()?;

        let comment_char = config
            .comment_char()
            .map(str::to_string)
            .or_else(|| git.comment_char())
            .unwrap_or_else(|| DEFAULT_COMMENT_CHAR.to_string());
        let shared_override_dir = config.shared_override_dir();

        debug!(
            "Repository {} tracks {} file(s)",
            repo_root.display(),
            tracked_files.len()
        );

        Ok(Self {
            repo_root,
            tracked_files,
            config,
            shared_override_dir,
            comment_char,
        })
    }

    /// Categories present in the tracked file set
    pub fn detect(&self) -> Result<DetectedCategories> {
        let detector = CategoryDetector::for_categories(self.config.enabled_categories())?;
        Ok(detector.detect(&self.repo_root, &self.tracked_files))
    }
}
