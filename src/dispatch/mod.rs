//! Strategy selection and stage execution
//!
//! Each detected category gets exactly one strategy, picked in this order:
//! project-local override script, shared override script, the configured
//! generic commands, and finally a notice that nothing is configured.

use crate::categories::{FileCategory, Phase};
use crate::config::ToolCommand;
use crate::error::HookError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod pipeline;

pub use pipeline::{Dispatcher, StageReport};

/// How a category is checked in one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Executable in the repository root
    ProjectOverride(PathBuf),
    /// Executable in the shared override directory
    SharedOverride(PathBuf),
    /// Configured generic commands, run in order
    Generic(Vec<ToolCommand>),
    /// Nothing to run; the text is emitted instead
    Notice(String),
}

impl Strategy {
    /// Short label for logs and `detect` output
    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::ProjectOverride(_) => "project-override",
            Strategy::SharedOverride(_) => "shared-override",
            Strategy::Generic(_) => "generic",
            Strategy::Notice(_) => "notice",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ProjectOverride(path) => write!(f, "project override {}", path.display()),
            Strategy::SharedOverride(path) => write!(f, "shared override {}", path.display()),
            Strategy::Generic(commands) => {
                let shown: Vec<String> = commands.iter().map(ToolCommand::display).collect();
                write!(f, "{}", shown.join(" && "))
            }
            Strategy::Notice(text) => f.write_str(text),
        }
    }
}

/// Picks the strategy for a category from the filesystem and configuration
pub struct StrategyResolver<'a> {
    repo_root: &'a Path,
    shared_dir: Option<&'a Path>,
}

impl<'a> StrategyResolver<'a> {
    pub fn new(repo_root: &'a Path, shared_dir: Option<&'a Path>) -> Self {
        Self {
            repo_root,
            shared_dir,
        }
    }

    /// Resolve the strategy for `category` in `phase`
    ///
    /// Fails only when the phase requires an override script and none exists.
    pub fn resolve(
        &self,
        category: FileCategory,
        phase: Phase,
        commands: Vec<ToolCommand>,
    ) -> Result<Strategy, HookError> {
        let script = category.override_script(phase);

        let local = self.repo_root.join(&script);
        if is_executable(&local) {
            debug!("Using project override {}", local.display());
            return Ok(Strategy::ProjectOverride(local));
        }

        if let Some(shared_dir) = self.shared_dir {
            let shared = shared_dir.join(&script);
            if is_executable(&shared) {
                debug!("Using shared override {}", shared.display());
                return Ok(Strategy::SharedOverride(shared));
            }
        }

        if phase.requires_override(category) {
            let mut searched = vec![self.repo_root.to_path_buf()];
            searched.extend(self.shared_dir.map(Path::to_path_buf));
            return Err(HookError::MissingOverride {
                category,
                script,
                searched,
            });
        }

        if commands.is_empty() {
            return Ok(Strategy::Notice(format!(
                "no {category} checker configured for {phase}"
            )));
        }

        Ok(Strategy::Generic(commands))
    }
}

/// Regular file with at least one execute bit set
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if meta.permissions().mode() & 0o111 == 0 {
            debug!("Ignoring {}: not executable", path.display());
            return false;
        }
    }

    true
}
