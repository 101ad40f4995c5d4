//! File categories and hook phases
//!
//! A category is a family of files (YAML, Go sources, shell scripts, ...)
//! that is checked by the same tool. Detection lives in [`detector`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod detector;

pub use detector::{CategoryDetector, DetectedCategories};

/// Recognized file categories, in prepare-commit-msg stage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Yaml,
    Json,
    Python,
    Go,
    Shell,
    Dockerfile,
    Travis,
}

impl FileCategory {
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Yaml,
        FileCategory::Json,
        FileCategory::Python,
        FileCategory::Go,
        FileCategory::Shell,
        FileCategory::Dockerfile,
        FileCategory::Travis,
    ];

    /// Key used in configuration tables and override script names
    pub fn slug(&self) -> &'static str {
        match self {
            FileCategory::Yaml => "yaml",
            FileCategory::Json => "json",
            FileCategory::Python => "python",
            FileCategory::Go => "go",
            FileCategory::Shell => "shell",
            FileCategory::Dockerfile => "dockerfile",
            FileCategory::Travis => "travis",
        }
    }

    /// Path globs that put a file in this category
    pub fn globs(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Yaml => &["*.yml", "*.yaml"],
            FileCategory::Json => &["*.json"],
            FileCategory::Python => &["*.py"],
            FileCategory::Go => &["*.go"],
            FileCategory::Shell => &["*.sh", "*.bash"],
            FileCategory::Dockerfile => &["Dockerfile", "Dockerfile.*", "*.dockerfile"],
            FileCategory::Travis => &[".travis.yml"],
        }
    }

    /// Override script name for a phase, e.g. `go-prepare-commit-msg`
    pub fn override_script(&self, phase: Phase) -> String {
        format!("{}-{}", self.slug(), phase.hook_name())
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileCategory::Yaml => "YAML",
            FileCategory::Json => "JSON",
            FileCategory::Python => "Python",
            FileCategory::Go => "Go",
            FileCategory::Shell => "Shell",
            FileCategory::Dockerfile => "Dockerfile",
            FileCategory::Travis => "Travis",
        };
        f.write_str(name)
    }
}

impl FromStr for FileCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileCategory::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown file category: {s}"))
    }
}

/// Git lifecycle point a pipeline runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    PreCommit,
    PrepareCommitMsg,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::PreCommit, Phase::PrepareCommitMsg];

    /// Name git uses for the hook
    pub fn hook_name(&self) -> &'static str {
        match self {
            Phase::PreCommit => "pre-commit",
            Phase::PrepareCommitMsg => "prepare-commit-msg",
        }
    }

    /// Categories checked in this phase, in run order
    pub fn stages(&self) -> &'static [FileCategory] {
        match self {
            Phase::PreCommit => &[FileCategory::Go, FileCategory::Python],
            Phase::PrepareCommitMsg => &FileCategory::ALL,
        }
    }

    /// Whether a failing strategy for `category` halts this phase
    pub fn is_gating(&self, category: FileCategory) -> bool {
        matches!((self, category), (Phase::PreCommit, FileCategory::Go))
    }

    /// Whether `category` can only be handled by an override script here
    pub fn requires_override(&self, category: FileCategory) -> bool {
        matches!((self, category), (Phase::PreCommit, FileCategory::Python))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}

impl FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.hook_name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown hook: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_script_names() {
        assert_eq!(
            FileCategory::Python.override_script(Phase::PreCommit),
            "python-pre-commit"
        );
        assert_eq!(
            FileCategory::Go.override_script(Phase::PrepareCommitMsg),
            "go-prepare-commit-msg"
        );
        assert_eq!(
            FileCategory::Shell.override_script(Phase::PrepareCommitMsg),
            "shell-prepare-commit-msg"
        );
    }

    #[test]
    fn test_fatal_cases_are_limited_to_pre_commit() {
        for category in FileCategory::ALL {
            assert!(!Phase::PrepareCommitMsg.is_gating(category));
            assert!(!Phase::PrepareCommitMsg.requires_override(category));
        }
        assert!(Phase::PreCommit.is_gating(FileCategory::Go));
        assert!(!Phase::PreCommit.is_gating(FileCategory::Python));
        assert!(Phase::PreCommit.requires_override(FileCategory::Python));
        assert!(!Phase::PreCommit.requires_override(FileCategory::Go));
    }

    #[test]
    fn test_parse_round_trip() {
        assert_eq!("shell".parse::<FileCategory>().unwrap(), FileCategory::Shell);
        assert_eq!("YAML".parse::<FileCategory>().unwrap(), FileCategory::Yaml);
        assert!("rust".parse::<FileCategory>().is_err());
        assert_eq!("pre-commit".parse::<Phase>().unwrap(), Phase::PreCommit);
        assert!("post-checkout".parse::<Phase>().is_err());
    }

    #[test]
    fn test_pre_commit_runs_go_before_python() {
        assert_eq!(
            Phase::PreCommit.stages(),
            &[FileCategory::Go, FileCategory::Python]
        );
        assert_eq!(Phase::PrepareCommitMsg.stages().len(), 7);
    }
}
