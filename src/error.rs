//! Fatal hook errors
//!
//! Everything a linter prints is advisory. The variants here are the only
//! outcomes that stop a hook and make git abort the operation.

use crate::categories::FileCategory;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    /// A category that cannot be checked generically has no override script
    #[error(
        "{category} files are tracked but no `{script}` script was found (looked in {})",
        format_locations(.searched)
    )]
    MissingOverride {
        category: FileCategory,
        script: String,
        searched: Vec<PathBuf>,
    },

    /// A gating build/test command failed or could not be started
    #[error("{category} check `{command}` failed{}", format_code(.code))]
    StageFailed {
        category: FileCategory,
        command: String,
        code: Option<i32>,
    },
}

impl HookError {
    /// Category whose stage produced the error
    pub fn category(&self) -> FileCategory {
        match self {
            HookError::MissingOverride { category, .. } => *category,
            HookError::StageFailed { category, .. } => *category,
        }
    }
}

fn format_locations(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " without an exit code".to_string(),
    }
}
