//! Prepare-commit-msg hook implementation
//!
//! Runs every advisory linter stage, collects the output and hands it to the
//! [`Route`] chosen from git's arguments.

use super::HookContext;
use super::router::Route;
use crate::categories::Phase;
use crate::dispatch::Dispatcher;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// Positional arguments git passes to the hook
#[derive(Debug, Clone, Default)]
pub struct MessageArgs {
    pub message_file: Option<PathBuf>,
    pub source: Option<String>,
}

/// Execute prepare-commit-msg hook
pub async fn execute(context: HookContext, args: MessageArgs) -> Result<()> {
    let route = Route::from_args(args.message_file.as_deref(), args.source.as_deref());
    debug!("Routing diagnostics via {:?}", route);

    let output = collect(&context).await?;
    route.emit(&output, &context.comment_char)
}

/// Run all stages and return the concatenated diagnostics
pub async fn collect(context: &HookContext) -> Result<String> {
    let detected = context.detect()?;

    let mut buffer = Vec::new();
    Dispatcher::new(context)
        .run_phase(Phase::PrepareCommitMsg, &detected, &mut buffer)
        .await?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
