//! Pre-commit hook implementation
//!
//! Runs the gating stages before git records the commit:
//! - Go: `go build` and `go test` (or a `go-pre-commit` override); failure aborts
//! - Python: the repository's `python-pre-commit` script, which must exist
//!
//! Diagnostics stream to stdout as each stage finishes.

use super::HookContext;
use crate::categories::Phase;
use crate::dispatch::Dispatcher;
use anyhow::Result;
use tracing::info;

/// Execute pre-commit hook
pub async fn execute(context: HookContext) -> Result<()> {
    let detected = context.detect()?;
    if detected.is_empty() {
        info!("No checkable files tracked, nothing to do");
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Dispatcher::new(&context)
        .run_phase(Phase::PreCommit, &detected, &mut out)
        .await
}
