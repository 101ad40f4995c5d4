use super::install::HOOK_MARKER;
use crate::categories::Phase;
use crate::cli::Output;
use crate::git::GitOperations;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct UninstallArgs {}

pub async fn execute(_args: UninstallArgs, output: &Output) -> Result<()> {
    let git = GitOperations::discover()?;

    output.header("Removing git hooks");
    let mut removed = 0;
    for phase in Phase::ALL {
        let name = phase.hook_name();
        match git.read_hook(name)? {
            Some(content) if content.contains(HOOK_MARKER) => {
                git.remove_hook(name)?;
                output.success(&format!("Removed {name} hook"));
                removed += 1;
            }
            Some(_) => output.warning(&format!("Keeping {name} hook: not installed by hooklint")),
            None => output.verbose(&format!("No {name} hook installed")),
        }
    }

    if removed == 0 {
        output.info("No hooklint hooks found");
    }
    Ok(())
}
