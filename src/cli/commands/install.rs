use crate::categories::Phase;
use crate::cli::Output;
use crate::git::GitOperations;
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

/// Line that marks a hook script as written by hooklint
pub const HOOK_MARKER: &str = "# installed by hooklint";

#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Specify which hooks to install (default: all)
    #[arg(long = "hook", value_delimiter = ',')]
    pub hooks: Vec<Phase>,

    /// Overwrite existing hooks
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InstallArgs, output: &Output) -> Result<()> {
    let git = GitOperations::discover()?;
    let binary = std::env::current_exe().context("Cannot locate the hooklint executable")?;

    let phases = if args.hooks.is_empty() {
        Phase::ALL.to_vec()
    } else {
        args.hooks
    };

    output.header("Installing git hooks");
    let mut skipped = 0;
    for phase in phases {
        let name = phase.hook_name();
        if let Some(existing) = git.read_hook(name)? {
            if !existing.contains(HOOK_MARKER) && !args.force {
                output.warning(&format!(
                    "{name} hook already exists and was not written by hooklint (use --force to replace it)"
                ));
                skipped += 1;
                continue;
            }
        }

        let path = git.install_hook(name, &hook_script(&binary, phase))?;
        output.success(&format!("Installed {name} hook at {}", path.display()));
    }

    if skipped > 0 {
        output.info(&format!("{skipped} hook(s) left untouched"));
    }
    Ok(())
}

/// Shell shim that forwards git's arguments to hooklint
pub fn hook_script(binary: &Path, phase: Phase) -> String {
    let quoted = binary.display().to_string().replace('\'', r"'\''");
    format!(
        "#!/bin/sh\n{HOOK_MARKER}\nexec '{quoted}' {} \"$@\"\n",
        phase.hook_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_script() {
        let script = hook_script(Path::new("/usr/local/bin/hooklint"), Phase::PrepareCommitMsg);
        assert_eq!(
            script,
            "#!/bin/sh\n# installed by hooklint\nexec '/usr/local/bin/hooklint' prepare-commit-msg \"$@\"\n"
        );
    }

    #[test]
    fn test_hook_script_quotes_path() {
        let script = hook_script(Path::new("/opt/it's/hooklint"), Phase::PreCommit);
        assert!(script.contains(r"exec '/opt/it'\''s/hooklint' pre-commit"));
    }
}
