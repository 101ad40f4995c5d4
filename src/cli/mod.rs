//! Command-line interface for hooklint
//!
//! The two hook subcommands are what git runs. The rest manage hook
//! installation and let users inspect what a hook would do.

use crate::categories::Phase;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub mod commands;
mod output;

pub use output::Output;

use commands::{config, detect, install, pre_commit, prepare_commit_msg, uninstall};

#[derive(Parser)]
#[command(
    name = "hooklint",
    version,
    about = "Git hooks that detect file types and dispatch them to linters",
    long_about = "hooklint runs as git's pre-commit and prepare-commit-msg hooks. It detects \
                  which kinds of files are tracked, runs the matching linter, build tool or \
                  repository override script, and reports the results."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pre-commit checks (build/test gates)
    PreCommit(pre_commit::PreCommitArgs),
    /// Run the linters and report into the commit message
    PrepareCommitMsg(prepare_commit_msg::PrepareCommitMsgArgs),
    /// Install hook scripts into the current repository
    Install(install::InstallArgs),
    /// Remove hook scripts installed by hooklint
    Uninstall(uninstall::UninstallArgs),
    /// Show detected file categories and the strategy each hook would use
    Detect(detect::DetectArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Parse arguments, honouring invocation through a hook-named link
    ///
    /// When the binary is called as `pre-commit` or `prepare-commit-msg`
    /// (for example via a symlink in `.git/hooks`), the name selects the
    /// subcommand and the remaining arguments are git's.
    pub fn parse_from_env() -> Self {
        Self::parse_from(multicall_args(std::env::args_os().collect()))
    }

    pub async fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::PreCommit(args)) => pre_commit::execute(args, config_path).await,
            Some(Commands::PrepareCommitMsg(args)) => {
                prepare_commit_msg::execute(args, config_path).await
            }
            Some(Commands::Install(args)) => install::execute(args, &output).await,
            Some(Commands::Uninstall(args)) => uninstall::execute(args, &output).await,
            Some(Commands::Detect(args)) => detect::execute(args, config_path).await,
            Some(Commands::Config(args)) => config::execute(args, config_path, &output).await,
            None => {
                output.info("Run 'hooklint --help' for usage information");
                Ok(())
            }
        }
    }
}

/// Rewrite `argv` so a hook-named executable maps to its subcommand
fn multicall_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let hook = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .and_then(|name| name.parse::<Phase>().ok());

    if let Some(phase) = hook {
        args[0] = OsString::from("hooklint");
        args.insert(1, OsString::from(phase.hook_name()));
    }
    args
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs share stderr with status output; stdout is reserved for diagnostics
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_multicall_prepare_commit_msg() {
        let args = multicall_args(os(&[
            "/repo/.git/hooks/prepare-commit-msg",
            ".git/COMMIT_EDITMSG",
            "message",
        ]));
        assert_eq!(
            args,
            os(&["hooklint", "prepare-commit-msg", ".git/COMMIT_EDITMSG", "message"])
        );

        let cli = Cli::parse_from(args);
        match cli.command {
            Some(Commands::PrepareCommitMsg(args)) => {
                assert_eq!(args.message_file, Some(PathBuf::from(".git/COMMIT_EDITMSG")));
                assert_eq!(args.source.as_deref(), Some("message"));
            }
            _ => panic!("expected prepare-commit-msg"),
        }
    }

    #[test]
    fn test_multicall_leaves_regular_invocation_alone() {
        let args = os(&["hooklint", "detect"]);
        assert_eq!(multicall_args(args.clone()), args);
    }

    #[test]
    fn test_prepare_commit_msg_accepts_sha() {
        let cli = Cli::parse_from(os(&[
            "hooklint",
            "prepare-commit-msg",
            "MSG",
            "commit",
            "abc123",
        ]));
        assert!(matches!(cli.command, Some(Commands::PrepareCommitMsg(_))));
    }

    #[test]
    fn test_pre_commit_takes_no_arguments() {
        assert!(Cli::try_parse_from(os(&["hooklint", "pre-commit", "extra"])).is_err());
        assert!(Cli::try_parse_from(os(&["hooklint", "pre-commit"])).is_ok());
    }
}
