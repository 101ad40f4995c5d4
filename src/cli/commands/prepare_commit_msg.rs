use super::load_context;
use crate::hooks::{self, prepare_commit_msg::MessageArgs};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub struct PrepareCommitMsgArgs {
    /// Commit message file; omit to preview the diagnostics on stdout
    pub message_file: Option<PathBuf>,

    /// Source of the message as given by git (`message` for `git commit -m`)
    pub source: Option<String>,

    /// Commit object name git passes for amends
    #[arg(hide = true)]
    pub sha: Option<String>,
}

pub async fn execute(args: PrepareCommitMsgArgs, config_path: Option<&Path>) -> Result<()> {
    let context = load_context(config_path)?;
    let message_args = MessageArgs {
        message_file: args.message_file,
        source: args.source,
    };
    hooks::prepare_commit_msg::execute(context, message_args).await
}
