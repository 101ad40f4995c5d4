use super::load_context;
use crate::hooks;
use anyhow::Result;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug, Default)]
pub struct PreCommitArgs {}

pub async fn execute(_args: PreCommitArgs, config_path: Option<&Path>) -> Result<()> {
    let context = load_context(config_path)?;
    hooks::pre_commit::execute(context).await
}
