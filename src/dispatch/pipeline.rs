//! Sequential stage execution for one hook phase

use super::{Strategy, StrategyResolver};
use crate::categories::{DetectedCategories, FileCategory, Phase};
use crate::error::HookError;
use crate::external::{ToolOutcome, is_available, run_tool};
use crate::hooks::HookContext;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What one stage produced
#[derive(Debug)]
pub struct StageReport {
    pub category: FileCategory,
    /// Tool output exactly as produced, plus any notice lines
    pub output: String,
    /// Set when a gating strategy failed
    pub failure: Option<HookError>,
}

impl StageReport {
    fn new(category: FileCategory) -> Self {
        Self {
            category,
            output: String::new(),
            failure: None,
        }
    }

    /// Append tool output unchanged
    fn push_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Append a notice of our own on a line of its own
    fn push_notice(&mut self, text: &str) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

/// Runs the stages of a phase against a hook context
pub struct Dispatcher<'a> {
    ctx: &'a HookContext,
}

impl<'a> Dispatcher<'a> {
    pub fn new(ctx: &'a HookContext) -> Self {
        Self { ctx }
    }

    /// Run every detected stage of `phase` in order, writing output to `out`
    ///
    /// Output is written as soon as each stage finishes. A fatal stage stops
    /// the pipeline after its own output has been written.
    pub async fn run_phase<W: Write>(
        &self,
        phase: Phase,
        detected: &DetectedCategories,
        out: &mut W,
    ) -> Result<()> {
        for category in phase.stages() {
            let files = detected.files(*category);
            if files.is_empty() {
                continue;
            }

            let report = self.run_stage(phase, *category, files).await?;
            out.write_all(report.output.as_bytes())
                .context("Failed to write diagnostic output")?;
            out.flush().context("Failed to flush diagnostic output")?;

            if let Some(failure) = report.failure {
                return Err(failure.into());
            }
        }
        Ok(())
    }

    /// Resolve and run the single strategy for one category
    pub async fn run_stage(
        &self,
        phase: Phase,
        category: FileCategory,
        files: &[PathBuf],
    ) -> Result<StageReport> {
        let commands = self.ctx.config.commands(category, phase);
        let resolver = StrategyResolver::new(
            &self.ctx.repo_root,
            self.ctx.shared_override_dir.as_deref(),
        );
        let strategy = resolver.resolve(category, phase, commands)?;
        info!("{phase}: checking {} {category} file(s) with {strategy}", files.len());

        let mut report = StageReport::new(category);
        match strategy {
            Strategy::ProjectOverride(script) | Strategy::SharedOverride(script) => {
                self.run_override(phase, &script, files, &mut report).await?;
            }
            Strategy::Generic(commands) => {
                let mut missing = HashSet::new();
                for command in commands {
                    if missing.contains(&command.program) {
                        continue;
                    }
                    if !is_available(&command.program, &self.ctx.repo_root) {
                        report.push_notice(&not_found_notice(&command.program, category));
                        missing.insert(command.program);
                        continue;
                    }

                    let file_args: &[PathBuf] = if command.pass_files { files } else { &[] };
                    let outcome =
                        run_tool(&command.program, &command.args, file_args, &self.ctx.repo_root)
                            .await?;
                    if self.record(phase, category, &command.display(), outcome, &mut report) {
                        break;
                    }
                }
            }
            Strategy::Notice(text) => report.push_notice(&text),
        }

        Ok(report)
    }

    async fn run_override(
        &self,
        phase: Phase,
        script: &Path,
        files: &[PathBuf],
        report: &mut StageReport,
    ) -> Result<()> {
        let outcome = run_tool(script, &[], files, &self.ctx.repo_root).await?;
        let label = script.display().to_string();
        self.record(phase, report.category, &label, outcome, report);
        Ok(())
    }

    /// Fold a tool outcome into the report; returns true when the stage must stop
    fn record(
        &self,
        phase: Phase,
        category: FileCategory,
        label: &str,
        outcome: ToolOutcome,
        report: &mut StageReport,
    ) -> bool {
        match outcome {
            ToolOutcome::Missing => {
                report.push_notice(&not_found_notice(label, category));
                false
            }
            ToolOutcome::Failed(text) => {
                report.push_notice(&text);
                if phase.is_gating(category) {
                    report.failure = Some(HookError::StageFailed {
                        category,
                        command: label.to_string(),
                        code: None,
                    });
                    return true;
                }
                false
            }
            ToolOutcome::Finished {
                success,
                code,
                output,
            } => {
                report.push_output(&output);
                if success {
                    return false;
                }
                if phase.is_gating(category) {
                    report.failure = Some(HookError::StageFailed {
                        category,
                        command: label.to_string(),
                        code,
                    });
                    return true;
                }
                debug!("{label} reported problems (exit code {code:?})");
                false
            }
        }
    }
}

fn not_found_notice(program: &str, category: FileCategory) -> String {
    format!("{program} not found, skipping {category} checks")
}
