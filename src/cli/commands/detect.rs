use super::load_context;
use crate::categories::{FileCategory, Phase};
use crate::dispatch::StrategyResolver;
use crate::hooks::HookContext;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Args, Debug, Default)]
pub struct DetectArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Detection result for one category
#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub category: FileCategory,
    pub files: Vec<PathBuf>,
    /// Strategy per hook, keyed by hook name
    pub hooks: BTreeMap<&'static str, String>,
}

pub async fn execute(args: DetectArgs, config_path: Option<&Path>) -> Result<()> {
    let context = load_context(config_path)?;
    let reports = build_reports(&context)?;

    let rendered = match args.format {
        ReportFormat::Text => render_text(&reports),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&reports).context("Failed to render JSON")?;
            json.push('\n');
            json
        }
        ReportFormat::Yaml => serde_yml::to_string(&reports).context("Failed to render YAML")?,
    };
    print!("{rendered}");
    Ok(())
}

/// Describe what each hook would do for every detected category
pub fn build_reports(context: &HookContext) -> Result<Vec<CategoryReport>> {
    let detected = context.detect()?;
    let resolver =
        StrategyResolver::new(&context.repo_root, context.shared_override_dir.as_deref());

    let reports = detected
        .iter()
        .map(|(category, files)| {
            let hooks = Phase::ALL
                .into_iter()
                .filter(|phase| phase.stages().contains(&category))
                .map(|phase| {
                    let commands = context.config.commands(category, phase);
                    let description = match resolver.resolve(category, phase, commands) {
                        Ok(strategy) => format!("{}: {strategy}", strategy.kind()),
                        Err(e) => format!("error: {e}"),
                    };
                    (phase.hook_name(), description)
                })
                .collect();
            CategoryReport {
                category,
                files: files.to_vec(),
                hooks,
            }
        })
        .collect();

    Ok(reports)
}

fn render_text(reports: &[CategoryReport]) -> String {
    if reports.is_empty() {
        return "No checkable files tracked\n".to_string();
    }

    let mut text = String::new();
    for report in reports {
        text.push_str(&format!("{} ({} file(s))\n", report.category, report.files.len()));
        for (hook, strategy) in &report.hooks {
            text.push_str(&format!("  {hook:<20} {strategy}\n"));
        }
        for file in &report.files {
            text.push_str(&format!("    {}\n", file.display()));
        }
    }
    text
}
