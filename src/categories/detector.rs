//! Category detection over the tracked file set
//!
//! Files are matched by path glob and, for shell scripts without a suffix,
//! by the interpreter named on their first line.

use super::FileCategory;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Upper bound on bytes read when looking for a shebang line
const FIRST_LINE_LIMIT: u64 = 512;

/// Matches `#!/bin/sh`, `#!/bin/bash`, `#!/usr/bin/env zsh`, ...
const SHEBANG_PATTERN: &str = r"^#!\s*\S*/(env\s+)?(ba|da|k|z)?sh\b";

/// Files found per category, in tracked-file order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DetectedCategories {
    files: BTreeMap<FileCategory, Vec<PathBuf>>,
}

impl DetectedCategories {
    /// Files of `category`, empty when it was not detected
    pub fn files(&self, category: FileCategory) -> &[PathBuf] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: FileCategory) -> bool {
        !self.files(category).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }

    /// Detected categories with their files, in category order
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, &[PathBuf])> {
        self.files
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| (*category, files.as_slice()))
    }
}

pub struct CategoryDetector {
    matchers: Vec<(FileCategory, GlobSet)>,
    shebang: Option<Regex>,
}

impl CategoryDetector {
    /// Build a detector for every category
    pub fn new() -> Result<Self> {
        Self::for_categories(FileCategory::ALL)
    }

    /// Build a detector restricted to `categories`
    pub fn for_categories(categories: impl IntoIterator<Item = FileCategory>) -> Result<Self> {
        let mut matchers = Vec::new();
        let mut shell_enabled = false;

        for category in categories {
            let mut builder = GlobSetBuilder::new();
            for pattern in category.globs() {
                let glob = GlobBuilder::new(&format!("**/{pattern}"))
                    .literal_separator(true)
                    .build()
                    .with_context(|| format!("Invalid glob for {category}: {pattern}"))?;
                builder.add(glob);
            }
            let set = builder
                .build()
                .with_context(|| format!("Failed to build glob set for {category}"))?;
            shell_enabled |= category == FileCategory::Shell;
            matchers.push((category, set));
        }

        let shebang = if shell_enabled {
            Some(Regex::new(SHEBANG_PATTERN).context("Invalid shebang pattern")?)
        } else {
            None
        };

        Ok(Self { matchers, shebang })
    }

    /// Sort `files` (relative to `root`) into categories
    ///
    /// Files that are missing on disk or cannot be read are skipped.
    pub fn detect(&self, root: &Path, files: &[PathBuf]) -> DetectedCategories {
        let mut detected: BTreeMap<FileCategory, Vec<PathBuf>> = BTreeMap::new();
        let mut seen = HashSet::new();

        for file in files {
            if !seen.insert(file.as_path()) {
                continue;
            }

            let full_path = root.join(file);
            match std::fs::metadata(&full_path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    debug!("Skipping non-regular file {}", file.display());
                    continue;
                }
                Err(e) => {
                    debug!("Skipping {}: {}", file.display(), e);
                    continue;
                }
            }

            for (category, set) in &self.matchers {
                let matched = set.is_match(file)
                    || (*category == FileCategory::Shell && self.has_shell_shebang(&full_path));
                if matched {
                    detected.entry(*category).or_default().push(file.clone());
                }
            }
        }

        for (category, files) in &detected {
            debug!("Detected {} {} file(s)", files.len(), category);
        }

        DetectedCategories { files: detected }
    }

    fn has_shell_shebang(&self, path: &Path) -> bool {
        let Some(shebang) = &self.shebang else {
            return false;
        };
        match read_first_line(path) {
            Some(line) => shebang.is_match(&line),
            None => false,
        }
    }
}

/// First line of a file, or `None` when it cannot be read
fn read_first_line(path: &Path) -> Option<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {}: {}", path.display(), e);
            return None;
        }
    };

    let mut buf = Vec::new();
    let mut reader = BufReader::new(file.take(FIRST_LINE_LIMIT));
    if let Err(e) = reader.read_until(b'\n', &mut buf) {
        debug!("Cannot read {}: {}", path.display(), e);
        return None;
    }

    Some(String::from_utf8_lossy(&buf).trim_end().to_string())
}
