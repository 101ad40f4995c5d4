//! Output routing for the prepare-commit-msg hook
//!
//! git calls the hook as `prepare-commit-msg <file> [<source> [<sha>]]`.
//! With no file the diagnostics are previewed on stdout. With a file they are
//! appended as comment lines, unless the message came from `-m`, in which case
//! git will not open an editor and the comments go to stderr instead.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Commit message source git passes for `git commit -m`
pub const MESSAGE_SOURCE: &str = "message";

/// Where collected diagnostics end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Raw output on stdout
    Preview,
    /// Commented output appended to the message file
    Append(PathBuf),
    /// Commented output on stderr, message file untouched
    Stderr,
}

impl Route {
    /// Pick a route from the hook's positional arguments
    pub fn from_args(message_file: Option<&Path>, source: Option<&str>) -> Self {
        match (message_file, source) {
            (None, _) => Route::Preview,
            (Some(_), Some(MESSAGE_SOURCE)) => Route::Stderr,
            (Some(file), _) => Route::Append(file.to_path_buf()),
        }
    }

    /// Emit `output` to the process streams or the message file
    pub fn emit(&self, output: &str, marker: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        self.emit_to(output, marker, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Same as [`Route::emit`] with explicit stream handles
    pub fn emit_to<O: Write, E: Write>(
        &self,
        output: &str,
        marker: &str,
        stdout: &mut O,
        stderr: &mut E,
    ) -> Result<()> {
        if output.is_empty() {
            debug!("No diagnostics to route");
            return Ok(());
        }

        match self {
            Route::Preview => {
                stdout
                    .write_all(output.as_bytes())
                    .context("Failed to write to stdout")?;
                stdout.flush()?;
            }
            Route::Stderr => {
                stderr
                    .write_all(comment_lines(output, marker).as_bytes())
                    .context("Failed to write to stderr")?;
                stderr.flush()?;
            }
            Route::Append(path) => append_comments(path, output, marker)?,
        }
        Ok(())
    }
}

/// Prefix every line of `output` with the comment marker
pub fn comment_lines(output: &str, marker: &str) -> String {
    let mut commented = String::with_capacity(output.len() + output.len() / 8);
    for line in output.lines() {
        if line.is_empty() {
            commented.push_str(marker);
        } else {
            commented.push_str(marker);
            commented.push(' ');
            commented.push_str(line);
        }
        commented.push('\n');
    }
    commented
}

fn append_comments(path: &Path, output: &str, marker: &str) -> Result<()> {
    let needs_newline = match std::fs::read(path) {
        Ok(existing) => existing.last().is_some_and(|b| *b != b'\n'),
        Err(_) => false,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open commit message file {}", path.display()))?;

    if needs_newline {
        file.write_all(b"\n")?;
    }
    file.write_all(comment_lines(output, marker).as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))?;

    debug!("Appended diagnostics to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_route_selection() {
        let file = Path::new(".git/COMMIT_EDITMSG");
        assert_eq!(Route::from_args(None, None), Route::Preview);
        assert_eq!(
            Route::from_args(Some(file), None),
            Route::Append(file.to_path_buf())
        );
        assert_eq!(
            Route::from_args(Some(file), Some("template")),
            Route::Append(file.to_path_buf())
        );
        assert_eq!(Route::from_args(Some(file), Some("message")), Route::Stderr);
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(
            comment_lines("a.yml:1:1: error\n\nwarning", "#"),
            "# a.yml:1:1: error\n#\n# warning\n"
        );
        assert_eq!(comment_lines("x\n", ";"), "; x\n");
        assert_eq!(comment_lines("", "#"), "");
    }

    #[test]
    fn test_preview_writes_raw_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        Route::Preview
            .emit_to("line one\nline two\n", "#", &mut out, &mut err)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "line one\nline two\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_stderr_route_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let msg = dir.path().join("COMMIT_EDITMSG");
        fs::write(&msg, "fix: typo\n").unwrap();

        let route = Route::from_args(Some(&msg), Some(MESSAGE_SOURCE));
        let mut out = Vec::new();
        let mut err = Vec::new();
        route.emit_to("SC2034 unused\n", "#", &mut out, &mut err).unwrap();

        assert_eq!(fs::read_to_string(&msg).unwrap(), "fix: typo\n");
        assert_eq!(String::from_utf8(err).unwrap(), "# SC2034 unused\n");
        assert!(out.is_empty());
    }

    #[test]
    fn test_append_preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let msg = dir.path().join("COMMIT_EDITMSG");
        fs::write(&msg, "feat: add thing\n\n# Please enter the commit message").unwrap();

        let route = Route::from_args(Some(&msg), None);
        route
            .emit_to(
                "a.yml:3:1: trailing spaces\nb.yml ok\n",
                "#",
                &mut Vec::<u8>::new(),
                &mut Vec::<u8>::new(),
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(&msg).unwrap(),
            "feat: add thing\n\n# Please enter the commit message\n# a.yml:3:1: trailing spaces\n# b.yml ok\n"
        );
    }

    #[test]
    fn test_empty_output_does_not_touch_file() {
        let dir = TempDir::new().unwrap();
        let msg = dir.path().join("COMMIT_EDITMSG");
        fs::write(&msg, "chore: bump").unwrap();

        Route::Append(msg.clone())
            .emit_to("", "#", &mut Vec::<u8>::new(), &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(fs::read_to_string(&msg).unwrap(), "chore: bump");
    }
}
