//! Process runner for linters, build tools and override scripts
//!
//! Tools run one at a time. stdout and stderr share a single pipe so the
//! captured text keeps the order the tool wrote it in. Exit status is
//! reported back to the caller, which decides whether it matters.

use anyhow::Result;
use std::ffi::OsStr;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// errno for a file the kernel cannot execute directly (no shebang)
#[cfg(unix)]
const ENOEXEC: i32 = 8;

/// Result of running one external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The program could not be found
    Missing,
    /// The program exists but could not be started
    Failed(String),
    /// The program ran to completion
    Finished {
        success: bool,
        code: Option<i32>,
        /// Captured stdout and stderr, interleaved
        output: String,
    },
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Finished { success: true, .. })
    }
}

/// Whether `program` can be launched from `cwd`
///
/// Bare names are looked up on `PATH`; names containing a separator are
/// resolved against `cwd`.
pub fn is_available(program: &str, cwd: &Path) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        cwd.join(program).is_file()
    } else {
        which::which(program).is_ok()
    }
}

/// Run `program args... files...` in `cwd`, waiting for it to exit
///
/// Scripts without a shebang line are handed to `sh`, the way a shell would
/// run them. Start-up failures are reported as [`ToolOutcome::Failed`].
pub async fn run_tool(
    program: impl AsRef<OsStr>,
    args: &[String],
    files: &[PathBuf],
    cwd: &Path,
) -> Result<ToolOutcome> {
    let program = program.as_ref();
    let name = program.to_string_lossy();
    debug!(
        "Running {} {} ({} file argument(s)) in {}",
        name,
        args.join(" "),
        files.len(),
        cwd.display()
    );

    let result = match run_merged(command(None, program, args, files, cwd)).await {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} not found: {}", name, e);
            return Ok(ToolOutcome::Missing);
        }
        Err(e) if is_exec_format_error(&e) => {
            debug!("{} has no interpreter line, running it with sh", name);
            run_merged(command(Some("sh"), program, args, files, cwd)).await
        }
        other => other,
    };

    let (status, output) = match result {
        Ok(finished) => finished,
        Err(e) => {
            debug!("{} could not be started: {}", name, e);
            return Ok(ToolOutcome::Failed(format!("{name} could not be run: {e}")));
        }
    };

    debug!("{} exited with {:?}", name, status.code());

    Ok(ToolOutcome::Finished {
        success: status.success(),
        code: status.code(),
        output: String::from_utf8_lossy(&output).into_owned(),
    })
}

fn command(
    launcher: Option<&str>,
    program: &OsStr,
    args: &[String],
    files: &[PathBuf],
    cwd: &Path,
) -> Command {
    let mut cmd = match launcher {
        Some(launcher) => {
            let mut cmd = Command::new(launcher);
            cmd.arg(program);
            cmd
        }
        None => Command::new(program),
    };
    cmd.args(args).args(files).current_dir(cwd);
    cmd
}

/// Spawn `cmd` with stdout and stderr on one pipe and collect everything
async fn run_merged(mut cmd: Command) -> std::io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = std::io::pipe()?;
    cmd.stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    let mut child = cmd.spawn()?;
    // The write ends held by `cmd` must close or the reader never sees EOF
    drop(cmd);

    let collector = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map(|_| buf)
    });

    let status = child.wait().await?;
    let output = collector.await.map_err(std::io::Error::other)??;
    Ok((status, output))
}

#[cfg(unix)]
fn is_exec_format_error(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(ENOEXEC)
}

#[cfg(not(unix))]
fn is_exec_format_error(_e: &std::io::Error) -> bool {
    false
}
