//! # hooklint - detect-and-dispatch git hooks
//!
//! hooklint runs as git's `pre-commit` and `prepare-commit-msg` hooks. It
//! looks at the tracked files, works out which kinds of files are present
//! (YAML, JSON, Python, Go, shell scripts, Dockerfiles, Travis config) and
//! hands each kind to the right tool:
//!
//! 1. an executable override script in the repository root, such as
//!    `./python-pre-commit` or `./go-prepare-commit-msg`;
//! 2. the same script in the shared override directory;
//! 3. the generic command from configuration (`yamllint`, `shellcheck`, ...);
//! 4. a one-line notice when none of the above is available.
//!
//! ## Hooks
//!
//! - **pre-commit** gates the commit: `go build`/`go test` failures and a
//!   missing `python-pre-commit` script abort it.
//! - **prepare-commit-msg** is advisory: linter output is appended to the
//!   commit message as comment lines, sent to stderr for `git commit -m`, or
//!   printed raw when run without arguments.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the hook shims into .git/hooks
//! hooklint install
//!
//! # See what each hook would run
//! hooklint detect
//!
//! # Preview the linter report without committing
//! hooklint prepare-commit-msg
//! ```

pub mod categories;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod external;
pub mod git;
pub mod hooks;

pub use cli::{Cli, Output};
pub use config::HooklintConfig;
pub use error::HookError;

/// Result type alias for hooklint operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
