//! Git integration layer for hooklint
//!
//! This module provides a high-level interface for the few git queries the
//! hooks need, using git2: the tracked file list, the comment character and
//! the hooks directory.

use anyhow::{Context, Result};
use git2::{Index, Repository};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Variable git sets for hooks when the commit uses a temporary index
const INDEX_FILE_ENV: &str = "GIT_INDEX_FILE";

/// Git operations handler
pub struct GitOperations {
    repo: Repository,
}

impl GitOperations {
    /// Open a Git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open Git repository")?;

        Ok(Self { repo })
    }

    /// Discover a Git repository from `path` or any of its parents
    pub fn discover_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).context("No Git repository found")?;

        Ok(Self { repo })
    }

    /// Discover and open a Git repository from current directory
    pub fn discover() -> Result<Self> {
        Self::discover_from(".")
    }

    /// Working directory path (the repository root)
    pub fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().context("Repository has no working directory")
    }

    /// Files in the index, relative to the repository root
    ///
    /// Reads the index named by `GIT_INDEX_FILE` when git provides one, as it
    /// does for `git commit -a` and `git commit <paths>`.
    pub fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let index_file = std::env::var_os(INDEX_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.index_entries(index_file.as_deref())
    }

    /// Entries of `index_file`, or of the repository's own index
    ///
    /// Paths appear once even when the index holds several conflict stages.
    pub fn index_entries(&self, index_file: Option<&Path>) -> Result<Vec<PathBuf>> {
        let index = match index_file {
            Some(path) => {
                let path = std::path::absolute(path)
                    .with_context(|| format!("Invalid index path {}", path.display()))?;
                Index::open(&path)
                    .with_context(|| format!("Failed to read git index {}", path.display()))?
            }
            None => self.repo.index().context("Failed to read the git index")?,
        };

        let mut seen = HashSet::new();
        let mut files = Vec::with_capacity(index.len());
        for entry in index.iter() {
            let path = String::from_utf8_lossy(&entry.path).into_owned();
            if seen.insert(path.clone()) {
                files.push(PathBuf::from(path));
            }
        }

        Ok(files)
    }

    /// Value of `core.commentChar`, ignoring git's `auto` setting
    pub fn comment_char(&self) -> Option<String> {
        let config = self.repo.config().ok()?;
        let value = config.get_string("core.commentChar").ok()?;
        let value = value.trim();
        if value.is_empty() || value == "auto" {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Directory git runs hooks from, honouring `core.hooksPath`
    pub fn hooks_dir(&self) -> Result<PathBuf> {
        if let Ok(config) = self.repo.config() {
            if let Ok(custom) = config.get_path("core.hooksPath") {
                return Ok(if custom.is_absolute() {
                    custom
                } else {
                    self.workdir()?.join(custom)
                });
            }
        }
        Ok(self.repo.path().join("hooks"))
    }

    /// Install a git hook
    pub fn install_hook(&self, hook_name: &str, hook_content: &str) -> Result<PathBuf> {
        let hooks_dir = self.hooks_dir()?;
        let hook_path = hooks_dir.join(hook_name);

        // Create hooks directory if it doesn't exist
        std::fs::create_dir_all(&hooks_dir).context("Failed to create hooks directory")?;

        std::fs::write(&hook_path, hook_content).context("Failed to write hook file")?;

        // Make hook executable on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)
                .context("Failed to set hook file permissions")?;
        }

        Ok(hook_path)
    }

    /// Remove a git hook
    pub fn remove_hook(&self, hook_name: &str) -> Result<()> {
        let hook_path = self.hooks_dir()?.join(hook_name);

        if hook_path.exists() {
            std::fs::remove_file(&hook_path).context("Failed to remove hook file")?;
        }

        Ok(())
    }

    /// Current content of a hook, if one is installed
    pub fn read_hook(&self, hook_name: &str) -> Result<Option<String>> {
        let hook_path = self.hooks_dir()?.join(hook_name);
        if !hook_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&hook_path)
            .with_context(|| format!("Failed to read hook {}", hook_path.display()))?;
        Ok(Some(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn stage(repo: &Repository, dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_tracked_files_lists_index_entries() {
        let (dir, repo) = init_repo();
        stage(&repo, &dir, "a.yml", "a: 1\n");
        stage(&repo, &dir, "src/main.go", "package main\n");
        fs::write(dir.path().join("untracked.json"), "{}").unwrap();

        let git = GitOperations::open(dir.path()).unwrap();
        let files = git.tracked_files().unwrap();
        assert_eq!(files, vec![PathBuf::from("a.yml"), PathBuf::from("src/main.go")]);
    }

    #[test]
    fn test_index_entries_from_alternate_index() {
        let (dir, repo) = init_repo();
        stage(&repo, &dir, "a.yml", "a: 1\n");
        let alternate = dir.path().join("alternate-index");
        fs::copy(dir.path().join(".git/index"), &alternate).unwrap();
        stage(&repo, &dir, "b.json", "{}\n");

        let git = GitOperations::open(dir.path()).unwrap();
        assert_eq!(
            git.index_entries(Some(&alternate)).unwrap(),
            vec![PathBuf::from("a.yml")]
        );
        assert_eq!(
            git.index_entries(None).unwrap(),
            vec![PathBuf::from("a.yml"), PathBuf::from("b.json")]
        );
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (dir, repo) = init_repo();
        stage(&repo, &dir, "nested/deeper/file.py", "x = 1\n");

        let git = GitOperations::discover_from(dir.path().join("nested/deeper")).unwrap();
        let workdir = git.workdir().unwrap().canonicalize().unwrap();
        assert_eq!(workdir, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_open_plain_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(GitOperations::open(dir.path()).is_err());
    }

    #[test]
    fn test_comment_char() {
        let (dir, repo) = init_repo();
        assert_eq!(GitOperations::open(dir.path()).unwrap().comment_char(), None);

        repo.config().unwrap().set_str("core.commentChar", ";").unwrap();
        let git = GitOperations::open(dir.path()).unwrap();
        assert_eq!(git.comment_char(), Some(";".to_string()));

        repo.config().unwrap().set_str("core.commentChar", "auto").unwrap();
        let git = GitOperations::open(dir.path()).unwrap();
        assert_eq!(git.comment_char(), None);
    }

    #[test]
    fn test_install_and_remove_hook() {
        let (dir, _repo) = init_repo();
        let git = GitOperations::open(dir.path()).unwrap();

        let path = git.install_hook("pre-commit", "#!/bin/sh\nexit 0\n").unwrap();
        assert!(path.ends_with("hooks/pre-commit"));
        assert_eq!(
            git.read_hook("pre-commit").unwrap().as_deref(),
            Some("#!/bin/sh\nexit 0\n")
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }

        git.remove_hook("pre-commit").unwrap();
        assert!(git.read_hook("pre-commit").unwrap().is_none());
    }
}
