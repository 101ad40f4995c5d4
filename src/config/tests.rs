use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_loads_defaults() {
    let config = HooklintConfig::load().expect("Should load default config");

    assert_eq!(config.enabled_categories().len(), FileCategory::ALL.len());

    let go = config.commands(FileCategory::Go, Phase::PreCommit);
    assert_eq!(go.len(), 2);
    assert_eq!(go[0].display(), "go build ./...");
    assert_eq!(go[1].display(), "go test ./...");
    assert!(!go[0].pass_files);

    // Python pre-commit has no generic command; it needs an override script
    assert!(config.commands(FileCategory::Python, Phase::PreCommit).is_empty());

    let shell = config.commands(FileCategory::Shell, Phase::PrepareCommitMsg);
    assert_eq!(shell, vec![ToolCommand::new("shellcheck", &["-f", "gcc"], true)]);
}

#[test]
fn test_custom_toml_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hooklint.toml");
    fs::write(
        &path,
        r#"
[general]
comment_char = ";"
shared_override_dir = "/opt/hooks"

[categories.json]
enabled = false

[categories.go]
pre_commit = [{ program = "make", args = ["check"] }]
"#,
    )
    .unwrap();

    let config = HooklintConfig::load_with_custom_config(Some(&path)).unwrap();
    assert_eq!(config.comment_char(), Some(";"));
    assert_eq!(config.shared_override_dir(), Some(PathBuf::from("/opt/hooks")));
    assert!(!config.enabled_categories().contains(&FileCategory::Json));
    assert_eq!(
        config.commands(FileCategory::Go, Phase::PreCommit),
        vec![ToolCommand::new("make", &["check"], false)]
    );
    // Untouched phases keep their defaults
    assert_eq!(config.commands(FileCategory::Go, Phase::PrepareCommitMsg).len(), 2);
}

#[test]
fn test_custom_yaml_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hooklint.yaml");
    fs::write(
        &path,
        "categories:\n  yaml:\n    prepare_commit_msg:\n      - program: yamllint\n        args: [\"-s\"]\n        pass_files: true\n",
    )
    .unwrap();

    let config = HooklintConfig::load_with_custom_config(Some(&path)).unwrap();
    assert_eq!(
        config.commands(FileCategory::Yaml, Phase::PrepareCommitMsg),
        vec![ToolCommand::new("yamllint", &["-s"], true)]
    );
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let result = HooklintConfig::load_with_custom_config(Some(Path::new("non_existent.toml")));
    assert!(result.is_err());
}

#[test]
fn test_unknown_category_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hooklint.toml");
    fs::write(&path, "[categories.cobol]\nenabled = true\n").unwrap();

    let err = HooklintConfig::load_with_custom_config(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("cobol"));
}

#[test]
fn test_empty_comment_char_means_unset() {
    let config = HooklintConfig::load().unwrap();
    assert_eq!(config.comment_char(), None);
}

#[test]
fn test_tool_command_display() {
    let cmd = ToolCommand::new("yamllint", &["-f", "parsable"], true);
    assert_eq!(cmd.display(), "yamllint -f parsable");
    assert_eq!(ToolCommand::new("hadolint", &[], true).display(), "hadolint");
}
