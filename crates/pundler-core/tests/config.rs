use pundler_core::config::{ProjectConfig, CONFIG_FILE};
use std::path::Path;

#[test]
fn defaults_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProjectConfig::load(dir.path()).unwrap();
    assert_eq!(config.requirements, "requirements.txt");
    assert_eq!(config.freeze_file, "freezed.txt");
    assert_eq!(config.records_file, "pundles.txt");
    assert_eq!(config.pundle_dir, "Pundledir");
    assert_eq!(config.installer.pip, "ve/bin/pip");
    assert_eq!(config.index.url, "https://pypi.org/pypi");
    assert_eq!(config.index.timeout_secs, 30);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let config = ProjectConfig::parse_toml(
        r#"
pundle-dir = "vendor/pundles"

[index]
url = "http://localhost:8080/pypi"

[environment]
python-version = "3.8"
sys-platform = "win32"
"#,
    )
    .unwrap();
    assert_eq!(config.pundle_dir, "vendor/pundles");
    assert_eq!(config.requirements, "requirements.txt");
    assert_eq!(config.index.url, "http://localhost:8080/pypi");
    assert_eq!(config.index.timeout_secs, 30);
    assert_eq!(config.environment.python_version, "3.8");
    assert_eq!(config.environment.sys_platform, "win32");
    assert_eq!(config.environment.implementation_name, "cpython");
}

#[test]
fn load_reads_project_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "freeze-file = \"locked.txt\"\n[installer]\npip = \"pip3\"\n",
    )
    .unwrap();
    let config = ProjectConfig::load(dir.path()).unwrap();
    assert_eq!(config.freeze_path(dir.path()), dir.path().join("locked.txt"));
    assert_eq!(config.pip_path(dir.path()), "pip3");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = ProjectConfig::parse_toml("pundle-dir = [").unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn nested_pip_path_is_project_relative() {
    let config = ProjectConfig::default();
    let root = Path::new("/work/project");
    assert_eq!(config.pip_path(root), "/work/project/ve/bin/pip");
    assert_eq!(config.pundle_root(root), root.join("Pundledir"));
}
