use super::*;
use std::fs;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.repo_type, None);
    assert_eq!(config.analysis.command_timeout_secs, 10);
    assert_eq!(config.analysis.search_sample, 10);
    assert!(!config.analysis.no_commands);
    assert!(config.skip.criteria.is_empty());
    assert_eq!(config.probe_settings(), ProbeSettings::default());
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
repo_type = "cli"

[analysis]
command_timeout_secs = 3
no_commands = true

[skip]
criteria = ["vcs_cli_tools", "agentic_development"]
reason = "Offline build farm"
"#;

    let config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");
    assert_eq!(config.repo_type, Some(RepoType::Cli));
    assert_eq!(config.analysis.command_timeout_secs, 3);
    // Unset keys keep their defaults
    assert_eq!(config.analysis.search_sample, 10);
    assert!(config.analysis.no_commands);
    assert_eq!(config.skip.reason.as_deref(), Some("Offline build farm"));

    let settings = config.probe_settings();
    assert_eq!(settings.command_timeout, Duration::from_secs(3));

    let rules = config.skip_rules();
    let excluded: Vec<&str> = rules.excluded().collect();
    assert_eq!(excluded, vec!["agentic_development", "vcs_cli_tools"]);
}

#[test]
fn test_invalid_repo_type_is_rejected() {
    let result = toml::from_str::<ProjectConfig>("repo_type = \"kernel\"");
    assert!(result.is_err());
}

#[test]
fn test_zero_limits_fall_back_to_defaults() {
    let config: ProjectConfig =
        toml::from_str("[analysis]\ncommand_timeout_secs = 0\nsearch_sample = 0\n").unwrap();
    assert_eq!(config.probe_settings(), ProbeSettings::default());
}

#[test]
fn test_unknown_skip_ids_are_ignored() {
    let config: ProjectConfig =
        toml::from_str("[skip]\ncriteria = [\"readme\", \"no_such_check\"]\n").unwrap();
    let rules = config.skip_rules();
    assert_eq!(rules.excluded().collect::<Vec<_>>(), vec!["readme"]);
}

#[test]
fn test_load_prefers_toml_over_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "repo_type = \"library\"\n").unwrap();
    fs::write(dir.path().join(JSON_CONFIG_FILE), r#"{"repo_type": "database"}"#).unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.repo_type, Some(RepoType::Library));
}

#[test]
fn test_load_falls_back_to_json_when_toml_is_broken() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "repo_type = [").unwrap();
    fs::write(
        dir.path().join(JSON_CONFIG_FILE),
        r#"{"analysis": {"search_sample": 25}}"#,
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.analysis.search_sample, 25);
    assert_eq!(config.repo_type, None);
}

#[test]
fn test_load_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
}

#[test]
fn test_template_parses_and_is_not_overwritten() {
    let parsed: ProjectConfig = toml::from_str(CONFIG_TEMPLATE).expect("template parses");
    assert_eq!(parsed, ProjectConfig::default());

    let dir = tempfile::tempdir().unwrap();
    let path = write_config_template(dir.path()).unwrap();
    assert_eq!(path, dir.path().join(CONFIG_FILE));

    fs::write(&path, "repo_type = \"cli\"\n").unwrap();
    assert!(write_config_template(dir.path()).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "repo_type = \"cli\"\n");
}
