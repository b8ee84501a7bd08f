//! Repository archetype and language detection
//!
//! The archetype is decided by ordered heuristics, first match wins:
//!
//! 1. **library**: packaging descriptor, no Dockerfile, install-oriented README
//! 2. **cli**: CLI entry-point file plus CLI-oriented README
//! 3. **database**: repository name contains "database" or "db"
//! 4. **monorepo**: workspace markers
//! 5. **application**: everything else
//!
//! Language detection is independent and additive.

use crate::models::RepoType;
use crate::probe::Probe;
use tracing::info;

/// Sentinel language when no ecosystem is recognised
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Archetype and languages of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub repo_type: RepoType,
    pub languages: Vec<String>,
}

impl Classification {
    pub fn has_language(&self, name: &str) -> bool {
        self.languages.iter().any(|l| l == name)
    }
}

/// Characteristic files per ecosystem, in reporting order
const LANGUAGE_MARKERS: &[(&str, &[&str])] = &[
    ("Python", &["*.py", "**/*.py", "pyproject.toml", "setup.py"]),
    ("TypeScript", &["*.ts", "**/*.ts", "tsconfig.json"]),
    ("JavaScript", &["*.js", "**/*.js", "package.json"]),
    ("Go", &["*.go", "**/*.go", "go.mod"]),
    ("Rust", &["*.rs", "**/*.rs", "Cargo.toml"]),
    ("Java", &["*.java", "**/*.java", "pom.xml", "build.gradle"]),
    ("Ruby", &["*.rb", "**/*.rb", "Gemfile"]),
    ("C++", &["*.cpp", "*.cc", "**/*.cpp", "CMakeLists.txt"]),
];

/// A script ecosystem suppressed when its typed sibling was already found
const DEMOTIONS: &[(&str, &str)] = &[("JavaScript", "TypeScript")];

const CLI_ENTRY_POINTS: &[&str] = &["**/cli.py", "**/main.py", "**/cmd/**"];
const CLI_README_MARKERS: &[&str] = &["command line", "cli", "usage:"];
const MONOREPO_MARKERS: &[&str] = &["packages/*", "apps/*", "lerna.json", "pnpm-workspace.yaml"];

/// Classify a repository. `repo_name` is the final path component.
pub fn classify(probe: &Probe, repo_name: &str) -> Classification {
    let repo_type = detect_repo_type(probe, repo_name);
    let languages = detect_languages(probe);
    info!("Classified repository as {} ({})", repo_type, languages.join(", "));
    Classification {
        repo_type,
        languages,
    }
}

pub fn detect_repo_type(probe: &Probe, repo_name: &str) -> RepoType {
    if is_library(probe) {
        return RepoType::Library;
    }

    if probe.file_exists(CLI_ENTRY_POINTS) {
        let readme = probe.read_lower("README.md");
        if CLI_README_MARKERS.iter().any(|m| readme.contains(m)) {
            return RepoType::Cli;
        }
    }

    let name = repo_name.to_lowercase();
    if name.contains("database") || name.contains("db") {
        return RepoType::Database;
    }

    if probe.file_exists(MONOREPO_MARKERS) {
        return RepoType::Monorepo;
    }

    RepoType::Application
}

fn is_library(probe: &Probe) -> bool {
    let has_dockerfile = probe.file_exists(&["Dockerfile"]);

    if probe.file_exists(&["setup.py", "setup.cfg"])
        && !has_dockerfile
        && probe.read_lower("setup.py").contains("library")
    {
        return true;
    }

    if probe.file_exists(&["pyproject.toml"]) && !has_dockerfile {
        let declares_project = probe
            .read_file("pyproject.toml")
            .is_some_and(|c| c.contains("[project]"));
        if declares_project {
            let readme = probe.read_lower("README.md");
            if readme.contains("pip install") && !readme.contains("docker") {
                return true;
            }
        }
    }

    false
}

pub fn detect_languages(probe: &Probe) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();

    for (language, markers) in LANGUAGE_MARKERS {
        if !probe.file_exists(markers) {
            continue;
        }
        let demoted = DEMOTIONS
            .iter()
            .any(|(script, typed)| script == language && languages.iter().any(|l| l == typed));
        if !demoted {
            languages.push(language.to_string());
        }
    }

    if languages.is_empty() {
        languages.push(UNKNOWN_LANGUAGE.to_string());
    }
    languages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{DisabledRunner, ProbeSettings};
    use std::fs;
    use std::path::Path;

    fn probe_for(dir: &Path) -> Probe {
        Probe::with_runner(dir, ProbeSettings::default(), Box::new(DisabledRunner))
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_pyproject_library() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pyproject.toml", "[project]\nname = \"widgets\"\n");
        write(dir.path(), "README.md", "Install with `pip install widgets`.");
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "widgets"), RepoType::Library);
    }

    #[test]
    fn test_dockerfile_prevents_library() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pyproject.toml", "[project]\nname = \"svc\"\n");
        write(dir.path(), "README.md", "pip install svc");
        write(dir.path(), "Dockerfile", "FROM python:3.12");
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "svc"), RepoType::Application);
    }

    #[test]
    fn test_setup_py_library_marker() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "setup.py", "setup(description='A small library')");
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "tools"), RepoType::Library);
    }

    #[test]
    fn test_cli_needs_entry_point_and_readme() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tool/cli.py", "import argparse");
        write(dir.path(), "README.md", "Usage: tool [OPTIONS]");
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "tool"), RepoType::Cli);

        let bare = tempfile::tempdir().unwrap();
        write(bare.path(), "tool/cli.py", "import argparse");
        let probe = probe_for(bare.path());
        assert_eq!(detect_repo_type(&probe, "tool"), RepoType::Application);
    }

    #[test]
    fn test_database_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "TimeseriesDB"), RepoType::Database);
        assert_eq!(detect_repo_type(&probe, "my-database"), RepoType::Database);
        assert_eq!(detect_repo_type(&probe, "webshop"), RepoType::Application);
    }

    #[test]
    fn test_monorepo_markers() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "packages/core/package.json", "{}");
        let probe = probe_for(dir.path());
        assert_eq!(detect_repo_type(&probe, "platform"), RepoType::Monorepo);
    }

    #[test]
    fn test_languages_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Cargo.toml", "[package]");
        write(dir.path(), "scripts/gen.py", "");
        write(dir.path(), "go.mod", "module x");
        let probe = probe_for(dir.path());
        assert_eq!(detect_languages(&probe), vec!["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_typescript_demotes_javascript() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "package.json", "{}");
        write(dir.path(), "tsconfig.json", "{}");
        let probe = probe_for(dir.path());
        assert_eq!(detect_languages(&probe), vec!["TypeScript"]);

        let js = tempfile::tempdir().unwrap();
        write(js.path(), "package.json", "{}");
        let probe = probe_for(js.path());
        assert_eq!(detect_languages(&probe), vec!["JavaScript"]);
    }

    #[test]
    fn test_unknown_language_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        let classification = classify(&probe, "empty");
        assert_eq!(classification.languages, vec![UNKNOWN_LANGUAGE]);
        assert!(!classification.has_language("Go"));
    }
}
