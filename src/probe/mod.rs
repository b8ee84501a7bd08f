//! Probe layer: cached filesystem and process primitives
//!
//! Everything above this layer asks questions of a repository only through
//! [`Probe`]. Probing is advisory, so failures are absorbed here:
//!
//! - `file_exists` answers `false` for anything it cannot see
//! - `read_file` answers `None` for missing, unreadable or non-file paths
//! - `search_files` answers `false` when nothing matches or an input is invalid
//! - `run_command` answers exit code `-1` when a command cannot run
//!
//! Each probe owns its caches. A pattern or path hits the filesystem at most
//! once per probe instance, and instances are never shared between runs.

mod command;
mod index;

pub use command::{CommandOutput, CommandRunner, DisabledRunner, SystemRunner, EXEC_FAILED};

use index::FileIndex;
use regex::RegexBuilder;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Default wall-clock limit for probe commands
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;

/// Default number of files inspected per content search
pub const DEFAULT_SEARCH_SAMPLE: usize = 10;

/// Tunables for a probe instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    pub command_timeout: Duration,
    pub search_sample: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            search_sample: DEFAULT_SEARCH_SAMPLE,
        }
    }
}

/// Cached view of one repository tree
pub struct Probe {
    root: PathBuf,
    settings: ProbeSettings,
    runner: Box<dyn CommandRunner>,
    index: OnceCell<FileIndex>,
    exists_cache: RefCell<HashMap<String, bool>>,
    content_cache: RefCell<HashMap<String, Option<Rc<str>>>>,
    glob_cache: RefCell<HashMap<String, Rc<[String]>>>,
}

impl Probe {
    /// Probe with default settings that runs real subprocesses
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_runner(root, ProbeSettings::default(), Box::new(SystemRunner))
    }

    pub fn with_runner(
        root: impl Into<PathBuf>,
        settings: ProbeSettings,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            root: root.into(),
            settings,
            runner,
            index: OnceCell::new(),
            exists_cache: RefCell::new(HashMap::new()),
            content_cache: RefCell::new(HashMap::new()),
            glob_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> ProbeSettings {
        self.settings
    }

    /// True if any pattern names an existing path or has a glob match.
    /// Stops at the first hit.
    pub fn file_exists(&self, patterns: &[&str]) -> bool {
        patterns.iter().any(|p| self.pattern_exists(p))
    }

    fn pattern_exists(&self, pattern: &str) -> bool {
        if let Some(&hit) = self.exists_cache.borrow().get(pattern) {
            return hit;
        }

        let exists = if is_glob(pattern) {
            !self.glob(pattern).is_empty()
        } else {
            self.root.join(pattern).exists()
        };

        debug!("exists({}) = {}", pattern, exists);
        self.exists_cache
            .borrow_mut()
            .insert(pattern.to_string(), exists);
        exists
    }

    /// Relative paths matching a glob pattern, sorted
    pub fn glob(&self, pattern: &str) -> Rc<[String]> {
        if let Some(hit) = self.glob_cache.borrow().get(pattern) {
            return Rc::clone(hit);
        }

        let matches: Rc<[String]> = self.index().matches(pattern).into();
        self.glob_cache
            .borrow_mut()
            .insert(pattern.to_string(), Rc::clone(&matches));
        matches
    }

    fn index(&self) -> &FileIndex {
        self.index.get_or_init(|| FileIndex::build(&self.root))
    }

    /// File content relative to the root. Invalid UTF-8 is replaced.
    pub fn read_file(&self, path: &str) -> Option<Rc<str>> {
        if let Some(hit) = self.content_cache.borrow().get(path) {
            return hit.clone();
        }

        let content = read_lossy(&self.root.join(path));
        self.content_cache
            .borrow_mut()
            .insert(path.to_string(), content.clone());
        content
    }

    /// Lowercased file content, empty when absent
    pub fn read_lower(&self, path: &str) -> String {
        self.read_file(path)
            .map(|c| c.to_lowercase())
            .unwrap_or_default()
    }

    /// Whether any file matching `pattern` exists and, when a content pattern
    /// is given, contains a case-insensitive regex match. Only the first
    /// `search_sample` matches are inspected.
    pub fn search_files(&self, pattern: &str, content_pattern: Option<&str>) -> bool {
        let matches = self.glob(pattern);
        if matches.is_empty() {
            return false;
        }
        let Some(content_pattern) = content_pattern else {
            return true;
        };

        let regex = match RegexBuilder::new(content_pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => regex,
            Err(e) => {
                debug!("Invalid content pattern '{}': {}", content_pattern, e);
                return false;
            }
        };

        matches
            .iter()
            .take(self.settings.search_sample)
            .any(|rel| self.read_file(rel).is_some_and(|c| regex.is_match(&c)))
    }

    /// Run a read-only command in the repository root
    pub fn run_command(&self, argv: &[&str]) -> CommandOutput {
        let output = self
            .runner
            .run(argv, &self.root, self.settings.command_timeout);
        if !output.success() {
            debug!(
                "Probe command `{}` exited {}: {}",
                argv.join(" "),
                output.exit_code,
                output.output.trim()
            );
        }
        output
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn read_lossy(path: &Path) -> Option<Rc<str>> {
    if !path.is_file() {
        return None;
    }
    match std::fs::read(path) {
        Ok(bytes) => Some(Rc::from(String::from_utf8_lossy(&bytes).as_ref())),
        Err(e) => {
            debug!("Unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn probe_for(dir: &Path) -> Probe {
        Probe::with_runner(dir, ProbeSettings::default(), Box::new(DisabledRunner))
    }

    #[test]
    fn test_file_exists_plain_and_glob() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".github/workflows")).unwrap();
        fs::write(dir.path().join(".github/workflows/ci.yml"), "on: push").unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();

        let probe = probe_for(dir.path());
        assert!(probe.file_exists(&["README.md"]));
        assert!(probe.file_exists(&["missing.txt", ".github/workflows/*.yml"]));
        assert!(!probe.file_exists(&["missing.txt", ".github/workflows/*.yaml"]));
        assert!(!probe.file_exists(&[]));
    }

    #[test]
    fn test_existence_is_cached_per_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        assert!(!probe.file_exists(&["late.txt"]));

        // Created after the first probe: the cached answer stands for this run
        fs::write(dir.path().join("late.txt"), "x").unwrap();
        assert!(!probe.file_exists(&["late.txt"]));

        let fresh = probe_for(dir.path());
        assert!(fresh.file_exists(&["late.txt"]));
    }

    #[test]
    fn test_read_file_is_lossy_and_cached() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin.txt"), [b'o', b'k', 0xff, b'!']).unwrap();
        let probe = probe_for(dir.path());

        let content = probe.read_file("bin.txt").expect("content");
        assert!(content.starts_with("ok"));
        assert!(content.ends_with('!'));

        fs::remove_file(dir.path().join("bin.txt")).unwrap();
        assert!(probe.read_file("bin.txt").is_some());
    }

    #[test]
    fn test_read_file_absent_for_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        let probe = probe_for(dir.path());
        assert!(probe.read_file("nope.md").is_none());
        assert!(probe.read_file("docs").is_none());
        assert_eq!(probe.read_lower("nope.md"), "");
    }

    #[test]
    fn test_search_files_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".github/workflows")).unwrap();
        fs::write(
            dir.path().join(".github/workflows/release.yml"),
            "jobs:\n  Publish:\n    runs-on: ubuntu",
        )
        .unwrap();
        let probe = probe_for(dir.path());

        assert!(probe.search_files(".github/workflows/*.yml", None));
        assert!(probe.search_files(".github/workflows/*.yml", Some("(release|publish)")));
        assert!(!probe.search_files(".github/workflows/*.yml", Some("canary")));
        assert!(!probe.search_files("*.toml", None));
        assert!(!probe.search_files(".github/workflows/*.yml", Some("(unclosed")));
    }

    #[test]
    fn test_search_files_samples_first_matches_only() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..12 {
            fs::write(dir.path().join(format!("f{:02}.py", i)), "pass").unwrap();
        }
        // Sorted last, beyond the sample
        fs::write(dir.path().join("z_health.py"), "def health(): pass").unwrap();

        let probe = probe_for(dir.path());
        assert!(!probe.search_files("*.py", Some("health")));

        let wide = Probe::with_runner(
            dir.path(),
            ProbeSettings {
                search_sample: 20,
                ..ProbeSettings::default()
            },
            Box::new(DisabledRunner),
        );
        assert!(wide.search_files("*.py", Some("health")));
    }

    #[test]
    fn test_run_command_failure_is_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        let out = probe.run_command(&["git", "log"]);
        assert_eq!(out.exit_code, EXEC_FAILED);
        assert!(!out.output.is_empty());
    }
}
