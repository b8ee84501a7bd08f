//! Detection helpers shared by several criteria

use crate::probe::Probe;

/// Workflow files inspected by content checks
pub(crate) const WORKFLOW_GLOBS: [&str; 2] = [".github/workflows/*.yml", ".github/workflows/*.yaml"];

/// Workflow files read per content check
const WORKFLOW_SAMPLE: usize = 5;

/// Dependency-name fragments that indicate a feature flag service or library
const FEATURE_FLAG_MARKERS: &[&str] = &[
    "launchdarkly",
    "statsig",
    "unleash",
    "growthbook",
    "feature.flag",
    "featureflag",
    "feature_flag",
];

const FEATURE_FLAG_MANIFESTS: &[&str] = &["package.json", "requirements.txt", "go.mod", "Gemfile"];

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Agent instructions: AGENTS.md, falling back to CLAUDE.md when empty or absent
pub(crate) fn agents_text(probe: &Probe) -> String {
    let agents = probe.read_lower("AGENTS.md");
    if agents.is_empty() {
        probe.read_lower("CLAUDE.md")
    } else {
        agents
    }
}

/// README plus agent instructions, lowercased
pub(crate) fn docs_text(probe: &Probe) -> String {
    let mut text = probe.read_lower("README.md");
    text.push_str(&agents_text(probe));
    text
}

/// Concatenated, lowercased content of whichever manifests exist
pub(crate) fn manifests_text(probe: &Probe, files: &[&str]) -> String {
    files.iter().map(|f| probe.read_lower(f)).collect()
}

/// Whether the first few workflow files mention any needle (lowercased match)
pub(crate) fn workflows_mention(probe: &Probe, needles: &[&str]) -> bool {
    WORKFLOW_GLOBS
        .iter()
        .flat_map(|pattern| probe.glob(pattern).to_vec())
        .take(WORKFLOW_SAMPLE)
        .any(|rel| contains_any(&probe.read_lower(&rel), needles))
}

/// Case-insensitive regex search across workflow files
pub(crate) fn search_workflows(probe: &Probe, pattern: &str) -> bool {
    WORKFLOW_GLOBS
        .iter()
        .any(|glob| probe.search_files(glob, Some(pattern)))
}

/// Feature flag infrastructure, detected from dependency manifests
pub(crate) fn has_feature_flags(probe: &Probe) -> bool {
    FEATURE_FLAG_MANIFESTS
        .iter()
        .any(|manifest| contains_any(&probe.read_lower(manifest), FEATURE_FLAG_MARKERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing_support::{probe, repo};

    #[test]
    fn test_agents_text_falls_back_to_claude_md() {
        let dir = repo(&[("CLAUDE.md", "Naming Conventions")]);
        assert_eq!(agents_text(&probe(dir.path())), "naming conventions");

        let dir = repo(&[("AGENTS.md", "agents"), ("CLAUDE.md", "claude")]);
        assert_eq!(agents_text(&probe(dir.path())), "agents");
    }

    #[test]
    fn test_workflows_mention_reads_yml_and_yaml() {
        let dir = repo(&[
            (".github/workflows/a.yml", "run: pytest"),
            (".github/workflows/b.yaml", "run: npx knip"),
        ]);
        let probe = probe(dir.path());
        assert!(workflows_mention(&probe, &["knip"]));
        assert!(!workflows_mention(&probe, &["vulture"]));
    }

    #[test]
    fn test_workflows_mention_samples_five_files() {
        let mut files: Vec<(String, String)> = (0..5)
            .map(|i| (format!(".github/workflows/{}.yml", i), "on: push".to_string()))
            .collect();
        files.push((".github/workflows/z.yml".to_string(), "uses: jscpd".to_string()));
        let borrowed: Vec<(&str, &str)> = files
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let dir = repo(&borrowed);
        assert!(!workflows_mention(&probe(dir.path()), &["jscpd"]));
    }

    #[test]
    fn test_feature_flags_from_manifest() {
        let dir = repo(&[("package.json", r#"{"dependencies": {"@growthbook/growthbook": "1"}}"#)]);
        assert!(has_feature_flags(&probe(dir.path())));

        let dir = repo(&[("package.json", r#"{"dependencies": {"react": "18"}}"#)]);
        assert!(!has_feature_flags(&probe(dir.path())));
    }
}
