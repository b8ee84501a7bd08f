//! Skip-rule engine
//!
//! Decides whether a criterion is inapplicable to a repository. Rules are
//! data tables consulted in a fixed order, first match wins:
//!
//! 1. archetype exclusions (a library has no deployed runtime, ...)
//! 2. monorepo-only criteria, for any other archetype
//! 3. prerequisite gates (nothing to validate without the artifact)
//! 4. project configuration exclusions
//!
//! Archetype exclusions outrank prerequisite gates, so a criterion listed in
//! both reports the archetype reason.

use crate::catalog::evidence::has_feature_flags;
use crate::catalog::EvalContext;
use crate::models::RepoType;
use crate::probe::Probe;
use std::collections::BTreeSet;

/// Default reason for criteria excluded by project configuration
pub const CONFIG_SKIP_REASON: &str = "Excluded by project configuration";

const MONOREPO_ONLY_REASON: &str = "Single-application repository, not a monorepo";

type Exclusion = (&'static str, &'static str);

const LIBRARY_EXCLUSIONS: &[Exclusion] = &[
    ("health_checks", "Library, not a deployed service"),
    ("progressive_rollout", "Not applicable for a library"),
    ("rollback_automation", "Not applicable for a library"),
    ("dast_scanning", "Library, not a web service"),
    ("alerting_configured", "Library without runtime"),
    ("deployment_observability", "Library without deployments"),
    ("metrics_collection", "Library without runtime"),
    ("profiling_instrumentation", "Library where profiling not meaningful"),
    ("circuit_breakers", "Library without external dependencies"),
    ("distributed_tracing", "Library without runtime"),
    ("local_services_setup", "Library without external dependencies"),
    ("database_schema", "Library without database"),
    ("n_plus_one_detection", "Library without database/ORM"),
    ("privacy_compliance", "Library without user data"),
    ("pii_handling", "Library without user data"),
];

const DATABASE_EXCLUSIONS: &[Exclusion] = &[
    ("n_plus_one_detection", "Database project IS the database layer"),
    ("dast_scanning", "Database server, not web application"),
];

const CLI_EXCLUSIONS: &[Exclusion] = &[
    ("dast_scanning", "CLI tool, not web application"),
    ("health_checks", "CLI tool, not a service"),
    ("progressive_rollout", "CLI tool without deployments"),
];

const MONOREPO_ONLY: &[&str] = &["monorepo_tooling", "version_drift_detection"];

struct Prerequisite {
    id: &'static str,
    met: fn(&Probe) -> bool,
    reason: &'static str,
}

const PREREQUISITES: &[Prerequisite] = &[
    Prerequisite {
        id: "devcontainer_runnable",
        met: |probe| probe.file_exists(&[".devcontainer/devcontainer.json"]),
        reason: "No devcontainer to test (prerequisite failed)",
    },
    Prerequisite {
        id: "agents_md_validation",
        met: |probe| probe.file_exists(&["AGENTS.md", "CLAUDE.md"]),
        reason: "No AGENTS.md exists (prerequisite failed)",
    },
    Prerequisite {
        id: "dead_feature_flag_detection",
        met: has_feature_flags,
        reason: "No feature flag infrastructure (prerequisite failed)",
    },
];

/// Archetype-specific exclusions
pub fn archetype_exclusions(repo_type: RepoType) -> &'static [(&'static str, &'static str)] {
    match repo_type {
        RepoType::Library => LIBRARY_EXCLUSIONS,
        RepoType::Database => DATABASE_EXCLUSIONS,
        RepoType::Cli => CLI_EXCLUSIONS,
        RepoType::Monorepo | RepoType::Application => &[],
    }
}

/// Skip rules for one run: the fixed tables plus configured exclusions
#[derive(Debug, Clone)]
pub struct SkipRules {
    excluded: BTreeSet<String>,
    exclusion_reason: String,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            excluded: BTreeSet::new(),
            exclusion_reason: CONFIG_SKIP_REASON.to_string(),
        }
    }
}

impl SkipRules {
    pub fn with_exclusions<I, S>(criteria: I, reason: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: criteria.into_iter().map(Into::into).collect(),
            exclusion_reason: reason.unwrap_or_else(|| CONFIG_SKIP_REASON.to_string()),
        }
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }

    /// Skip reason for `id`, or `None` when the criterion is scored
    pub fn decide(&self, id: &str, ctx: &EvalContext<'_>) -> Option<&str> {
        let repo_type = ctx.classification.repo_type;

        if let Some(&(_, reason)) = archetype_exclusions(repo_type)
            .iter()
            .find(|(excluded, _)| *excluded == id)
        {
            return Some(reason);
        }

        if repo_type != RepoType::Monorepo && MONOREPO_ONLY.contains(&id) {
            return Some(MONOREPO_ONLY_REASON);
        }

        if let Some(prerequisite) = PREREQUISITES.iter().find(|p| p.id == id) {
            if !(prerequisite.met)(ctx.probe) {
                return Some(prerequisite.reason);
            }
        }

        if self.excluded.contains(id) {
            return Some(&self.exclusion_reason);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing_support::{classification, probe, repo};
    use crate::catalog::{all_criteria, find};

    fn decide_for(
        rules: &SkipRules,
        files: &[(&str, &str)],
        repo_type: RepoType,
        id: &str,
    ) -> Option<String> {
        let dir = repo(files);
        let probe = probe(dir.path());
        let classification = classification(repo_type, &["Python"]);
        let ctx = EvalContext {
            probe: &probe,
            classification: &classification,
        };
        rules.decide(id, &ctx).map(str::to_string)
    }

    #[test]
    fn test_tables_reference_known_criteria() {
        let tables = [LIBRARY_EXCLUSIONS, DATABASE_EXCLUSIONS, CLI_EXCLUSIONS];
        for (id, _) in tables.iter().flat_map(|t| t.iter()) {
            assert!(find(id).is_some(), "unknown criterion {}", id);
        }
        for id in MONOREPO_ONLY {
            assert!(find(id).is_some(), "unknown criterion {}", id);
        }
        for prerequisite in PREREQUISITES {
            assert!(find(prerequisite.id).is_some());
        }
    }

    #[test]
    fn test_library_exclusions() {
        let rules = SkipRules::default();
        assert_eq!(
            decide_for(&rules, &[], RepoType::Library, "health_checks").as_deref(),
            Some("Library, not a deployed service")
        );
        assert_eq!(decide_for(&rules, &[], RepoType::Application, "health_checks"), None);
        assert_eq!(LIBRARY_EXCLUSIONS.len(), 15);
    }

    #[test]
    fn test_cli_and_database_exclusions() {
        let rules = SkipRules::default();
        assert_eq!(
            decide_for(&rules, &[], RepoType::Cli, "dast_scanning").as_deref(),
            Some("CLI tool, not web application")
        );
        assert_eq!(
            decide_for(&rules, &[], RepoType::Database, "dast_scanning").as_deref(),
            Some("Database server, not web application")
        );
        assert_eq!(decide_for(&rules, &[], RepoType::Database, "health_checks"), None);
    }

    #[test]
    fn test_monorepo_only_criteria() {
        let rules = SkipRules::default();
        for repo_type in [RepoType::Application, RepoType::Library, RepoType::Cli] {
            assert_eq!(
                decide_for(&rules, &[], repo_type, "monorepo_tooling").as_deref(),
                Some(MONOREPO_ONLY_REASON)
            );
        }
        assert_eq!(decide_for(&rules, &[], RepoType::Monorepo, "version_drift_detection"), None);
    }

    #[test]
    fn test_prerequisite_gates() {
        let rules = SkipRules::default();
        assert_eq!(
            decide_for(&rules, &[], RepoType::Application, "devcontainer_runnable").as_deref(),
            Some("No devcontainer to test (prerequisite failed)")
        );
        assert_eq!(
            decide_for(
                &rules,
                &[(".devcontainer/devcontainer.json", "{}")],
                RepoType::Application,
                "devcontainer_runnable"
            ),
            None
        );
        assert_eq!(
            decide_for(&rules, &[("CLAUDE.md", "")], RepoType::Application, "agents_md_validation"),
            None
        );
        assert_eq!(
            decide_for(&rules, &[], RepoType::Application, "dead_feature_flag_detection").as_deref(),
            Some("No feature flag infrastructure (prerequisite failed)")
        );
        assert_eq!(
            decide_for(
                &rules,
                &[("requirements.txt", "UnleashClient==5.0")],
                RepoType::Application,
                "dead_feature_flag_detection"
            ),
            None
        );
    }

    #[test]
    fn test_archetype_rule_outranks_later_rules() {
        // Library exclusion wins over the config exclusion of the same id
        let rules = SkipRules::with_exclusions(["health_checks", "vcs_cli_tools"], None);
        assert_eq!(
            decide_for(&rules, &[], RepoType::Library, "health_checks").as_deref(),
            Some("Library, not a deployed service")
        );
        assert_eq!(
            decide_for(&rules, &[], RepoType::Library, "vcs_cli_tools").as_deref(),
            Some(CONFIG_SKIP_REASON)
        );
    }

    #[test]
    fn test_monorepo_rule_outranks_prerequisite_and_config() {
        let rules = SkipRules::with_exclusions(["monorepo_tooling"], Some("Not ours".to_string()));
        assert_eq!(
            decide_for(&rules, &[], RepoType::Application, "monorepo_tooling").as_deref(),
            Some(MONOREPO_ONLY_REASON)
        );
        assert_eq!(
            decide_for(&rules, &[], RepoType::Monorepo, "monorepo_tooling").as_deref(),
            Some("Not ours")
        );
    }

    #[test]
    fn test_application_without_artifacts_skips_only_gated_criteria() {
        let rules = SkipRules::default();
        let skipped: Vec<&str> = all_criteria()
            .map(|c| c.id)
            .filter(|id| decide_for(&rules, &[], RepoType::Application, id).is_some())
            .collect();
        assert_eq!(
            skipped,
            vec![
                "dead_feature_flag_detection",
                "monorepo_tooling",
                "version_drift_detection",
                "agents_md_validation",
                "devcontainer_runnable",
            ]
        );
    }
}
