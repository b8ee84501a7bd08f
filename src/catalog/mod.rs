//! Criterion catalog and pillar evaluators
//!
//! Every criterion is a static descriptor: identifier, pillar, level, a
//! human-readable description, the pass/fail reasons, and a predicate over
//! the probe layer. Pillars own their criteria in declaration order, and
//! that order is preserved in every result and report.
//!
//! Predicates combine detection strategies with short-circuiting OR; any
//! credible signal is enough to pass. The skip rules are applied after the
//! predicate runs and always win.

mod build;
mod dev_env;
mod docs;
pub(crate) mod evidence;
mod observability;
mod product;
mod security;
mod style;
mod task_discovery;
mod testing;

use crate::classifier::Classification;
use crate::models::{CriterionResult, Pillar, PillarResult};
use crate::probe::Probe;
use crate::skip::SkipRules;
use tracing::debug;

/// Everything a predicate may consult
pub struct EvalContext<'a> {
    pub probe: &'a Probe,
    pub classification: &'a Classification,
}

impl EvalContext<'_> {
    pub fn has_language(&self, name: &str) -> bool {
        self.classification.has_language(name)
    }
}

/// Predicate signature shared by all criteria
pub type Check = fn(&EvalContext<'_>) -> bool;

/// Static description of one readiness check
pub struct Criterion {
    pub id: &'static str,
    pub pillar: Pillar,
    pub level: u8,
    pub description: &'static str,
    pub pass_reason: &'static str,
    pub fail_reason: &'static str,
    check: Check,
}

impl Criterion {
    pub(crate) const fn new(
        pillar: Pillar,
        id: &'static str,
        level: u8,
        description: &'static str,
        pass_reason: &'static str,
        fail_reason: &'static str,
        check: Check,
    ) -> Self {
        Self {
            id,
            pillar,
            level,
            description,
            pass_reason,
            fail_reason,
            check,
        }
    }

    /// Raw predicate value, before skip rules
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> bool {
        (self.check)(ctx)
    }

    pub fn reason(&self, passed: bool) -> &'static str {
        if passed {
            self.pass_reason
        } else {
            self.fail_reason
        }
    }
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("id", &self.id)
            .field("pillar", &self.pillar)
            .field("level", &self.level)
            .finish()
    }
}

/// Criteria of one pillar in declaration order
pub fn pillar_criteria(pillar: Pillar) -> &'static [Criterion] {
    match pillar {
        Pillar::StyleValidation => style::CRITERIA,
        Pillar::BuildSystem => build::CRITERIA,
        Pillar::Testing => testing::CRITERIA,
        Pillar::Documentation => docs::CRITERIA,
        Pillar::DevEnvironment => dev_env::CRITERIA,
        Pillar::Observability => observability::CRITERIA,
        Pillar::Security => security::CRITERIA,
        Pillar::TaskDiscovery => task_discovery::CRITERIA,
        Pillar::ProductAnalytics => product::CRITERIA,
    }
}

/// The whole catalog, pillar by pillar
pub fn all_criteria() -> impl Iterator<Item = &'static Criterion> {
    Pillar::ALL
        .into_iter()
        .flat_map(|pillar| pillar_criteria(pillar).iter())
}

pub fn find(id: &str) -> Option<&'static Criterion> {
    all_criteria().find(|c| c.id == id)
}

/// Evaluate one pillar. The predicate always runs; the skip decision then
/// chooses between a scored and a skipped result.
pub fn evaluate_pillar(pillar: Pillar, ctx: &EvalContext<'_>, rules: &SkipRules) -> PillarResult {
    let criteria = pillar_criteria(pillar)
        .iter()
        .map(|criterion| {
            let passed = criterion.evaluate(ctx);
            match rules.decide(criterion.id, ctx) {
                Some(reason) => {
                    debug!(
                        "{} skipped (raw {}): {}",
                        criterion.id,
                        if passed { "pass" } else { "fail" },
                        reason
                    );
                    CriterionResult::skipped(criterion.id, pillar, criterion.level, reason)
                }
                None => CriterionResult::scored(
                    criterion.id,
                    pillar,
                    criterion.level,
                    passed,
                    criterion.reason(passed),
                ),
            }
        })
        .collect();

    PillarResult::from_criteria(pillar, criteria)
}


#[cfg(test)]
mod tests {
    use super::testing_support::*;
    use super::*;
    use crate::models::{CriterionStatus, RepoType, MAX_LEVEL, MIN_LEVEL};
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        for criterion in all_criteria() {
            assert!(seen.insert(criterion.id), "duplicate id {}", criterion.id);
        }
        assert_eq!(seen.len(), 81);
    }

    #[test]
    fn test_criteria_belong_to_their_pillar() {
        for pillar in Pillar::ALL {
            let criteria = pillar_criteria(pillar);
            assert!(!criteria.is_empty(), "{} has no criteria", pillar);
            for criterion in criteria {
                assert_eq!(criterion.pillar, pillar, "{}", criterion.id);
                assert!((MIN_LEVEL..=MAX_LEVEL).contains(&criterion.level));
                assert!(!criterion.description.is_empty());
            }
        }
    }

    #[test]
    fn test_pillar_sizes() {
        let sizes: Vec<usize> = Pillar::ALL
            .into_iter()
            .map(|p| pillar_criteria(p).len())
            .collect();
        assert_eq!(sizes, vec![13, 19, 8, 8, 5, 11, 11, 4, 2]);
    }

    #[test]
    fn test_levels_are_non_decreasing_within_pillar() {
        for pillar in Pillar::ALL {
            let levels: Vec<u8> = pillar_criteria(pillar).iter().map(|c| c.level).collect();
            assert!(levels.windows(2).all(|w| w[0] <= w[1]), "{}", pillar);
        }
    }

    #[test]
    fn test_reason_strings_are_stable() {
        let pinned = [
            ("pre_commit_hooks", "Pre-commit hooks configured", "No pre-commit hooks found"),
            ("naming_consistency", "Naming conventions enforced", "No naming convention enforcement"),
            ("feature_flag_infrastructure", "Feature flags configured", "No feature flag system"),
            ("test_isolation", "Tests support isolation/parallelism", "No test isolation"),
            ("integration_tests_exist", "Integration tests found", "No integration tests found"),
            ("service_flow_documented", "Architecture documented", "No architecture documentation"),
            ("devcontainer_runnable", "Devcontainer appears valid", "Devcontainer not runnable"),
            ("branch_protection", "Branch protection configured", "Branch protection unclear"),
            ("dast_scanning", "DAST scanning enabled", "No DAST scanning"),
            ("issue_labeling_system", "Issue labels configured", "No issue labeling system"),
        ];
        for (id, pass, fail) in pinned {
            let criterion = find(id).unwrap();
            assert_eq!(criterion.reason(true), pass, "{}", id);
            assert_eq!(criterion.reason(false), fail, "{}", id);
        }
    }

    #[test]
    fn test_evaluate_pillar_keeps_declaration_order() {
        let dir = repo(&[("README.md", "# Project")]);
        let probe = probe(dir.path());
        let classification = classification(RepoType::Application, &["Unknown"]);
        let ctx = EvalContext {
            probe: &probe,
            classification: &classification,
        };
        let rules = SkipRules::default();

        let result = evaluate_pillar(Pillar::Documentation, &ctx, &rules);
        let ids: Vec<&str> = result.criteria.iter().map(|c| c.id.as_str()).collect();
        let expected: Vec<&str> = pillar_criteria(Pillar::Documentation)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, expected);
        assert_eq!(result.criteria[0].status, CriterionStatus::Pass);
        assert_eq!(result.criteria[0].reason, "README exists");
    }

    #[test]
    fn test_skip_overrides_passing_predicate() {
        let dir = repo(&[("app/health.py", "def health(): return 'ok'")]);
        let probe = probe(dir.path());
        let classification = classification(RepoType::Library, &["Python"]);
        let ctx = EvalContext {
            probe: &probe,
            classification: &classification,
        };
        assert!(find("health_checks").unwrap().evaluate(&ctx));

        let result = evaluate_pillar(Pillar::Observability, &ctx, &SkipRules::default());
        let health = result
            .criteria
            .iter()
            .find(|c| c.id == "health_checks")
            .unwrap();
        assert_eq!(health.status, CriterionStatus::Skip);
        assert_eq!(health.score, "—/—");
        assert_eq!(health.reason, "Library, not a deployed service");
    }
}
