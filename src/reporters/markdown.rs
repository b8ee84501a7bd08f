//! Markdown reporter for the full readiness report
//!
//! Sections, in order: header, level progress, summary (strengths and
//! priority improvements), per-pillar detail tables, recommended next steps.

use super::{is_achieved, levels, top_opportunities};
use crate::models::{AnalysisResult, CriterionStatus, NOT_YET_L1};
use crate::scoring::ACHIEVEMENT_THRESHOLD;

/// Pillars listed under "Strengths"
const MAX_STRENGTHS: usize = 3;
/// Passing criteria named per strength
const MAX_STRENGTH_EXAMPLES: usize = 3;
/// Rows in the priority improvements table
const MAX_IMPROVEMENTS: usize = 5;

/// Render report as GitHub-flavored Markdown
pub fn render(result: &AnalysisResult) -> String {
    let mut md = String::new();

    md.push_str(&render_header(result));
    md.push('\n');
    md.push_str(&render_level_progress(result));
    md.push('\n');
    md.push_str(&render_summary(result));
    md.push_str(&render_details(result));
    md.push_str(&render_recommendations(result.achieved_level));
    md.push_str("\n---\n*Report generated from repository analysis*");

    md
}

fn render_header(result: &AnalysisResult) -> String {
    let achieved = if result.achieved_level > 0 {
        format!("**L{}**", result.achieved_level)
    } else {
        format!("**{}** (need 80% at L1)", NOT_YET_L1)
    };

    format!(
        "# Agent Readiness Report: {}\n\n\
         **Languages**: {}  \n\
         **Repository Type**: {}  \n\
         **Pass Rate**: {:.1}% ({}/{} criteria)  \n\
         **Achieved Level**: {}\n",
        result.repo_name,
        result.languages.join(", "),
        result.repo_type,
        result.pass_rate,
        result.total_passed,
        result.total_criteria,
        achieved
    )
}

fn render_level_progress(result: &AnalysisResult) -> String {
    let mut md = String::from("## Level Progress\n\n| Level | Score | Status |\n|-------|-------|--------|\n");

    for (level, score) in levels(result) {
        let status = if is_achieved(result, level) {
            "✅ Achieved".to_string()
        } else if score >= ACHIEVEMENT_THRESHOLD {
            "✅ Passed".to_string()
        } else {
            format!("⬜ {:.0}% to go", 100.0 - score)
        };
        md.push_str(&format!("| L{} | {:.0}% | {} |\n", level, score, status));
    }

    md
}

fn render_summary(result: &AnalysisResult) -> String {
    let mut md = String::from("## Summary\n\n");

    // Strengths: best pillars that scored anything, ties keep pillar order
    let mut strengths: Vec<_> = result.pillars.values().filter(|p| p.total > 0).collect();
    strengths.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    if !strengths.is_empty() {
        md.push_str("### Strengths\n\n");
        for pillar in strengths.into_iter().take(MAX_STRENGTHS) {
            let passing: Vec<String> = pillar
                .criteria
                .iter()
                .filter(|c| c.is_pass())
                .take(MAX_STRENGTH_EXAMPLES)
                .map(|c| format!("`{}`", c.id))
                .collect();
            if passing.is_empty() {
                md.push_str(&format!("- **{}** ({}%)\n", pillar.name, pillar.percentage));
            } else {
                md.push_str(&format!(
                    "- **{}** ({}%): {}\n",
                    pillar.name,
                    pillar.percentage,
                    passing.join(", ")
                ));
            }
        }
        md.push('\n');
    }

    let improvements = top_opportunities(result, MAX_IMPROVEMENTS);
    if !improvements.is_empty() {
        md.push_str("### Priority Improvements\n\n");
        md.push_str("| Criterion | Issue | Pillar |\n|-----------|-------|--------|\n");
        for opportunity in improvements {
            md.push_str(&format!(
                "| `{}` | {} | {} |\n",
                opportunity.id, opportunity.reason, opportunity.pillar
            ));
        }
        md.push('\n');
    }

    md
}

fn render_details(result: &AnalysisResult) -> String {
    let mut md = String::from("## Detailed Results\n\n");

    for (name, pillar) in &result.pillars {
        md.push_str(&format!("### {}\n", name));
        md.push_str(&format!(
            "**Score**: {}/{} ({}%)\n\n",
            pillar.passed, pillar.total, pillar.percentage
        ));
        md.push_str("| Status | Criterion | Score | Details |\n|--------|-----------|-------|---------|\n");

        for criterion in &pillar.criteria {
            md.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                status_icon(criterion.status),
                criterion.id,
                criterion.score,
                criterion.reason
            ));
        }
        md.push('\n');
    }

    md
}

fn status_icon(status: CriterionStatus) -> &'static str {
    match status {
        CriterionStatus::Pass => "✓",
        CriterionStatus::Fail => "✗",
        CriterionStatus::Skip => "—",
    }
}

/// Canned advice for the bracket the achieved level falls in
fn render_recommendations(achieved: u8) -> String {
    let (title, steps) = match achieved {
        0 | 1 => (
            "Focus on L1/L2 Foundations:",
            [
                "Add missing linter and formatter configurations",
                "Document build and test commands in README",
                "Set up pre-commit hooks for fast feedback",
                "Create AGENTS.md with project context for AI agents",
            ],
        ),
        2 => (
            "Progress to L3 (Production Ready):",
            [
                "Add integration/E2E tests",
                "Set up test coverage thresholds",
                "Configure devcontainer for reproducible environments",
                "Add automated PR review tooling",
            ],
        ),
        _ => (
            "Optimize for L4+:",
            [
                "Implement complexity analysis and dead code detection",
                "Set up flaky test detection and quarantine",
                "Add security scanning (CodeQL, Snyk)",
                "Configure deployment observability",
            ],
        ),
    };

    let mut md = format!("## Recommended Next Steps\n\n**{}**\n", title);
    for (i, step) in steps.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, step));
    }
    md
}
