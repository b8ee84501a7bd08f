//! Task Discovery: how work is found and picked up

use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::TaskDiscovery;

/// Issue templates read when looking for default labels
const TEMPLATE_SAMPLE: usize = 5;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "issue_templates",
        2,
        "Issue templates guide new reports",
        "Issue templates configured",
        "No issue templates",
        issue_templates,
    ),
    Criterion::new(
        P,
        "issue_labeling_system",
        2,
        "Issue templates apply labels",
        "Issue labels configured",
        "No issue labeling system",
        issue_labeling_system,
    ),
    Criterion::new(
        P,
        "pr_templates",
        2,
        "Pull request template present",
        "PR template configured",
        "No PR template",
        pr_templates,
    ),
    Criterion::new(
        P,
        "backlog_health",
        3,
        "Contribution guidelines published",
        "Contributing guidelines exist",
        "No contributing guidelines",
        backlog_health,
    ),
];

fn issue_templates(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".github/ISSUE_TEMPLATE/**", ".github/ISSUE_TEMPLATE.md"])
}

fn issue_labeling_system(ctx: &EvalContext<'_>) -> bool {
    issue_templates(ctx)
        && ctx
            .probe
            .glob(".github/ISSUE_TEMPLATE/*.md")
            .iter()
            .take(TEMPLATE_SAMPLE)
            .any(|rel| ctx.probe.read_lower(rel).contains("labels:"))
}

fn pr_templates(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        ".github/pull_request_template.md",
        ".github/PULL_REQUEST_TEMPLATE.md",
        "pull_request_template.md",
    ])
}

fn backlog_health(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["CONTRIBUTING.md", ".github/CONTRIBUTING.md"])
}
