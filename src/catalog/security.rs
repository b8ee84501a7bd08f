//! Security: secrets, ownership, dependency hygiene and scanning

use super::evidence::{contains_any, manifests_text, search_workflows, workflows_mention};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::Security;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "gitignore_comprehensive",
        1,
        ".gitignore covers secrets, dependencies and editor files",
        "Comprehensive .gitignore",
        "Incomplete .gitignore",
        gitignore_comprehensive,
    ),
    Criterion::new(
        P,
        "secrets_management",
        2,
        "CI reads credentials from a secret store",
        "Secrets properly managed",
        "No secrets management",
        secrets_management,
    ),
    Criterion::new(
        P,
        "codeowners",
        2,
        "CODEOWNERS file assigns reviewers",
        "CODEOWNERS configured",
        "No CODEOWNERS file",
        codeowners,
    ),
    Criterion::new(
        P,
        "branch_protection",
        2,
        "Branch protection rules tracked in the repository",
        "Branch protection configured",
        "Branch protection unclear",
        branch_protection,
    ),
    Criterion::new(
        P,
        "dependency_update_automation",
        3,
        "Dependency updates automated (Dependabot, Renovate)",
        "Dependency updates automated",
        "No dependency automation",
        dependency_update_automation,
    ),
    Criterion::new(
        P,
        "log_scrubbing",
        3,
        "Sensitive data redacted from logs",
        "Log scrubbing configured",
        "No log scrubbing",
        log_scrubbing,
    ),
    Criterion::new(
        P,
        "pii_handling",
        3,
        "PII redacted, masked or sanitized in code",
        "PII handling implemented",
        "No PII handling found",
        pii_handling,
    ),
    Criterion::new(
        P,
        "automated_security_review",
        4,
        "Security analysis runs in CI",
        "Security scanning enabled",
        "No security scanning",
        automated_security_review,
    ),
    Criterion::new(
        P,
        "secret_scanning",
        4,
        "Committed secrets detected in CI",
        "Secret scanning enabled",
        "No secret scanning",
        secret_scanning,
    ),
    Criterion::new(
        P,
        "dast_scanning",
        5,
        "Dynamic application security testing",
        "DAST scanning enabled",
        "No DAST scanning",
        dast_scanning,
    ),
    Criterion::new(
        P,
        "privacy_compliance",
        5,
        "Privacy and compliance documentation",
        "Privacy compliance documented",
        "No privacy documentation",
        privacy_compliance,
    ),
];

fn gitignore_comprehensive(ctx: &EvalContext<'_>) -> bool {
    contains_any(
        &ctx.probe.read_lower(".gitignore"),
        &[".env", "node_modules", "__pycache__", ".idea", ".vscode"],
    )
}

fn secrets_management(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["secrets."])
}

fn codeowners(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&["CODEOWNERS", ".github/CODEOWNERS"])
}

fn branch_protection(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".github/branch-protection.yml", ".github/rulesets/**"])
}

fn dependency_update_automation(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".github/dependabot.yml", "renovate.json", ".renovaterc"])
}

fn log_scrubbing(ctx: &EvalContext<'_>) -> bool {
    let deps = manifests_text(ctx.probe, &["package.json", "requirements.txt"]);
    contains_any(&deps, &["pino", "redact", "scrub"])
}

fn pii_handling(ctx: &EvalContext<'_>) -> bool {
    ["**/*.py", "**/*.ts"]
        .iter()
        .any(|glob| ctx.probe.search_files(glob, Some("(redact|sanitize|mask|pii)")))
}

fn automated_security_review(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(codeql|snyk|sonar|security)")
}

fn secret_scanning(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(gitleaks|trufflehog|secret)")
}

fn dast_scanning(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(zap|dast|owasp|burp)")
}

fn privacy_compliance(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["PRIVACY.md", "docs/privacy/**", "gdpr/**"])
}
