//! Build System: reproducible builds, CI, release and rollout tooling

use super::evidence::{
    contains_any, docs_text, has_feature_flags, search_workflows, workflows_mention,
};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::BuildSystem;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "build_cmd_doc",
        1,
        "Build commands documented for humans and agents",
        "Build commands documented",
        "Build commands not documented",
        build_cmd_doc,
    ),
    Criterion::new(
        P,
        "deps_pinned",
        1,
        "Dependencies pinned with a lockfile",
        "Dependencies pinned with lockfile",
        "No lockfile found",
        deps_pinned,
    ),
    Criterion::new(
        P,
        "vcs_cli_tools",
        1,
        "GitHub or GitLab CLI authenticated",
        "VCS CLI authenticated",
        "VCS CLI not authenticated",
        vcs_cli_tools,
    ),
    Criterion::new(
        P,
        "fast_ci_feedback",
        2,
        "CI runs on every change",
        "CI workflow configured",
        "No CI configuration found",
        fast_ci_feedback,
    ),
    Criterion::new(
        P,
        "single_command_setup",
        2,
        "Environment set up with a single command",
        "Single command setup documented",
        "No single command setup",
        single_command_setup,
    ),
    Criterion::new(
        P,
        "release_automation",
        2,
        "Releases published by automation",
        "Release automation configured",
        "No release automation",
        release_automation,
    ),
    Criterion::new(
        P,
        "deployment_frequency",
        2,
        "Deployments happen regularly",
        "Regular deployments",
        "Deployment frequency unclear",
        deployment_frequency,
    ),
    Criterion::new(
        P,
        "release_notes_automation",
        3,
        "Release notes generated automatically",
        "Release notes automated",
        "No release notes automation",
        release_notes_automation,
    ),
    Criterion::new(
        P,
        "agentic_development",
        3,
        "Recent history shows AI agent commits",
        "AI agent commits found",
        "No AI agent commits detected",
        agentic_development,
    ),
    Criterion::new(
        P,
        "automated_pr_review",
        3,
        "Pull requests reviewed by automation",
        "Automated PR review configured",
        "No automated PR review",
        automated_pr_review,
    ),
    Criterion::new(
        P,
        "feature_flag_infrastructure",
        3,
        "Feature flag service or library in use",
        "Feature flags configured",
        "No feature flag system",
        feature_flag_infrastructure,
    ),
    Criterion::new(
        P,
        "build_performance_tracking",
        4,
        "Build caching and performance tracked",
        "Build caching configured",
        "No build performance tracking",
        build_performance_tracking,
    ),
    Criterion::new(
        P,
        "heavy_dependency_detection",
        4,
        "Bundle size or heavy dependencies tracked",
        "Bundle size tracking configured",
        "No bundle size tracking",
        heavy_dependency_detection,
    ),
    Criterion::new(
        P,
        "unused_dependencies_detection",
        4,
        "Unused dependencies detected in CI",
        "Unused deps detection enabled",
        "No unused deps detection",
        unused_dependencies_detection,
    ),
    Criterion::new(
        P,
        "dead_feature_flag_detection",
        4,
        "Stale feature flags cleaned up automatically",
        "Dead flag detection enabled",
        "No dead flag detection",
        dead_feature_flag_detection,
    ),
    Criterion::new(
        P,
        "monorepo_tooling",
        4,
        "Monorepo orchestration tooling configured",
        "Monorepo tooling configured",
        "No monorepo tooling",
        monorepo_tooling,
    ),
    Criterion::new(
        P,
        "version_drift_detection",
        4,
        "Dependency versions kept consistent across packages",
        "Version drift detection enabled",
        "No version drift detection",
        version_drift_detection,
    ),
    Criterion::new(
        P,
        "progressive_rollout",
        5,
        "Changes rolled out progressively",
        "Progressive rollout configured",
        "No progressive rollout",
        progressive_rollout,
    ),
    Criterion::new(
        P,
        "rollback_automation",
        5,
        "Rollbacks automated",
        "Rollback automation configured",
        "No rollback automation",
        rollback_automation,
    ),
];

const LOCKFILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "uv.lock",
    "poetry.lock",
    "Pipfile.lock",
    "go.sum",
    "Cargo.lock",
    "Gemfile.lock",
];

const BUILD_COMMANDS: &[&str] = &[
    "npm run",
    "yarn",
    "pnpm",
    "make",
    "cargo build",
    "go build",
    "pip install",
    "python setup.py",
    "gradle",
    "mvn",
];

const SETUP_COMMANDS: &[&str] = &[
    "make install",
    "npm install",
    "yarn install",
    "pip install -e",
    "docker-compose up",
    "./dev",
    "make setup",
    "just",
];

const CI_CONFIGS: &[&str] = &[
    ".github/workflows/*.yml",
    ".github/workflows/*.yaml",
    ".gitlab-ci.yml",
    ".circleci/config.yml",
    "Jenkinsfile",
    ".travis.yml",
];

/// Commit trailers and tool names left behind by coding agents
const AGENT_COMMIT_MARKERS: &[&str] = &[
    "co-authored-by",
    "droid",
    "copilot",
    "claude",
    "gpt",
    "ai agent",
];

fn build_cmd_doc(ctx: &EvalContext<'_>) -> bool {
    contains_any(&docs_text(ctx.probe), BUILD_COMMANDS)
}

fn deps_pinned(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(LOCKFILES)
}

fn vcs_cli_tools(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.run_command(&["gh", "auth", "status"]).success()
        || ctx.probe.run_command(&["glab", "auth", "status"]).success()
}

fn fast_ci_feedback(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(CI_CONFIGS)
}

fn single_command_setup(ctx: &EvalContext<'_>) -> bool {
    contains_any(&docs_text(ctx.probe), SETUP_COMMANDS)
}

fn release_automation(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(release|publish|deploy)")
}

/// Release automation stands in for deployment cadence
fn deployment_frequency(ctx: &EvalContext<'_>) -> bool {
    release_automation(ctx)
}

fn release_notes_automation(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(changelog|release.notes|latest.changes)")
}

fn agentic_development(ctx: &EvalContext<'_>) -> bool {
    let log = ctx.probe.run_command(&["git", "log", "--oneline", "-50"]);
    log.success() && contains_any(&log.output.to_lowercase(), AGENT_COMMIT_MARKERS)
}

fn automated_pr_review(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["danger.js", "dangerfile.js", "dangerfile.ts"])
        || workflows_mention(ctx.probe, &["review", "danger", "lint-pr"])
}

fn feature_flag_infrastructure(ctx: &EvalContext<'_>) -> bool {
    has_feature_flags(ctx.probe)
}

fn build_performance_tracking(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&["turbo.json", "nx.json"])
}

fn heavy_dependency_detection(ctx: &EvalContext<'_>) -> bool {
    contains_any(
        &ctx.probe.read_lower("package.json"),
        &["webpack-bundle-analyzer", "bundlesize", "size-limit"],
    )
}

fn unused_dependencies_detection(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["depcheck", "deptry", "go mod tidy"])
}

fn dead_feature_flag_detection(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, r"(stale|unused|dead)[-_ ]?(feature[-_ ]?)?flags?")
}

fn monorepo_tooling(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["lerna.json", "nx.json", "turbo.json", "pnpm-workspace.yaml"])
}

fn version_drift_detection(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".syncpackrc", ".syncpackrc.json", ".syncpackrc.yml"])
        || contains_any(&ctx.probe.read_lower("package.json"), &["syncpack", "@manypkg"])
}

fn progressive_rollout(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "canary|gradual|rollout")
}

fn rollback_automation(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, r"rollback|rollout\s+undo|revert[-_ ]?deploy")
}

#[cfg(test)]
mod tests {
    use crate::catalog::testing_support::{check, check_with, repo, StubRunner};
    use crate::probe::{Probe, ProbeSettings};

    fn stub_probe(dir: &std::path::Path, exit_code: i32, output: &'static str) -> Probe {
        Probe::with_runner(
            dir,
            ProbeSettings::default(),
            Box::new(StubRunner { exit_code, output }),
        )
    }

    #[test]
    fn test_build_cmd_doc_reads_readme_and_agents() {
        assert!(check(&[("README.md", "Run `npm run build`.")], "build_cmd_doc"));
        assert!(check(&[("CLAUDE.md", "Use cargo build --release")], "build_cmd_doc"));
        assert!(!check(&[("README.md", "A project.")], "build_cmd_doc"));
    }

    #[test]
    fn test_deps_pinned_lockfiles() {
        assert!(check(&[("Cargo.lock", "")], "deps_pinned"));
        assert!(check(&[("uv.lock", "")], "deps_pinned"));
        assert!(!check(&[("requirements.txt", "flask")], "deps_pinned"));
    }

    #[test]
    fn test_vcs_cli_tools_uses_exit_code() {
        let dir = repo(&[]);
        assert!(check_with(&stub_probe(dir.path(), 0, "Logged in"), &[], "vcs_cli_tools"));
        assert!(!check_with(&stub_probe(dir.path(), 1, "not logged in"), &[], "vcs_cli_tools"));
        assert!(!check(&[], "vcs_cli_tools"));
    }

    #[test]
    fn test_agentic_development_requires_successful_log() {
        let dir = repo(&[]);
        let trailer = "abc123 Fix parser\n\nCo-Authored-By: bot";
        assert!(check_with(&stub_probe(dir.path(), 0, trailer), &[], "agentic_development"));
        assert!(!check_with(&stub_probe(dir.path(), 128, "claude"), &[], "agentic_development"));
        assert!(!check_with(
            &stub_probe(dir.path(), 0, "abc123 Initial commit"),
            &[],
            "agentic_development"
        ));
    }

    #[test]
    fn test_ci_and_release_from_workflows() {
        let files = [(".github/workflows/release.yaml", "on:\n  push:\n    tags: ['v*']\njobs:\n  Publish: {}")];
        assert!(check(&files, "fast_ci_feedback"));
        assert!(check(&files, "release_automation"));
        assert!(check(&files, "deployment_frequency"));
        assert!(!check(&files, "release_notes_automation"));
        assert!(check(&[(".gitlab-ci.yml", "stages: [test]")], "fast_ci_feedback"));
    }

    #[test]
    fn test_single_command_setup() {
        assert!(check(&[("README.md", "Run `make setup` once.")], "single_command_setup"));
        assert!(!check(&[("README.md", "Clone the repository.")], "single_command_setup"));
    }

    #[test]
    fn test_automated_pr_review() {
        assert!(check(&[("dangerfile.ts", "")], "automated_pr_review"));
        assert!(check(
            &[(".github/workflows/pr.yml", "uses: amannn/action-semantic-pull-request # lint-pr")],
            "automated_pr_review"
        ));
        assert!(!check(&[(".github/workflows/ci.yml", "run: make")], "automated_pr_review"));
    }

    #[test]
    fn test_former_stub_heuristics() {
        let cleanup = [(".github/workflows/flags.yml", "name: Remove stale feature flags")];
        assert!(check(&cleanup, "dead_feature_flag_detection"));
        assert!(!check(&[(".github/workflows/ci.yml", "name: Test")], "dead_feature_flag_detection"));

        assert!(check(&[(".syncpackrc.json", "{}")], "version_drift_detection"));
        assert!(check(
            &[("package.json", r#"{"devDependencies": {"@manypkg/cli": "0.21"}}"#)],
            "version_drift_detection"
        ));

        assert!(check(
            &[(".github/workflows/deploy.yml", "- run: kubectl rollout undo deploy/web")],
            "rollback_automation"
        ));
        assert!(!check(&[(".github/workflows/deploy.yml", "- run: deploy.sh")], "rollback_automation"));
    }

    #[test]
    fn test_monorepo_and_bundle_tooling() {
        assert!(check(&[("turbo.json", "{}")], "monorepo_tooling"));
        assert!(check(&[("turbo.json", "{}")], "build_performance_tracking"));
        assert!(check(
            &[("package.json", r#"{"devDependencies": {"size-limit": "11"}}"#)],
            "heavy_dependency_detection"
        ));
    }

    #[test]
    fn test_progressive_rollout() {
        assert!(check(&[(".github/workflows/cd.yml", "strategy: canary")], "progressive_rollout"));
        assert!(!check(&[(".github/workflows/cd.yml", "strategy: recreate")], "progressive_rollout"));
    }
}
