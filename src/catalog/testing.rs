//! Testing: existence, runnability and health of the test suite

use super::evidence::{contains_any, docs_text, workflows_mention};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::Testing;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "unit_tests_exist",
        1,
        "Unit tests present in the repository",
        "Unit tests found",
        "No unit tests found",
        unit_tests_exist,
    ),
    Criterion::new(
        P,
        "unit_tests_runnable",
        1,
        "Test commands documented",
        "Test commands documented",
        "Test commands not documented",
        unit_tests_runnable,
    ),
    Criterion::new(
        P,
        "test_naming_conventions",
        2,
        "Test discovery follows a naming convention",
        "Test naming conventions enforced",
        "No test naming conventions",
        test_naming_conventions,
    ),
    Criterion::new(
        P,
        "test_isolation",
        2,
        "Tests run in isolation or in parallel",
        "Tests support isolation/parallelism",
        "No test isolation",
        test_isolation,
    ),
    Criterion::new(
        P,
        "integration_tests_exist",
        3,
        "Integration or end-to-end tests present",
        "Integration tests found",
        "No integration tests found",
        integration_tests_exist,
    ),
    Criterion::new(
        P,
        "test_coverage_thresholds",
        3,
        "Coverage measured and enforced",
        "Coverage thresholds enforced",
        "No coverage thresholds",
        test_coverage_thresholds,
    ),
    Criterion::new(
        P,
        "flaky_test_detection",
        4,
        "Flaky tests detected, retried or quarantined",
        "Flaky test handling configured",
        "No flaky test detection",
        flaky_test_detection,
    ),
    Criterion::new(
        P,
        "test_performance_tracking",
        4,
        "Test durations tracked",
        "Test performance tracked",
        "No test performance tracking",
        test_performance_tracking,
    ),
];

const TEST_LAYOUTS: &[&str] = &[
    "tests/**/*.py",
    "test/**/*.py",
    "*_test.py",
    "*_test.go",
    "**/*.spec.ts",
    "**/*.spec.js",
    "**/*.test.ts",
    "**/*.test.js",
    "spec/**/*.rb",
    "tests/**/*.rs",
];

const TEST_COMMANDS: &[&str] = &[
    "pytest",
    "npm test",
    "yarn test",
    "go test",
    "cargo test",
    "make test",
    "rake test",
    "rspec",
    "jest",
];

fn unit_tests_exist(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(TEST_LAYOUTS)
}

fn unit_tests_runnable(ctx: &EvalContext<'_>) -> bool {
    contains_any(&docs_text(ctx.probe), TEST_COMMANDS)
}

fn test_naming_conventions(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.read_lower("pyproject.toml").contains("pytest")
        || ctx.probe.file_exists(&["jest.config.js", "jest.config.ts"])
        || ctx.has_language("Go")
}

fn test_isolation(ctx: &EvalContext<'_>) -> bool {
    contains_any(
        &ctx.probe.read_lower("pyproject.toml"),
        &["pytest-xdist", "-n auto"],
    ) || workflows_mention(ctx.probe, &["matrix"])
        || ctx.has_language("Go")
}

fn integration_tests_exist(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        "tests/integration/**",
        "integration/**",
        "e2e/**",
        "tests/e2e/**",
        "cypress/**",
        "playwright.config.*",
    ])
}

fn test_coverage_thresholds(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["coverage", "codecov", "coveralls"])
        || ctx
            .probe
            .file_exists(&[".coveragerc", "coverage.xml", "codecov.yml"])
}

fn flaky_test_detection(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["retry", "flaky", "quarantine", "rerun"])
}

fn test_performance_tracking(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["durations", "timing", "benchmark"])
}
