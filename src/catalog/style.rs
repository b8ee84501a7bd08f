//! Style & Validation: formatting, linting, typing and static analysis

use super::evidence::{agents_text, contains_any, manifests_text, workflows_mention};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::StyleValidation;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "formatter",
        1,
        "Code formatter configured (Prettier, Black, Ruff, gofmt, rustfmt)",
        "Formatter configured",
        "No formatter config found",
        formatter,
    ),
    Criterion::new(
        P,
        "lint_config",
        1,
        "Linter configured (ESLint, Ruff, Pylint, golangci-lint)",
        "Linter configured",
        "No linter config found",
        lint_config,
    ),
    Criterion::new(
        P,
        "type_check",
        1,
        "Static type checking available",
        "Type checking configured",
        "No type checking found",
        type_check,
    ),
    Criterion::new(
        P,
        "strict_typing",
        2,
        "Strict type checking enabled",
        "Strict typing enabled",
        "Strict typing not enabled",
        strict_typing,
    ),
    Criterion::new(
        P,
        "pre_commit_hooks",
        2,
        "Pre-commit hooks run checks before each commit",
        "Pre-commit hooks configured",
        "No pre-commit hooks found",
        pre_commit_hooks,
    ),
    Criterion::new(
        P,
        "naming_consistency",
        2,
        "Naming conventions documented or enforced",
        "Naming conventions enforced",
        "No naming convention enforcement",
        naming_consistency,
    ),
    Criterion::new(
        P,
        "large_file_detection",
        2,
        "Large files tracked or blocked",
        "Large file detection configured",
        "No large file detection",
        large_file_detection,
    ),
    Criterion::new(
        P,
        "code_modularization",
        3,
        "Module boundaries enforced by tooling",
        "Module boundaries enforced",
        "No module boundary enforcement",
        code_modularization,
    ),
    Criterion::new(
        P,
        "cyclomatic_complexity",
        3,
        "Cyclomatic complexity checked",
        "Complexity analysis configured",
        "No complexity analysis",
        cyclomatic_complexity,
    ),
    Criterion::new(
        P,
        "dead_code_detection",
        3,
        "Dead code detection runs in CI",
        "Dead code detection enabled",
        "No dead code detection",
        dead_code_detection,
    ),
    Criterion::new(
        P,
        "duplicate_code_detection",
        3,
        "Duplicate code detection runs in CI",
        "Duplicate detection enabled",
        "No duplicate detection",
        duplicate_code_detection,
    ),
    Criterion::new(
        P,
        "tech_debt_tracking",
        4,
        "Technical debt tracked automatically",
        "Tech debt tracking enabled",
        "No tech debt tracking",
        tech_debt_tracking,
    ),
    Criterion::new(
        P,
        "n_plus_one_detection",
        4,
        "N+1 query detection in place",
        "N+1 detection enabled",
        "No N+1 query detection",
        n_plus_one_detection,
    ),
];

const FORMATTER_CONFIGS: &[&str] = &[
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.js",
    "prettier.config.js",
    "pyproject.toml",
    ".black.toml",
    ".gofmt",
    "rustfmt.toml",
    ".rustfmt.toml",
];

const LINTER_CONFIGS: &[&str] = &[
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    ".eslintrc.yaml",
    "eslint.config.js",
    "eslint.config.mjs",
    ".pylintrc",
    "pylintrc",
    "golangci.yml",
    ".golangci.yml",
    ".golangci.yaml",
];

/// Ecosystems whose compilers enforce types without extra configuration
fn statically_typed(ctx: &EvalContext<'_>) -> bool {
    ctx.has_language("Go") || ctx.has_language("Rust")
}

fn formatter(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(FORMATTER_CONFIGS)
        || contains_any(&ctx.probe.read_lower("pyproject.toml"), &["ruff", "black"])
}

fn lint_config(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(LINTER_CONFIGS)
        || contains_any(&ctx.probe.read_lower("pyproject.toml"), &["ruff", "pylint"])
}

fn type_check(ctx: &EvalContext<'_>) -> bool {
    if statically_typed(ctx) || ctx.probe.file_exists(&["tsconfig.json"]) {
        return true;
    }
    if ctx.probe.file_exists(&["pyproject.toml"]) {
        return ctx.probe.read_lower("pyproject.toml").contains("mypy");
    }
    false
}

fn strict_typing(ctx: &EvalContext<'_>) -> bool {
    if statically_typed(ctx) {
        return true;
    }
    if ctx.probe.file_exists(&["tsconfig.json"]) {
        let tsconfig = ctx.probe.read_file("tsconfig.json").unwrap_or_else(|| "".into());
        return contains_any(&tsconfig, &["\"strict\": true", "\"strict\":true"]);
    }
    if ctx.probe.file_exists(&["pyproject.toml"]) {
        let pyproject = ctx.probe.read_file("pyproject.toml").unwrap_or_else(|| "".into());
        return contains_any(&pyproject, &["strict = true", "strict=true"]);
    }
    false
}

fn pre_commit_hooks(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        ".pre-commit-config.yaml",
        ".pre-commit-config.yml",
        ".husky",
        ".husky/*",
    ])
}

fn naming_consistency(ctx: &EvalContext<'_>) -> bool {
    let eslint = manifests_text(ctx.probe, &[".eslintrc.json", ".eslintrc"]);
    eslint.contains("naming")
        || contains_any(&agents_text(ctx.probe), &["naming", "convention"])
        || ctx.has_language("Go")
}

fn large_file_detection(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[".gitattributes", ".lfsconfig"])
        || ctx
            .probe
            .read_lower(".pre-commit-config.yaml")
            .contains("check-added-large-files")
}

fn code_modularization(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".importlinter", "nx.json", "BUILD.bazel", "BUILD"])
}

fn cyclomatic_complexity(ctx: &EvalContext<'_>) -> bool {
    let configs = manifests_text(
        ctx.probe,
        &[".golangci.yml", ".golangci.yaml", "pyproject.toml"],
    );
    contains_any(&configs, &["gocyclo", "mccabe", "complexity", "radon"])
}

fn dead_code_detection(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["vulture", "knip", "deadcode"])
}

fn duplicate_code_detection(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["jscpd", "pmd cpd", "sonarqube"])
}

fn tech_debt_tracking(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["todo", "fixme", "sonar"])
}

fn n_plus_one_detection(ctx: &EvalContext<'_>) -> bool {
    let deps = manifests_text(ctx.probe, &["requirements.txt", "Gemfile", "package.json"]);
    contains_any(&deps, &["nplusone", "bullet", "query-analyzer"])
}

#[cfg(test)]
mod tests {
    use crate::catalog::testing_support::{check, check_with, probe, repo};

    #[test]
    fn test_formatter_from_config_or_pyproject() {
        assert!(check(&[(".prettierrc", "{}")], "formatter"));
        assert!(check(&[("rustfmt.toml", "")], "formatter"));
        assert!(!check(&[("README.md", "")], "formatter"));
    }

    #[test]
    fn test_lint_config_from_pyproject_tool_section() {
        assert!(check(&[("pyproject.toml", "[tool.ruff]\nline-length = 100")], "lint_config"));
        assert!(check(&[(".golangci.yml", "linters: {}")], "lint_config"));
        assert!(!check(&[("pyproject.toml", "[project]")], "lint_config"));
    }

    #[test]
    fn test_type_check_by_language_or_config() {
        let dir = repo(&[]);
        assert!(check_with(&probe(dir.path()), &["Rust"], "type_check"));
        assert!(!check_with(&probe(dir.path()), &["Python"], "type_check"));
        assert!(check(&[("tsconfig.json", "{}")], "type_check"));
        assert!(check(&[("pyproject.toml", "[tool.mypy]")], "type_check"));
    }

    #[test]
    fn test_strict_typing_reads_tsconfig_before_pyproject() {
        assert!(check(
            &[("tsconfig.json", r#"{"compilerOptions": {"strict": true}}"#)],
            "strict_typing"
        ));
        assert!(!check(
            &[
                ("tsconfig.json", r#"{"compilerOptions": {}}"#),
                ("pyproject.toml", "[tool.mypy]\nstrict = true"),
            ],
            "strict_typing"
        ));
        assert!(check(&[("pyproject.toml", "[tool.mypy]\nstrict = true")], "strict_typing"));
    }

    #[test]
    fn test_pre_commit_hooks_husky_directory() {
        assert!(check(&[(".husky/pre-commit", "npm test")], "pre_commit_hooks"));
        assert!(!check(&[("hooks/pre-commit", "")], "pre_commit_hooks"));
    }

    #[test]
    fn test_naming_consistency_sources() {
        assert!(check(&[("AGENTS.md", "Follow our Conventions.")], "naming_consistency"));
        assert!(check(
            &[(".eslintrc.json", r#"{"rules": {"@typescript-eslint/naming-convention": "error"}}"#)],
            "naming_consistency"
        ));
        let dir = repo(&[]);
        assert!(check_with(&probe(dir.path()), &["Go"], "naming_consistency"));
        assert!(!check_with(&probe(dir.path()), &["Python"], "naming_consistency"));
    }

    #[test]
    fn test_large_file_detection() {
        assert!(check(&[(".gitattributes", "*.bin filter=lfs")], "large_file_detection"));
        assert!(check(
            &[(".pre-commit-config.yaml", "- id: check-added-large-files")],
            "large_file_detection"
        ));
        assert!(!check(&[(".pre-commit-config.yaml", "- id: black")], "large_file_detection"));
    }

    #[test]
    fn test_ci_based_static_analysis() {
        let workflow = ".github/workflows/quality.yml";
        assert!(check(&[(workflow, "run: npx knip")], "dead_code_detection"));
        assert!(check(&[(workflow, "run: npx jscpd src")], "duplicate_code_detection"));
        assert!(check(&[(workflow, "uses: sonarsource/scan")], "tech_debt_tracking"));
        assert!(!check(&[(workflow, "run: cargo test")], "dead_code_detection"));
    }

    #[test]
    fn test_complexity_and_n_plus_one() {
        assert!(check(&[(".golangci.yml", "enable: [gocyclo]")], "cyclomatic_complexity"));
        assert!(check(&[("Gemfile", "gem 'bullet'")], "n_plus_one_detection"));
        assert!(!check(&[("Gemfile", "gem 'rails'")], "n_plus_one_detection"));
    }
}
