//! Documentation: READMEs, agent instructions, API and architecture docs

use super::evidence::{search_workflows, workflows_mention};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::Documentation;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "readme",
        1,
        "README present",
        "README exists",
        "No README found",
        readme,
    ),
    Criterion::new(
        P,
        "agents_md",
        2,
        "Agent instruction file (AGENTS.md or CLAUDE.md) present",
        "AGENTS.md exists",
        "No AGENTS.md found",
        agents_md,
    ),
    Criterion::new(
        P,
        "documentation_freshness",
        2,
        "README updated in version control history",
        "Documentation recently updated",
        "Documentation may be stale",
        documentation_freshness,
    ),
    Criterion::new(
        P,
        "api_schema_docs",
        3,
        "API schema (OpenAPI, Swagger, GraphQL) documented",
        "API documentation exists",
        "No API documentation found",
        api_schema_docs,
    ),
    Criterion::new(
        P,
        "automated_doc_generation",
        3,
        "Documentation built by CI",
        "Doc generation automated",
        "No automated doc generation",
        automated_doc_generation,
    ),
    Criterion::new(
        P,
        "service_flow_documented",
        3,
        "Architecture and service flows documented",
        "Architecture documented",
        "No architecture documentation",
        service_flow_documented,
    ),
    Criterion::new(
        P,
        "skills",
        3,
        "Agent skills directory present",
        "Skills directory exists",
        "No skills directory",
        skills,
    ),
    Criterion::new(
        P,
        "agents_md_validation",
        4,
        "Agent instructions validated in CI",
        "AGENTS.md validation in CI",
        "No AGENTS.md validation",
        agents_md_validation,
    ),
];

fn readme(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["README.md", "README.rst", "README.txt", "README"])
}

fn agents_md(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&["AGENTS.md", "CLAUDE.md"])
}

fn documentation_freshness(ctx: &EvalContext<'_>) -> bool {
    let log = ctx
        .probe
        .run_command(&["git", "log", "-1", "--format=%ci", "--", "README.md"]);
    log.success() && !log.output.trim().is_empty()
}

fn api_schema_docs(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        "openapi.yaml",
        "openapi.json",
        "swagger.yaml",
        "swagger.json",
        "schema.graphql",
        "*.graphql",
        "docs/api/**",
        "api-docs/**",
    ])
}

fn automated_doc_generation(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(docs|documentation|mkdocs|sphinx|typedoc)")
}

fn service_flow_documented(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        "**/*.mermaid",
        "**/*.puml",
        "docs/architecture*",
        "docs/**/*.md",
    ])
}

fn skills(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&[".claude/skills/**", ".factory/skills/**", ".skills/**"])
}

fn agents_md_validation(ctx: &EvalContext<'_>) -> bool {
    workflows_mention(ctx.probe, &["agents.md", "claude.md"])
}
