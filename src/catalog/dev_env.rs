//! Dev Environment: reproducible local setup

use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::DevEnvironment;

const DEVCONTAINER_CONFIG: &str = ".devcontainer/devcontainer.json";

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "env_template",
        2,
        "Environment variables templated or documented",
        "Environment template exists",
        "No environment template",
        env_template,
    ),
    Criterion::new(
        P,
        "devcontainer",
        3,
        "Dev container configuration present",
        "Devcontainer configured",
        "No devcontainer found",
        devcontainer,
    ),
    Criterion::new(
        P,
        "devcontainer_runnable",
        3,
        "Dev container declares an image",
        "Devcontainer appears valid",
        "Devcontainer not runnable",
        devcontainer_runnable,
    ),
    Criterion::new(
        P,
        "database_schema",
        3,
        "Database schema or migrations tracked",
        "Database schema managed",
        "No database schema management",
        database_schema,
    ),
    Criterion::new(
        P,
        "local_services_setup",
        3,
        "Local services defined with Compose",
        "Local services configured",
        "No local services setup",
        local_services_setup,
    ),
];

/// Docs fallback reads README.md and AGENTS.md only; CLAUDE.md does not count here
fn env_template(ctx: &EvalContext<'_>) -> bool {
    if ctx
        .probe
        .file_exists(&[".env.example", ".env.template", ".env.sample"])
    {
        return true;
    }
    let mut docs = ctx.probe.read_lower("README.md");
    docs.push_str(&ctx.probe.read_lower("AGENTS.md"));
    docs.contains("environment variable")
}

fn devcontainer(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[DEVCONTAINER_CONFIG])
}

fn devcontainer_runnable(ctx: &EvalContext<'_>) -> bool {
    devcontainer(ctx) && ctx.probe.read_lower(DEVCONTAINER_CONFIG).contains("image")
}

fn database_schema(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        "migrations/**",
        "db/migrations/**",
        "alembic/**",
        "prisma/schema.prisma",
        "schema.sql",
        "db/schema.rb",
    ])
}

fn local_services_setup(ctx: &EvalContext<'_>) -> bool {
    ctx.probe.file_exists(&[
        "docker-compose.yml",
        "docker-compose.yaml",
        "compose.yml",
        "compose.yaml",
    ])
}
