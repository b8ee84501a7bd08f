//! Debugging & Observability: logging, tracing, metrics, alerting

use super::evidence::{contains_any, manifests_text, search_workflows};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::Observability;

/// Manifests scanned for observability libraries
const DEPENDENCY_MANIFESTS: &[&str] = &["package.json", "requirements.txt", "go.mod"];

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "structured_logging",
        2,
        "Structured logging library in use",
        "Structured logging configured",
        "No structured logging",
        structured_logging,
    ),
    Criterion::new(
        P,
        "code_quality_metrics",
        2,
        "Code quality metrics reported by CI",
        "Code quality metrics tracked",
        "No quality metrics",
        code_quality_metrics,
    ),
    Criterion::new(
        P,
        "error_tracking_contextualized",
        3,
        "Error tracking service integrated",
        "Error tracking configured",
        "No error tracking",
        error_tracking_contextualized,
    ),
    Criterion::new(
        P,
        "distributed_tracing",
        3,
        "Distributed tracing or request correlation",
        "Distributed tracing configured",
        "No distributed tracing",
        distributed_tracing,
    ),
    Criterion::new(
        P,
        "metrics_collection",
        3,
        "Runtime metrics collected",
        "Metrics collection configured",
        "No metrics collection",
        metrics_collection,
    ),
    Criterion::new(
        P,
        "health_checks",
        3,
        "Health or readiness endpoints exposed",
        "Health checks implemented",
        "No health checks found",
        health_checks,
    ),
    Criterion::new(
        P,
        "profiling_instrumentation",
        4,
        "Profiling tooling available",
        "Profiling configured",
        "No profiling instrumentation",
        profiling_instrumentation,
    ),
    Criterion::new(
        P,
        "alerting_configured",
        4,
        "Alerting rules defined",
        "Alerting configured",
        "No alerting configuration",
        alerting_configured,
    ),
    Criterion::new(
        P,
        "deployment_observability",
        4,
        "Deployments reported to monitoring",
        "Deployment observability configured",
        "No deployment observability",
        deployment_observability,
    ),
    Criterion::new(
        P,
        "runbooks_documented",
        4,
        "Operational runbooks documented",
        "Runbooks documented",
        "No runbooks found",
        runbooks_documented,
    ),
    Criterion::new(
        P,
        "circuit_breakers",
        5,
        "Circuit breakers guard external calls",
        "Circuit breakers configured",
        "No circuit breakers",
        circuit_breakers,
    ),
];

fn dependencies(ctx: &EvalContext<'_>) -> String {
    manifests_text(ctx.probe, DEPENDENCY_MANIFESTS)
}

fn depends_on_any(ctx: &EvalContext<'_>, libraries: &[&str]) -> bool {
    contains_any(&dependencies(ctx), libraries)
}

fn structured_logging(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(
        ctx,
        &["pino", "winston", "bunyan", "structlog", "loguru", "zerolog", "zap", "slog"],
    ) || (ctx.has_language("Python") && ctx.probe.search_files("**/*.py", Some("import logging")))
}

fn code_quality_metrics(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .search_files(".github/workflows/*.yml", Some("(coverage|sonar|quality)"))
}

fn error_tracking_contextualized(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(ctx, &["sentry", "bugsnag", "rollbar", "honeybadger"])
}

fn distributed_tracing(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(
        ctx,
        &["opentelemetry", "jaeger", "zipkin", "datadog", "x-request-id"],
    )
}

fn metrics_collection(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(
        ctx,
        &["prometheus", "datadog", "newrelic", "statsd", "cloudwatch"],
    )
}

fn health_checks(ctx: &EvalContext<'_>) -> bool {
    ["**/*.py", "**/*.ts", "**/*.go"]
        .iter()
        .any(|glob| ctx.probe.search_files(glob, Some("health|ready|alive")))
}

fn profiling_instrumentation(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(ctx, &["pyinstrument", "py-spy", "pprof", "clinic"])
}

fn alerting_configured(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["**/alerts*.yml", "**/alertmanager*", "monitoring/**"])
}

fn deployment_observability(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "(datadog|grafana|newrelic|deploy.*notify)")
}

fn runbooks_documented(ctx: &EvalContext<'_>) -> bool {
    ctx.probe
        .file_exists(&["runbooks/**", "docs/runbooks/**", "ops/**"])
}

fn circuit_breakers(ctx: &EvalContext<'_>) -> bool {
    depends_on_any(ctx, &["opossum", "resilience4j", "hystrix", "cockatiel"])
}
