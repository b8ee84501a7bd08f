//! Product & Analytics

use super::evidence::{contains_any, manifests_text, search_workflows};
use super::{Criterion, EvalContext};
use crate::models::Pillar;

const P: Pillar = Pillar::ProductAnalytics;

pub(super) static CRITERIA: &[Criterion] = &[
    Criterion::new(
        P,
        "error_to_insight_pipeline",
        5,
        "Production errors turned into tracked issues",
        "Error-to-issue pipeline exists",
        "No error-to-issue pipeline",
        error_to_insight_pipeline,
    ),
    Criterion::new(
        P,
        "product_analytics_instrumentation",
        5,
        "Product analytics instrumented",
        "Product analytics configured",
        "No product analytics",
        product_analytics_instrumentation,
    ),
];

fn error_to_insight_pipeline(ctx: &EvalContext<'_>) -> bool {
    search_workflows(ctx.probe, "sentry|create.*issue|error.*issue")
}

fn product_analytics_instrumentation(ctx: &EvalContext<'_>) -> bool {
    let deps = manifests_text(ctx.probe, &["package.json", "requirements.txt", "go.mod"]);
    contains_any(
        &deps,
        &["mixpanel", "amplitude", "posthog", "heap", "segment", "ga4", "google-analytics"],
    )
}
