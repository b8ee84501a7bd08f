//! Output reporters for readiness analysis results
//!
//! Supports multiple output formats:
//! - `markdown` - full GitHub-flavored Markdown report
//! - `brief` - compact level bars and quick wins
//! - `json` - the structured result, re-serialized
//!
//! Rendering is a pure function of the [`AnalysisResult`]; it never touches
//! the filesystem.

mod brief;
mod json;
mod markdown;

use crate::models::{AnalysisResult, CriterionResult, MAX_LEVEL, MIN_LEVEL};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Brief,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" | "full" => Ok(OutputFormat::Markdown),
            "brief" => Ok(OutputFormat::Brief),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: markdown, brief, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Brief => write!(f, "brief"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render an analysis result in the specified format
pub fn report(result: &AnalysisResult, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(result, fmt)
}

/// Render an analysis result using an OutputFormat enum
pub fn report_with_format(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render(result)),
        OutputFormat::Brief => Ok(brief::render(result)),
        OutputFormat::Json => json::render(result),
    }
}

/// A failing criterion worth fixing next
struct Opportunity<'a> {
    id: &'a str,
    reason: &'a str,
    pillar: &'a str,
}

/// First `n` failing criteria, lowest level first (ties keep evaluation order)
fn top_opportunities(result: &AnalysisResult, n: usize) -> Vec<Opportunity<'_>> {
    let mut failing: Vec<(&str, &CriterionResult)> = result
        .pillars
        .iter()
        .flat_map(|(name, pillar)| pillar.criteria.iter().map(move |c| (name.as_str(), c)))
        .filter(|(_, c)| c.is_fail())
        .collect();
    failing.sort_by_key(|(_, c)| c.level);

    failing
        .into_iter()
        .take(n)
        .map(|(pillar, c)| Opportunity {
            id: &c.id,
            reason: &c.reason,
            pillar,
        })
        .collect()
}

/// Level scores in level order, 0 for a level missing from the map
fn levels(result: &AnalysisResult) -> impl Iterator<Item = (u8, f64)> + '_ {
    (MIN_LEVEL..=MAX_LEVEL).map(|level| (level, result.level_score(level)))
}

fn is_achieved(result: &AnalysisResult, level: u8) -> bool {
    result.achieved_level > 0 && level <= result.achieved_level
}
