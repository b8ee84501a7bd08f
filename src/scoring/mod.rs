//! Level aggregation
//!
//! Combines pillar outcomes into per-level pass rates and the achieved
//! maturity level.
//!
//! # Scoring Formula
//!
//! ```text
//! level score(L) = passed(L) / scored(L) × 100      (100 when scored(L) = 0)
//! achieved       = max L such that score(1..=L) ≥ 80 for every level
//!                  (0 when level 1 is below threshold: "not yet L1")
//! pass rate      = total passed / total scored × 100 (0 when nothing scored)
//! ```
//!
//! Skipped criteria are excluded from every denominator. Level scores and
//! the pass rate are rounded to one decimal, and the threshold is applied to
//! the rounded level score.
//!
//! # Example
//!
//! | L1 | L2 | L3 | achieved |
//! |----|----|----|----------|
//! | 70 | 90 | 100 | 0 |
//! | 85 | 60 | 100 | 1 |
//! | 100 | 80 | 79.9 | 2 |

use crate::models::{CriterionResult, PillarResult, MAX_LEVEL, MIN_LEVEL};
use std::collections::BTreeMap;

/// Minimum level score (percent) for a level to count as achieved
pub const ACHIEVEMENT_THRESHOLD: f64 = 80.0;

/// Aggregated statistics derived from pillar results
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub level_scores: BTreeMap<u8, f64>,
    pub achieved_level: u8,
    pub total_passed: usize,
    pub total_criteria: usize,
    pub pass_rate: f64,
}

pub fn summarize<'a, I>(pillars: I) -> LevelSummary
where
    I: IntoIterator<Item = &'a PillarResult> + Clone,
{
    let (total_passed, total_criteria) = pillars
        .clone()
        .into_iter()
        .fold((0, 0), |(p, t), pillar| (p + pillar.passed, t + pillar.total));

    let level_scores = level_scores(pillars.into_iter().flat_map(|p| p.criteria.iter()));
    let achieved_level = achieved_level(&level_scores);

    LevelSummary {
        level_scores,
        achieved_level,
        total_passed,
        total_criteria,
        pass_rate: pass_rate(total_passed, total_criteria),
    }
}

/// Per-level score over scored criteria, every level 1..=5 present
pub fn level_scores<'a>(criteria: impl Iterator<Item = &'a CriterionResult>) -> BTreeMap<u8, f64> {
    let mut counts: BTreeMap<u8, (usize, usize)> =
        (MIN_LEVEL..=MAX_LEVEL).map(|level| (level, (0, 0))).collect();

    for criterion in criteria.filter(|c| !c.is_skip()) {
        if let Some((passed, total)) = counts.get_mut(&criterion.level) {
            *total += 1;
            if criterion.is_pass() {
                *passed += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(level, (passed, total))| {
            let score = if total == 0 {
                100.0
            } else {
                round1(passed as f64 / total as f64 * 100.0)
            };
            (level, score)
        })
        .collect()
}

/// Highest level whose score and every lower level's score meet the threshold
pub fn achieved_level(level_scores: &BTreeMap<u8, f64>) -> u8 {
    let mut achieved = 0;
    for level in MIN_LEVEL..=MAX_LEVEL {
        let score = level_scores.get(&level).copied().unwrap_or(100.0);
        if score < ACHIEVEMENT_THRESHOLD {
            break;
        }
        achieved = level;
    }
    achieved
}

pub fn pass_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(passed as f64 / total as f64 * 100.0)
}

/// One decimal, halves to even (1.25 -> 1.2, 18.75 -> 18.8)
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
