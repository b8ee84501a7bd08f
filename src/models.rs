//! Core data models for readiness analysis
//!
//! These types form the structured result written by `readiness analyze`
//! and consumed by `readiness report`. Field order matches the JSON layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Score shown for a passing criterion
pub const SCORE_PASS: &str = "1/1";
/// Score shown for a failing criterion
pub const SCORE_FAIL: &str = "0/1";
/// Score shown for a skipped criterion
pub const SCORE_SKIP: &str = "—/—";

/// Lowest and highest maturity levels
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Label for achieved level 0
pub const NOT_YET_L1: &str = "Not yet L1";

/// A named grouping of related criteria, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "Style & Validation")]
    StyleValidation,
    #[serde(rename = "Build System")]
    BuildSystem,
    #[serde(rename = "Testing")]
    Testing,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Dev Environment")]
    DevEnvironment,
    #[serde(rename = "Debugging & Observability")]
    Observability,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Task Discovery")]
    TaskDiscovery,
    #[serde(rename = "Product & Analytics")]
    ProductAnalytics,
}

impl Pillar {
    /// All pillars in the fixed evaluation order
    pub const ALL: [Pillar; 9] = [
        Pillar::StyleValidation,
        Pillar::BuildSystem,
        Pillar::Testing,
        Pillar::Documentation,
        Pillar::DevEnvironment,
        Pillar::Observability,
        Pillar::Security,
        Pillar::TaskDiscovery,
        Pillar::ProductAnalytics,
    ];

    /// Display name, also used as the key in the result's pillar map
    pub fn name(&self) -> &'static str {
        match self {
            Pillar::StyleValidation => "Style & Validation",
            Pillar::BuildSystem => "Build System",
            Pillar::Testing => "Testing",
            Pillar::Documentation => "Documentation",
            Pillar::DevEnvironment => "Dev Environment",
            Pillar::Observability => "Debugging & Observability",
            Pillar::Security => "Security",
            Pillar::TaskDiscovery => "Task Discovery",
            Pillar::ProductAnalytics => "Product & Analytics",
        }
    }

    /// Look up a pillar by display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Pillar> {
        Pillar::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural category of a repository, used to suppress inapplicable criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    Library,
    Cli,
    Database,
    Monorepo,
    #[default]
    Application,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::Library => "library",
            RepoType::Cli => "cli",
            RepoType::Database => "database",
            RepoType::Monorepo => "monorepo",
            RepoType::Application => "application",
        }
    }
}

impl FromStr for RepoType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "library" | "lib" => Ok(RepoType::Library),
            "cli" => Ok(RepoType::Cli),
            "database" | "db" => Ok(RepoType::Database),
            "monorepo" => Ok(RepoType::Monorepo),
            "application" | "app" => Ok(RepoType::Application),
            _ => Err(anyhow::anyhow!(
                "Unknown repository type '{}'. Valid types: library, cli, database, monorepo, application",
                s
            )),
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Pass,
    Fail,
    Skip,
}

impl std::fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriterionStatus::Pass => write!(f, "pass"),
            CriterionStatus::Fail => write!(f, "fail"),
            CriterionStatus::Skip => write!(f, "skip"),
        }
    }
}

/// Per-run instantiation of a catalog criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub id: String,
    pub pillar: Pillar,
    pub level: u8,
    pub status: CriterionStatus,
    pub score: String,
    pub reason: String,
}

impl CriterionResult {
    /// Scored result: pass or fail depending on `passed`
    pub fn scored(
        id: impl Into<String>,
        pillar: Pillar,
        level: u8,
        passed: bool,
        reason: impl Into<String>,
    ) -> Self {
        let (status, score) = if passed {
            (CriterionStatus::Pass, SCORE_PASS)
        } else {
            (CriterionStatus::Fail, SCORE_FAIL)
        };
        Self {
            id: id.into(),
            pillar,
            level,
            status,
            score: score.to_string(),
            reason: reason.into(),
        }
    }

    /// Result excluded from scoring
    pub fn skipped(
        id: impl Into<String>,
        pillar: Pillar,
        level: u8,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pillar,
            level,
            status: CriterionStatus::Skip,
            score: SCORE_SKIP.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == CriterionStatus::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == CriterionStatus::Fail
    }

    pub fn is_skip(&self) -> bool {
        self.status == CriterionStatus::Skip
    }
}

/// All results produced by one pillar's evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarResult {
    pub name: Pillar,
    pub passed: usize,
    /// Scored criteria only; skips are excluded
    pub total: usize,
    pub percentage: u32,
    pub criteria: Vec<CriterionResult>,
}

impl PillarResult {
    pub fn from_criteria(name: Pillar, criteria: Vec<CriterionResult>) -> Self {
        let passed = criteria.iter().filter(|c| c.is_pass()).count();
        let total = criteria.iter().filter(|c| !c.is_skip()).count();
        Self {
            name,
            passed,
            total,
            percentage: percentage(passed, total),
            criteria,
        }
    }
}

/// Integer percentage, 100 for an empty (vacuous) pillar
pub fn percentage(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (passed * 100 / total) as u32
}

/// Root aggregate of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub repo_path: String,
    pub repo_name: String,
    pub repo_type: RepoType,
    pub languages: Vec<String>,
    pub pass_rate: f64,
    pub total_passed: usize,
    pub total_criteria: usize,
    /// Highest level reached under the contiguous-prefix rule (0 = not yet L1)
    pub achieved_level: u8,
    pub level_scores: BTreeMap<u8, f64>,
    pub pillars: IndexMap<String, PillarResult>,
}

impl AnalysisResult {
    /// Iterate every criterion across pillars in evaluation order
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionResult> {
        self.pillars.values().flat_map(|p| p.criteria.iter())
    }

    /// Level score, 0 when the level is missing from the map
    pub fn level_score(&self, level: u8) -> f64 {
        self.level_scores.get(&level).copied().unwrap_or(0.0)
    }
}
