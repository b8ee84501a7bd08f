//! Analysis orchestration
//!
//! [`RepoAnalyzer`] runs one readiness assessment: it creates a fresh
//! [`Probe`] (so caches never outlive the run), classifies the repository,
//! evaluates every pillar in order and aggregates the level scores.

use crate::catalog::{self, EvalContext};
use crate::classifier::{self, Classification};
use crate::config::ProjectConfig;
use crate::error::{ReadinessError, ReadinessResult};
use crate::models::{AnalysisResult, Pillar};
use crate::probe::{CommandRunner, DisabledRunner, Probe, ProbeSettings, SystemRunner};
use crate::scoring;
use crate::skip::SkipRules;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Knobs for one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    pub settings: ProbeSettings,
    /// Never spawn external commands; command-based criteria fail
    pub no_commands: bool,
    /// Archetype override; detected when `None`
    pub repo_type: Option<crate::models::RepoType>,
    pub skip_rules: SkipRules,
}

impl AnalyzerOptions {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            settings: config.probe_settings(),
            no_commands: config.analysis.no_commands,
            repo_type: config.repo_type,
            skip_rules: config.skip_rules(),
        }
    }
}

pub struct RepoAnalyzer {
    root: PathBuf,
    repo_name: String,
    options: AnalyzerOptions,
}

impl RepoAnalyzer {
    /// Fails when `path` is not an existing directory
    pub fn new(path: &Path, options: AnalyzerOptions) -> ReadinessResult<Self> {
        if !path.is_dir() {
            return Err(ReadinessError::InvalidRepository {
                path: path.to_path_buf(),
            });
        }
        let root = path.canonicalize()?;
        let repo_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self {
            root,
            repo_name,
            options,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    fn probe(&self) -> Probe {
        let runner: Box<dyn CommandRunner> = if self.options.no_commands {
            Box::new(DisabledRunner)
        } else {
            Box::new(SystemRunner)
        };
        Probe::with_runner(&self.root, self.options.settings, runner)
    }

    pub fn analyze(&self) -> AnalysisResult {
        self.analyze_with_progress(|_| {})
    }

    /// Run the assessment, calling `on_pillar` before each pillar is evaluated
    pub fn analyze_with_progress(&self, mut on_pillar: impl FnMut(Pillar)) -> AnalysisResult {
        let probe = self.probe();
        self.run(&probe, &mut on_pillar)
    }

    /// Run against an explicit command runner
    pub fn analyze_with_runner(&self, runner: Box<dyn CommandRunner>) -> AnalysisResult {
        let probe = Probe::with_runner(&self.root, self.options.settings, runner);
        self.run(&probe, &mut |_| {})
    }

    fn run(&self, probe: &Probe, on_pillar: &mut dyn FnMut(Pillar)) -> AnalysisResult {
        info!("Analyzing repository: {}", self.root.display());

        let classification = self.classify(probe);
        let ctx = EvalContext {
            probe,
            classification: &classification,
        };

        let mut pillars = IndexMap::new();
        for pillar in Pillar::ALL {
            on_pillar(pillar);
            let result = catalog::evaluate_pillar(pillar, &ctx, &self.options.skip_rules);
            debug!(
                "{}: {}/{} ({}%)",
                pillar, result.passed, result.total, result.percentage
            );
            pillars.insert(pillar.name().to_string(), result);
        }

        let summary = scoring::summarize(pillars.values());
        info!(
            "Analysis complete: {}/{} criteria passed ({}%), level {}",
            summary.total_passed, summary.total_criteria, summary.pass_rate, summary.achieved_level
        );

        AnalysisResult {
            repo_path: self.root.display().to_string(),
            repo_name: self.repo_name.clone(),
            repo_type: classification.repo_type,
            languages: classification.languages,
            pass_rate: summary.pass_rate,
            total_passed: summary.total_passed,
            total_criteria: summary.total_criteria,
            achieved_level: summary.achieved_level,
            level_scores: summary.level_scores,
            pillars,
        }
    }

    fn classify(&self, probe: &Probe) -> Classification {
        let mut classification = classifier::classify(probe, &self.repo_name);
        if let Some(repo_type) = self.options.repo_type {
            debug!(
                "Repository type overridden: {} -> {}",
                classification.repo_type, repo_type
            );
            classification.repo_type = repo_type;
        }
        classification
    }
}
