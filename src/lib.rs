//! Readiness - how ready is a repository for autonomous coding agents?
//!
//! Scores a repository against a fixed catalog of engineering-maturity
//! criteria grouped into nine pillars and five levels. An analysis probes
//! the file tree (and optionally `gh`, `glab` and `git`), classifies the
//! repository, skips criteria that do not apply to its archetype, and
//! aggregates level scores. Reporters render the result as markdown, a
//! brief summary, or JSON.
//!
//! ```no_run
//! use readiness::analyzer::{AnalyzerOptions, RepoAnalyzer};
//!
//! let analyzer = RepoAnalyzer::new(std::path::Path::new("."), AnalyzerOptions::default())?;
//! let result = analyzer.analyze();
//! println!("{}", readiness::reporters::report(&result, "brief")?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analyzer;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod reporters;
pub mod scoring;
pub mod skip;
