//! Typed errors for user-visible input failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("Repository path does not exist or is not a directory: {}", path.display())]
    InvalidRepository { path: PathBuf },

    #[error("Analysis file not found: {}. Run `readiness analyze` first to generate the analysis.", path.display())]
    AnalysisNotFound { path: PathBuf },

    #[error("Failed to parse analysis file {}: {source}", path.display())]
    InvalidAnalysis {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReadinessResult<T> = Result<T, ReadinessError>;
