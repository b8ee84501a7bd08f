//! Configuration module
//!
//! This module handles project-level configuration (readiness.toml):
//! archetype override, probe tuning and extra skip exclusions.

mod project_config;

pub use project_config::{
    load_project_config, write_config_template, AnalysisConfig, ProjectConfig, SkipConfig,
    CONFIG_FILE, CONFIG_TEMPLATE, JSON_CONFIG_FILE,
};
