//! Engine configuration loading
//!
//! Loads configuration from `~/.config/creatorops/engine.toml` (or the
//! `CREATOROPS_ENGINE_CONFIG` env override). Everything has a default, so
//! a missing file is not an error; an invalid file is.
//!
//! The grace period and the week/fortnight horizons are configuration
//! rather than literals: the example data suggests 3/7/14 but nothing in
//! the upstream system states them as normative.

use crate::classify::{Threshold, ThresholdTable, gmv_tiers};
use crate::errors::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

/// Root configuration for the dashboard engine
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Deadline bucketing settings
    #[serde(default)]
    pub deadline: DeadlineConfig,

    /// Tier table overrides
    #[serde(default)]
    pub tiers: TierConfig,
}

/// Deadline bucketing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeadlineConfig {
    /// Days past a missed deadline during which the item is still
    /// actionable
    #[serde(default = "default_grace_days")]
    pub grace_days: u64,

    /// Upper bound (inclusive, in days from now) of the "due this week"
    /// bucket
    #[serde(default = "default_week_horizon")]
    pub week_horizon_days: i64,

    /// Upper bound (inclusive, in days from now) of the "due next week"
    /// bucket
    #[serde(default = "default_fortnight_horizon")]
    pub fortnight_horizon_days: i64,
}

fn default_grace_days() -> u64 {
    3
}

fn default_week_horizon() -> i64 {
    7
}

fn default_fortnight_horizon() -> i64 {
    14
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            grace_days: default_grace_days(),
            week_horizon_days: default_week_horizon(),
            fortnight_horizon_days: default_fortnight_horizon(),
        }
    }
}

/// Tier table overrides. The built-in GMV table applies unless replaced
/// here.
#[derive(Debug, Deserialize, Clone)]
pub struct TierConfig {
    /// GMV badge thresholds, ascending by bound
    #[serde(default = "default_gmv_thresholds")]
    pub gmv: Vec<Threshold>,

    /// Label for creators below every GMV bound
    #[serde(default = "default_gmv_fallback")]
    pub gmv_fallback: String,
}

fn default_gmv_thresholds() -> Vec<Threshold> {
    gmv_tiers().entries().to_vec()
}

fn default_gmv_fallback() -> String {
    gmv_tiers().fallback().to_string()
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            gmv: default_gmv_thresholds(),
            gmv_fallback: default_gmv_fallback(),
        }
    }
}

impl TierConfig {
    /// Build the validated GMV table, failing fast on invariant violations.
    pub fn gmv_table(&self) -> Result<ThresholdTable> {
        ThresholdTable::new(self.gmv.clone(), self.gmv_fallback.clone())
    }
}

impl EngineConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "CREATOROPS_ENGINE_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "engine.toml";

    /// Load configuration from file
    ///
    /// Resolution order:
    /// 1. `CREATOROPS_ENGINE_CONFIG` environment variable
    /// 2. `~/.config/creatorops/engine.toml`
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::resolve_config_path();

        if !path.exists() {
            tracing::info!(
                path = %path.display(),
                "engine config not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config_with_source(
                format!("failed to read config at {}", path.display()),
                e,
            )
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: EngineConfig = toml::from_str(contents)
            .map_err(|e| EngineError::config_with_source("failed to parse config", e))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the configuration file path
    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("creatorops")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    /// Validate configuration, failing fast on values that would make the
    /// engine misclassify.
    pub fn validate(&self) -> Result<()> {
        // The GMV table invariants are construction-time errors.
        self.tiers.gmv_table()?;

        // due-today and due-tomorrow are carved out before the week bucket.
        if self.deadline.week_horizon_days < 2 {
            return Err(EngineError::config(format!(
                "week_horizon_days must be at least 2, got {}",
                self.deadline.week_horizon_days
            )));
        }
        if self.deadline.fortnight_horizon_days <= self.deadline.week_horizon_days {
            return Err(EngineError::config(format!(
                "fortnight_horizon_days ({}) must be above week_horizon_days ({})",
                self.deadline.fortnight_horizon_days, self.deadline.week_horizon_days
            )));
        }

        if self.deadline.grace_days > 30 {
            tracing::warn!(
                grace_days = self.deadline.grace_days,
                "unusually long grace period; overdue items will stay actionable for weeks"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn default_config_matches_example_data() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.deadline.grace_days, 3);
        assert_eq!(cfg.deadline.week_horizon_days, 7);
        assert_eq!(cfg.deadline.fortnight_horizon_days, 14);
        assert_eq!(cfg.tiers.gmv_fallback, "New Creator");
        assert_eq!(cfg.tiers.gmv.len(), 7);
        cfg.validate().expect("defaults validate");
    }

    #[test]
    fn parse_partial_config_applies_defaults() {
        let toml = r#"
            [deadline]
            grace_days = 5
        "#;
        let cfg = EngineConfig::parse(toml).expect("should parse");
        assert_eq!(cfg.deadline.grace_days, 5);
        assert_eq!(cfg.deadline.week_horizon_days, 7);
        assert_eq!(cfg.tiers.gmv_fallback, "New Creator");
    }

    #[test]
    fn parse_custom_tier_table() {
        let toml = r#"
            [tiers]
            gmv_fallback = "Unranked"
            gmv = [
                { bound = 10000.0, label = "Silver" },
                { bound = 100000.0, label = "Gold" },
            ]
        "#;
        let cfg = EngineConfig::parse(toml).expect("should parse");
        let table = cfg.tiers.gmv_table().expect("valid table");
        assert_eq!(table.classify(50_000.0), "Silver");
        assert_eq!(table.classify(500.0), "Unranked");
    }

    #[test]
    fn invalid_tier_table_fails_at_parse_time() {
        let toml = r#"
            [tiers]
            gmv = [
                { bound = 100000.0, label = "Gold" },
                { bound = 10000.0, label = "Silver" },
            ]
        "#;
        let err = EngineConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn inverted_horizons_rejected() {
        let toml = r#"
            [deadline]
            week_horizon_days = 14
            fortnight_horizon_days = 7
        "#;
        let err = EngineConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("fortnight_horizon_days"));
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[deadline]\ngrace_days = 2").expect("write");
        let cfg = EngineConfig::load_from_path(file.path()).expect("should load");
        assert_eq!(cfg.deadline.grace_days, 2);
    }

    #[test]
    fn missing_file_is_a_config_error_with_source() {
        let err = EngineConfig::load_from_path(Path::new("/nonexistent/engine.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
