//! Configuration file support
//!
//! Loads generation thresholds from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.frosttextrc.json` in the working directory
//! 3. `frosttext.config.json` in the working directory
//!
//! All fields are optional. Missing keys fall back to the documented
//! defaults; malformed values fail resolution before any classification
//! runs. The resolved configuration is immutable and passed by parameter
//! into the engine — the engine never reads ambient state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default reporting floor for the overview table (its first breakpoint)
pub const DEFAULT_OVERVIEW_FLOOR: f64 = 20.0;
/// Default reporting floor for the regional table (its first breakpoint)
pub const DEFAULT_REGIONAL_FLOOR: f64 = 10.0;
/// Default severe-event probability threshold
pub const DEFAULT_SEVERITY_THRESHOLD: f64 = 10.0;
/// Default minimum season-onset coverage for region admission
pub const DEFAULT_MIN_SEASON_COVERAGE: f64 = 33.333;
/// Default maximum existing-event coverage for region admission
pub const DEFAULT_MAX_EXISTING_COVERAGE: f64 = 20.0;
/// Default reporting limit for the plain probability story
pub const DEFAULT_PROBABILITY_NORMAL_LIMIT: f64 = 50.0;
/// Default severe reporting limit for the plain probability story
pub const DEFAULT_PROBABILITY_SEVERE_LIMIT: f64 = 30.0;

/// Frosttext configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrosttextConfig {
    /// Overview (whole-area) classification thresholds
    #[serde(default)]
    pub overview: Option<TableConfig>,

    /// Regional (coast/inland) classification thresholds
    #[serde(default)]
    pub regional: Option<TableConfig>,

    /// Season-onset admission settings
    #[serde(default)]
    pub season: Option<SeasonConfig>,

    /// Existing-event admission settings
    #[serde(default)]
    pub existing_event: Option<ExistingEventConfig>,

    /// Plain probability-story reporting limits
    #[serde(default)]
    pub probability: Option<ProbabilityConfig>,
}

/// Per-table floor and severity threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Minimum probability at/above which a tier produces text
    pub reporting_floor: Option<f64>,
    /// Severe-event probability at/above which the severity clause attaches
    pub severity_threshold: Option<f64>,
}

/// Season-onset admission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonConfig {
    /// Minimum fraction of a region where the season has started (default 33.333)
    pub min_coverage: Option<f64>,
    /// Per-area overrides of `min_coverage`
    #[serde(default)]
    pub area_overrides: HashMap<String, f64>,
}

/// Existing-event admission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExistingEventConfig {
    /// Maximum fraction of a region already under the event (default 20.0)
    pub max_coverage: Option<f64>,
}

/// Plain probability-story reporting limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbabilityConfig {
    /// Minimum base probability worth reporting (default 50.0)
    pub normal_limit: Option<f64>,
    /// Minimum severe probability worth reporting (default 30.0)
    pub severe_limit: Option<f64>,
}

/// Resolved configuration with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub overview_floor: f64,
    pub overview_severity_threshold: f64,
    pub regional_floor: f64,
    pub regional_severity_threshold: f64,
    pub min_season_coverage: f64,
    pub season_overrides: HashMap<String, f64>,
    pub max_existing_coverage: f64,
    pub probability_normal_limit: f64,
    pub probability_severe_limit: f64,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

fn check_percentage(name: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        anyhow::bail!("{} must be within 0-100 (got {})", name, value);
    }
    Ok(())
}

impl FrosttextConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref t) = self.overview {
            if let Some(floor) = t.reporting_floor {
                check_percentage("overview.reporting_floor", floor)?;
            }
            if let Some(threshold) = t.severity_threshold {
                check_percentage("overview.severity_threshold", threshold)?;
            }
        }
        if let Some(ref t) = self.regional {
            if let Some(floor) = t.reporting_floor {
                check_percentage("regional.reporting_floor", floor)?;
            }
            if let Some(threshold) = t.severity_threshold {
                check_percentage("regional.severity_threshold", threshold)?;
            }
        }
        if let Some(ref s) = self.season {
            if let Some(min) = s.min_coverage {
                check_percentage("season.min_coverage", min)?;
                if min <= 0.0 {
                    anyhow::bail!("season.min_coverage must be positive (got {})", min);
                }
            }
            for (area, value) in &s.area_overrides {
                check_percentage(&format!("season.area_overrides.{}", area), *value)?;
                if *value <= 0.0 {
                    anyhow::bail!(
                        "season.area_overrides.{} must be positive (got {})",
                        area,
                        value
                    );
                }
            }
        }
        if let Some(ref e) = self.existing_event {
            if let Some(max) = e.max_coverage {
                check_percentage("existing_event.max_coverage", max)?;
                if max <= 0.0 {
                    anyhow::bail!("existing_event.max_coverage must be positive (got {})", max);
                }
            }
        }
        if let Some(ref p) = self.probability {
            if let Some(limit) = p.normal_limit {
                check_percentage("probability.normal_limit", limit)?;
            }
            if let Some(limit) = p.severe_limit {
                check_percentage("probability.severe_limit", limit)?;
            }
        }
        Ok(())
    }

    /// Resolve config into the immutable form the engine consumes
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let (overview_floor, overview_severity_threshold) = match &self.overview {
            Some(t) => (
                t.reporting_floor.unwrap_or(DEFAULT_OVERVIEW_FLOOR),
                t.severity_threshold.unwrap_or(DEFAULT_SEVERITY_THRESHOLD),
            ),
            None => (DEFAULT_OVERVIEW_FLOOR, DEFAULT_SEVERITY_THRESHOLD),
        };

        let (regional_floor, regional_severity_threshold) = match &self.regional {
            Some(t) => (
                t.reporting_floor.unwrap_or(DEFAULT_REGIONAL_FLOOR),
                t.severity_threshold.unwrap_or(DEFAULT_SEVERITY_THRESHOLD),
            ),
            None => (DEFAULT_REGIONAL_FLOOR, DEFAULT_SEVERITY_THRESHOLD),
        };

        let (min_season_coverage, season_overrides) = match &self.season {
            Some(s) => (
                s.min_coverage.unwrap_or(DEFAULT_MIN_SEASON_COVERAGE),
                s.area_overrides.clone(),
            ),
            None => (DEFAULT_MIN_SEASON_COVERAGE, HashMap::new()),
        };

        let max_existing_coverage = match &self.existing_event {
            Some(e) => e.max_coverage.unwrap_or(DEFAULT_MAX_EXISTING_COVERAGE),
            None => DEFAULT_MAX_EXISTING_COVERAGE,
        };

        let (probability_normal_limit, probability_severe_limit) = match &self.probability {
            Some(p) => (
                p.normal_limit.unwrap_or(DEFAULT_PROBABILITY_NORMAL_LIMIT),
                p.severe_limit.unwrap_or(DEFAULT_PROBABILITY_SEVERE_LIMIT),
            ),
            None => (
                DEFAULT_PROBABILITY_NORMAL_LIMIT,
                DEFAULT_PROBABILITY_SEVERE_LIMIT,
            ),
        };

        Ok(ResolvedConfig {
            overview_floor,
            overview_severity_threshold,
            regional_floor,
            regional_severity_threshold,
            min_season_coverage,
            season_overrides,
            max_existing_coverage,
            probability_normal_limit,
            probability_severe_limit,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FrosttextConfig::default().resolve()
    }

    /// The minimum season coverage for an area, honoring overrides
    pub fn min_season_for(&self, area: &str) -> f64 {
        self.season_overrides
            .get(area)
            .copied()
            .unwrap_or(self.min_season_coverage)
    }
}

/// Discover and load a config file from the working directory
///
/// Search order:
/// 1. `.frosttextrc.json`
/// 2. `frosttext.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(FrosttextConfig, PathBuf)>> {
    let rc_path = dir.join(".frosttextrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = dir.join("frosttext.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FrosttextConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FrosttextConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a run
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (FrosttextConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
