//! Planner configuration
//!
//! Mirrors the UI's `config.json`: starting defaults, the projection matrix options and
//! the thresholds used to colour matrix cells. Unknown keys (slider ranges etc.) are ignored.

use crate::error::{PlannerError, Result};
use crate::grid::ProjectionGrid;
use crate::projection::MAX_PROJECTION_YEARS;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Baseline values for a fresh scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefaults {
    #[serde(default = "default_annual_income")]
    pub annual_income: f64,
    #[serde(default = "default_initial_savings")]
    pub initial_savings: f64,
    #[serde(default = "default_savings_rate")]
    pub savings_rate: f64,
}

fn default_annual_income() -> f64 { Scenario::default().annual_income }
fn default_initial_savings() -> f64 { Scenario::default().initial_balance }
fn default_savings_rate() -> f64 { Scenario::default().savings_rate }

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            annual_income: default_annual_income(),
            initial_savings: default_initial_savings(),
            savings_rate: default_savings_rate(),
        }
    }
}

/// Balance thresholds for matrix cell tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorThresholds {
    /// Balances above this are `High`
    #[serde(default = "default_green")]
    pub green: f64,
    /// Balances above this (and not above `green`) are `Medium`
    #[serde(default = "default_yellow")]
    pub yellow: f64,
}

fn default_green() -> f64 { 1_000_000.0 }
fn default_yellow() -> f64 { 500_000.0 }

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            green: default_green(),
            yellow: default_yellow(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    #[serde(default)]
    pub defaults: ScenarioDefaults,
    #[serde(default)]
    pub projections: ProjectionGrid,
    #[serde(default)]
    pub color_thresholds: ColorThresholds,
}

impl PlannerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fresh baseline scenario seeded from the defaults
    pub fn default_scenario(&self) -> Scenario {
        Scenario::baseline(
            self.defaults.annual_income,
            self.defaults.initial_savings,
            self.defaults.savings_rate,
        )
    }

    /// Resolve a requested trajectory cell. Returns None when neither coordinate is given;
    /// a missing horizon defaults to the longest option, a missing rate to the first option.
    pub fn trajectory_cell(&self, years: Option<u32>, return_rate: Option<f64>) -> Option<(u32, f64)> {
        if years.is_none() && return_rate.is_none() {
            return None;
        }
        let years = years
            .or_else(|| self.projections.year_options.iter().max().copied())
            .unwrap_or(0);
        let return_rate = return_rate
            .or_else(|| self.projections.return_rate_options.first().copied())
            .unwrap_or(0.0);
        Some((years, return_rate))
    }

    pub fn validate(&self) -> Result<()> {
        if self.projections.year_options.is_empty() {
            return Err(PlannerError::InvalidConfig("projections.yearOptions is empty".into()));
        }
        if let Some(years) = self.projections.year_options.iter().find(|y| **y > MAX_PROJECTION_YEARS) {
            return Err(PlannerError::InvalidConfig(format!(
                "year option {years} exceeds the {MAX_PROJECTION_YEARS}-year limit"
            )));
        }
        if self.projections.return_rate_options.is_empty() {
            return Err(PlannerError::InvalidConfig("projections.returnRateOptions is empty".into()));
        }
        if let Some(rate) = self.projections.return_rate_options.iter().find(|r| !r.is_finite()) {
            return Err(PlannerError::InvalidConfig(format!("return rate {rate} is not finite")));
        }
        if self.color_thresholds.yellow > self.color_thresholds.green {
            return Err(PlannerError::InvalidConfig(format!(
                "colorThresholds.yellow ({}) exceeds colorThresholds.green ({})",
                self.color_thresholds.yellow, self.color_thresholds.green
            )));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
    let config = PlannerConfig::from_json(&json)?;
    log::debug!(
        "Loaded config from {}: {} horizons x {} return rates",
        path.display(),
        config.projections.year_options.len(),
        config.projections.return_rate_options.len()
    );
    Ok(config)
}
