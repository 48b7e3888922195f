//! Projection matrix: terminal balances for every (horizon, return rate) pair
//!
//! Cells are independent, so rows are evaluated in parallel against the shared,
//! read-only scenario.

use crate::config::ColorThresholds;
use crate::projection::{project_balance, DEFAULT_RETURN_RATE_OPTIONS, DEFAULT_YEAR_OPTIONS};
use crate::scenario::Scenario;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Horizons (columns) and return rates (rows) of the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionGrid {
    #[serde(default = "default_year_options")]
    pub year_options: Vec<u32>,
    #[serde(default = "default_return_rate_options")]
    pub return_rate_options: Vec<f64>,
}

fn default_year_options() -> Vec<u32> { DEFAULT_YEAR_OPTIONS.to_vec() }
fn default_return_rate_options() -> Vec<f64> { DEFAULT_RETURN_RATE_OPTIONS.to_vec() }

impl Default for ProjectionGrid {
    fn default() -> Self {
        Self {
            year_options: default_year_options(),
            return_rate_options: default_return_rate_options(),
        }
    }
}

/// Display tier of a balance relative to the colour thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceTier {
    Low,
    Medium,
    High,
}

impl BalanceTier {
    pub fn classify(balance: i64, thresholds: &ColorThresholds) -> Self {
        let value = balance as f64;
        if value > thresholds.green {
            BalanceTier::High
        } else if value > thresholds.yellow {
            BalanceTier::Medium
        } else {
            BalanceTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub years: u32,
    pub balance: i64,
    pub tier: BalanceTier,
}

/// One return rate across all horizons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub return_rate: f64,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResult {
    pub year_options: Vec<u32>,
    pub rows: Vec<GridRow>,
}

impl GridResult {
    /// Balance at (`years`, `return_rate`) if that cell is in the matrix
    pub fn balance_at(&self, years: u32, return_rate: f64) -> Option<i64> {
        self.rows
            .iter()
            .find(|row| row.return_rate == return_rate)?
            .cells
            .iter()
            .find(|cell| cell.years == years)
            .map(|cell| cell.balance)
    }
}

impl ProjectionGrid {
    pub fn new(year_options: Vec<u32>, return_rate_options: Vec<f64>) -> Self {
        Self {
            year_options,
            return_rate_options,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.year_options.len() * self.return_rate_options.len()
    }

    /// Evaluate every cell, rows in parallel, preserving row and column order
    pub fn evaluate(&self, scenario: &Scenario, thresholds: &ColorThresholds) -> GridResult {
        log::debug!(
            "Evaluating {} x {} projection grid",
            self.return_rate_options.len(),
            self.year_options.len()
        );

        let rows = self
            .return_rate_options
            .par_iter()
            .map(|&return_rate| GridRow {
                return_rate,
                cells: self
                    .year_options
                    .iter()
                    .map(|&years| {
                        let balance = project_balance(scenario, years, return_rate);
                        GridCell {
                            years,
                            balance,
                            tier: BalanceTier::classify(balance, thresholds),
                        }
                    })
                    .collect(),
            })
            .collect();

        GridResult {
            year_options: self.year_options.clone(),
            rows,
        }
    }
}
