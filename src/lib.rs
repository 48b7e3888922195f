//! Financial Planner - deterministic savings, purchase and mortgage projections
//!
//! This library provides:
//! - Terminal-balance and year-by-year trajectory projections for a scenario
//! - Sticky per-year income / savings-rate overrides
//! - One-time purchases and amortizing mortgages with home-equity tracking
//! - Parallel evaluation of the (horizon x return rate) projection matrix
//! - JSON persistence of scenarios and CSV export of results

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod grid;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use config::{ColorThresholds, PlannerConfig};
pub use error::{PlannerError, Result};
pub use grid::{BalanceTier, GridResult, ProjectionGrid};
pub use projection::{project_balance, project_trajectory, ProjectionEngine, YearSnapshot};
pub use scenario::{Mortgage, Purchase, Scenario, YearlyAdjustment};
