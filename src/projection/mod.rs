//! Projection engine for balance and trajectory projections

mod engine;
pub mod mortgage;
mod schedule;
mod snapshot;
mod state;

pub use engine::{
    project_balance, project_trajectory, ProjectionConfig, ProjectionEngine, ProjectionObserver,
};
pub use mortgage::Amortization;
pub use schedule::{ContributionSchedule, ScheduledYear};
pub use snapshot::{round_to_dollar, EventKind, LedgerEvent, MortgageEquity, YearEvent, YearSnapshot};
pub use state::{MortgagePosition, ProjectionState};

// ============================================================================
// Default Projection Grid
// ============================================================================
// Horizons and annual return rates shown in the projection matrix when no
// configuration overrides them.

/// Default horizons in years
pub const DEFAULT_YEAR_OPTIONS: [u32; 10] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50];

/// Default annual return rates in percent
pub const DEFAULT_RETURN_RATE_OPTIONS: [f64; 8] = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0];

/// Longest horizon accepted from external input
pub const MAX_PROJECTION_YEARS: u32 = 500;
