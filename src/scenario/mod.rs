//! Scenario data structures, editing and persistence

mod data;
mod editor;
pub mod loader;

pub use data::{Mortgage, OneTimePurchase, Purchase, PurchaseId, Scenario, YearlyAdjustment};
pub use editor::{
    parse_adjustment_input, AdjustmentField, AdjustmentInput, MortgageTerms, PurchaseSpec,
    PurchaseUpdate, ScenarioWarning,
};
pub use loader::{load_scenario, load_scenario_from_reader, save_scenario};
