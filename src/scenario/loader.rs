//! Scenario persistence
//!
//! Scenarios are stored as camelCase JSON, the same shape the browser keeps in local storage.

use super::Scenario;
use crate::error::{PlannerError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| PlannerError::io(path, e))?;
    let scenario = load_scenario_from_reader(file)?;
    log::debug!(
        "Loaded scenario from {} ({} adjustments, {} purchases)",
        path.display(),
        scenario.yearly_adjustments.len(),
        scenario.big_purchases.len()
    );
    Ok(scenario)
}

/// Load a scenario from any reader yielding JSON
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<Scenario> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write a scenario as pretty-printed JSON
pub fn save_scenario<P: AsRef<Path>>(path: P, scenario: &Scenario) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(scenario)?;
    fs::write(path, json).map_err(|e| PlannerError::io(path, e))?;
    log::debug!("Saved scenario to {}", path.display());
    Ok(())
}
