//! CSV export of trajectories and projection matrices

use crate::error::{PlannerError, Result};
use crate::grid::GridResult;
use crate::projection::YearSnapshot;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TrajectoryRow {
    year: u32,
    balance: i64,
    liquid_balance: i64,
    total_equity: i64,
    events: String,
}

impl From<&YearSnapshot> for TrajectoryRow {
    fn from(snapshot: &YearSnapshot) -> Self {
        Self {
            year: snapshot.year,
            balance: snapshot.balance,
            liquid_balance: snapshot.liquid_balance,
            total_equity: snapshot.total_equity,
            events: snapshot
                .events
                .iter()
                .map(|e| e.label.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Write one CSV row per year: `year,balance,liquid_balance,total_equity,events`
pub fn write_trajectory_csv<W: Write>(writer: W, trajectory: &[YearSnapshot]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in trajectory {
        csv_writer.serialize(TrajectoryRow::from(snapshot))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the matrix: one row per return rate, one column per horizon
pub fn write_grid_csv<W: Write>(writer: W, grid: &GridResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["return_rate".to_string()];
    header.extend(grid.year_options.iter().map(|years| format!("{years}y")));
    csv_writer.write_record(&header)?;

    for row in &grid.rows {
        let mut record = vec![row.return_rate.to_string()];
        record.extend(row.cells.iter().map(|cell| cell.balance.to_string()));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a trajectory CSV to `path`
pub fn export_trajectory<P: AsRef<Path>>(path: P, trajectory: &[YearSnapshot]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PlannerError::io(path, e))?;
    write_trajectory_csv(file, trajectory)
}

/// Write a matrix CSV to `path`
pub fn export_grid<P: AsRef<Path>>(path: P, grid: &GridResult) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PlannerError::io(path, e))?;
    write_grid_csv(file, grid)
}
