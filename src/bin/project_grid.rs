//! Print the projection matrix for a scenario, plus the trajectory of one cell
//!
//! Optionally writes the trajectory and matrix as CSV, or everything as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use financial_planner::config::{load_config, PlannerConfig};
use financial_planner::export::{export_grid, export_trajectory};
use financial_planner::format::{format_compact, format_currency, format_rate};
use financial_planner::projection::{project_trajectory, MAX_PROJECTION_YEARS};
use financial_planner::scenario::{load_scenario, PurchaseSpec};
use financial_planner::{BalanceTier, GridResult, YearSnapshot};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "project_grid", about = "Project balances across horizons and return rates")]
struct Args {
    /// Scenario JSON (defaults to the configured baseline)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Planner configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Horizon of the trajectory to print
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=MAX_PROJECTION_YEARS as i64))]
    years: Option<u32>,

    /// Annual return rate (percent) of the trajectory to print
    #[arg(long)]
    rate: Option<f64>,

    /// Force advanced mode on
    #[arg(long)]
    advanced: bool,

    /// Extra one-time purchase, YEAR:AMOUNT[:DESCRIPTION] (repeatable, implies --advanced)
    #[arg(long = "purchase")]
    purchases: Vec<PurchaseSpec>,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the matrix as CSV
    #[arg(long)]
    grid_csv: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    grid: &'a GridResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<&'a [YearSnapshot]>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => config.default_scenario(),
    };
    if args.advanced || !args.purchases.is_empty() {
        scenario.advanced_mode = true;
    }
    for spec in &args.purchases {
        scenario.add_purchase_spec(spec);
    }

    for warning in scenario.warnings() {
        log::warn!("{warning}");
    }

    let grid = config.projections.evaluate(&scenario, &config.color_thresholds);
    log::info!("Evaluated {} cells in {:?}", config.projections.cell_count(), start.elapsed());

    let trajectory = config
        .trajectory_cell(args.years, args.rate)
        .map(|(years, rate)| (years, rate, project_trajectory(&scenario, years, rate)));

    if let Some(path) = &args.grid_csv {
        export_grid(path, &grid).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Matrix written to {}", path.display());
    }
    if let (Some(path), Some((_, _, snapshots))) = (&args.csv, &trajectory) {
        export_trajectory(path, snapshots).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Trajectory written to {}", path.display());
    }

    if args.json {
        let output = JsonOutput {
            grid: &grid,
            trajectory: trajectory.as_ref().map(|(_, _, snapshots)| snapshots.as_slice()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_grid(&grid);
    if let Some((years, rate, snapshots)) = &trajectory {
        print_trajectory(*years, *rate, snapshots);
    }
    Ok(())
}

fn print_grid(grid: &GridResult) {
    println!("[PROJECTION_MATRIX] balance by years (cols) x return rate (rows)");
    print!("{:>8}", "RATE%");
    for years in &grid.year_options {
        print!(" {:>10}", format!("{years}Y"));
    }
    println!();

    for row in &grid.rows {
        print!("{:>8}", format_rate(row.return_rate));
        for cell in &row.cells {
            let marker = match cell.tier {
                BalanceTier::High => '+',
                BalanceTier::Medium => '~',
                BalanceTier::Low => ' ',
            };
            print!(" {:>9}{}", format_compact(cell.balance), marker);
        }
        println!();
    }
}

fn print_trajectory(years: u32, rate: f64, snapshots: &[YearSnapshot]) {
    println!("\n[TRAJECTORY] {years} years at {}", format_rate(rate));
    println!("{:>5} | {:>14} | {:>14} | {:>14} | Events", "Year", "Balance", "Liquid", "Equity");
    for snapshot in snapshots {
        let events = snapshot
            .events
            .iter()
            .map(|e| e.label.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        println!(
            "{:>5} | {:>14} | {:>14} | {:>14} | {}",
            snapshot.year,
            format_currency(snapshot.balance as f64),
            format_currency(snapshot.liquid_balance as f64),
            format_currency(snapshot.total_equity as f64),
            events
        );
    }
}
