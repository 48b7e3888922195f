//! AWS Lambda entry point
//!
//! POST a JSON body `{"scenario": {...}, "years": 30, "returnRate": 6}` and receive the
//! projection matrix, plus the trajectory when `years` or `returnRate` is given.

use financial_planner::config::load_config;
use financial_planner::projection::{project_trajectory, MAX_PROJECTION_YEARS};
use financial_planner::{GridResult, PlannerConfig, Scenario, YearSnapshot};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Optional path to a planner configuration JSON
const CONFIG_ENV: &str = "PLANNER_CONFIG";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionRequest {
    #[serde(default)]
    scenario: Option<Scenario>,
    #[serde(default)]
    years: Option<u32>,
    #[serde(default)]
    return_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    grid: GridResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<Vec<YearSnapshot>>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_response<T: Serialize>(status: u16, payload: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

fn handle(config: &PlannerConfig, body: &[u8]) -> Result<Response<Body>, Error> {
    let body: &[u8] = if body.is_empty() { b"{}" } else { body };
    let request: ProjectionRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected request: {e}");
            return json_response(400, &ErrorResponse { error: e.to_string() });
        }
    };

    if let Some(years) = request.years.filter(|y| *y > MAX_PROJECTION_YEARS) {
        log::warn!("Rejected request: horizon of {years} years");
        let error = format!("years must be at most {MAX_PROJECTION_YEARS}, got {years}");
        return json_response(400, &ErrorResponse { error });
    }

    let scenario = request.scenario.unwrap_or_else(|| config.default_scenario());
    let warnings: Vec<String> = scenario.warnings().iter().map(ToString::to_string).collect();
    let grid = config.projections.evaluate(&scenario, &config.color_thresholds);

    let trajectory = config
        .trajectory_cell(request.years, request.return_rate)
        .map(|(years, rate)| project_trajectory(&scenario, years, rate));

    log::info!(
        "Projected {} cells (trajectory: {})",
        config.projections.cell_count(),
        trajectory.as_ref().map_or(0, Vec::len)
    );

    json_response(200, &ProjectionResponse { grid, trajectory, warnings })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => load_config(&path)?,
        Err(_) => PlannerConfig::default(),
    };
    let config = Arc::new(config);

    run(service_fn(move |event: Request| {
        let config = Arc::clone(&config);
        async move {
            let body: &[u8] = event.body().as_ref();
            handle(&config, body)
        }
    }))
    .await
}
