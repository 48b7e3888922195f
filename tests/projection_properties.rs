//! Cross-cutting projection properties exercised through the public API

use approx::assert_relative_eq;
use financial_planner::projection::{project_balance, project_trajectory, Amortization, EventKind};
use financial_planner::scenario::{AdjustmentField, MortgageTerms, Purchase, Scenario};
use financial_planner::{ColorThresholds, ProjectionGrid};

fn busy_scenario() -> Scenario {
    let mut scenario = Scenario::baseline(85_000.0, 40_000.0, 18.0);
    scenario.advanced_mode = true;
    scenario.set_adjustment(4, AdjustmentField::Income, Some(95_000.0));
    scenario.set_adjustment(9, AdjustmentField::SavingsRate, Some(25.0));
    scenario.set_adjustment(20, AdjustmentField::Income, Some(0.0));
    scenario.add_one_time_purchase(6, 35_000.0, "car");
    scenario.add_mortgage(MortgageTerms {
        year: 3,
        house_cost: 420_000.0,
        down_payment: 84_000.0,
        interest_rate: 5.75,
        mortgage_term: 25,
        description: "House".to_string(),
    });
    scenario.add_mortgage(MortgageTerms {
        year: 12,
        house_cost: 180_000.0,
        down_payment: 30_000.0,
        interest_rate: 0.0,
        mortgage_term: 10,
        description: "Cabin".to_string(),
    });
    scenario
}

#[test]
fn year_zero_is_the_starting_point() {
    let scenario = busy_scenario();
    for &rate in &[0.0, 5.0, 12.0] {
        let first = &project_trajectory(&scenario, 30, rate)[0];
        assert_eq!(first.year, 0);
        assert_eq!(first.balance, 40_000);
        assert_eq!(first.liquid_balance, 40_000);
        assert_eq!(first.total_equity, 0);
        assert!(first.mortgage_equity_details.is_empty());
        assert!(first.events.is_empty());
    }
}

#[test]
fn balance_is_liquid_plus_equity_every_year() {
    let scenario = busy_scenario();
    for snapshot in project_trajectory(&scenario, 40, 7.0) {
        assert_eq!(snapshot.balance, snapshot.liquid_balance + snapshot.total_equity);
    }
}

#[test]
fn both_entry_points_agree() {
    let scenario = busy_scenario();
    for years in 0..=35 {
        for &rate in &[-3.0, 0.0, 2.5, 8.0] {
            let trajectory = project_trajectory(&scenario, years, rate);
            assert_eq!(trajectory.len(), years as usize + 1);
            assert_eq!(trajectory.last().map(|s| s.balance), Some(project_balance(&scenario, years, rate)));
        }
    }
}

#[test]
fn projections_are_repeatable() {
    let scenario = busy_scenario();
    let before = scenario.clone();
    assert_eq!(project_balance(&scenario, 25, 6.0), project_balance(&scenario, 25, 6.0));
    assert_eq!(project_trajectory(&scenario, 25, 6.0), project_trajectory(&scenario, 25, 6.0));
    assert_eq!(scenario, before);
}

#[test]
fn trajectory_prefixes_are_consistent() {
    // A shorter horizon is a prefix of a longer one
    let scenario = busy_scenario();
    let long = project_trajectory(&scenario, 30, 6.0);
    let short = project_trajectory(&scenario, 18, 6.0);
    assert_eq!(&long[..short.len()], &short[..]);
}

#[test]
fn principal_pays_down_to_zero_by_end_of_term() {
    let scenario = busy_scenario();
    let trajectory = project_trajectory(&scenario, 40, 4.0);

    for purchase in &scenario.big_purchases {
        let Purchase::Mortgage(mortgage) = purchase else { continue };
        let last_payment = mortgage.final_payment_year().expect("non-zero term");

        let mut previous = f64::INFINITY;
        for snapshot in &trajectory[mortgage.year as usize..] {
            let principal = snapshot.mortgage_equity_details[&mortgage.id].remaining_principal as f64;
            assert!(principal <= previous, "{} grew in year {}", mortgage.description, snapshot.year);
            previous = principal;
        }
        assert_eq!(
            trajectory[last_payment as usize].mortgage_equity_details[&mortgage.id].remaining_principal,
            0
        );
        assert!(trajectory[last_payment as usize - 1].mortgage_equity_details[&mortgage.id].remaining_principal > 0);
    }
}

#[test]
fn mortgage_payment_events_cover_the_term() {
    let scenario = busy_scenario();
    let trajectory = project_trajectory(&scenario, 40, 4.0);
    let payment_years: Vec<u32> = trajectory
        .iter()
        .filter(|s| s.events.iter().any(|e| e.kind == EventKind::MortgagePayment && e.label.starts_with("House")))
        .map(|s| s.year)
        .collect();
    assert_eq!(payment_years, (3..28).collect::<Vec<_>>());
}

#[test]
fn mortgage_cash_flows_hit_the_liquid_balance() {
    let mut scenario = Scenario::baseline(0.0, 1_000_000.0, 0.0);
    scenario.advanced_mode = true;
    scenario.add_mortgage(MortgageTerms {
        year: 1,
        house_cost: 500_000.0,
        down_payment: 100_000.0,
        interest_rate: 6.5,
        mortgage_term: 30,
        description: String::new(),
    });

    let annual = Amortization::new(400_000.0, 6.5, 30).annual_payment();
    assert_relative_eq!(annual, 30_339.27, epsilon = 0.01);

    let trajectory = project_trajectory(&scenario, 3, 0.0);
    for (year, snapshot) in trajectory.iter().enumerate().skip(1) {
        let expected = 1_000_000.0 - 100_000.0 - annual * year as f64;
        assert!((snapshot.liquid_balance as f64 - expected).abs() <= 1.0);
    }
    // Zero appreciation: equity is the home value less what is still owed
    let details = trajectory[1].mortgage_equity_details.values().next().expect("tracked mortgage");
    assert_eq!(details.home_value, 500_000);
    assert!((details.equity - (500_000 - details.remaining_principal)).abs() <= 1);
}

#[test]
fn grid_cells_match_project_balance() {
    let scenario = busy_scenario();
    let grid = ProjectionGrid::default();
    let result = grid.evaluate(&scenario, &ColorThresholds::default());

    for (row, &rate) in result.rows.iter().zip(&grid.return_rate_options) {
        assert_eq!(row.return_rate, rate);
        for (cell, &years) in row.cells.iter().zip(&grid.year_options) {
            assert_eq!(cell.years, years);
            assert_eq!(cell.balance, project_balance(&scenario, years, rate));
        }
    }
}

#[test]
fn non_advanced_projection_is_closed_form() {
    let mut scenario = busy_scenario();
    scenario.advanced_mode = false;
    let contribution = 85_000.0 * 0.18;

    for &years in &[5u32, 10, 25, 50] {
        let r: f64 = 0.07;
        let growth = (1.0 + r).powi(years as i32);
        let expected = 40_000.0 * growth + contribution * (growth - 1.0) / r;
        assert_relative_eq!(project_balance(&scenario, years, 7.0) as f64, expected, epsilon = 1.0);
        assert_eq!(
            project_balance(&scenario, years, 0.0),
            (40_000.0 + contribution * years as f64).round() as i64
        );
    }
}
