//! Core projection engine
//!
//! Each year of a projection runs in a fixed order:
//! 1. Growth of the liquid balance (positive balances only)
//! 2. Sticky income / savings-rate overrides (advanced mode)
//! 3. Contribution of income x savings rate
//! 4. Purchases and mortgages in purchase-list order (advanced mode)
//!
//! The same loop drives both the terminal balance and the full trajectory; the
//! difference is only in what the observer keeps.

use super::mortgage::Amortization;
use super::schedule::ContributionSchedule;
use super::snapshot::{rounded_balances, LedgerEvent, YearEvent, YearSnapshot};
use super::state::{MortgagePosition, ProjectionState};
use crate::format::event_label;
use crate::scenario::{Mortgage, Purchase, Scenario};

/// Horizon and return rate for one projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Number of years to simulate
    pub years: u32,
    /// Annual return in percent, applied to the liquid balance and to home values
    pub return_rate: f64,
}

impl ProjectionConfig {
    pub fn new(years: u32, return_rate: f64) -> Self {
        Self { years, return_rate }
    }

    fn growth_factor(&self) -> f64 {
        1.0 + self.return_rate / 100.0
    }
}

/// Receives what happens during a projection. Both hooks default to no-ops.
pub trait ProjectionObserver {
    /// A state-changing action was applied in the current year
    fn record(&mut self, _event: LedgerEvent<'_>) {}

    /// The year in `state.year` is complete (called for year 0 too)
    fn end_year(&mut self, _state: &ProjectionState<'_>) {}
}

/// Observer that keeps nothing
struct Silent;

impl ProjectionObserver for Silent {}

/// Observer that builds one labelled snapshot per year
#[derive(Debug, Default)]
struct TrajectoryRecorder {
    snapshots: Vec<YearSnapshot>,
    pending: Vec<YearEvent>,
}

impl ProjectionObserver for TrajectoryRecorder {
    fn record(&mut self, event: LedgerEvent<'_>) {
        self.pending.push(YearEvent {
            kind: event.kind(),
            label: event_label(&event),
        });
    }

    fn end_year(&mut self, state: &ProjectionState<'_>) {
        let events = std::mem::take(&mut self.pending);
        self.snapshots.push(YearSnapshot::from_state(state, events));
    }
}

/// Projection engine over a borrowed, read-only scenario
pub struct ProjectionEngine<'a> {
    scenario: &'a Scenario,
    config: ProjectionConfig,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(scenario: &'a Scenario, config: ProjectionConfig) -> Self {
        Self { scenario, config }
    }

    /// Rounded balance (liquid + equity) at the end of the horizon
    pub fn final_balance(&self) -> i64 {
        let state = self.run(&mut Silent);
        rounded_balances(&state).0
    }

    /// One snapshot per year, year 0 included
    pub fn trajectory(&self) -> Vec<YearSnapshot> {
        let mut recorder = TrajectoryRecorder {
            snapshots: Vec::with_capacity(self.config.years as usize + 1),
            pending: Vec::new(),
        };
        self.run(&mut recorder);
        recorder.snapshots
    }

    /// Run the simulation from year 0, reporting to `observer`, and return the final state
    pub fn run<O: ProjectionObserver>(&self, observer: &mut O) -> ProjectionState<'a> {
        let scenario = self.scenario;
        let growth = self.config.growth_factor();
        let schedule = ContributionSchedule::build(scenario, self.config.years);
        let mut state = ProjectionState::from_scenario(scenario);

        log::debug!(
            "Projecting {} years at {}% (advanced mode: {}, purchases: {})",
            self.config.years,
            self.config.return_rate,
            scenario.advanced_mode,
            scenario.big_purchases.len()
        );

        observer.end_year(&state);

        for year in 1..=self.config.years {
            state.year = year;
            state.apply_growth(growth);

            let scheduled = schedule.year(year);
            if let Some(income) = scheduled.income_change {
                observer.record(LedgerEvent::IncomeChange { income });
            }
            if let Some(rate) = scheduled.savings_rate_change {
                observer.record(LedgerEvent::SavingsRateChange { rate });
            }
            state.liquid_balance += scheduled.contribution();

            if scenario.advanced_mode {
                for purchase in &scenario.big_purchases {
                    match purchase {
                        Purchase::OneTime(p) if p.year == year => {
                            state.liquid_balance -= p.amount;
                            observer.record(LedgerEvent::Purchase {
                                description: &p.description,
                                amount: p.amount,
                            });
                        }
                        Purchase::OneTime(_) => {}
                        Purchase::Mortgage(m) => {
                            step_mortgage(m, year, growth, &mut state, observer);
                        }
                    }
                }
            }

            observer.end_year(&state);
        }

        state
    }
}

/// Apply one year of a mortgage: origination, payments, then home appreciation
fn step_mortgage<'a, O: ProjectionObserver>(
    mortgage: &'a Mortgage,
    year: u32,
    growth: f64,
    state: &mut ProjectionState<'a>,
    observer: &mut O,
) {
    if mortgage.year == year {
        state.liquid_balance -= mortgage.down_payment;
        state
            .mortgages
            .insert(mortgage.id, MortgagePosition::originate(mortgage));
        observer.record(LedgerEvent::MortgageDown {
            description: &mortgage.description,
            amount: mortgage.down_payment,
        });
    }

    if mortgage.is_active(year) {
        let loan = Amortization::for_mortgage(mortgage);
        let annual_payment = loan.annual_payment();
        state.liquid_balance -= annual_payment;

        let months_elapsed = (year - mortgage.year + 1).saturating_mul(12);
        if let Some(position) = state.mortgages.get_mut(&mortgage.id) {
            position.pay_down_to(loan.remaining_principal(months_elapsed));
        }
        observer.record(LedgerEvent::MortgagePayment {
            description: &mortgage.description,
            annual_payment,
        });
    }

    if let Some(position) = state.mortgages.get_mut(&mortgage.id) {
        position.home_value *= growth;
    }
}

/// Rounded balance after `years` at `return_rate` percent
pub fn project_balance(scenario: &Scenario, years: u32, return_rate: f64) -> i64 {
    ProjectionEngine::new(scenario, ProjectionConfig::new(years, return_rate)).final_balance()
}

/// Year-by-year snapshots (length `years + 1`) at `return_rate` percent
pub fn project_trajectory(scenario: &Scenario, years: u32, return_rate: f64) -> Vec<YearSnapshot> {
    ProjectionEngine::new(scenario, ProjectionConfig::new(years, return_rate)).trajectory()
}
