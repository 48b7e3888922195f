//! Dense per-year contribution schedule
//!
//! Sticky yearly overrides are forward-filled once per projection, so the simulation
//! loop reads income and savings rate by index instead of searching back for the
//! latest override.

use crate::scenario::Scenario;

/// Income and savings rate in effect for one simulated year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledYear {
    pub income: f64,
    pub savings_rate: f64,
    /// Income override that takes effect this year
    pub income_change: Option<f64>,
    /// Savings-rate override that takes effect this year
    pub savings_rate_change: Option<f64>,
}

impl ScheduledYear {
    pub fn contribution(&self) -> f64 {
        self.income * self.savings_rate / 100.0
    }
}

#[derive(Debug, Clone)]
pub struct ContributionSchedule {
    /// Index 0 is the starting point; index y is simulated year y. Entries stop at the
    /// last override inside the horizon, later years repeat the final entry.
    years: Vec<ScheduledYear>,
}

impl ContributionSchedule {
    /// Forward-fill overrides through year `years`. Outside advanced mode every year uses the baseline.
    pub fn build(scenario: &Scenario, years: u32) -> Self {
        let mut current = ScheduledYear {
            income: scenario.annual_income,
            savings_rate: scenario.savings_rate,
            income_change: None,
            savings_rate_change: None,
        };

        let last_override = if scenario.advanced_mode {
            scenario.yearly_adjustments.keys().next_back().copied().unwrap_or(0)
        } else {
            0
        };
        let dense_until = years.min(last_override);

        let mut schedule = Vec::with_capacity(dense_until as usize + 1);
        schedule.push(current);
        for year in 1..=dense_until {
            current.income_change = None;
            current.savings_rate_change = None;
            if let Some(adjustment) = scenario.yearly_adjustments.get(&year) {
                if let Some(income) = adjustment.income {
                    current.income = income;
                    current.income_change = Some(income);
                }
                if let Some(rate) = adjustment.savings_rate {
                    current.savings_rate = rate;
                    current.savings_rate_change = Some(rate);
                }
            }
            schedule.push(current);
        }

        Self { years: schedule }
    }

    /// Entry for `year`; years past the last stored entry repeat it without changes
    pub fn year(&self, year: u32) -> ScheduledYear {
        if let Some(entry) = self.years.get(year as usize) {
            return *entry;
        }
        let last = self.years[self.years.len() - 1];
        ScheduledYear {
            income_change: None,
            savings_rate_change: None,
            ..last
        }
    }
}
