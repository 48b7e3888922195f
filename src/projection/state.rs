//! Projection state carried from one simulated year to the next

use crate::scenario::{Mortgage, PurchaseId, Scenario};
use std::collections::BTreeMap;

/// Equity tracking for one originated mortgage
#[derive(Debug, Clone, PartialEq)]
pub struct MortgagePosition<'a> {
    pub description: &'a str,
    /// Appreciating collateral value
    pub home_value: f64,
    /// Outstanding loan principal, never increases and never drops below zero
    pub remaining_principal: f64,
}

impl<'a> MortgagePosition<'a> {
    /// Position at loan origination: home at cost, loan at full principal
    pub fn originate(mortgage: &'a Mortgage) -> Self {
        Self {
            description: &mortgage.description,
            home_value: mortgage.house_cost,
            remaining_principal: mortgage.principal().max(0.0),
        }
    }

    /// Net equity, negative when underwater
    pub fn equity(&self) -> f64 {
        self.home_value - self.remaining_principal
    }

    pub(crate) fn pay_down_to(&mut self, remaining: f64) {
        self.remaining_principal = remaining.min(self.remaining_principal).max(0.0);
    }
}

/// State of a scenario at the end of a simulated year
#[derive(Debug, Clone)]
pub struct ProjectionState<'a> {
    /// Year just completed (0 before the first simulated year)
    pub year: u32,

    /// Cash/investment balance excluding home equity
    pub liquid_balance: f64,

    /// Mortgages originated so far, keyed by purchase id
    pub mortgages: BTreeMap<PurchaseId, MortgagePosition<'a>>,
}

impl<'a> ProjectionState<'a> {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            year: 0,
            liquid_balance: scenario.initial_balance,
            mortgages: BTreeMap::new(),
        }
    }

    /// Compound the liquid balance. Balances at or below zero are left as they are.
    pub fn apply_growth(&mut self, growth_factor: f64) {
        if self.liquid_balance > 0.0 {
            self.liquid_balance *= growth_factor;
        }
    }

    pub fn total_equity(&self) -> f64 {
        self.mortgages.values().map(MortgagePosition::equity).sum()
    }

    /// Liquid balance plus home equity, unrounded
    pub fn net_worth(&self) -> f64 {
        self.liquid_balance + self.total_equity()
    }
}
