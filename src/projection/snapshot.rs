//! Year-by-year projection output

use super::state::ProjectionState;
use crate::scenario::PurchaseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round half up to whole dollars (0.5 -> 1, -0.5 -> 0).
///
/// Non-finite values saturate: NaN becomes 0, infinities clamp to the i64 range.
pub fn round_to_dollar(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Category of a state-changing action within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Income,
    Savings,
    Purchase,
    MortgageDown,
    MortgagePayment,
}

/// A state-changing action, as the engine applies it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerEvent<'a> {
    IncomeChange { income: f64 },
    SavingsRateChange { rate: f64 },
    Purchase { description: &'a str, amount: f64 },
    MortgageDown { description: &'a str, amount: f64 },
    MortgagePayment { description: &'a str, annual_payment: f64 },
}

impl LedgerEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::IncomeChange { .. } => EventKind::Income,
            LedgerEvent::SavingsRateChange { .. } => EventKind::Savings,
            LedgerEvent::Purchase { .. } => EventKind::Purchase,
            LedgerEvent::MortgageDown { .. } => EventKind::MortgageDown,
            LedgerEvent::MortgagePayment { .. } => EventKind::MortgagePayment,
        }
    }
}

/// A labelled event in a trajectory snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub label: String,
}

/// Equity breakdown for one mortgage, in whole dollars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageEquity {
    pub description: String,
    pub home_value: i64,
    pub remaining_principal: i64,
    pub equity: i64,
}

/// Balances and events at the end of one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    /// Always `liquid_balance + total_equity`
    pub balance: i64,
    pub liquid_balance: i64,
    pub total_equity: i64,
    #[serde(default, alias = "mortgageEquities")]
    pub mortgage_equity_details: BTreeMap<PurchaseId, MortgageEquity>,
    #[serde(default)]
    pub events: Vec<YearEvent>,
}

/// Rounded (balance, liquid, equity) triple for a state.
///
/// The balance is the rounded net worth; equity absorbs the rounding residue so the
/// three always add up.
pub(crate) fn rounded_balances(state: &ProjectionState<'_>) -> (i64, i64, i64) {
    let balance = round_to_dollar(state.net_worth());
    let liquid = round_to_dollar(state.liquid_balance);
    (balance, liquid, balance.saturating_sub(liquid))
}

impl YearSnapshot {
    pub fn from_state(state: &ProjectionState<'_>, events: Vec<YearEvent>) -> Self {
        let (balance, liquid_balance, total_equity) = rounded_balances(state);
        let mortgage_equity_details = state
            .mortgages
            .iter()
            .map(|(&id, position)| {
                (
                    id,
                    MortgageEquity {
                        description: position.description.to_string(),
                        home_value: round_to_dollar(position.home_value),
                        remaining_principal: round_to_dollar(position.remaining_principal),
                        equity: round_to_dollar(position.equity()),
                    },
                )
            })
            .collect();

        Self {
            year: state.year,
            balance,
            liquid_balance,
            total_equity,
            mortgage_equity_details,
            events,
        }
    }
}
