//! Scenario editing helpers
//!
//! These mirror the operations the input layer performs on a scenario: adding and
//! removing purchases, setting or clearing yearly overrides, and reading back the
//! effective (sticky) values for a given year.

use super::{Mortgage, OneTimePurchase, Purchase, PurchaseId, Scenario, YearlyAdjustment};
use crate::error::PlannerError;
use chrono::Utc;
use std::str::FromStr;

/// Which field of a yearly adjustment to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentField {
    Income,
    SavingsRate,
}

/// Outcome of parsing free-form text typed into an adjustment field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdjustmentInput {
    /// Empty text: remove the override
    Clear,
    /// Valid non-negative number
    Set(f64),
    /// Anything else: leave the current value untouched
    Ignore,
}

/// Parse the text of an adjustment field.
pub fn parse_adjustment_input(text: &str) -> AdjustmentInput {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AdjustmentInput::Clear;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => AdjustmentInput::Set(value),
        _ => AdjustmentInput::Ignore,
    }
}

/// Terms for a new mortgage
#[derive(Debug, Clone, PartialEq)]
pub struct MortgageTerms {
    pub year: u32,
    pub house_cost: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub mortgage_term: u32,
    pub description: String,
}

impl Default for MortgageTerms {
    fn default() -> Self {
        Self {
            year: 5,
            house_cost: 500_000.0,
            down_payment: 100_000.0,
            interest_rate: 6.5,
            mortgage_term: 30,
            description: String::new(),
        }
    }
}

/// A single-field edit to an existing purchase
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseUpdate {
    Year(u32),
    Description(String),
    /// One-time purchases only
    Amount(f64),
    /// Mortgages only
    HouseCost(f64),
    /// Mortgages only
    DownPayment(f64),
    /// Mortgages only
    InterestRate(f64),
    /// Mortgages only
    MortgageTerm(u32),
}

/// Non-fatal observations about a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioWarning {
    /// Savings rate above 100% (contributions exceed income); `year` is None for the baseline
    SavingsRateAboveIncome { year: Option<u32>, rate: f64 },
    /// Down payment larger than the house cost (negative loan principal)
    DownPaymentExceedsCost { id: PurchaseId, description: String },
    /// Purchase dated year 0, which is never simulated
    PurchaseInYearZero { id: PurchaseId },
}

impl std::fmt::Display for ScenarioWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioWarning::SavingsRateAboveIncome { year: None, rate } => {
                write!(f, "baseline savings rate {rate}% exceeds 100%")
            }
            ScenarioWarning::SavingsRateAboveIncome { year: Some(year), rate } => {
                write!(f, "savings rate {rate}% in year {year} exceeds 100%")
            }
            ScenarioWarning::DownPaymentExceedsCost { id, description } => {
                write!(f, "mortgage {id} ({description}) has a down payment above the house cost")
            }
            ScenarioWarning::PurchaseInYearZero { id } => {
                write!(f, "purchase {id} is dated year 0 and will never apply")
            }
        }
    }
}

impl Scenario {
    /// Set or clear one field of the adjustment for `year`.
    ///
    /// An adjustment left with no fields is removed from the map.
    pub fn set_adjustment(&mut self, year: u32, field: AdjustmentField, value: Option<f64>) {
        let adjustment = self.yearly_adjustments.entry(year).or_default();
        match field {
            AdjustmentField::Income => adjustment.income = value,
            AdjustmentField::SavingsRate => adjustment.savings_rate = value,
        }
        if adjustment.is_empty() {
            self.yearly_adjustments.remove(&year);
        }
    }

    /// Apply parsed text input to an adjustment field. Returns whether anything changed.
    pub fn apply_adjustment_input(&mut self, year: u32, field: AdjustmentField, text: &str) -> bool {
        match parse_adjustment_input(text) {
            AdjustmentInput::Clear => self.set_adjustment(year, field, None),
            AdjustmentInput::Set(value) => self.set_adjustment(year, field, Some(value)),
            AdjustmentInput::Ignore => return false,
        }
        true
    }

    /// Income in effect for `year`: the latest override at or before it, else the baseline
    pub fn effective_income(&self, year: u32) -> f64 {
        self.latest_override(year, |a| a.income)
            .unwrap_or(self.annual_income)
    }

    /// Savings rate in effect for `year`: the latest override at or before it, else the baseline
    pub fn effective_savings_rate(&self, year: u32) -> f64 {
        self.latest_override(year, |a| a.savings_rate)
            .unwrap_or(self.savings_rate)
    }

    /// Contribution in effect for `year` (ignores advanced mode)
    pub fn annual_contribution_at(&self, year: u32) -> f64 {
        self.effective_income(year) * self.effective_savings_rate(year) / 100.0
    }

    fn latest_override(&self, year: u32, field: impl Fn(&YearlyAdjustment) -> Option<f64>) -> Option<f64> {
        if year == 0 {
            return None;
        }
        self.yearly_adjustments
            .range(1..=year)
            .rev()
            .find_map(|(_, adjustment)| field(adjustment))
    }

    /// Append a one-time purchase and return its id
    pub fn add_one_time_purchase(&mut self, year: u32, amount: f64, description: impl Into<String>) -> PurchaseId {
        let id = self.next_purchase_id();
        self.big_purchases.push(Purchase::OneTime(OneTimePurchase {
            id,
            year,
            amount,
            description: description.into(),
        }));
        id
    }

    /// Append a mortgage and return its id
    pub fn add_mortgage(&mut self, terms: MortgageTerms) -> PurchaseId {
        let id = self.next_purchase_id();
        self.big_purchases.push(Purchase::Mortgage(Mortgage {
            id,
            year: terms.year,
            house_cost: terms.house_cost,
            down_payment: terms.down_payment,
            interest_rate: terms.interest_rate,
            mortgage_term: terms.mortgage_term,
            description: terms.description,
        }));
        id
    }

    /// Remove a purchase by id. Returns false if no purchase had that id.
    pub fn remove_purchase(&mut self, id: PurchaseId) -> bool {
        let before = self.big_purchases.len();
        self.big_purchases.retain(|p| p.id() != id);
        self.big_purchases.len() != before
    }

    /// Apply one field edit to the purchase with `id`.
    ///
    /// Returns false when no purchase has that id or the field does not exist on its kind
    /// (e.g. `Amount` on a mortgage); the scenario is left unchanged in both cases.
    pub fn update_purchase(&mut self, id: PurchaseId, update: PurchaseUpdate) -> bool {
        let Some(purchase) = self.big_purchases.iter_mut().find(|p| p.id() == id) else {
            return false;
        };

        match (purchase, update) {
            (Purchase::OneTime(p), PurchaseUpdate::Year(year)) => p.year = year,
            (Purchase::Mortgage(m), PurchaseUpdate::Year(year)) => m.year = year,
            (Purchase::OneTime(p), PurchaseUpdate::Description(text)) => p.description = text,
            (Purchase::Mortgage(m), PurchaseUpdate::Description(text)) => m.description = text,
            (Purchase::OneTime(p), PurchaseUpdate::Amount(amount)) => p.amount = amount,
            (Purchase::Mortgage(m), PurchaseUpdate::HouseCost(cost)) => m.house_cost = cost,
            (Purchase::Mortgage(m), PurchaseUpdate::DownPayment(down)) => m.down_payment = down,
            (Purchase::Mortgage(m), PurchaseUpdate::InterestRate(rate)) => m.interest_rate = rate,
            (Purchase::Mortgage(m), PurchaseUpdate::MortgageTerm(term)) => m.mortgage_term = term,
            (purchase, update) => {
                log::debug!("Ignoring {update:?} for purchase {}", purchase.id());
                return false;
            }
        }
        true
    }

    /// Timestamp-based id, bumped past existing ids so rapid additions stay unique
    fn next_purchase_id(&self) -> PurchaseId {
        let now = Utc::now().timestamp_millis().max(0) as PurchaseId;
        let Some(newest) = self.big_purchases.iter().map(Purchase::id).max() else {
            return now;
        };
        if newest < now {
            return now;
        }
        match newest.checked_add(1) {
            Some(next) => next,
            // Nothing left above the newest id: take the lowest free one
            None => (0..=PurchaseId::MAX)
                .find(|id| self.purchase(*id).is_none())
                .unwrap_or(0),
        }
    }

    /// Collect non-fatal observations (none of these stop a projection)
    pub fn warnings(&self) -> Vec<ScenarioWarning> {
        let mut warnings = Vec::new();

        if self.savings_rate > 100.0 {
            warnings.push(ScenarioWarning::SavingsRateAboveIncome {
                year: None,
                rate: self.savings_rate,
            });
        }

        if !self.advanced_mode {
            return warnings;
        }

        for (&year, adjustment) in &self.yearly_adjustments {
            if let Some(rate) = adjustment.savings_rate.filter(|r| *r > 100.0) {
                warnings.push(ScenarioWarning::SavingsRateAboveIncome { year: Some(year), rate });
            }
        }

        for purchase in self.big_purchases.iter().filter(|p| p.year() == 0) {
            warnings.push(ScenarioWarning::PurchaseInYearZero { id: purchase.id() });
        }
        for m in self.mortgages().filter(|m| m.down_payment > m.house_cost) {
            warnings.push(ScenarioWarning::DownPaymentExceedsCost {
                id: m.id,
                description: m.description.clone(),
            });
        }

        warnings
    }
}

/// A one-time purchase given on the command line as `YEAR:AMOUNT[:DESCRIPTION]`
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSpec {
    pub year: u32,
    pub amount: f64,
    pub description: String,
}

impl FromStr for PurchaseSpec {
    type Err = PlannerError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PlannerError::InvalidPurchaseSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = spec.splitn(3, ':');
        let year = parts
            .next()
            .and_then(|y| y.trim().parse::<u32>().ok())
            .filter(|y| *y > 0)
            .ok_or_else(|| invalid("year must be a positive integer"))?;
        let amount = match parts.next().map(parse_adjustment_input) {
            Some(AdjustmentInput::Set(amount)) => amount,
            _ => return Err(invalid("amount must be a non-negative number")),
        };
        let description = parts.next().unwrap_or_default().trim().to_string();

        Ok(Self {
            year,
            amount,
            description,
        })
    }
}

impl Scenario {
    /// Append a purchase parsed from the command line
    pub fn add_purchase_spec(&mut self, spec: &PurchaseSpec) -> PurchaseId {
        self.add_one_time_purchase(spec.year, spec.amount, spec.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adjustment_input() {
        assert_eq!(parse_adjustment_input(""), AdjustmentInput::Clear);
        assert_eq!(parse_adjustment_input("  "), AdjustmentInput::Clear);
        assert_eq!(parse_adjustment_input("60000"), AdjustmentInput::Set(60_000.0));
        assert_eq!(parse_adjustment_input("12.5"), AdjustmentInput::Set(12.5));
        assert_eq!(parse_adjustment_input("-5"), AdjustmentInput::Ignore);
        assert_eq!(parse_adjustment_input("abc"), AdjustmentInput::Ignore);
        assert_eq!(parse_adjustment_input("NaN"), AdjustmentInput::Ignore);
    }

    #[test]
    fn test_set_and_clear_adjustment() {
        let mut scenario = Scenario::default();
        scenario.set_adjustment(5, AdjustmentField::Income, Some(70_000.0));
        scenario.set_adjustment(5, AdjustmentField::SavingsRate, Some(20.0));
        assert_eq!(scenario.yearly_adjustments[&5].income, Some(70_000.0));

        scenario.set_adjustment(5, AdjustmentField::Income, None);
        assert_eq!(scenario.yearly_adjustments[&5].income, None);
        assert_eq!(scenario.yearly_adjustments[&5].savings_rate, Some(20.0));

        // Last field cleared removes the entry
        scenario.set_adjustment(5, AdjustmentField::SavingsRate, None);
        assert!(scenario.yearly_adjustments.is_empty());
    }

    #[test]
    fn test_apply_adjustment_input_ignores_garbage() {
        let mut scenario = Scenario::default();
        assert!(scenario.apply_adjustment_input(3, AdjustmentField::Income, "65000"));
        assert!(!scenario.apply_adjustment_input(3, AdjustmentField::Income, "65k"));
        assert_eq!(scenario.yearly_adjustments[&3].income, Some(65_000.0));
        assert!(scenario.apply_adjustment_input(3, AdjustmentField::Income, ""));
        assert!(scenario.yearly_adjustments.is_empty());
    }

    #[test]
    fn test_effective_values_are_sticky() {
        let mut scenario = Scenario::default();
        scenario.set_adjustment(5, AdjustmentField::Income, Some(60_000.0));
        scenario.set_adjustment(10, AdjustmentField::SavingsRate, Some(20.0));
        scenario.set_adjustment(15, AdjustmentField::Income, Some(80_000.0));

        assert_eq!(scenario.effective_income(1), 50_000.0);
        assert_eq!(scenario.effective_income(5), 60_000.0);
        assert_eq!(scenario.effective_income(12), 60_000.0);
        assert_eq!(scenario.effective_income(15), 80_000.0);
        assert_eq!(scenario.effective_savings_rate(9), 15.0);
        assert_eq!(scenario.effective_savings_rate(30), 20.0);
        assert_eq!(scenario.annual_contribution_at(12), 12_000.0);
    }

    #[test]
    fn test_effective_values_at_year_zero() {
        let mut scenario = Scenario::default();
        scenario.set_adjustment(3, AdjustmentField::Income, Some(60_000.0));
        scenario.set_adjustment(3, AdjustmentField::SavingsRate, Some(30.0));

        assert_eq!(scenario.effective_income(0), 50_000.0);
        assert_eq!(scenario.effective_savings_rate(0), 15.0);
        assert_eq!(scenario.annual_contribution_at(0), 7_500.0);
    }

    #[test]
    fn test_add_and_remove_purchases() {
        let mut scenario = Scenario::default();
        let car = scenario.add_one_time_purchase(5, 30_000.0, "car");
        let home = scenario.add_mortgage(MortgageTerms::default());

        assert_ne!(car, home);
        assert_eq!(scenario.big_purchases.len(), 2);
        assert_eq!(scenario.purchase(car).map(|p| p.description()), Some("car"));

        assert!(scenario.remove_purchase(car));
        assert!(!scenario.remove_purchase(car));
        assert_eq!(scenario.big_purchases.len(), 1);
        assert_eq!(scenario.big_purchases[0].id(), home);
    }

    #[test]
    fn test_ids_stay_unique_past_existing() {
        let mut scenario = Scenario::default();
        scenario.big_purchases.push(Purchase::OneTime(OneTimePurchase {
            id: u64::MAX - 1,
            year: 1,
            amount: 1.0,
            description: String::new(),
        }));
        let id = scenario.add_one_time_purchase(2, 2.0, "");
        assert_eq!(id, u64::MAX);

        // Id space exhausted above the newest id
        let a = scenario.add_one_time_purchase(3, 3.0, "");
        let b = scenario.add_mortgage(MortgageTerms::default());
        let mut ids: Vec<PurchaseId> = scenario.big_purchases.iter().map(Purchase::id).collect();
        assert_eq!((a, b), (0, 1));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_update_purchase() {
        let mut scenario = Scenario::default();
        let car = scenario.add_one_time_purchase(5, 30_000.0, "car");
        let home = scenario.add_mortgage(MortgageTerms::default());

        assert!(scenario.update_purchase(car, PurchaseUpdate::Amount(25_000.0)));
        assert!(scenario.update_purchase(car, PurchaseUpdate::Year(7)));
        assert!(scenario.update_purchase(home, PurchaseUpdate::InterestRate(5.9)));
        assert!(scenario.update_purchase(home, PurchaseUpdate::MortgageTerm(15)));
        assert!(scenario.update_purchase(home, PurchaseUpdate::Description("Condo".into())));

        // Field does not exist on that kind, or no such id
        assert!(!scenario.update_purchase(home, PurchaseUpdate::Amount(1.0)));
        assert!(!scenario.update_purchase(car, PurchaseUpdate::HouseCost(1.0)));
        assert!(!scenario.update_purchase(home.wrapping_add(1_000), PurchaseUpdate::Year(1)));

        match scenario.purchase(car) {
            Some(Purchase::OneTime(p)) => assert_eq!((p.year, p.amount), (7, 25_000.0)),
            other => panic!("unexpected {other:?}"),
        }
        match scenario.purchase(home) {
            Some(Purchase::Mortgage(m)) => {
                assert_eq!(m.interest_rate, 5.9);
                assert_eq!(m.mortgage_term, 15);
                assert_eq!(m.house_cost, 500_000.0);
                assert_eq!(m.description, "Condo");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_warnings() {
        let mut scenario = Scenario::baseline(50_000.0, 0.0, 120.0);
        assert_eq!(
            scenario.warnings(),
            vec![ScenarioWarning::SavingsRateAboveIncome { year: None, rate: 120.0 }]
        );

        scenario.savings_rate = 10.0;
        scenario.set_adjustment(4, AdjustmentField::SavingsRate, Some(150.0));
        // Adjustments are ignored outside advanced mode
        assert!(scenario.warnings().is_empty());

        scenario.advanced_mode = true;
        let id = scenario.add_mortgage(MortgageTerms {
            house_cost: 100_000.0,
            down_payment: 150_000.0,
            ..Default::default()
        });
        let warnings = scenario.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&ScenarioWarning::SavingsRateAboveIncome { year: Some(4), rate: 150.0 }));
        assert!(warnings.contains(&ScenarioWarning::DownPaymentExceedsCost { id, description: String::new() }));

        let gift = scenario.add_one_time_purchase(0, 1_000.0, "gift");
        assert!(scenario.warnings().contains(&ScenarioWarning::PurchaseInYearZero { id: gift }));
    }

    #[test]
    fn test_purchase_spec_parsing() {
        let spec: PurchaseSpec = "5:50000:new car".parse().expect("valid spec");
        assert_eq!(spec, PurchaseSpec { year: 5, amount: 50_000.0, description: "new car".into() });

        let spec: PurchaseSpec = "12:2500".parse().expect("valid spec");
        assert_eq!(spec.description, "");

        assert!("0:100".parse::<PurchaseSpec>().is_err());
        assert!("5".parse::<PurchaseSpec>().is_err());
        assert!("5:-100".parse::<PurchaseSpec>().is_err());
        assert!("x:100".parse::<PurchaseSpec>().is_err());
    }
}
