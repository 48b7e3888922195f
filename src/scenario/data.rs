//! Scenario data structures
//!
//! A `Scenario` is the full set of baseline and advanced-mode inputs for one projection.
//! It is constructed and edited by the caller; the projection engine only ever borrows it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Identifier of a purchase (the UI assigns millisecond timestamps)
pub type PurchaseId = u64;

/// Baseline assumptions plus optional advanced events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Gross annual income before any overrides
    #[serde(default = "default_annual_income")]
    pub annual_income: f64,

    /// Starting capital (treated as principal)
    #[serde(default = "default_initial_balance", alias = "initialSavings")]
    pub initial_balance: f64,

    /// Percentage of income saved each year (0-100 expected, not enforced)
    #[serde(default = "default_savings_rate")]
    pub savings_rate: f64,

    /// When false, yearly adjustments and purchases are ignored entirely
    #[serde(default)]
    pub advanced_mode: bool,

    /// Sparse per-year overrides keyed by 1-based year
    #[serde(default)]
    pub yearly_adjustments: BTreeMap<u32, YearlyAdjustment>,

    /// One-time purchases and mortgages, in display order
    #[serde(default, deserialize_with = "deserialize_purchases")]
    pub big_purchases: Vec<Purchase>,
}

fn default_annual_income() -> f64 { 50_000.0 }
fn default_initial_balance() -> f64 { 100_000.0 }
fn default_savings_rate() -> f64 { 15.0 }

impl Default for Scenario {
    fn default() -> Self {
        Self {
            annual_income: default_annual_income(),
            initial_balance: default_initial_balance(),
            savings_rate: default_savings_rate(),
            advanced_mode: false,
            yearly_adjustments: BTreeMap::new(),
            big_purchases: Vec::new(),
        }
    }
}

impl Scenario {
    /// Baseline scenario with no advanced events
    pub fn baseline(annual_income: f64, initial_balance: f64, savings_rate: f64) -> Self {
        Self {
            annual_income,
            initial_balance,
            savings_rate,
            ..Default::default()
        }
    }

    /// Iterate over the mortgages in purchase-list order
    pub fn mortgages(&self) -> impl Iterator<Item = &Mortgage> {
        self.big_purchases.iter().filter_map(|p| match p {
            Purchase::Mortgage(m) => Some(m),
            Purchase::OneTime(_) => None,
        })
    }

    pub fn purchase(&self, id: PurchaseId) -> Option<&Purchase> {
        self.big_purchases.iter().find(|p| p.id() == id)
    }
}

/// Income and/or savings-rate override for one year.
///
/// Overrides are sticky: they stay in effect until a later year overrides the same field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyAdjustment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_rate: Option<f64>,
}

impl YearlyAdjustment {
    pub fn is_empty(&self) -> bool {
        self.income.is_none() && self.savings_rate.is_none()
    }
}

/// A big purchase: either a one-time expense or a mortgage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Purchase {
    #[serde(rename = "purchase")]
    OneTime(OneTimePurchase),
    #[serde(rename = "mortgage")]
    Mortgage(Mortgage),
}

impl Purchase {
    pub fn id(&self) -> PurchaseId {
        match self {
            Purchase::OneTime(p) => p.id,
            Purchase::Mortgage(m) => m.id,
        }
    }

    /// Year of the debit (one-time) or loan origination (mortgage)
    pub fn year(&self) -> u32 {
        match self {
            Purchase::OneTime(p) => p.year,
            Purchase::Mortgage(m) => m.year,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Purchase::OneTime(p) => &p.description,
            Purchase::Mortgage(m) => &m.description,
        }
    }
}

/// One-time expense debited from the balance in `year`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimePurchase {
    pub id: PurchaseId,
    pub year: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

/// Fixed-rate, fully amortizing loan against an appreciating home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mortgage {
    pub id: PurchaseId,
    /// Origination year (down payment and first year of payments)
    pub year: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub house_cost: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub down_payment: f64,
    /// Annual interest rate in percent
    #[serde(deserialize_with = "lenient_f64")]
    pub interest_rate: f64,
    /// Loan term in years
    #[serde(deserialize_with = "lenient_u32")]
    pub mortgage_term: u32,
    #[serde(default)]
    pub description: String,
}

impl Mortgage {
    /// Amount borrowed
    pub fn principal(&self) -> f64 {
        self.house_cost - self.down_payment
    }

    /// Whether payments are due in `year`: [start, start + term)
    pub fn is_active(&self, year: u32) -> bool {
        year >= self.year && year - self.year < self.mortgage_term
    }

    /// Last year with a payment, if the term is non-zero
    pub fn final_payment_year(&self) -> Option<u32> {
        (self.mortgage_term > 0).then(|| self.year.saturating_add(self.mortgage_term - 1))
    }
}

// ============================================================================
// Lenient deserialization
// ============================================================================
// The UI keeps half-typed text ("6." or "") in numeric purchase fields, so stored
// scenarios may carry strings where numbers are expected.

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => parse_numeric_text(&text).map_err(serde::de::Error::custom),
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => value,
        NumberOrText::Text(text) => parse_numeric_text(&text).map_err(serde::de::Error::custom)?,
    };
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a whole number of years, got {value}"
        )));
    }
    Ok(value as u32)
}

fn parse_numeric_text(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("'{trimmed}' is not a number"))
}

/// Stored purchase entries written before mortgages existed carry no `type` tag
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPurchase {
    Tagged(Purchase),
    Untagged(OneTimePurchase),
}

fn deserialize_purchases<'de, D>(deserializer: D) -> Result<Vec<Purchase>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredPurchase>::deserialize(deserializer)?;
    Ok(stored
        .into_iter()
        .map(|entry| match entry {
            StoredPurchase::Tagged(purchase) => purchase,
            StoredPurchase::Untagged(purchase) => Purchase::OneTime(purchase),
        })
        .collect())
}
