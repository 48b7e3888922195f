//! Fixed-rate mortgage amortization
//!
//! Payments are monthly; the projection charges them a year at a time.

use crate::scenario::Mortgage;

/// Amortization parameters for one loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amortization {
    /// Amount borrowed
    pub principal: f64,
    /// Monthly interest rate as a decimal (annual percent / 100 / 12)
    pub monthly_rate: f64,
    /// Number of monthly payments
    pub months: u32,
}

impl Amortization {
    pub fn new(principal: f64, annual_rate_pct: f64, term_years: u32) -> Self {
        Self {
            principal,
            monthly_rate: annual_rate_pct / 100.0 / 12.0,
            months: term_years.saturating_mul(12),
        }
    }

    pub fn for_mortgage(mortgage: &Mortgage) -> Self {
        Self::new(mortgage.principal(), mortgage.interest_rate, mortgage.mortgage_term)
    }

    /// Level monthly payment: M = P r (1+r)^n / ((1+r)^n - 1)
    ///
    /// A zero rate amortizes straight-line (P / n). A zero-length loan is due in full.
    pub fn monthly_payment(&self) -> f64 {
        if self.months == 0 {
            return self.principal;
        }
        let n = self.months as f64;
        if self.monthly_rate == 0.0 {
            return self.principal / n;
        }
        let growth = (1.0 + self.monthly_rate).powf(n);
        self.principal * self.monthly_rate * growth / (growth - 1.0)
    }

    pub fn annual_payment(&self) -> f64 {
        self.monthly_payment() * 12.0
    }

    /// Outstanding principal after `months_elapsed` payments, floored at zero
    pub fn remaining_principal(&self, months_elapsed: u32) -> f64 {
        if months_elapsed >= self.months {
            return 0.0;
        }
        let k = months_elapsed as f64;
        let remaining = if self.monthly_rate == 0.0 {
            self.principal - self.monthly_payment() * k
        } else {
            let growth = (1.0 + self.monthly_rate).powf(k);
            self.principal * growth - self.monthly_payment() * (growth - 1.0) / self.monthly_rate
        };
        remaining.max(0.0)
    }
}
