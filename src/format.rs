//! Display formatting for balances and trajectory event labels

use crate::projection::{round_to_dollar, LedgerEvent};

/// Whole dollars with thousands separators: `$1,234,567`, `-$1,234`
pub fn format_currency(value: f64) -> String {
    let dollars = round_to_dollar(value);
    let grouped = group_thousands(dollars.unsigned_abs());
    if dollars < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Compact matrix-cell form: `$1.23B`, `$4.56M`, `$7.89K`, `$950`
pub fn format_compact(balance: i64) -> String {
    let value = balance as f64;
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${balance}")
    }
}

/// Percentage without trailing zeros: `15%`, `12.5%`
pub fn format_rate(rate: f64) -> String {
    format!("{rate}%")
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

fn or_default<'a>(description: &'a str, fallback: &'a str) -> &'a str {
    if description.trim().is_empty() {
        fallback
    } else {
        description
    }
}

/// Human-readable label for a trajectory event
pub fn event_label(event: &LedgerEvent<'_>) -> String {
    match *event {
        LedgerEvent::IncomeChange { income } => format!("Income: {}", format_currency(income)),
        LedgerEvent::SavingsRateChange { rate } => format!("Savings Rate: {}", format_rate(rate)),
        LedgerEvent::Purchase { description, amount } => {
            format!("{}: -{}", or_default(description, "Purchase"), format_currency(amount))
        }
        LedgerEvent::MortgageDown { description, amount } => format!(
            "{} down payment: -{}",
            or_default(description, "Home"),
            format_currency(amount)
        ),
        LedgerEvent::MortgagePayment { description, annual_payment } => format!(
            "{} mortgage: -{}/yr",
            or_default(description, "Home"),
            format_currency(annual_payment)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(100_005.0), "$100,005");
        assert_eq!(format_currency(-1_234.0), "-$1,234");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950), "$950");
        assert_eq!(format_compact(7_890), "$7.89K");
        assert_eq!(format_compact(277_941), "$277.94K");
        assert_eq!(format_compact(4_560_000), "$4.56M");
        assert_eq!(format_compact(1_230_000_000), "$1.23B");
        assert_eq!(format_compact(-2_500_000), "$-2.50M");
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(event_label(&LedgerEvent::IncomeChange { income: 60_000.0 }), "Income: $60,000");
        assert_eq!(event_label(&LedgerEvent::SavingsRateChange { rate: 12.5 }), "Savings Rate: 12.5%");
        assert_eq!(event_label(&LedgerEvent::SavingsRateChange { rate: 20.0 }), "Savings Rate: 20%");
        assert_eq!(
            event_label(&LedgerEvent::Purchase { description: "", amount: 50_000.0 }),
            "Purchase: -$50,000"
        );
        assert_eq!(
            event_label(&LedgerEvent::Purchase { description: "car", amount: 30_000.0 }),
            "car: -$30,000"
        );
        assert_eq!(
            event_label(&LedgerEvent::MortgageDown { description: "Condo", amount: 100_000.0 }),
            "Condo down payment: -$100,000"
        );
        assert_eq!(
            event_label(&LedgerEvent::MortgagePayment { description: "", annual_payment: 30_339.27 }),
            "Home mortgage: -$30,339/yr"
        );
    }
}
