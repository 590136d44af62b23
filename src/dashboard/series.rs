//! Series Builder
//!
//! Turns raw counts into percentage-annotated slices for the pie charts and
//! their legends. All percentages are taken over `customers.total`.

use serde::Serialize;

use crate::summary::Summary;

/// Legend label for individual customers
pub const INDIVIDUAL_LABEL: &str = "个人";
/// Legend label for enterprise customers
pub const ENTERPRISE_LABEL: &str = "企业";

/// One labelled slice of a pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: u64,
    /// Share of the total with exactly one decimal, without the `%` sign
    pub percentage: String,
}

impl ChartSlice {
    pub fn new(label: impl Into<String>, value: u64, total: u64) -> Self {
        Self {
            label: label.into(),
            value,
            percentage: percentage(value, total),
        }
    }
}

/// Enough fractional digits to print any `f64` exactly
const EXACT_DIGITS: usize = 1100;

/// Format `value` with exactly `decimals` fractional digits.
///
/// Rounds on the exact binary value, ties away from zero, so `0.015`
/// (stored just below the tie) gives `"0.01"` while `0.125` gives `"0.13"`.
/// Non-finite input formats as zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, 0.0);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let point = exact.find('.').unwrap_or(exact.len());
    let cut = (point + 1 + decimals).min(exact.len());
    let (kept, rest) = exact.split_at(cut);
    let kept = kept.trim_end_matches('.');

    let magnitude = if rest.as_bytes().first().is_some_and(|d| *d >= b'5') {
        round_up_last_digit(kept)
    } else {
        kept.to_string()
    };

    let is_zero = magnitude.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}

/// Add one unit in the last place of a plain decimal string, carrying left
fn round_up_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    bytes.into_iter().map(char::from).collect()
}

/// `part / total * 100` with one decimal; `"0.0"` when `total` is zero
pub fn percentage(part: u64, total: u64) -> String {
    if total == 0 {
        return format_fixed(0.0, 1);
    }
    format_fixed(part as f64 / total as f64 * 100.0, 1)
}

/// Individual vs enterprise customers
pub fn customer_type_series(summary: &Summary) -> Vec<ChartSlice> {
    let customers = &summary.customers;
    vec![
        ChartSlice::new(INDIVIDUAL_LABEL, customers.individual, customers.total),
        ChartSlice::new(ENTERPRISE_LABEL, customers.enterprise, customers.total),
    ]
}

/// One slice per business type, in document order
pub fn business_type_series(summary: &Summary) -> Vec<ChartSlice> {
    let total = summary.customers.total;
    summary
        .business_types
        .iter()
        .map(|c| ChartSlice::new(c.label.clone(), c.count, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{BusinessTypes, CategoryCount, CustomerCounts};

    fn summary(total: u64, individual: u64, enterprise: u64) -> Summary {
        Summary {
            customers: CustomerCounts {
                total,
                individual,
                enterprise,
            },
            business_types: BusinessTypes::from(vec![
                CategoryCount::new("代理合作伙伴", 5),
                CategoryCount::new("代售合作伙伴", 5),
            ]),
            staff_stats: Vec::new(),
            paid_customers: Vec::new(),
            enterprise_customers: None,
        }
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(70.0, 1), "70.0");
        assert_eq!(format_fixed(99.5, 2), "99.50");
        assert_eq!(format_fixed(6.25, 1), "6.3");
        assert_eq!(format_fixed(100.0 / 3.0, 1), "33.3");
        assert_eq!(format_fixed(-0.01, 1), "0.0");
        assert_eq!(format_fixed(f64::NAN, 1), "0.0");
        assert_eq!(format_fixed(f64::INFINITY, 2), "0.00");
    }

    #[test]
    fn test_format_fixed_rounds_stored_value() {
        // 0.015 is stored just below the tie, 8.345 just above it
        assert_eq!(format_fixed(0.015, 2), "0.01");
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(8.345, 2), "8.35");
        // exact ties go away from zero
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(560.25, 1), "560.3");
        assert_eq!(format_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn test_format_fixed_carries() {
        assert_eq!(format_fixed(9.996, 2), "10.00");
        assert_eq!(format_fixed(99.95, 1), "100.0");
        assert_eq!(format_fixed(0.5, 0), "1");
        assert_eq!(format_fixed(1234.0, 0), "1234");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(7, 10), "70.0");
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(2, 3), "66.7");
        assert_eq!(percentage(10, 10), "100.0");
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), "0.0");
        assert_eq!(percentage(5, 0), "0.0");
    }

    #[test]
    fn test_customer_type_series() {
        let slices = customer_type_series(&summary(10, 7, 3));
        assert_eq!(slices.len(), 2);
        assert_eq!(
            slices[0],
            ChartSlice {
                label: INDIVIDUAL_LABEL.to_string(),
                value: 7,
                percentage: "70.0".to_string(),
            }
        );
        assert_eq!(slices[1].label, ENTERPRISE_LABEL);
        assert_eq!(slices[1].percentage, "30.0");
    }

    #[test]
    fn test_business_type_series_uses_customer_total() {
        let slices = business_type_series(&summary(20, 20, 0));
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "代理合作伙伴");
        assert_eq!(slices[0].percentage, "25.0");
        assert_eq!(slices[1].percentage, "25.0");
    }

    #[test]
    fn test_zero_total_series() {
        let slices = customer_type_series(&summary(0, 0, 0));
        assert!(slices.iter().all(|s| s.percentage == "0.0"));
    }

    #[test]
    fn test_customer_percentages_sum_to_hundred() {
        for total in 1..=120u64 {
            for individual in 0..=total {
                let slices = customer_type_series(&summary(total, individual, total - individual));
                let sum: f64 = slices
                    .iter()
                    .map(|s| s.percentage.parse::<f64>().unwrap())
                    .sum();
                assert!(
                    (sum - 100.0).abs() <= 0.1 + 1e-9,
                    "total={} individual={} sum={}",
                    total,
                    individual,
                    sum
                );
            }
        }
    }
}
