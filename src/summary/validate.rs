//! Data-source checks
//!
//! The renderer trusts the summary as given. These checks exist so the
//! producer of the document can be verified separately (`volcano-cli validate`).

use serde::Serialize;
use std::fmt;

use crate::summary::types::Summary;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single inconsistency found in a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// individual + enterprise != total
    CustomerTotalMismatch {
        total: u64,
        individual: u64,
        enterprise: u64,
    },
    /// Amount is negative, NaN or infinite
    InvalidAmount { customer: String, amount: f64 },
    /// More paying customers than customers
    PaidExceedsTotal { paid: u64, total: u64 },
    /// Staff counts do not add up to the customer total
    StaffTotalMismatch { staff_total: u64, total: u64 },
    /// Supplied enterprise names disagree with the enterprise count
    EnterpriseListMismatch { listed: usize, enterprise: u64 },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::CustomerTotalMismatch { .. }
            | ValidationIssue::InvalidAmount { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::CustomerTotalMismatch {
                total,
                individual,
                enterprise,
            } => write!(
                f,
                "individual ({}) + enterprise ({}) != total ({})",
                individual, enterprise, total
            ),
            ValidationIssue::InvalidAmount { customer, amount } => {
                write!(f, "invalid amount {} for customer '{}'", amount, customer)
            }
            ValidationIssue::PaidExceedsTotal { paid, total } => {
                write!(f, "{} paid customers exceed total of {}", paid, total)
            }
            ValidationIssue::StaffTotalMismatch { staff_total, total } => write!(
                f,
                "staff counts sum to {} but total is {}",
                staff_total, total
            ),
            ValidationIssue::EnterpriseListMismatch { listed, enterprise } => write!(
                f,
                "{} enterprise names listed for {} enterprise customers",
                listed, enterprise
            ),
        }
    }
}

/// Result of validating one summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no error-level issue was found
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }
}

/// Check a summary for internal consistency
pub fn validate(summary: &Summary) -> ValidationReport {
    let mut issues = Vec::new();
    let customers = summary.customers;

    if customers.individual.checked_add(customers.enterprise) != Some(customers.total) {
        issues.push(ValidationIssue::CustomerTotalMismatch {
            total: customers.total,
            individual: customers.individual,
            enterprise: customers.enterprise,
        });
    }

    for customer in &summary.paid_customers {
        if !customer.amount.is_finite() || customer.amount < 0.0 {
            issues.push(ValidationIssue::InvalidAmount {
                customer: customer.name.clone(),
                amount: customer.amount,
            });
        }
    }

    if summary.paid_count() > customers.total {
        issues.push(ValidationIssue::PaidExceedsTotal {
            paid: summary.paid_count(),
            total: customers.total,
        });
    }

    if !summary.staff_stats.is_empty() {
        let staff_total = summary
            .staff_stats
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.count));
        if staff_total != customers.total {
            issues.push(ValidationIssue::StaffTotalMismatch {
                staff_total,
                total: customers.total,
            });
        }
    }

    if let Some(names) = &summary.enterprise_customers {
        if names.len() as u64 != customers.enterprise {
            issues.push(ValidationIssue::EnterpriseListMismatch {
                listed: names.len(),
                enterprise: customers.enterprise,
            });
        }
    }

    ValidationReport { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::types::{BusinessTypes, CustomerCounts, PaidCustomer, StaffStat};

    fn summary(total: u64, individual: u64, enterprise: u64) -> Summary {
        Summary {
            customers: CustomerCounts {
                total,
                individual,
                enterprise,
            },
            business_types: BusinessTypes::default(),
            staff_stats: Vec::new(),
            paid_customers: Vec::new(),
            enterprise_customers: None,
        }
    }

    #[test]
    fn test_consistent_summary_is_clean() {
        let mut s = summary(10, 7, 3);
        s.staff_stats = vec![
            StaffStat { name: "A".into(), count: 4 },
            StaffStat { name: "B".into(), count: 6 },
        ];
        let report = validate(&s);
        assert!(report.is_valid());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_total_mismatch_is_error() {
        let report = validate(&summary(10, 7, 2));
        assert!(!report.is_valid());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(
            report.issues[0].to_string(),
            "individual (7) + enterprise (2) != total (10)"
        );
    }

    #[test]
    fn test_invalid_amounts() {
        let mut s = summary(2, 2, 0);
        s.paid_customers = vec![
            PaidCustomer { name: "neg".into(), staff: "A".into(), amount: -1.0 },
            PaidCustomer { name: "nan".into(), staff: "A".into(), amount: f64::NAN },
        ];
        let report = validate(&s);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut s = summary(1, 0, 1);
        s.paid_customers = vec![
            PaidCustomer { name: "a".into(), staff: "A".into(), amount: 1.0 },
            PaidCustomer { name: "b".into(), staff: "A".into(), amount: 2.0 },
        ];
        s.staff_stats = vec![StaffStat { name: "A".into(), count: 5 }];
        s.enterprise_customers = Some(vec![]);

        let report = validate(&s);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 3);
    }

    #[test]
    fn test_huge_staff_counts_saturate() {
        let mut s = summary(10, 7, 3);
        s.staff_stats = vec![
            StaffStat { name: "A".into(), count: u64::MAX },
            StaffStat { name: "B".into(), count: 1 },
        ];

        let report = validate(&s);
        assert_eq!(
            report.issues,
            vec![ValidationIssue::StaffTotalMismatch {
                staff_total: u64::MAX,
                total: 10,
            }]
        );
    }

    #[test]
    fn test_shipped_data_is_consistent() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/public/data.json");
        let text = std::fs::read_to_string(path).unwrap();
        let summary = Summary::from_json(&text).unwrap();

        let report = validate(&summary);
        assert!(report.is_valid(), "{:?}", report.issues);
        assert_eq!(report.warnings().count(), 0, "{:?}", report.issues);
    }
}
