//! View Model
//!
//! Everything the page shows, computed from one [`Summary`]. Building a view
//! is a pure function of the summary and the page configuration.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::dashboard::chart::{BarChart, BarGeometry, PieChart, PieGeometry};
use crate::dashboard::series::{
    business_type_series, customer_type_series, format_fixed, percentage,
};
use crate::summary::Summary;

/// Headline number card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: u64,
    pub caption: String,
    /// Accent class for the value
    pub accent: &'static str,
}

/// One row of the paid-customer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaidCustomerRow {
    pub name: String,
    pub staff: String,
    /// Currency-prefixed amount with two decimals
    pub amount: String,
}

/// The enterprise customer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnterpriseSection {
    pub count: u64,
    pub names: Vec<String>,
}

/// The fully derived dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<SummaryCard>,
    pub customer_types: PieChart,
    pub business_types: PieChart,
    pub staff: BarChart,
    pub paid_customers: Vec<PaidCustomerRow>,
    pub enterprise: Option<EnterpriseSection>,
}

impl DashboardView {
    pub fn build(summary: &Summary, config: &DashboardConfig) -> Self {
        let customers = summary.customers;
        let paid = summary.paid_count();

        let cards = vec![
            SummaryCard {
                title: "总客户数",
                value: customers.total,
                caption: "全部来自官网平台".to_string(),
                accent: "accent-white",
            },
            SummaryCard {
                title: "本月有消费",
                value: paid,
                caption: format!("消费活跃度 {}%", percentage(paid, customers.total)),
                accent: "accent-emerald",
            },
            SummaryCard {
                title: "企业客户",
                value: customers.enterprise,
                caption: format!("占比 {}%", percentage(customers.enterprise, customers.total)),
                accent: "accent-cyan",
            },
        ];

        let pie = PieGeometry::default();
        let customer_types =
            PieChart::build("👤 客户类型分布", &customer_type_series(summary), 0, &pie);
        let business_types =
            PieChart::build("💼 业务类型分布", &business_type_series(summary), 2, &pie);

        let staff = BarChart::build(
            "👥 员工客户数统计",
            &summary.staff_stats,
            &BarGeometry::default(),
        );

        let paid_customers = summary
            .paid_customers
            .iter()
            .map(|c| PaidCustomerRow {
                name: c.name.clone(),
                staff: c.staff.clone(),
                amount: format!("{}{}", config.currency_symbol, format_fixed(c.amount, 2)),
            })
            .collect();

        let enterprise = (customers.enterprise > 0).then(|| EnterpriseSection {
            count: customers.enterprise,
            names: summary
                .enterprise_customers
                .clone()
                .unwrap_or_else(|| config.enterprise_customers.clone()),
        });

        Self {
            cards,
            customer_types,
            business_types,
            staff,
            paid_customers,
            enterprise,
        }
    }
}
