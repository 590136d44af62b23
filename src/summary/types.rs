//! Summary document types
//!
//! Mirrors the JSON document produced out-of-band for the dashboard.
//! Keys are camelCase on the wire.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The pre-computed analytics summary consumed by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Customer head counts
    pub customers: CustomerCounts,
    /// Customers per partner business type, in document order
    pub business_types: BusinessTypes,
    /// Customers per staff member, in display order
    #[serde(default)]
    pub staff_stats: Vec<StaffStat>,
    /// Customers with payments in the current reporting period
    #[serde(default)]
    pub paid_customers: Vec<PaidCustomer>,
    /// Enterprise customer names, when the producer supplies them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_customers: Option<Vec<String>>,
}

/// Customer counts by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerCounts {
    pub total: u64,
    pub individual: u64,
    pub enterprise: u64,
}

/// Customers attributed to one staff member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffStat {
    pub name: String,
    pub count: u64,
}

/// A customer with a recorded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidCustomer {
    pub name: String,
    /// Responsible staff member
    pub staff: String,
    pub amount: f64,
}

/// One labelled category count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Ordered business-type breakdown.
///
/// Deserializes from either a JSON object (`{"label": count, ...}`, key order
/// preserved) or an array of `{label, count}` records. Serializes as an object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusinessTypes(pub Vec<CategoryCount>);

impl BusinessTypes {
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count for a label, if present
    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|c| c.label == label).map(|c| c.count)
    }
}

impl From<Vec<CategoryCount>> for BusinessTypes {
    fn from(items: Vec<CategoryCount>) -> Self {
        Self(items)
    }
}

impl Serialize for BusinessTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for item in &self.0 {
            map.serialize_entry(&item.label, &item.count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BusinessTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BusinessTypesVisitor;

        impl<'de> Visitor<'de> for BusinessTypesVisitor {
            type Value = BusinessTypes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of label to count or a list of {label, count}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(access.size_hint().unwrap_or(2));
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    if items.iter().any(|c: &CategoryCount| c.label == label) {
                        return Err(de::Error::custom(format!(
                            "duplicate business type '{}'",
                            label
                        )));
                    }
                    items.push(CategoryCount { label, count });
                }
                Ok(BusinessTypes(items))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(access.size_hint().unwrap_or(2));
                while let Some(item) = access.next_element::<CategoryCount>()? {
                    items.push(item);
                }
                Ok(BusinessTypes(items))
            }
        }

        deserializer.deserialize_any(BusinessTypesVisitor)
    }
}

impl Summary {
    /// Parse a summary from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Number of customers with a payment this period
    pub fn paid_count(&self) -> u64 {
        self.paid_customers.len() as u64
    }
}
