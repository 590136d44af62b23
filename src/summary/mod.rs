//! Summary Document
//!
//! The single JSON document the dashboard is built from.
//!
//! - **types**: the document shape
//! - **loader**: one read from a file or HTTP source
//! - **validate**: consistency checks for the producer of the document

mod error;
mod loader;
mod types;
mod validate;

pub use error::{LoadError, LoadResult};
pub use loader::{LoaderConfig, SummaryLoader, SummarySource};
pub use types::{
    BusinessTypes, CategoryCount, CustomerCounts, PaidCustomer, StaffStat, Summary,
};
pub use validate::{validate, Severity, ValidationIssue, ValidationReport};
