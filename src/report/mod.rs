//! Report building.
//!
//! Applies both classifiers across a snapshot and exposes pure views over
//! the annotated rows:
//! - Aggregation into `Report` with per-state summary and fingerprint
//! - Filters, urgency sort and quick search
//! - Agent comparison and per-agent period selection
//! - Batch re-validation of controlled tools

pub mod aggregate;
pub mod context;
pub mod revalidation;
pub mod views;

pub use aggregate::*;
pub use context::*;
pub use revalidation::*;
pub use views::*;
