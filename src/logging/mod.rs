//! Structured logging with report context.
//!
//! Every log line emitted while building a report carries the report id
//! and, where relevant, the row being classified.

pub mod structured;

pub use structured::*;
