//! Record model.
//!
//! Read-only snapshots of the three worksheets. Derived values (due dates,
//! alert states) never live here; see `report`.

pub mod records;

pub use records::*;
