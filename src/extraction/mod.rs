//! Row extraction module.
//!
//! Turns loosely typed worksheet rows (JSON objects) into typed records,
//! keeping absent and malformed cells distinguishable.

pub mod coerce;
pub mod json_path;
pub mod row_json;
pub mod rows;

pub use coerce::*;
pub use json_path::*;
pub use row_json::*;
pub use rows::*;
