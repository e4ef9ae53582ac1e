//! Compliance status classification.
//!
//! Pure decision functions turning record fields plus an injected `today`
//! into an `AlertState`:
//! - Tools: inspection due date vs. alert window, non-conformance override
//! - Certifications: expiry vs. today, with next-year planning from September

pub mod alert;
pub mod certification;
pub mod flag_detection;
pub mod tool;

pub use alert::*;
pub use certification::*;
pub use flag_detection::*;
pub use tool::*;
