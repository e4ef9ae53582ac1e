//! GMAO Compliance - Compliance status engine
//!
//! Derives actionable status labels for two regulated entity classes:
//! tools subject to periodic inspection and personnel habilitations with an
//! expiry date. The engine is pure: every call takes an explicit `today`,
//! borrows its input rows and returns a fresh annotated projection.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `model` - Source records and the `Field` absent/present/malformed cell
//! - `extraction` - Worksheet row parsing with column aliases and lenient coercion
//! - `classification` - Tool and certification classifiers, `AlertState`
//! - `report` - Aggregation, summary, fingerprint and dashboard views
//! - `source` - Data source interface, fallback chaining, snapshot loading
//! - `config` - Rules, column aliases and worksheet names
//! - `logging` - Structured logging with report context
//! - `python` - PyO3 bindings (feature `python`)
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use gmao_compliance::classification::AlertState;
//! use gmao_compliance::model::{CertificationRecord, Field, ToolRecord};
//! use gmao_compliance::report::build_report;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
//! let tools = vec![ToolRecord::new("T-1", "Harnais")
//!     .with_last_control(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
//!     .with_period(6)];
//! let certs = vec![CertificationRecord::new(
//!     "Martin",
//!     "B1V",
//!     Field::Present(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
//! )];
//!
//! let report = build_report(&tools, &certs, today);
//! assert_eq!(report.tools[0].state, AlertState::Alert(16));
//! assert_eq!(report.certifications[0].state, AlertState::PlanningNextYear);
//! ```

pub mod classification;
pub mod config;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod model;
pub mod report;
pub mod source;

#[cfg(feature = "python")]
mod python;

pub use classification::{classify_certification, classify_tool, AlertState};
pub use config::{ComplianceRules, ReportConfig};
pub use error::{ConfigError, ReportError, SourceError};
pub use model::{AgentRecord, CertificationRecord, Field, StatusFlag, ToolRecord};
pub use report::{build_report, Report};
pub use source::DataSource;
