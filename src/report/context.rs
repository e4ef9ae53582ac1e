//! Report context management.
//!
//! Carries the injected reference date and rules for one report run.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::ComplianceRules;
use crate::logging::structured::LogContext;

/// Context for one report run.
///
/// `report_id` only correlates log lines; it never appears in a `Report`.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub report_id: String,
    pub today: NaiveDate,
    pub rules: ComplianceRules,
}

impl ReportContext {
    pub fn new(today: NaiveDate) -> Self {
        let report_id = format!("report-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            report_id,
            today,
            rules: ComplianceRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ComplianceRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.report_id)
    }

    /// Log context for a single row.
    pub fn row_context(&self, row: &str) -> LogContext {
        LogContext::new(&self.report_id).with_row(row)
    }
}
