//! Structured logging utilities.
//!
//! Log lines follow `<context> EVENT_NAME key=value ...` so a whole report
//! run can be grepped by its id.

use std::fmt;

/// Logging context for one report run.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub report_id: String,
    pub row: Option<String>,
}

impl LogContext {
    pub fn new(report_id: &str) -> Self {
        Self {
            report_id: report_id.to_string(),
            row: None,
        }
    }

    pub fn with_row(&self, row: &str) -> Self {
        Self {
            report_id: self.report_id.clone(),
            row: Some(row.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.row {
            Some(row) => write!(f, "[report={}] [row={}]", self.report_id, row),
            None => write!(f, "[report={}]", self.report_id),
        }
    }
}

/// Install `env_logger` once; later calls are no-ops.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("report-123");
        assert_eq!(format!("{}", ctx), "[report=report-123]");

        let ctx_with_row = ctx.with_row("T-042");
        assert_eq!(
            format!("{}", ctx_with_row),
            "[report=report-123] [row=T-042]"
        );
    }

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger();
        init_logger();
    }
}
