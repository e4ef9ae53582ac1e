//! Primary/secondary source chaining.

use serde_json::Value;

use crate::error::SourceError;
use crate::logging::structured::LogContext;

use super::data_source::DataSource;

/// Reads each worksheet from `primary`, falling back to `secondary` when the
/// primary read fails.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P: DataSource, S: DataSource> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: DataSource, S: DataSource> DataSource for FallbackSource<P, S> {
    fn name(&self) -> &str {
        "fallback"
    }

    fn read_sheet(&self, worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
        match self.primary.read_sheet(worksheet, ctx) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                log::warn!(
                    "{} SOURCE_FAILOVER worksheet={} primary={} secondary={} error={}",
                    ctx,
                    worksheet,
                    self.primary.name(),
                    self.secondary.name(),
                    e
                );
                self.secondary.read_sheet(worksheet, ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemorySource;
    use serde_json::json;
    use std::cell::RefCell;

    struct Offline;

    impl DataSource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn read_sheet(&self, _worksheet: &str, _ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
            Err(anyhow::anyhow!("connection lost").into())
        }
    }

    /// Records the report id each read was issued under.
    #[derive(Default)]
    struct Recording {
        seen: RefCell<Vec<String>>,
    }

    impl DataSource for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn read_sheet(&self, _worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
            self.seen.borrow_mut().push(ctx.report_id.clone());
            Ok(Vec::new())
        }
    }

    fn ctx() -> LogContext {
        LogContext::new("report-abc")
    }

    #[test]
    fn test_primary_wins_when_available() {
        let primary = MemorySource::new().with_sheet("Agents", vec![json!({"Nom": "A"})]);
        let secondary = MemorySource::new().with_sheet("Agents", vec![]);

        let source = FallbackSource::new(primary, secondary);
        assert_eq!(source.read_sheet("Agents", &ctx()).unwrap().len(), 1);
    }

    #[test]
    fn test_secondary_used_on_failure() {
        let secondary = MemorySource::new().with_sheet("Agents", vec![json!({"Nom": "B"})]);

        let source = FallbackSource::new(Offline, secondary);
        let rows = source.read_sheet("Agents", &ctx()).unwrap();
        assert_eq!(rows[0]["Nom"], "B");
    }

    #[test]
    fn test_both_failing_returns_secondary_error() {
        let source = FallbackSource::new(Offline, MemorySource::new());
        let err = source.read_sheet("Agents", &ctx()).unwrap_err();
        assert!(matches!(err, SourceError::SheetMissing(_)));
    }

    #[test]
    fn test_failover_keeps_report_context() {
        let secondary = Recording::default();
        let source = FallbackSource::new(Offline, &secondary);

        source.read_sheet("Outillage", &ctx()).unwrap();
        assert_eq!(*secondary.seen.borrow(), vec!["report-abc".to_string()]);
    }
}
