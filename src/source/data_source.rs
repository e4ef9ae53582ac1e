//! The data source interface.

use serde_json::Value;

use crate::error::SourceError;
use crate::logging::structured::LogContext;

/// Provider of worksheet rows.
///
/// Each call returns a consistent snapshot of one worksheet; the engine
/// does not retry. `ctx` prefixes any log line the source emits.
pub trait DataSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn read_sheet(&self, worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_sheet(&self, worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
        (**self).read_sheet(worksheet, ctx)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_sheet(&self, worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
        (**self).read_sheet(worksheet, ctx)
    }
}
