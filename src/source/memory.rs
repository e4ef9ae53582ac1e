//! In-memory data source.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::SourceError;
use crate::logging::structured::LogContext;

use super::data_source::DataSource;

/// Worksheets held in memory, e.g. rows pushed by the dashboard process.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Vec<Value>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, worksheet: &str, rows: Vec<Value>) -> Self {
        self.sheets.insert(worksheet.to_string(), rows);
        self
    }

    pub fn sheet_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sheets.keys().cloned().collect();
        names.sort();
        names
    }
}

impl DataSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn read_sheet(&self, worksheet: &str, _ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
        self.sheets
            .get(worksheet)
            .cloned()
            .ok_or_else(|| SourceError::SheetMissing(worksheet.to_string()))
    }
}
