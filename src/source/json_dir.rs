//! Directory of JSON exports, one `<worksheet>.json` array per sheet.
//!
//! Used as the offline copy of the workbook when the spreadsheet service is
//! unreachable.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SourceError;
use crate::logging::structured::LogContext;

use super::data_source::DataSource;

#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sheet_path(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{}.json", worksheet))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DataSource for JsonDirSource {
    fn name(&self) -> &str {
        "json_dir"
    }

    fn read_sheet(&self, worksheet: &str, ctx: &LogContext) -> Result<Vec<Value>, SourceError> {
        let path = self.sheet_path(worksheet);
        let raw = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceError::SheetMissing(worksheet.to_string()),
            _ => SourceError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let rows: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
                worksheet: worksheet.to_string(),
                source,
            })?;

        log::debug!(
            "{} SHEET_READ source=json_dir worksheet={} rows={} path={}",
            ctx,
            worksheet,
            rows.len(),
            path.display()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sheet_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Outillage.json"),
            r#"[{"id": "T-1", "Périodicité": "6"}, {"id": "T-2"}]"#,
        )
        .unwrap();

        let source = JsonDirSource::new(dir.path());
        let rows = source.read_sheet("Outillage", &LogContext::new("t")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "T-1");
    }

    #[test]
    fn test_missing_file_is_sheet_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonDirSource::new(dir.path()).read_sheet("Agents", &LogContext::new("t")).unwrap_err();
        assert!(matches!(err, SourceError::SheetMissing(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Agents.json"), r#"{"not": "an array"}"#).unwrap();

        let err = JsonDirSource::new(dir.path()).read_sheet("Agents", &LogContext::new("t")).unwrap_err();
        assert!(matches!(err, SourceError::Parse { worksheet, .. } if worksheet == "Agents"));
    }
}
