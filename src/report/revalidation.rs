//! Batch re-validation of tools controlled today.
//!
//! Produces updated copies for the data source to write back; the input
//! snapshot is left untouched.

use chrono::NaiveDate;

use crate::logging::structured::LogContext;
use crate::model::{Field, ToolRecord};

/// Return copies of the selected tools with `last_control_date = today`.
///
/// Output follows snapshot order. Ids not found in the snapshot are logged
/// and ignored.
pub fn mark_controlled<S: AsRef<str>>(
    tools: &[ToolRecord],
    ids: &[S],
    today: NaiveDate,
    ctx: &LogContext,
) -> Vec<ToolRecord> {
    let wanted: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();

    for id in &wanted {
        if !tools.iter().any(|t| t.id == *id) {
            log::warn!("{} REVALIDATION_UNKNOWN_TOOL id={}", ctx, id);
        }
    }

    let updated: Vec<ToolRecord> = tools
        .iter()
        .filter(|t| wanted.contains(&t.id.as_str()))
        .map(|t| ToolRecord {
            last_control_date: Field::Present(today),
            ..t.clone()
        })
        .collect();

    log::info!(
        "{} REVALIDATION_COMPLETE requested={} updated={} date={}",
        ctx,
        ids.len(),
        updated.len(),
        today
    );

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::alert::AlertState;
    use crate::report::aggregate::build_report;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> Vec<ToolRecord> {
        vec![
            ToolRecord::new("T-1", "Palan")
                .with_last_control(ymd(2023, 1, 1))
                .with_period(12),
            ToolRecord::new("T-2", "Harnais").with_period(6),
            ToolRecord::new("T-3", "Multimètre")
                .with_last_control(ymd(2024, 9, 1))
                .with_period(12),
        ]
    }

    #[test]
    fn test_mark_controlled_updates_selection_only() {
        let tools = snapshot();
        let today = ymd(2024, 9, 15);
        let ctx = LogContext::new("test-report");

        let updated = mark_controlled(&tools, &["T-2", "T-1", "T-404"], today, &ctx);

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].id, "T-1");
        assert_eq!(updated[1].id, "T-2");
        assert!(updated.iter().all(|t| t.last_control_date == Field::Present(today)));
        assert_eq!(tools, snapshot());
    }

    #[test]
    fn test_revalidated_tools_become_conformant() {
        let today = ymd(2024, 9, 15);
        let ctx = LogContext::new("test-report");
        let updated = mark_controlled(&snapshot(), &["T-1", "T-2"], today, &ctx);

        let report = build_report(&updated, &[], today);
        assert!(report.tools.iter().all(|t| t.state == AlertState::Conformant));
    }
}
