//! Tool compliance classification.
//!
//! Determines the inspection status of a tool from its last control date,
//! its inspection period and its NC flag.

use chrono::{Months, NaiveDate};

use crate::config::ComplianceRules;
use crate::logging::structured::LogContext;
use crate::model::{Field, StatusFlag, ToolRecord};

use super::alert::AlertState;

/// Derived inspection values for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolAssessment {
    /// Set whenever the due date is computable, whatever the final state.
    pub due_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
    pub state: AlertState,
}

impl ToolAssessment {
    fn terminal(state: AlertState) -> Self {
        Self {
            due_date: None,
            days_remaining: None,
            state,
        }
    }
}

/// Add calendar months, clamping to the last day of the target month.
///
/// `None` only when the result leaves chrono's representable range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Classify a tool with the default rules.
pub fn classify_tool(
    status_flag: StatusFlag,
    last_control_date: &Field<NaiveDate>,
    inspection_period_months: &Field<u32>,
    today: NaiveDate,
) -> AlertState {
    classify_tool_with(
        &ComplianceRules::default(),
        status_flag,
        last_control_date,
        inspection_period_months,
        today,
    )
}

pub fn classify_tool_with(
    rules: &ComplianceRules,
    status_flag: StatusFlag,
    last_control_date: &Field<NaiveDate>,
    inspection_period_months: &Field<u32>,
    today: NaiveDate,
) -> AlertState {
    assess_tool(
        rules,
        status_flag,
        last_control_date,
        inspection_period_months,
        today,
        &LogContext::new("adhoc"),
    )
    .state
}

/// Assess a tool record.
pub fn assess_tool_record(
    rules: &ComplianceRules,
    tool: &ToolRecord,
    today: NaiveDate,
    ctx: &LogContext,
) -> ToolAssessment {
    assess_tool(
        rules,
        tool.status_flag,
        &tool.last_control_date,
        &tool.inspection_period_months,
        today,
        ctx,
    )
}

/// Full tool assessment.
///
/// # Decision Tree (first match wins)
/// 1. Last control absent -> Unknown
/// 2. Last control unreadable -> FormatError
/// 3. Period absent -> Unknown
/// 4. Period unreadable or zero -> FormatError
/// 5. Due date out of calendar range -> FormatError
/// 6. Flagged NC -> NonConformant
/// 7. Due date reached or passed -> Expired
/// 8. Within alert window (30 days up to 6 months period, else 90) -> Alert(days)
/// 9. Otherwise -> Conformant
pub fn assess_tool(
    rules: &ComplianceRules,
    status_flag: StatusFlag,
    last_control_date: &Field<NaiveDate>,
    inspection_period_months: &Field<u32>,
    today: NaiveDate,
    ctx: &LogContext,
) -> ToolAssessment {
    let last_control = match last_control_date {
        Field::Absent => {
            log::debug!("{} TOOL_STATE state=unknown reason=no_last_control", ctx);
            return ToolAssessment::terminal(AlertState::Unknown);
        }
        Field::Malformed(raw) => {
            log::warn!("{} TOOL_FORMAT_ERROR field=last_control_date raw={:?}", ctx, raw);
            return ToolAssessment::terminal(AlertState::FormatError);
        }
        Field::Present(date) => *date,
    };

    let period = match inspection_period_months {
        Field::Absent => {
            log::debug!("{} TOOL_STATE state=unknown reason=no_period", ctx);
            return ToolAssessment::terminal(AlertState::Unknown);
        }
        Field::Malformed(raw) => {
            log::warn!("{} TOOL_FORMAT_ERROR field=inspection_period_months raw={:?}", ctx, raw);
            return ToolAssessment::terminal(AlertState::FormatError);
        }
        Field::Present(0) => {
            log::warn!("{} TOOL_FORMAT_ERROR field=inspection_period_months raw=0", ctx);
            return ToolAssessment::terminal(AlertState::FormatError);
        }
        Field::Present(months) => *months,
    };

    let Some(due_date) = add_months(last_control, period) else {
        log::warn!(
            "{} TOOL_FORMAT_ERROR reason=due_date_overflow last_control={} period={}",
            ctx,
            last_control,
            period
        );
        return ToolAssessment::terminal(AlertState::FormatError);
    };
    let days_remaining = (due_date - today).num_days();

    let state = if status_flag == StatusFlag::NonConformant {
        AlertState::NonConformant
    } else if days_remaining <= 0 {
        AlertState::Expired
    } else if days_remaining <= rules.alert_threshold_days(period) {
        AlertState::Alert(days_remaining)
    } else {
        AlertState::Conformant
    };

    log::debug!(
        "{} TOOL_STATE state={} due_date={} days_remaining={}",
        ctx,
        state.code(),
        due_date,
        days_remaining
    );

    ToolAssessment {
        due_date: Some(due_date),
        days_remaining: Some(days_remaining),
        state,
    }
}
