//! Certification (habilitation) alert classification.

use chrono::{Datelike, NaiveDate};

use crate::config::ComplianceRules;
use crate::logging::structured::LogContext;
use crate::model::Field;

use super::alert::AlertState;

/// Classify a certification expiry with the default rules.
pub fn classify_certification(expiry_date: &Field<NaiveDate>, today: NaiveDate) -> AlertState {
    classify_certification_with(
        &ComplianceRules::default(),
        expiry_date,
        today,
        &LogContext::new("adhoc"),
    )
}

/// Classify a certification expiry.
///
/// # Decision Tree (first match wins)
/// 1. Expiry absent -> Unknown
/// 2. Expiry unreadable -> FormatError
/// 3. From the planning month on, expiry in next calendar year -> PlanningNextYear
/// 4. Expiry on or before today -> Expired
/// 5. Otherwise -> Valid
pub fn classify_certification_with(
    rules: &ComplianceRules,
    expiry_date: &Field<NaiveDate>,
    today: NaiveDate,
    ctx: &LogContext,
) -> AlertState {
    let expiry = match expiry_date {
        Field::Absent => {
            log::debug!("{} CERT_STATE state=unknown reason=no_expiry", ctx);
            return AlertState::Unknown;
        }
        Field::Malformed(raw) => {
            log::warn!("{} CERT_FORMAT_ERROR field=expiry_date raw={:?}", ctx, raw);
            return AlertState::FormatError;
        }
        Field::Present(date) => *date,
    };

    let state = if today.month() >= rules.planning_start_month && expiry.year() == today.year() + 1
    {
        AlertState::PlanningNextYear
    } else if expiry <= today {
        AlertState::Expired
    } else {
        AlertState::Valid
    };

    log::debug!("{} CERT_STATE state={} expiry={}", ctx, state.code(), expiry);
    state
}
