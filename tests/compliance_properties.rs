//! Property tests for the classifiers and the report builder.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use gmao_compliance::classification::{add_months, classify_certification, classify_tool, AlertState};
use gmao_compliance::extraction::coerce_months;
use gmao_compliance::model::{CertificationRecord, Field, StatusFlag, ToolRecord};
use gmao_compliance::report::build_report;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Dates between 2000-01-01 and roughly 2050.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..18_250).prop_map(|offset| ymd(2000, 1, 1) + Duration::days(offset))
}

fn any_flag() -> impl Strategy<Value = StatusFlag> {
    prop_oneof![Just(StatusFlag::Normal), Just(StatusFlag::NonConformant)]
}

fn any_period_field() -> impl Strategy<Value = Field<u32>> {
    prop_oneof![
        Just(Field::Absent),
        (1u32..=60).prop_map(Field::Present),
        "[a-z]{1,6}".prop_map(Field::Malformed),
    ]
}

fn any_expiry_field() -> impl Strategy<Value = Field<NaiveDate>> {
    prop_oneof![
        Just(Field::Absent),
        any_date().prop_map(Field::Present),
        "[a-z/]{1,8}".prop_map(Field::Malformed),
    ]
}

fn any_tool() -> impl Strategy<Value = ToolRecord> {
    (
        "T-[0-9]{1,4}",
        any_flag(),
        prop_oneof![Just(Field::Absent), any_date().prop_map(Field::Present)],
        any_period_field(),
    )
        .prop_map(|(id, flag, last_control, period)| ToolRecord {
            name: format!("Outil {}", id),
            id,
            status_flag: flag,
            last_control_date: last_control,
            inspection_period_months: period,
        })
}

fn any_cert() -> impl Strategy<Value = CertificationRecord> {
    ("[A-Z][a-z]{2,8}", "[A-Z0-9]{2,4}", any_expiry_field())
        .prop_map(|(agent, kind, expiry)| CertificationRecord::new(&agent, &kind, expiry))
}

proptest! {
    #[test]
    fn absent_last_control_is_always_unknown(
        flag in any_flag(),
        period in any_period_field(),
        today in any_date(),
    ) {
        prop_assert_eq!(classify_tool(flag, &Field::Absent, &period, today), AlertState::Unknown);
    }

    #[test]
    fn absent_expiry_is_always_unknown(today in any_date()) {
        prop_assert_eq!(classify_certification(&Field::Absent, today), AlertState::Unknown);
    }

    #[test]
    fn non_conformant_flag_always_wins(
        last_control in any_date(),
        period in 1u32..=60,
        today in any_date(),
    ) {
        let state = classify_tool(
            StatusFlag::NonConformant,
            &Field::Present(last_control),
            &Field::Present(period),
            today,
        );
        prop_assert_eq!(state, AlertState::NonConformant);
    }

    #[test]
    fn threshold_depends_on_period(
        last_control in any_date(),
        period in 1u32..=36,
        days in -400i64..400,
    ) {
        let due = add_months(last_control, period).unwrap();
        let today = due - Duration::days(days);
        let threshold = if period <= 6 { 30 } else { 90 };

        let state = classify_tool(
            StatusFlag::Normal,
            &Field::Present(last_control),
            &Field::Present(period),
            today,
        );

        let expected = if days <= 0 {
            AlertState::Expired
        } else if days <= threshold {
            AlertState::Alert(days)
        } else {
            AlertState::Conformant
        };
        prop_assert_eq!(state, expected);
    }

    #[test]
    fn add_months_never_overshoots_target_month(date in any_date(), months in 0u32..=120) {
        let due = add_months(date, months).unwrap();
        let total = date.year_month_index() + months as i64;
        prop_assert_eq!(due.year_month_index(), total);
    }

    #[test]
    fn planning_only_for_next_calendar_year(expiry in any_date(), today in any_date()) {
        use chrono::Datelike;

        let state = classify_certification(&Field::Present(expiry), today);
        let planning = today.month() >= 9 && expiry.year() == today.year() + 1;

        if planning {
            prop_assert_eq!(state, AlertState::PlanningNextYear);
        } else if expiry <= today {
            prop_assert_eq!(state, AlertState::Expired);
        } else {
            prop_assert_eq!(state, AlertState::Valid);
        }
    }

    #[test]
    fn non_numeric_period_is_format_error(raw in "[a-zA-Z]{1,10}", today in any_date()) {
        let period = coerce_months(Some(&serde_json::Value::String(raw)));
        let state = classify_tool(StatusFlag::Normal, &Field::Present(ymd(2024, 1, 1)), &period, today);
        prop_assert_eq!(state, AlertState::FormatError);
    }

    #[test]
    fn build_report_is_idempotent(
        tools in prop::collection::vec(any_tool(), 0..20),
        certs in prop::collection::vec(any_cert(), 0..20),
        today in any_date(),
    ) {
        let first = build_report(&tools, &certs, today);
        let second = build_report(&tools, &certs, today);

        prop_assert_eq!(serde_json::to_vec(&first).unwrap(), serde_json::to_vec(&second).unwrap());
        prop_assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
        prop_assert_eq!(first.tools.len(), tools.len());
        prop_assert_eq!(first.certifications.len(), certs.len());
    }
}

trait YearMonthIndex {
    fn year_month_index(&self) -> i64;
}

impl YearMonthIndex for NaiveDate {
    fn year_month_index(&self) -> i64 {
        use chrono::Datelike;
        self.year() as i64 * 12 + self.month0() as i64
    }
}

#[test]
fn literal_scenarios() {
    // Seasonal rule.
    assert_eq!(
        classify_certification(&Field::Present(ymd(2025, 3, 1)), ymd(2024, 9, 15)),
        AlertState::PlanningNextYear
    );
    assert_eq!(
        classify_certification(&Field::Present(ymd(2025, 3, 1)), ymd(2024, 8, 31)),
        AlertState::Valid
    );
    assert_eq!(
        classify_certification(&Field::Present(ymd(2024, 12, 1)), ymd(2024, 9, 15)),
        AlertState::Valid
    );

    // Leap-year clamp.
    assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));

    // Malformed period from a raw cell.
    let period = coerce_months(Some(&serde_json::json!("abc")));
    assert_eq!(
        classify_tool(StatusFlag::Normal, &Field::Present(ymd(2024, 1, 1)), &period, ymd(2024, 6, 1)),
        AlertState::FormatError
    );
}
