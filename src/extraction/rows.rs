//! Record extraction from worksheet rows.
//!
//! Column names come from `ColumnMap` aliases. A tool or certification row
//! that is not a JSON object is kept with every field malformed, so it shows
//! up as a format error. Agent rows without a name are dropped.

use serde_json::Value;

use crate::classification::flag_detection::detect_status_flag;
use crate::config::{AgentColumns, CertificationColumns, ToolColumns};
use crate::extraction::coerce::{coerce_date, coerce_months};
use crate::extraction::json_path::{lookup_column, value_to_string};
use crate::logging::structured::LogContext;
use crate::model::{AgentRecord, CertificationRecord, Field, StatusFlag, ToolRecord};

fn text(row: &Value, aliases: &[String]) -> Option<String> {
    lookup_column(row, aliases).and_then(value_to_string)
}

/// Extract one tool row. A missing id falls back to the 1-based row number.
pub fn extract_tool(row: &Value, index: usize, columns: &ToolColumns, ctx: &LogContext) -> ToolRecord {
    let id = text(row, &columns.id).unwrap_or_else(|| {
        let fallback = format!("#{}", index + 1);
        log::warn!("{} TOOL_ID_MISSING row_index={} fallback={}", ctx, index, fallback);
        fallback
    });

    ToolRecord {
        name: text(row, &columns.name).unwrap_or_default(),
        status_flag: detect_status_flag(text(row, &columns.status_flag).as_deref()),
        last_control_date: coerce_date(lookup_column(row, &columns.last_control_date)),
        inspection_period_months: coerce_months(lookup_column(
            row,
            &columns.inspection_period_months,
        )),
        id,
    }
}

pub fn extract_certification(
    row: &Value,
    columns: &CertificationColumns,
    ctx: &LogContext,
) -> CertificationRecord {
    let agent_name = text(row, &columns.agent_name).unwrap_or_else(|| {
        log::debug!("{} CERT_AGENT_MISSING", ctx);
        String::new()
    });

    CertificationRecord {
        agent_name,
        certification_type: text(row, &columns.certification_type).unwrap_or_default(),
        expiry_date: coerce_date(lookup_column(row, &columns.expiry_date)),
    }
}

/// Extract one agent row. Agents without a name have no key and are dropped.
pub fn extract_agent(row: &Value, columns: &AgentColumns, ctx: &LogContext) -> Option<AgentRecord> {
    let Some(name) = text(row, &columns.name) else {
        log::warn!("{} AGENT_ROW_SKIPPED reason=no_name", ctx);
        return None;
    };

    Some(AgentRecord {
        name,
        status: text(row, &columns.status),
    })
}

pub fn extract_tools(rows: &[Value], columns: &ToolColumns, ctx: &LogContext) -> Vec<ToolRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match malformed_row(row, index, ctx) {
            None => extract_tool(row, index, columns, ctx),
            Some(raw) => ToolRecord {
                id: format!("#{}", index + 1),
                name: String::new(),
                status_flag: StatusFlag::Normal,
                last_control_date: Field::Malformed(raw.clone()),
                inspection_period_months: Field::Malformed(raw),
            },
        })
        .collect()
}

pub fn extract_certifications(
    rows: &[Value],
    columns: &CertificationColumns,
    ctx: &LogContext,
) -> Vec<CertificationRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match malformed_row(row, index, ctx) {
            None => extract_certification(row, columns, ctx),
            Some(raw) => CertificationRecord {
                agent_name: String::new(),
                certification_type: String::new(),
                expiry_date: Field::Malformed(raw),
            },
        })
        .collect()
}

pub fn extract_agents(rows: &[Value], columns: &AgentColumns, ctx: &LogContext) -> Vec<AgentRecord> {
    rows.iter()
        .enumerate()
        .filter(|(index, row)| object_row(row, *index, ctx))
        .filter_map(|(_, row)| extract_agent(row, columns, ctx))
        .collect()
}

/// Raw text of a row that is not a JSON object.
fn malformed_row(row: &Value, index: usize, ctx: &LogContext) -> Option<String> {
    if row.is_object() {
        return None;
    }
    log::warn!("{} ROW_MALFORMED row_index={} reason=not_an_object", ctx, index);
    Some(match row {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn object_row(row: &Value, index: usize, ctx: &LogContext) -> bool {
    if row.is_object() {
        return true;
    }
    log::warn!("{} ROW_SKIPPED row_index={} reason=not_an_object", ctx, index);
    false
}
