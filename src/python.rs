//! Python bindings for the dashboard.
//!
//! Rows cross the boundary either as dicts or as JSON strings (one object
//! per row, `NaN` tokens allowed), exactly as the spreadsheet connector hands
//! them out; results come back as dicts.

use std::fmt::Display;

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList, PyString};
use serde_json::Value;

use crate::classification::{self, AlertState};
use crate::config::ReportConfig;
use crate::extraction::{
    coerce_date, coerce_months, extract_certifications, extract_tools, parse_row,
};
use crate::logging::structured::{init_logger, LogContext};
use crate::model::{Field, StatusFlag};
use crate::report::{build_report_with, compare_agents, CertReport, ReportContext, ToolReport};

fn parse_today(today: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid today {:?}: {}", today, e)))
}

fn parse_config(config_json: Option<&str>) -> PyResult<ReportConfig> {
    match config_json {
        Some(json) => {
            ReportConfig::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))
        }
        None => Ok(ReportConfig::default()),
    }
}

/// Convert rows (dicts or JSON strings) to JSON values.
///
/// Every input row yields one value; anything that is not an object ends up
/// as a malformed record downstream.
fn py_rows(rows: &[&PyAny], ctx: &LogContext) -> PyResult<Vec<Value>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if let Ok(text) = row.downcast::<PyString>() {
                return Ok(parse_row(text.to_str()?, index, ctx));
            }
            if let Ok(dict) = row.downcast::<PyDict>() {
                let mut object = serde_json::Map::new();
                for (key, cell) in dict.iter() {
                    let value = py_cell(Some(cell))?.unwrap_or(Value::Null);
                    object.insert(key.str()?.to_string(), value);
                }
                return Ok(Value::Object(object));
            }
            Ok(Value::String(row.str()?.to_string()))
        })
        .collect()
}

/// Convert a Python cell (None, bool, int, float, str, ...) to a JSON value.
fn py_cell(cell: Option<&PyAny>) -> PyResult<Option<Value>> {
    let Some(cell) = cell else {
        return Ok(None);
    };
    if cell.is_none() {
        return Ok(None);
    }
    // bool is an int subclass; keep it out of the numeric path.
    if let Ok(flag) = cell.downcast::<PyBool>() {
        return Ok(Some(Value::Bool(flag.is_true())));
    }
    if let Ok(i) = cell.extract::<i64>() {
        return Ok(Some(Value::from(i)));
    }
    if let Ok(f) = cell.extract::<f64>() {
        // NaN (pandas empty cell) becomes Null.
        return Ok(Some(Value::from(f)));
    }
    if let Ok(s) = cell.extract::<String>() {
        return Ok(Some(Value::String(s)));
    }
    Ok(Some(Value::String(cell.str()?.to_string())))
}

fn field_text<T: Display>(field: &Field<T>) -> Option<String> {
    match field {
        Field::Absent => None,
        Field::Present(value) => Some(value.to_string()),
        Field::Malformed(raw) => Some(raw.clone()),
    }
}

fn state_dict<'py>(py: Python<'py>, state: &AlertState) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("state", state.code())?;
    dict.set_item("label", state.to_string())?;
    dict.set_item("severity", state.severity())?;
    dict.set_item("days_remaining", state.days_remaining())?;
    Ok(dict)
}

fn tool_dict<'py>(py: Python<'py>, tool: &ToolReport) -> PyResult<&'py PyDict> {
    let dict = state_dict(py, &tool.state)?;
    dict.set_item("id", &tool.record.id)?;
    dict.set_item("name", &tool.record.name)?;
    dict.set_item(
        "non_conformant_flag",
        tool.record.status_flag == StatusFlag::NonConformant,
    )?;
    dict.set_item("last_control_date", field_text(&tool.record.last_control_date))?;
    dict.set_item(
        "inspection_period_months",
        field_text(&tool.record.inspection_period_months),
    )?;
    dict.set_item("due_date", tool.due_date.map(|d| d.to_string()))?;
    dict.set_item("days_remaining", tool.days_remaining)?;
    Ok(dict)
}

fn cert_dict<'py>(py: Python<'py>, cert: &CertReport) -> PyResult<&'py PyDict> {
    let dict = state_dict(py, &cert.state)?;
    dict.set_item("agent_name", &cert.record.agent_name)?;
    dict.set_item("certification_type", &cert.record.certification_type)?;
    dict.set_item("expiry_date", field_text(&cert.record.expiry_date))?;
    Ok(dict)
}

/// Classify one tool from raw cell values.
#[pyfunction]
#[pyo3(name = "classify_tool", signature = (today, status=None, last_control_date=None, inspection_period_months=None))]
fn py_classify_tool(
    py: Python<'_>,
    today: &str,
    status: Option<&str>,
    last_control_date: Option<&PyAny>,
    inspection_period_months: Option<&PyAny>,
) -> PyResult<Py<PyAny>> {
    init_logger();
    let today = parse_today(today)?;

    let state = classification::classify_tool(
        classification::detect_status_flag(status),
        &coerce_date(py_cell(last_control_date)?.as_ref()),
        &coerce_months(py_cell(inspection_period_months)?.as_ref()),
        today,
    );

    Ok(state_dict(py, &state)?.into())
}

/// Classify one certification expiry from a raw cell value.
#[pyfunction]
#[pyo3(name = "classify_certification", signature = (today, expiry_date=None))]
fn py_classify_certification(
    py: Python<'_>,
    today: &str,
    expiry_date: Option<&PyAny>,
) -> PyResult<Py<PyAny>> {
    init_logger();
    let today = parse_today(today)?;

    let expiry = coerce_date(py_cell(expiry_date)?.as_ref());
    let state = classification::classify_certification(&expiry, today);

    Ok(state_dict(py, &state)?.into())
}

/// Build the full report.
///
/// # Arguments
/// * `tools` - Tool rows (dicts or JSON strings)
/// * `certifications` - Certification rows (dicts or JSON strings)
/// * `today` - Reference date, `YYYY-MM-DD`
/// * `config_json` - Optional `ReportConfig` JSON
///
/// # Returns
/// Dict with `today`, `fingerprint`, `summary`, `tools` and `certifications`
#[pyfunction]
#[pyo3(name = "build_report", signature = (tools, certifications, today, config_json=None))]
fn py_build_report(
    py: Python<'_>,
    tools: Vec<&PyAny>,
    certifications: Vec<&PyAny>,
    today: &str,
    config_json: Option<&str>,
) -> PyResult<Py<PyAny>> {
    init_logger();
    let config = parse_config(config_json)?;
    let ctx = ReportContext::new(parse_today(today)?).with_rules(config.rules.clone());
    let log_ctx = ctx.log_context();

    log::info!(
        "{} REPORT_REQUESTED tools={} certifications={}",
        log_ctx,
        tools.len(),
        certifications.len()
    );

    let tool_records = extract_tools(&py_rows(&tools, &log_ctx)?, &config.columns.tools, &log_ctx);
    let cert_records = extract_certifications(
        &py_rows(&certifications, &log_ctx)?,
        &config.columns.certifications,
        &log_ctx,
    );
    let report = build_report_with(&ctx, &tool_records, &cert_records);
    let summary = report.summary();

    let py_result = PyDict::new(py);
    py_result.set_item("today", report.today.to_string())?;
    py_result.set_item(
        "fingerprint",
        report
            .fingerprint()
            .map_err(|e| PyValueError::new_err(e.to_string()))?,
    )?;

    let summary_dict = PyDict::new(py);
    summary_dict.set_item("tools_total", summary.tools_total)?;
    summary_dict.set_item("certifications_total", summary.certifications_total)?;
    summary_dict.set_item("tools_by_state", summary.tools_by_state.clone())?;
    summary_dict.set_item("certifications_by_state", summary.certifications_by_state.clone())?;
    py_result.set_item("summary", summary_dict)?;

    let tools_list = PyList::empty(py);
    for tool in &report.tools {
        tools_list.append(tool_dict(py, tool)?)?;
    }
    py_result.set_item("tools", tools_list)?;

    let certs_list = PyList::empty(py);
    for cert in &report.certifications {
        certs_list.append(cert_dict(py, cert)?)?;
    }
    py_result.set_item("certifications", certs_list)?;

    Ok(py_result.into())
}

/// Side-by-side certifications for at most two agents.
#[pyfunction]
#[pyo3(name = "compare_agents", signature = (certifications, agents, today, config_json=None))]
fn py_compare_agents(
    py: Python<'_>,
    certifications: Vec<&PyAny>,
    agents: Vec<String>,
    today: &str,
    config_json: Option<&str>,
) -> PyResult<Py<PyAny>> {
    init_logger();
    let config = parse_config(config_json)?;
    let ctx = ReportContext::new(parse_today(today)?).with_rules(config.rules.clone());
    let log_ctx = ctx.log_context();

    let cert_records = extract_certifications(
        &py_rows(&certifications, &log_ctx)?,
        &config.columns.certifications,
        &log_ctx,
    );
    let report = build_report_with(&ctx, &[], &cert_records);
    let comparison = compare_agents(&report.certifications, agents.as_slice(), &log_ctx)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let py_result = PyDict::new(py);
    py_result.set_item("certification_types", comparison.certification_types.clone())?;

    let columns = PyList::empty(py);
    for column in &comparison.columns {
        let column_dict = PyDict::new(py);
        column_dict.set_item("agent_name", &column.agent_name)?;
        let certs = PyList::empty(py);
        for cert in &column.certifications {
            certs.append(cert_dict(py, cert)?)?;
        }
        column_dict.set_item("certifications", certs)?;
        columns.append(column_dict)?;
    }
    py_result.set_item("columns", columns)?;

    Ok(py_result.into())
}

/// `(code, label)` for every alert state, most urgent first.
#[pyfunction]
fn state_labels() -> PyResult<Vec<(String, String)>> {
    Ok(AlertState::ALL
        .iter()
        .map(|s| (s.code().to_string(), s.label().to_string()))
        .collect())
}

/// Python module definition
#[pymodule]
fn gmao_compliance(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_classify_tool, m)?)?;
    m.add_function(wrap_pyfunction!(py_classify_certification, m)?)?;
    m.add_function(wrap_pyfunction!(py_build_report, m)?)?;
    m.add_function(wrap_pyfunction!(py_compare_agents, m)?)?;
    m.add_function(wrap_pyfunction!(state_labels, m)?)?;
    Ok(())
}
