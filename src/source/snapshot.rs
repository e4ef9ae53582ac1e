//! Snapshot loading.
//!
//! A worksheet that cannot be read yields an empty row-set and marks the
//! snapshot as degraded (read-only consultation mode); the report is still
//! produced from whatever did load.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::config::ReportConfig;
use crate::extraction::rows::{extract_agents, extract_certifications, extract_tools};
use crate::logging::structured::LogContext;
use crate::model::{AgentRecord, CertificationRecord, ToolRecord};
use crate::report::aggregate::{build_report_with, Report};
use crate::report::context::ReportContext;

use super::data_source::DataSource;

/// Typed records of the three worksheets for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub agents: Vec<AgentRecord>,
    pub tools: Vec<ToolRecord>,
    pub certifications: Vec<CertificationRecord>,
    /// At least one worksheet failed to load.
    pub degraded: bool,
}

impl Snapshot {
    pub fn report(&self, ctx: &ReportContext) -> Report {
        build_report_with(ctx, &self.tools, &self.certifications)
    }
}

/// Read and extract every worksheet.
pub fn load_snapshot<S: DataSource + ?Sized>(
    source: &S,
    config: &ReportConfig,
    ctx: &LogContext,
) -> Snapshot {
    let mut degraded = false;
    let mut read = |worksheet: &str| -> Vec<Value> {
        match source.read_sheet(worksheet, ctx) {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!(
                    "{} SHEET_UNAVAILABLE source={} worksheet={} error={}",
                    ctx,
                    source.name(),
                    worksheet,
                    e
                );
                degraded = true;
                Vec::new()
            }
        }
    };

    let agent_rows = read(config.sheets.agents.as_str());
    let tool_rows = read(config.sheets.tools.as_str());
    let cert_rows = read(config.sheets.certifications.as_str());

    let snapshot = Snapshot {
        agents: extract_agents(&agent_rows, &config.columns.agents, ctx),
        tools: extract_tools(&tool_rows, &config.columns.tools, ctx),
        certifications: extract_certifications(&cert_rows, &config.columns.certifications, ctx),
        degraded,
    };

    if snapshot.degraded {
        log::warn!("{} SNAPSHOT_DEGRADED mode=read_only", ctx);
    }
    log::info!(
        "{} SNAPSHOT_LOADED source={} agents={} tools={} certifications={} degraded={}",
        ctx,
        source.name(),
        snapshot.agents.len(),
        snapshot.tools.len(),
        snapshot.certifications.len(),
        snapshot.degraded
    );

    snapshot
}

/// Load a snapshot and build its report for `today`.
pub fn report_from_source<S: DataSource + ?Sized>(
    source: &S,
    config: &ReportConfig,
    today: NaiveDate,
) -> (Snapshot, Report) {
    let ctx = ReportContext::new(today).with_rules(config.rules.clone());
    let snapshot = load_snapshot(source, config, &ctx.log_context());
    let report = snapshot.report(&ctx);
    (snapshot, report)
}
