//! Report aggregation.
//!
//! Builds a fresh annotated projection of the source rows. Inputs are only
//! borrowed; rows keep their input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::classification::alert::AlertState;
use crate::classification::certification::classify_certification_with;
use crate::classification::tool::assess_tool_record;
use crate::model::{CertificationRecord, ToolRecord};

use super::context::ReportContext;

/// A tool row with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReport {
    pub record: ToolRecord,
    pub due_date: Option<NaiveDate>,
    /// Only set for `Alert` and `Expired`.
    pub days_remaining: Option<i64>,
    pub state: AlertState,
}

/// A certification row with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertReport {
    pub record: CertificationRecord,
    pub state: AlertState,
}

/// Annotated row-sets for one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub today: NaiveDate,
    pub tools: Vec<ToolReport>,
    pub certifications: Vec<CertReport>,
}

/// Per-state counts, keyed by `AlertState::code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub tools_total: usize,
    pub certifications_total: usize,
    pub tools_by_state: BTreeMap<String, usize>,
    pub certifications_by_state: BTreeMap<String, usize>,
}

impl ReportSummary {
    pub fn tools_in(&self, code: &str) -> usize {
        self.tools_by_state.get(code).copied().unwrap_or(0)
    }

    pub fn certifications_in(&self, code: &str) -> usize {
        self.certifications_by_state.get(code).copied().unwrap_or(0)
    }
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.certifications.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            tools_total: self.tools.len(),
            certifications_total: self.certifications.len(),
            ..ReportSummary::default()
        };

        for tool in &self.tools {
            *summary
                .tools_by_state
                .entry(tool.state.code().to_string())
                .or_default() += 1;
        }
        for cert in &self.certifications {
            *summary
                .certifications_by_state
                .entry(cert.state.code().to_string())
                .or_default() += 1;
        }

        summary
    }

    /// SHA-256 (hex) of the JSON serialization.
    ///
    /// Equal inputs and `today` give equal fingerprints, so the dashboard can
    /// skip re-rendering an unchanged report.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Build a report with the default rules.
pub fn build_report(
    tool_records: &[ToolRecord],
    certification_records: &[CertificationRecord],
    today: NaiveDate,
) -> Report {
    build_report_with(&ReportContext::new(today), tool_records, certification_records)
}

pub fn build_report_with(
    ctx: &ReportContext,
    tool_records: &[ToolRecord],
    certification_records: &[CertificationRecord],
) -> Report {
    log::debug!(
        "{} REPORT_START today={} tools={} certifications={}",
        ctx.log_context(),
        ctx.today,
        tool_records.len(),
        certification_records.len()
    );

    let tools: Vec<ToolReport> = tool_records
        .iter()
        .map(|record| annotate_tool(ctx, record))
        .collect();

    let certifications: Vec<CertReport> = certification_records
        .iter()
        .map(|record| annotate_certification(ctx, record))
        .collect();

    let report = Report {
        today: ctx.today,
        tools,
        certifications,
    };

    let summary = report.summary();
    log::info!(
        "{} REPORT_COMPLETE tools={} certifications={} tools_by_state={:?} certifications_by_state={:?}",
        ctx.log_context(),
        summary.tools_total,
        summary.certifications_total,
        summary.tools_by_state,
        summary.certifications_by_state
    );

    report
}

fn annotate_tool(ctx: &ReportContext, record: &ToolRecord) -> ToolReport {
    let row_ctx = ctx.row_context(&record.id);
    let assessment = assess_tool_record(&ctx.rules, record, ctx.today, &row_ctx);

    let days_remaining = match assessment.state {
        AlertState::Alert(_) | AlertState::Expired => assessment.days_remaining,
        _ => None,
    };

    ToolReport {
        record: record.clone(),
        due_date: assessment.due_date,
        days_remaining,
        state: assessment.state,
    }
}

fn annotate_certification(ctx: &ReportContext, record: &CertificationRecord) -> CertReport {
    let row_key = format!("{}/{}", record.agent_name, record.certification_type);
    let row_ctx = ctx.row_context(&row_key);

    CertReport {
        record: record.clone(),
        state: classify_certification_with(&ctx.rules, &record.expiry_date, ctx.today, &row_ctx),
    }
}
