//! Views over an annotated report.
//!
//! Every view borrows from the report and returns a new selection; nothing
//! is cached between calls.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::classification::alert::AlertState;
use crate::error::ReportError;
use crate::logging::structured::LogContext;
use crate::model::Field;

use super::aggregate::{CertReport, ToolReport};

/// Agents that can be shown side by side.
pub const MAX_COMPARED_AGENTS: usize = 2;

/// Common access to annotated rows of either kind.
pub trait Classified {
    fn state(&self) -> AlertState;

    /// `(severity, day key, tie-break)`; smaller sorts first.
    fn urgency(&self) -> (u8, i64, &str);

    /// Case-insensitive match against the row's searchable text.
    /// `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;
}

impl Classified for ToolReport {
    fn state(&self) -> AlertState {
        self.state
    }

    fn urgency(&self) -> (u8, i64, &str) {
        (
            self.state.severity(),
            self.days_remaining.unwrap_or(i64::MAX),
            &self.record.id,
        )
    }

    fn matches(&self, needle: &str) -> bool {
        self.record.id.to_lowercase().contains(needle)
            || self.record.name.to_lowercase().contains(needle)
    }
}

impl Classified for CertReport {
    fn state(&self) -> AlertState {
        self.state
    }

    fn urgency(&self) -> (u8, i64, &str) {
        let expiry_key = match &self.record.expiry_date {
            Field::Present(date) => i64::from(date.num_days_from_ce()),
            _ => i64::MAX,
        };
        (self.state.severity(), expiry_key, &self.record.agent_name)
    }

    fn matches(&self, needle: &str) -> bool {
        self.record.agent_name.to_lowercase().contains(needle)
            || self.record.certification_type.to_lowercase().contains(needle)
    }
}

/// Tools explicitly flagged NC.
pub fn non_conformant_only(tools: &[ToolReport]) -> Vec<&ToolReport> {
    tools
        .iter()
        .filter(|t| t.state == AlertState::NonConformant)
        .collect()
}

pub fn expired_only<T: Classified>(rows: &[T]) -> Vec<&T> {
    rows.iter()
        .filter(|r| r.state() == AlertState::Expired)
        .collect()
}

/// Rows inside their alert window.
pub fn alerts_only<T: Classified>(rows: &[T]) -> Vec<&T> {
    rows.iter()
        .filter(|r| matches!(r.state(), AlertState::Alert(_)))
        .collect()
}

/// Rows someone has to act on, most urgent first.
pub fn action_required<T: Classified>(rows: &[T]) -> Vec<&T> {
    let mut selected: Vec<&T> = rows.iter().filter(|r| r.state().needs_action()).collect();
    selected.sort_by(|a, b| a.urgency().cmp(&b.urgency()));
    selected
}

/// Certifications to renew next year.
pub fn planning_alerts(certifications: &[CertReport]) -> Vec<&CertReport> {
    certifications
        .iter()
        .filter(|c| c.state == AlertState::PlanningNextYear)
        .collect()
}

/// All rows, most urgent first. Stable for equal keys.
pub fn sorted_by_urgency<T: Classified>(rows: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| a.urgency().cmp(&b.urgency()));
    sorted
}

/// Quick search. A blank query returns every row.
pub fn search<'a, T: Classified>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter().filter(|r| r.matches(&needle)).collect()
}

pub fn search_tools<'a>(tools: &'a [ToolReport], query: &str) -> Vec<&'a ToolReport> {
    search(tools, query)
}

pub fn search_certifications<'a>(certs: &'a [CertReport], query: &str) -> Vec<&'a CertReport> {
    search(certs, query)
}

/// Certifications of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentColumn {
    pub agent_name: String,
    pub certifications: Vec<CertReport>,
}

/// Side-by-side certification view for up to two agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentComparison {
    pub columns: Vec<AgentColumn>,
    /// Union of certification types across columns, sorted.
    pub certification_types: Vec<String>,
}

impl AgentComparison {
    /// State of one cell of the grid. `None` when the agent lacks that type.
    pub fn state_for(&self, agent_name: &str, certification_type: &str) -> Option<AlertState> {
        self.columns
            .iter()
            .find(|c| c.agent_name == agent_name)?
            .certifications
            .iter()
            .find(|c| c.record.certification_type == certification_type)
            .map(|c| c.state)
    }
}

/// Build the agent comparison view.
///
/// Duplicate names count once; selection order is kept. Names with no
/// certification produce an empty column.
pub fn compare_agents<S: AsRef<str>>(
    certifications: &[CertReport],
    selection: &[S],
    ctx: &LogContext,
) -> Result<AgentComparison, ReportError> {
    let mut names: Vec<&str> = Vec::new();
    for name in selection {
        let name = name.as_ref();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.len() > MAX_COMPARED_AGENTS {
        log::warn!(
            "{} AGENT_COMPARISON_REJECTED selected={} max={}",
            ctx,
            names.len(),
            MAX_COMPARED_AGENTS
        );
        return Err(ReportError::TooManySelections {
            max: MAX_COMPARED_AGENTS,
            got: names.len(),
        });
    }

    let columns: Vec<AgentColumn> = names
        .iter()
        .map(|name| AgentColumn {
            agent_name: name.to_string(),
            certifications: certifications
                .iter()
                .filter(|c| c.record.agent_name == *name)
                .cloned()
                .collect(),
        })
        .collect();

    let certification_types: BTreeSet<String> = columns
        .iter()
        .flat_map(|col| col.certifications.iter())
        .map(|c| c.record.certification_type.clone())
        .collect();

    Ok(AgentComparison {
        columns,
        certification_types: certification_types.into_iter().collect(),
    })
}

/// Certifications of `agent_name` expiring within `[from, to]`.
///
/// Feeds the annual per-agent review. Rows without a readable expiry are
/// left out.
pub fn agent_certifications_between<'a>(
    certifications: &'a [CertReport],
    agent_name: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<&'a CertReport>, ReportError> {
    if from > to {
        return Err(ReportError::InvalidRange { from, to });
    }

    Ok(certifications
        .iter()
        .filter(|c| c.record.agent_name == agent_name)
        .filter(|c| {
            c.record
                .expiry_date
                .present()
                .is_some_and(|expiry| *expiry >= from && *expiry <= to)
        })
        .collect())
}
