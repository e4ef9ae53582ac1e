//! Source records as read from the data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw cell after coercion.
///
/// Absence and malformation are kept apart: a missing last-control date
/// means "unknown", an unreadable one means "format error".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Absent,
    Present(T),
    /// Raw text of a cell that could not be coerced.
    Malformed(String),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }
}

/// Externally maintained conformity flag on a tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFlag {
    #[default]
    Normal,
    NonConformant,
}

/// A tool or piece of equipment subject to periodic inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    pub status_flag: StatusFlag,
    pub last_control_date: Field<NaiveDate>,
    pub inspection_period_months: Field<u32>,
}

impl ToolRecord {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status_flag: StatusFlag::Normal,
            last_control_date: Field::Absent,
            inspection_period_months: Field::Absent,
        }
    }

    pub fn with_flag(mut self, flag: StatusFlag) -> Self {
        self.status_flag = flag;
        self
    }

    pub fn with_last_control(mut self, date: NaiveDate) -> Self {
        self.last_control_date = Field::Present(date);
        self
    }

    pub fn with_period(mut self, months: u32) -> Self {
        self.inspection_period_months = Field::Present(months);
        self
    }
}

/// A personnel habilitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRecord {
    /// Refers to `AgentRecord::name`; orphans are tolerated.
    pub agent_name: String,
    pub certification_type: String,
    pub expiry_date: Field<NaiveDate>,
}

impl CertificationRecord {
    pub fn new(agent_name: &str, certification_type: &str, expiry_date: Field<NaiveDate>) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            certification_type: certification_type.to_string(),
            expiry_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    pub status: Option<String>,
}
