//! Alert state enumeration shared by both classifiers.
//!
//! The codes and labels are a contract with the dashboard: do not rename.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "days_remaining", rename_all = "snake_case")]
pub enum AlertState {
    /// Required date missing.
    Unknown,
    /// Tool explicitly flagged NC.
    NonConformant,
    Expired,
    /// Inside the alert window; carries the days left before the due date.
    Alert(i64),
    /// Tool inspection up to date.
    Conformant,
    /// Certification up to date.
    Valid,
    /// Certification expiring next year, renewal to schedule now.
    PlanningNextYear,
    /// A date or period cell is present but unreadable.
    FormatError,
}

impl AlertState {
    /// Every state, in severity order. `Alert` is listed with a zero count.
    pub const ALL: [AlertState; 8] = [
        AlertState::NonConformant,
        AlertState::Expired,
        AlertState::FormatError,
        AlertState::Alert(0),
        AlertState::PlanningNextYear,
        AlertState::Unknown,
        AlertState::Conformant,
        AlertState::Valid,
    ];

    /// Stable machine code.
    pub fn code(&self) -> &'static str {
        match self {
            AlertState::Unknown => "unknown",
            AlertState::NonConformant => "non_conformant",
            AlertState::Expired => "expired",
            AlertState::Alert(_) => "alert",
            AlertState::Conformant => "conformant",
            AlertState::Valid => "valid",
            AlertState::PlanningNextYear => "planning_next_year",
            AlertState::FormatError => "format_error",
        }
    }

    /// Display label without the day count.
    pub fn label(&self) -> &'static str {
        match self {
            AlertState::Unknown => "Inconnu",
            AlertState::NonConformant => "Non conforme",
            AlertState::Expired => "Périmé",
            AlertState::Alert(_) => "Alerte",
            AlertState::Conformant => "Conforme",
            AlertState::Valid => "Valide",
            AlertState::PlanningNextYear => "Planification N+1",
            AlertState::FormatError => "Erreur de format",
        }
    }

    /// Lower is more urgent.
    pub fn severity(&self) -> u8 {
        match self {
            AlertState::NonConformant => 0,
            AlertState::Expired => 1,
            AlertState::FormatError => 2,
            AlertState::Alert(_) => 3,
            AlertState::PlanningNextYear => 4,
            AlertState::Unknown => 5,
            AlertState::Conformant | AlertState::Valid => 6,
        }
    }

    /// States the maintenance team must act on.
    pub fn needs_action(&self) -> bool {
        self.severity() <= 4
    }

    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            AlertState::Alert(days) => Some(*days),
            _ => None,
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertState::Alert(days) => write!(f, "Alerte J-{}", days),
            other => f.write_str(other.label()),
        }
    }
}
