//! Engine configuration.
//!
//! Everything has a default matching the regulatory rules in force, so an
//! empty JSON object (`{}`) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds driving the classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceRules {
    /// Periods up to this many months use the short alert window.
    pub short_period_max_months: u32,
    pub short_period_alert_days: i64,
    pub long_period_alert_days: i64,
    /// First month (1-12) in which next-year expiries are flagged for planning.
    pub planning_start_month: u32,
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self {
            short_period_max_months: 6,
            short_period_alert_days: 30,
            long_period_alert_days: 90,
            planning_start_month: 9,
        }
    }
}

impl ComplianceRules {
    /// Alert window, in days, for a given inspection period.
    pub fn alert_threshold_days(&self, period_months: u32) -> i64 {
        if period_months <= self.short_period_max_months {
            self.short_period_alert_days
        } else {
            self.long_period_alert_days
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=12).contains(&self.planning_start_month) {
            return Err(ConfigError::Invalid(format!(
                "planning_start_month must be in 1..=12, got {}",
                self.planning_start_month
            )));
        }
        if self.short_period_alert_days < 0 || self.long_period_alert_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "alert thresholds must be non-negative, got short={} long={}",
                self.short_period_alert_days, self.long_period_alert_days
            )));
        }
        Ok(())
    }
}

/// Accepted column names for tool rows. First alias present in a row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolColumns {
    pub id: Vec<String>,
    pub name: Vec<String>,
    pub status_flag: Vec<String>,
    pub last_control_date: Vec<String>,
    pub inspection_period_months: Vec<String>,
}

impl Default for ToolColumns {
    fn default() -> Self {
        Self {
            id: aliases(&["id", "ID", "Code", "Référence"]),
            name: aliases(&["name", "Nom", "Désignation", "Outil"]),
            status_flag: aliases(&["status_flag", "Statut", "Etat", "État"]),
            last_control_date: aliases(&[
                "last_control_date",
                "Dernier contrôle",
                "Date contrôle",
                "Dernier_Controle",
            ]),
            inspection_period_months: aliases(&[
                "inspection_period_months",
                "Périodicité",
                "Periodicite",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationColumns {
    pub agent_name: Vec<String>,
    pub certification_type: Vec<String>,
    pub expiry_date: Vec<String>,
}

impl Default for CertificationColumns {
    fn default() -> Self {
        Self {
            agent_name: aliases(&["agent_name", "Agent", "Nom"]),
            certification_type: aliases(&["certification_type", "Habilitation", "Type"]),
            expiry_date: aliases(&[
                "expiry_date",
                "Date de péremption",
                "Péremption",
                "Date_Peremption",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentColumns {
    pub name: Vec<String>,
    pub status: Vec<String>,
}

impl Default for AgentColumns {
    fn default() -> Self {
        Self {
            name: aliases(&["name", "Nom"]),
            status: aliases(&["status", "Statut"]),
        }
    }
}

/// Column aliases for every worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub tools: ToolColumns,
    pub certifications: CertificationColumns,
    pub agents: AgentColumns,
}

/// Worksheet names in the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub agents: String,
    pub certifications: String,
    pub tools: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            agents: "Agents".to_string(),
            certifications: "Habilitations".to_string(),
            tools: "Outillage".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub rules: ComplianceRules,
    pub columns: ColumnMap,
    pub sheets: SheetNames,
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.rules.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        log::info!("CONFIG_LOADED path={}", path.display());
        Ok(config)
    }
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
