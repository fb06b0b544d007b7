use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub default_report_mode: String,
    pub default_report_tone: String,
    pub default_include_maint: bool,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            display_name: None,
            phone: None,
            address: None,
            default_report_mode: ReportMode::Standard.to_string(),
            default_report_tone: ReportTone::PlainEnglish.to_string(),
            default_include_maint: true,
            created_at: Utc::now(),
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        self.default_report_mode.parse().unwrap_or_default()
    }

    pub fn report_tone(&self) -> ReportTone {
        self.default_report_tone.parse().unwrap_or_default()
    }
}

/// Selects which model tier services a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    #[default]
    Standard,
    Premium,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Standard => write!(f, "standard"),
            ReportMode::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ReportMode::Standard),
            "premium" => Ok(ReportMode::Premium),
            other => Err(format!("Invalid report mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTone {
    #[default]
    PlainEnglish,
    Technical,
}

impl fmt::Display for ReportTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTone::PlainEnglish => write!(f, "plain_english"),
            ReportTone::Technical => write!(f, "technical"),
        }
    }
}

impl FromStr for ReportTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain_english" => Ok(ReportTone::PlainEnglish),
            "technical" => Ok(ReportTone::Technical),
            other => Err(format!("Invalid report tone: {}", other)),
        }
    }
}
