use crate::domain::common::wire;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Stage
// ============================================================================

/// Workflow stage of an RFP response.
///
/// `Due` is never written by the upstream agents; it only exists so that
/// the calendar legend and colour table can refer to it. `Unknown` absorbs
/// any value the store returns that is not one of the known spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Qualified,
    TechMapped,
    Priced,
    Submitted,
    Due,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Stage {
    /// Wire spelling used by the row store
    pub fn code(&self) -> &'static str {
        match self {
            Stage::Qualified => "qualified",
            Stage::TechMapped => "tech-mapped",
            Stage::Priced => "priced",
            Stage::Submitted => "submitted",
            Stage::Due => "due",
            Stage::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Qualified => "Qualified",
            Stage::TechMapped => "Tech Mapped",
            Stage::Priced => "Priced",
            Stage::Submitted => "Submitted",
            Stage::Due => "Due",
            Stage::Unknown => "Unknown",
        }
    }

    /// The four stages an RFP can actually be stored in, in workflow order.
    pub fn workflow() -> [Stage; 4] {
        [
            Stage::Qualified,
            Stage::TechMapped,
            Stage::Priced,
            Stage::Submitted,
        ]
    }

    pub fn from_code(code: &str) -> Stage {
        match code.trim().to_ascii_lowercase().as_str() {
            "qualified" => Stage::Qualified,
            "tech-mapped" => Stage::TechMapped,
            "priced" => Stage::Priced,
            "submitted" => Stage::Submitted,
            "due" => Stage::Due,
            _ => Stage::Unknown,
        }
    }

    /// How far along the workflow the stage is, in percent.
    pub fn progress_percent(&self) -> u8 {
        match self {
            Stage::Qualified => 25,
            Stage::TechMapped => 50,
            Stage::Priced => 75,
            Stage::Submitted => 100,
            Stage::Due | Stage::Unknown => 0,
        }
    }

    /// Tech-mapped and priced RFPs are being worked on by the agents.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Stage::TechMapped | Stage::Priced)
    }
}

// ============================================================================
// Agent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Agent {
    #[serde(rename = "Technical Agent")]
    Technical,
    #[serde(rename = "Pricing Agent")]
    Pricing,
    #[serde(rename = "Main Agent")]
    Main,
    #[serde(rename = "Sales Agent")]
    Sales,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Agent {
    pub fn label(&self) -> &'static str {
        match self {
            Agent::Technical => "Technical Agent",
            Agent::Pricing => "Pricing Agent",
            Agent::Main => "Main Agent",
            Agent::Sales => "Sales Agent",
            Agent::Unknown => "Unassigned",
        }
    }

    pub fn all() -> [Agent; 4] {
        [Agent::Technical, Agent::Pricing, Agent::Main, Agent::Sales]
    }
}

// ============================================================================
// Confidence
// ============================================================================

pub const HIGH_CONFIDENCE: u8 = 90;
pub const MEDIUM_CONFIDENCE: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: u8) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            ConfidenceBand::High
        } else if confidence >= MEDIUM_CONFIDENCE {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High (90%+)",
            ConfidenceBand::Medium => "Medium (75-89%)",
            ConfidenceBand::Low => "Low (<75%)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "high" => Some(ConfidenceBand::High),
            "medium" => Some(ConfidenceBand::Medium),
            "low" => Some(ConfidenceBand::Low),
            _ => None,
        }
    }

    pub fn all() -> [ConfidenceBand; 3] {
        [ConfidenceBand::High, ConfidenceBand::Medium, ConfidenceBand::Low]
    }
}

// ============================================================================
// Record
// ============================================================================

/// One row of the `rfps` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfp {
    pub id: String,
    #[serde(default)]
    pub client: String,
    pub due_date: NaiveDate,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub stage: Stage,
    #[serde(default, deserialize_with = "wire::percent")]
    pub confidence: u8,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub assigned_agent: Agent,
    #[serde(default, deserialize_with = "wire::non_blank")]
    pub stock_requirement: Option<String>,
}

impl Rfp {
    /// Whole days from `today` until the due date; negative once overdue.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Due within `urgent_days` days (overdue RFPs count as urgent too).
    pub fn is_urgent(&self, today: NaiveDate, urgent_days: i64) -> bool {
        self.days_left(today) <= urgent_days
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }

    pub fn stock_requirement_display(&self) -> &str {
        self.stock_requirement.as_deref().unwrap_or("—")
    }
}
