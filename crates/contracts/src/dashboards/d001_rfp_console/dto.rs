use crate::domain::a001_rfp::{Rfp, Stage};
use serde::{Deserialize, Serialize};

/// Headline numbers of the console, derived from the fetched RFP rows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    pub total: usize,
    pub qualified: usize,
    /// Tech-mapped plus priced
    pub in_progress: usize,
    pub submitted: usize,
    /// Rounded mean confidence, `None` without rows
    pub avg_confidence: Option<u8>,
    /// Submitted share of all RFPs in percent, `None` without rows
    pub success_rate: Option<u8>,
}

impl PipelineStats {
    pub fn from_rfps(rfps: &[Rfp]) -> Self {
        let total = rfps.len();
        let count = |stage: Stage| rfps.iter().filter(|r| r.stage == stage).count();
        let submitted = count(Stage::Submitted);

        let (avg_confidence, success_rate) = if total == 0 {
            (None, None)
        } else {
            let sum: u32 = rfps.iter().map(|r| u32::from(r.confidence)).sum();
            (
                Some((sum as f64 / total as f64).round() as u8),
                Some((submitted as f64 * 100.0 / total as f64).round() as u8),
            )
        };

        Self {
            total,
            qualified: count(Stage::Qualified),
            in_progress: rfps.iter().filter(|r| r.stage.is_in_progress()).count(),
            submitted,
            avg_confidence,
            success_rate,
        }
    }

    /// `"33%"`, or `"—"` when there is nothing to rate.
    pub fn success_rate_label(&self) -> String {
        percent_label(self.success_rate)
    }

    pub fn avg_confidence_label(&self) -> String {
        percent_label(self.avg_confidence)
    }
}

fn percent_label(value: Option<u8>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v}%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_rfp::Agent;
    use chrono::NaiveDate;

    fn rfp(stage: Stage, confidence: u8) -> Rfp {
        Rfp {
            id: format!("RFP-{confidence}"),
            client: "Client".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            stage,
            confidence,
            assigned_agent: Agent::Main,
            stock_requirement: None,
        }
    }

    #[test]
    fn test_counts_and_rates() {
        let rows = vec![
            rfp(Stage::Qualified, 90),
            rfp(Stage::TechMapped, 85),
            rfp(Stage::Priced, 80),
            rfp(Stage::Submitted, 95),
            rfp(Stage::Submitted, 70),
            rfp(Stage::Unknown, 0),
        ];
        let stats = PipelineStats::from_rfps(&rows);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.qualified, 1);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.avg_confidence, Some(70));
        assert_eq!(stats.success_rate, Some(33));
        assert_eq!(stats.success_rate_label(), "33%");
    }

    #[test]
    fn test_empty_set_has_no_rates() {
        let stats = PipelineStats::from_rfps(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_confidence, None);
        assert_eq!(stats.success_rate_label(), "—");
    }
}
