pub mod calendar;
pub mod deadlines;
pub mod live_status;
pub mod review_panel;

use contracts::domain::a001_rfp::{ConfidenceBand, Stage};
use thaw::BadgeColor;

pub fn stage_badge_color(stage: Stage) -> BadgeColor {
    match stage {
        Stage::Qualified => BadgeColor::Informative,
        Stage::TechMapped | Stage::Priced => BadgeColor::Warning,
        Stage::Submitted => BadgeColor::Success,
        Stage::Due => BadgeColor::Danger,
        Stage::Unknown => BadgeColor::Subtle,
    }
}

pub fn confidence_class(confidence: u8) -> &'static str {
    match ConfidenceBand::of(confidence) {
        ConfidenceBand::High => "confidence confidence--high",
        ConfidenceBand::Medium => "confidence confidence--medium",
        ConfidenceBand::Low => "confidence confidence--low",
    }
}
