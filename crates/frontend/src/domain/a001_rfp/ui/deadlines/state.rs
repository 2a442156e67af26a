use chrono::NaiveDate;
use contracts::domain::a001_rfp::{ConfidenceBand, DeadlineFilter, DeadlineSortKey, DeadlineWindow, Stage};
use contracts::shared::list_query::{SortDirection, SortSpec};
use leptos::prelude::*;

/// Value of the "all" option in every filter select.
pub const ALL: &str = "all";

#[derive(Clone, Debug, PartialEq)]
pub struct DeadlinesState {
    /// Evaluated by the store
    pub search: String,
    /// Evaluated by the store
    pub stage: Option<Stage>,
    pub window: DeadlineWindow,
    pub confidence: Option<ConfidenceBand>,
    pub sort: SortSpec<DeadlineSortKey>,
    pub page: usize,
    pub selected_id: Option<String>,
}

impl Default for DeadlinesState {
    fn default() -> Self {
        Self {
            search: String::new(),
            stage: None,
            window: DeadlineWindow::All,
            confidence: None,
            sort: SortSpec::new(DeadlineSortKey::DueDate, SortDirection::Asc),
            page: 1,
            selected_id: None,
        }
    }
}

impl DeadlinesState {
    pub fn filter(&self, today: NaiveDate) -> DeadlineFilter {
        DeadlineFilter {
            search: self.search.clone(),
            stage: self.stage,
            window: self.window,
            confidence: self.confidence,
            ..DeadlineFilter::new(today)
        }
    }

    pub fn active_filters_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.stage.is_some(),
            self.window != DeadlineWindow::All,
            self.confidence.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

pub fn stage_from_select(code: &str) -> Option<Stage> {
    (code != ALL).then(|| Stage::from_code(code))
}

pub fn stage_select_value(stage: Option<Stage>) -> String {
    stage.map_or(ALL, |s| s.code()).to_string()
}

pub fn create_state() -> RwSignal<DeadlinesState> {
    RwSignal::new(DeadlinesState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_carries_every_dimension() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let state = DeadlinesState {
            search: "ntpc".into(),
            stage: Some(Stage::Priced),
            window: DeadlineWindow::ThisWeek,
            confidence: Some(ConfidenceBand::High),
            ..DeadlinesState::default()
        };
        let filter = state.filter(today);
        assert_eq!(filter.search, "ntpc");
        assert_eq!(filter.stage, Some(Stage::Priced));
        assert_eq!(filter.window, DeadlineWindow::ThisWeek);
        assert_eq!(filter.confidence, Some(ConfidenceBand::High));
        assert_eq!(filter.today, today);
        assert_eq!(state.active_filters_count(), 4);
        assert_eq!(DeadlinesState::default().active_filters_count(), 0);
    }

    #[test]
    fn test_stage_select_codes() {
        assert_eq!(stage_from_select(ALL), None);
        assert_eq!(stage_from_select("tech-mapped"), Some(Stage::TechMapped));
        assert_eq!(stage_select_value(Some(Stage::Submitted)), "submitted");
        assert_eq!(stage_select_value(None), "all");
    }
}
