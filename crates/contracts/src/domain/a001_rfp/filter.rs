use super::aggregate::{ConfidenceBand, Rfp, Stage};
use crate::shared::list_query::{collate, contains_ci, RowFilter, SortKey};
use crate::store::query::sanitize_term;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Days-left threshold below which a deadline counts as urgent.
pub const DEFAULT_URGENT_DAYS: i64 = 7;

/// Due-date window of the deadlines table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadlineWindow {
    #[default]
    All,
    /// Due today or within the next seven days.
    ThisWeek,
    /// Due in the same calendar month as today.
    ThisMonth,
}

impl DeadlineWindow {
    pub fn code(&self) -> &'static str {
        match self {
            DeadlineWindow::All => "all",
            DeadlineWindow::ThisWeek => "week",
            DeadlineWindow::ThisMonth => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeadlineWindow::All => "All Deadlines",
            DeadlineWindow::ThisWeek => "This Week",
            DeadlineWindow::ThisMonth => "This Month",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "week" => DeadlineWindow::ThisWeek,
            "month" => DeadlineWindow::ThisMonth,
            _ => DeadlineWindow::All,
        }
    }

    pub fn all() -> [DeadlineWindow; 3] {
        [
            DeadlineWindow::All,
            DeadlineWindow::ThisWeek,
            DeadlineWindow::ThisMonth,
        ]
    }

    pub fn contains(&self, due: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DeadlineWindow::All => true,
            DeadlineWindow::ThisWeek => (0..=7).contains(&(due - today).num_days()),
            DeadlineWindow::ThisMonth => {
                due.year() == today.year() && due.month() == today.month()
            }
        }
    }
}

/// Filter state of the deadlines table. `None` means "all".
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineFilter {
    pub search: String,
    pub stage: Option<Stage>,
    pub window: DeadlineWindow,
    pub confidence: Option<ConfidenceBand>,
    pub today: NaiveDate,
}

impl DeadlineFilter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            search: String::new(),
            stage: None,
            window: DeadlineWindow::All,
            confidence: None,
            today,
        }
    }
}

impl RowFilter<Rfp> for DeadlineFilter {
    fn matches(&self, row: &Rfp) -> bool {
        // Same term the store query was built from.
        let term = sanitize_term(&self.search);
        let matches_search = contains_ci(&row.id, &term) || contains_ci(&row.client, &term);
        let matches_stage = self.stage.map_or(true, |stage| row.stage == stage);
        let matches_window = self.window.contains(row.due_date, self.today);
        let matches_confidence = self
            .confidence
            .map_or(true, |band| row.confidence_band() == band);

        matches_search && matches_stage && matches_window && matches_confidence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadlineSortKey {
    #[default]
    DueDate,
    Client,
    Confidence,
    Id,
}

impl DeadlineSortKey {
    pub fn code(&self) -> &'static str {
        match self {
            DeadlineSortKey::DueDate => "due_date",
            DeadlineSortKey::Client => "client",
            DeadlineSortKey::Confidence => "confidence",
            DeadlineSortKey::Id => "id",
        }
    }
}

impl SortKey<Rfp> for DeadlineSortKey {
    fn compare(&self, a: &Rfp, b: &Rfp) -> Ordering {
        match self {
            DeadlineSortKey::DueDate => a.due_date.cmp(&b.due_date),
            DeadlineSortKey::Client => collate(&a.client, &b.client),
            DeadlineSortKey::Confidence => a.confidence.cmp(&b.confidence),
            DeadlineSortKey::Id => collate(&a.id, &b.id),
        }
    }
}

/// Footer counts of the deadlines table, always over the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeadlineTotals {
    pub total: usize,
    pub urgent: usize,
}

impl DeadlineTotals {
    pub fn over(rows: &[Rfp], today: NaiveDate, urgent_days: i64) -> Self {
        Self {
            total: rows.len(),
            urgent: rows
                .iter()
                .filter(|rfp| rfp.is_urgent(today, urgent_days))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_rfp::Agent;
    use crate::shared::list_query::{run_pipeline, PageRequest, SortDirection, SortSpec};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rfp(id: &str, client: &str, due: NaiveDate, stage: Stage, confidence: u8) -> Rfp {
        Rfp {
            id: id.into(),
            client: client.into(),
            due_date: due,
            stage,
            confidence,
            assigned_agent: Agent::Main,
            stock_requirement: None,
        }
    }

    fn sample() -> Vec<Rfp> {
        vec![
            rfp("RFP-001", "NTPC", date(2025, 11, 3), Stage::Qualified, 92),
            rfp("RFP-002", "Smart Cities", date(2025, 11, 20), Stage::Priced, 78),
            rfp("RFP-003", "ntpc renewables", date(2025, 12, 1), Stage::Submitted, 60),
            rfp("RFP-004", "Metro Rail", date(2025, 11, 5), Stage::TechMapped, 95),
        ]
    }

    #[test]
    fn test_search_matches_id_or_client_case_insensitive() {
        let today = date(2025, 11, 1);
        let mut filter = DeadlineFilter::new(today);
        filter.search = "NtPc".into();
        let ids: Vec<_> = sample()
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["RFP-001", "RFP-003"]);

        filter.search = "rfp-004".into();
        assert_eq!(sample().iter().filter(|r| filter.matches(r)).count(), 1);
    }

    #[test]
    fn test_search_ignores_query_syntax_characters() {
        let mut filter = DeadlineFilter::new(date(2025, 11, 1));
        filter.search = "NTPC(".into();
        let ids: Vec<_> = sample()
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["RFP-001", "RFP-003"]);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let today = date(2025, 11, 1);
        let mut filter = DeadlineFilter::new(today);
        filter.window = DeadlineWindow::ThisMonth;
        filter.confidence = Some(ConfidenceBand::High);
        let ids: Vec<_> = sample()
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["RFP-001", "RFP-004"]);

        filter.stage = Some(Stage::TechMapped);
        assert_eq!(sample().iter().filter(|r| filter.matches(r)).count(), 1);
    }

    #[test]
    fn test_week_window_excludes_overdue_and_far_dates() {
        let today = date(2025, 11, 1);
        assert!(DeadlineWindow::ThisWeek.contains(date(2025, 11, 1), today));
        assert!(DeadlineWindow::ThisWeek.contains(date(2025, 11, 8), today));
        assert!(!DeadlineWindow::ThisWeek.contains(date(2025, 11, 9), today));
        assert!(!DeadlineWindow::ThisWeek.contains(date(2025, 10, 31), today));
    }

    #[test]
    fn test_urgent_count_follows_filter() {
        let today = date(2025, 11, 1);
        let rows = sample();
        let spec = SortSpec::new(DeadlineSortKey::DueDate, SortDirection::Asc);

        let all = run_pipeline(&rows, &DeadlineFilter::new(today), &spec, PageRequest::first(10));
        let totals = DeadlineTotals::over(&all.matched, today, DEFAULT_URGENT_DAYS);
        assert_eq!(totals, DeadlineTotals { total: 4, urgent: 2 });

        let mut only_priced = DeadlineFilter::new(today);
        only_priced.stage = Some(Stage::Priced);
        let priced = run_pipeline(&rows, &only_priced, &spec, PageRequest::first(10));
        let totals = DeadlineTotals::over(&priced.matched, today, DEFAULT_URGENT_DAYS);
        assert_eq!(totals, DeadlineTotals { total: 1, urgent: 0 });
    }

    #[test]
    fn test_sort_by_due_date_then_descending_confidence() {
        let today = date(2025, 11, 1);
        let rows = sample();
        let filter = DeadlineFilter::new(today);

        let by_due = run_pipeline(
            &rows,
            &filter,
            &SortSpec::new(DeadlineSortKey::DueDate, SortDirection::Asc),
            PageRequest::first(10),
        );
        let ids: Vec<_> = by_due.page.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["RFP-001", "RFP-004", "RFP-002", "RFP-003"]);

        let by_confidence = run_pipeline(
            &rows,
            &filter,
            &SortSpec::new(DeadlineSortKey::Confidence, SortDirection::Desc),
            PageRequest::first(10),
        );
        let ids: Vec<_> = by_confidence.page.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["RFP-004", "RFP-001", "RFP-002", "RFP-003"]);
    }
}
