//! Month grid of the deadline calendar.

use crate::domain::a001_rfp::{Rfp, Stage};
use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

/// Same-day tie-break: earlier entries win. Stages not listed rank last.
pub const STAGE_PRIORITY: [Stage; 4] = [
    Stage::Submitted,
    Stage::Priced,
    Stage::TechMapped,
    Stage::Qualified,
];

static STAGE_RANK: Lazy<HashMap<Stage, usize>> = Lazy::new(|| {
    STAGE_PRIORITY
        .iter()
        .enumerate()
        .map(|(rank, stage)| (*stage, rank))
        .collect()
});

/// Position of `stage` in [`STAGE_PRIORITY`]; unlisted stages get the
/// lowest priority.
pub fn stage_rank(stage: Stage) -> usize {
    STAGE_RANK
        .get(&stage)
        .copied()
        .unwrap_or(STAGE_PRIORITY.len())
}

/// Colour category of a day dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotCategory {
    Info,
    Warning,
    Success,
    Destructive,
    Neutral,
}

pub fn dot_category(stage: Stage) -> DotCategory {
    match stage {
        Stage::Qualified => DotCategory::Info,
        Stage::TechMapped | Stage::Priced => DotCategory::Warning,
        Stage::Submitted => DotCategory::Success,
        Stage::Due => DotCategory::Destructive,
        Stage::Unknown => DotCategory::Neutral,
    }
}

/// Legend entries shown under the grid.
pub fn legend() -> [(DotCategory, &'static str); 4] {
    [
        (DotCategory::Info, "Qualified"),
        (DotCategory::Warning, "Tech/Priced"),
        (DotCategory::Success, "Submitted"),
        (DotCategory::Destructive, "Due"),
    ]
}

pub const WEEKDAY_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEvent {
    pub day: u32,
    pub stage: Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub representative: Option<Stage>,
    pub event_count: usize,
    pub is_today: bool,
}

impl DayCell {
    pub fn dot(&self) -> Option<DotCategory> {
        self.representative.map(dot_category)
    }

    /// The count badge is only shown for days with several deadlines.
    pub fn shows_count(&self) -> bool {
        self.event_count > 1
    }

    pub fn tooltip(&self) -> Option<String> {
        (self.event_count > 0).then(|| format!("{} deadline(s)", self.event_count))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find_map(|cell| match cell {
            CalendarCell::Day(d) if d.day == day => Some(d),
            _ => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))
}

/// First day of the month and first day of the following month, for a
/// half-open `[start, end)` range query.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    let start = first_of_month(year, month)?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or(CalendarError::YearOutOfRange(year))?;
    Ok((start, end))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let (start, end) = month_bounds(year, month)?;
    Ok((end - start).num_days() as u32)
}

/// Weekday of the 1st, Sunday = 0.
pub fn first_weekday(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

pub fn month_title(year: i32, month: u32) -> Result<String, CalendarError> {
    Ok(first_of_month(year, month)?.format("%B %Y").to_string())
}

/// Moves `(year, month)` by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), CalendarError> {
    let start = first_of_month(year, month)?;
    let shifted = if delta >= 0 {
        start.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        start.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
    .ok_or(CalendarError::YearOutOfRange(year))?;
    Ok((shifted.year(), shifted.month()))
}

/// Day-of-month events for the RFPs due in `year`/`month`. Rows outside the
/// month are dropped.
pub fn project_events(rfps: &[Rfp], year: i32, month: u32) -> Vec<DayEvent> {
    rfps.iter()
        .filter(|rfp| rfp.due_date.year() == year && rfp.due_date.month() == month)
        .map(|rfp| DayEvent {
            day: rfp.due_date.day(),
            stage: rfp.stage,
        })
        .collect()
}

/// Builds the grid: `first_weekday` blanks, then one cell per day. Each day
/// with events carries the highest-priority stage among them.
pub fn month_grid(
    year: i32,
    month: u32,
    events: &[DayEvent],
    today: NaiveDate,
) -> Result<CalendarMonth, CalendarError> {
    let lead = first_weekday(year, month)? as usize;
    let days = days_in_month(year, month)?;

    let mut by_day: HashMap<u32, Vec<Stage>> = HashMap::new();
    for event in events.iter().filter(|e| (1..=days).contains(&e.day)) {
        by_day.entry(event.day).or_default().push(event.stage);
    }

    let today_in_month = today.year() == year && today.month() == month;

    let mut cells = Vec::with_capacity(lead + days as usize);
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(lead));
    for day in 1..=days {
        let stages = by_day.get(&day).map(Vec::as_slice).unwrap_or(&[]);
        cells.push(CalendarCell::Day(DayCell {
            day,
            representative: stages.iter().copied().min_by_key(|s| stage_rank(*s)),
            event_count: stages.len(),
            is_today: today_in_month && today.day() == day,
        }));
    }

    Ok(CalendarMonth { year, month, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_rfp::Agent;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ev(day: u32, stage: Stage) -> DayEvent {
        DayEvent { day, stage }
    }

    #[test]
    fn test_grid_shape_november_2025() {
        // 1 November 2025 is a Saturday.
        let grid = month_grid(2025, 11, &[], date(2025, 1, 1)).unwrap();
        assert_eq!(grid.leading_blanks(), 6);
        assert_eq!(grid.cells.len(), 6 + 30);
        assert!(grid.cells[6..]
            .iter()
            .all(|c| matches!(c, CalendarCell::Day(d) if d.representative.is_none())));
    }

    #[test]
    fn test_grid_shape_leap_february() {
        // 1 February 2024 is a Thursday.
        let grid = month_grid(2024, 2, &[], date(2024, 2, 29)).unwrap();
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.cells.len(), 4 + 29);
        assert!(grid.day(29).unwrap().is_today);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    }

    #[test]
    fn test_submitted_beats_qualified_in_any_order() {
        let today = date(2025, 11, 1);
        for events in [
            vec![ev(7, Stage::Qualified), ev(7, Stage::Submitted)],
            vec![ev(7, Stage::Submitted), ev(7, Stage::Qualified)],
        ] {
            let grid = month_grid(2025, 11, &events, today).unwrap();
            let cell = grid.day(7).unwrap();
            assert_eq!(cell.representative, Some(Stage::Submitted));
            assert_eq!(cell.event_count, 2);
            assert!(cell.shows_count());
            assert_eq!(cell.dot(), Some(DotCategory::Success));
        }
    }

    #[test]
    fn test_unlisted_stage_ranks_last() {
        let events = [ev(3, Stage::Unknown), ev(3, Stage::Qualified)];
        let grid = month_grid(2025, 11, &events, date(2025, 11, 1)).unwrap();
        assert_eq!(grid.day(3).unwrap().representative, Some(Stage::Qualified));

        let alone = [ev(4, Stage::Unknown)];
        let grid = month_grid(2025, 11, &alone, date(2025, 11, 1)).unwrap();
        let cell = grid.day(4).unwrap();
        assert_eq!(cell.dot(), Some(DotCategory::Neutral));
        assert!(!cell.shows_count());
        assert_eq!(cell.tooltip().as_deref(), Some("1 deadline(s)"));
    }

    #[test]
    fn test_out_of_range_days_are_ignored() {
        let events = [ev(0, Stage::Priced), ev(31, Stage::Priced)];
        let grid = month_grid(2025, 11, &events, date(2025, 11, 1)).unwrap();
        assert!(grid.cells.iter().all(|c| match c {
            CalendarCell::Day(d) => d.event_count == 0,
            CalendarCell::Blank => true,
        }));
    }

    #[test]
    fn test_today_only_flagged_in_its_month() {
        let grid = month_grid(2025, 11, &[], date(2025, 12, 5)).unwrap();
        assert!(grid.cells.iter().all(|c| match c {
            CalendarCell::Day(d) => !d.is_today,
            CalendarCell::Blank => true,
        }));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            month_grid(2025, 13, &[], date(2025, 1, 1)),
            Err(CalendarError::InvalidMonth(13))
        );
        assert_eq!(month_bounds(2025, 0), Err(CalendarError::InvalidMonth(0)));
    }

    #[test]
    fn test_month_bounds_and_navigation() {
        assert_eq!(
            month_bounds(2025, 12).unwrap(),
            (date(2025, 12, 1), date(2026, 1, 1))
        );
        assert_eq!(shift_month(2025, 1, -1).unwrap(), (2024, 12));
        assert_eq!(shift_month(2025, 11, 2).unwrap(), (2026, 1));
        assert_eq!(month_title(2025, 11).unwrap(), "November 2025");
    }

    #[test]
    fn test_project_events_keeps_only_displayed_month() {
        let rfp = |id: &str, due: NaiveDate, stage| Rfp {
            id: id.into(),
            client: "Client".into(),
            due_date: due,
            stage,
            confidence: 80,
            assigned_agent: Agent::Sales,
            stock_requirement: None,
        };
        let rows = vec![
            rfp("A", date(2025, 11, 7), Stage::Priced),
            rfp("B", date(2025, 12, 7), Stage::Submitted),
        ];
        assert_eq!(
            project_events(&rows, 2025, 11),
            vec![ev(7, Stage::Priced)]
        );
    }

    #[test]
    fn test_rank_table() {
        assert_eq!(stage_rank(Stage::Submitted), 0);
        assert_eq!(stage_rank(Stage::Qualified), 3);
        assert_eq!(stage_rank(Stage::Due), STAGE_PRIORITY.len());
    }
}
