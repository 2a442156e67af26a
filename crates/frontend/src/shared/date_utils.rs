/// Date helpers for the dashboard widgets.
///
/// All dates are UTC calendar dates; nothing here converts to local time.
use chrono::{DateTime, NaiveDate, Utc};

/// Today's UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Due date as shown in the tables.
/// Example: 2025-11-18 -> "Tue Nov 18 2025"
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Timestamp column of the inventory table; missing values render as a dash.
/// Example: 2025-03-15T14:02:26Z -> "Mar 15, 2025"
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%b %-d, %Y").to_string(),
        None => "—".to_string(),
    }
}

/// Header line, e.g. "Nov 18, 2025, 2:05 PM UTC".
pub fn format_last_updated(now: DateTime<Utc>) -> String {
    now.format("%b %-d, %Y, %-I:%M %p UTC").to_string()
}

pub fn days_left_label(days: i64) -> String {
    match days {
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        d if d > 1 => format!("{d} days left"),
        -1 => "1 day overdue".to_string(),
        d => format!("{} days overdue", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_due_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 18).unwrap();
        assert_eq!(format_due_date(date), "Tue Nov 18 2025");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 5, 14, 2, 26).single();
        assert_eq!(format_timestamp(ts), "Mar 5, 2025");
        assert_eq!(format_timestamp(None), "—");
    }

    #[test]
    fn test_format_last_updated() {
        let now = Utc.with_ymd_and_hms(2025, 11, 18, 14, 5, 0).unwrap();
        assert_eq!(format_last_updated(now), "Nov 18, 2025, 2:05 PM UTC");
    }

    #[test]
    fn test_days_left_label() {
        assert_eq!(days_left_label(0), "Due today");
        assert_eq!(days_left_label(1), "1 day left");
        assert_eq!(days_left_label(12), "12 days left");
        assert_eq!(days_left_label(-4), "4 days overdue");
    }
}
