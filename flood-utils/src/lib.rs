//! Shared utility functions for flood outlook crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Duration, NaiveDate, TimeZone};
    use std::fmt::Display;

    /// Number of days covered by a flood forecast.
    pub const FORECAST_DAYS: usize = 5;

    /// How many calendar days ago a forecast was issued, bucketed the way the
    /// outlook tabs are aligned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum IssueAge {
        Today,
        Yesterday,
        TwoDaysAgo,
        /// Issued three or more days ago, or dated in the future.
        Stale,
    }

    impl IssueAge {
        /// Compare calendar days, not elapsed hours.
        pub fn between(issued: NaiveDate, today: NaiveDate) -> IssueAge {
            match (today - issued).num_days() {
                0 => IssueAge::Today,
                1 => IssueAge::Yesterday,
                2 => IssueAge::TwoDaysAgo,
                _ => IssueAge::Stale,
            }
        }

        /// Number of leading forecast days that are already in the past.
        ///
        /// A stale forecast has no sensible alignment and is shown as if it
        /// had been issued today.
        pub fn offset(&self) -> usize {
            match self {
                IssueAge::Today | IssueAge::Stale => 0,
                IssueAge::Yesterday => 1,
                IssueAge::TwoDaysAgo => 2,
            }
        }
    }

    /// Full weekday names for each forecast day, starting at the issue date.
    pub fn day_names(issued: NaiveDate) -> Vec<String> {
        (0..FORECAST_DAYS as i64)
            .map(|offset| (issued + Duration::days(offset)).format("%A").to_string())
            .collect()
    }

    /// Format an issue timestamp for display, e.g. "10:30am on 19 October 2026".
    pub fn format_issued<Tz: TimeZone>(issued_at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        issued_at.format("%-I:%M%P on %-d %B %Y").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

}
