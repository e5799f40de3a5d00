//! Weekly schedule materializer
//!
//! Builds the fixed Monday..Sunday grid shown to both the coach and the runner.
//! Days without a persisted training are filled with placeholders.

use chrono::{Datelike, Days, NaiveDate, Utc};

use crate::entities::Training;
use crate::value_objects::Snowflake;

/// Wire format of date parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The ISO week (Monday first) containing a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`. Dates too close to the ends of the calendar
    /// are clamped first so the window and its neighbours stay representable.
    pub fn containing(date: NaiveDate) -> Self {
        let date = date.clamp(earliest_anchor(), latest_anchor());
        let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
        let monday = date.checked_sub_days(back).unwrap_or(date);
        Self {
            monday,
            sunday: monday.checked_add_days(Days::new(6)).unwrap_or(monday),
        }
    }

    /// Monday of the week before
    pub fn previous_week(&self) -> NaiveDate {
        self.monday.checked_sub_days(Days::new(7)).unwrap_or(self.monday)
    }

    /// Monday of the week after
    pub fn next_week(&self) -> NaiveDate {
        self.monday.checked_add_days(Days::new(7)).unwrap_or(self.monday)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.monday..=self.sunday).contains(&date)
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        let monday = self.monday;
        std::array::from_fn(|offset| {
            monday
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(monday)
        })
    }
}

// A week anchor needs room for the previous Monday and the next Sunday.
fn earliest_anchor() -> NaiveDate {
    NaiveDate::MIN.checked_add_days(Days::new(14)).unwrap_or(NaiveDate::MIN)
}

fn latest_anchor() -> NaiveDate {
    NaiveDate::MAX.checked_sub_days(Days::new(14)).unwrap_or(NaiveDate::MAX)
}

/// One materialized week: exactly seven slots, Monday at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub window: WeekWindow,
    pub days: [Training; 7],
}

impl Week {
    pub fn previous_week(&self) -> NaiveDate {
        self.window.previous_week()
    }

    pub fn next_week(&self) -> NaiveDate {
        self.window.next_week()
    }

    pub fn persisted(&self) -> impl Iterator<Item = &Training> {
        self.days.iter().filter(|t| t.is_persisted())
    }
}

/// Merge the persisted trainings of one relationship into the week containing
/// `reference_date`.
///
/// `persisted` must be ordered by date ascending. Rows outside the window, or a
/// second row on an already filled day, are skipped.
pub fn materialize_week(
    relation_id: Snowflake,
    reference_date: NaiveDate,
    persisted: Vec<Training>,
) -> Week {
    let window = WeekWindow::containing(reference_date);
    let mut rows = persisted.into_iter().peekable();

    let days = window.days().map(|day| {
        while rows.next_if(|t| t.date < day).is_some() {}
        rows.next_if(|t| t.date == day)
            .unwrap_or_else(|| Training::placeholder(relation_id, day))
    });

    Week { window, days }
}

/// Current calendar date used for week anchors and visibility checks
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// The week anchor for a request: the explicit date when it parses and lies
/// within the supported calendar, `today` otherwise
pub fn resolve_reference_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(parse_date)
        .filter(|date| (earliest_anchor()..=latest_anchor()).contains(date))
        .unwrap_or(today)
}
