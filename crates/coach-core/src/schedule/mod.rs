//! Calendar-week view of a relationship's trainings

mod week;

pub use week::{
    materialize_week, parse_date, resolve_reference_date, today, Week, WeekWindow, DATE_FORMAT,
};
