//! Calendar rules shared by the use cases and the notifier.

pub mod schedule;

pub use schedule::{due_window, parse_date, parse_time, DueWindow, DATE_FMT, TIME_FMT};
