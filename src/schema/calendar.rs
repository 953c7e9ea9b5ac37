//! Calendar data — month list, year suffix, and the in-world date value.

use serde::{Deserialize, Serialize};

/// One month of the in-world calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub name: String,
    pub days: u32,
}

/// The calendar definition loaded from `calendar.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpec {
    pub months: Vec<Month>,
    pub year_suffix: String,
}

/// An in-world date. `month` is a zero-based index into the spec's
/// month list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDate {
    pub year: i32,
    pub month: usize,
    pub day: u32,
}

impl WorldDate {
    pub fn new(year: i32, month: usize, day: u32) -> Self {
        WorldDate { year, month, day }
    }
}
