//! The in-world calendar tracker — a single date advanced by day,
//! week, or month, with year roll-over on month overflow.

use std::path::Path;
use thiserror::Error;

use crate::schema::calendar::{CalendarSpec, Month, WorldDate};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar has no months")]
    EmptyCalendar,
    #[error("month index {0} out of range")]
    MonthOutOfRange(usize),
    #[error("day {day} out of range for {month} ({days} days)")]
    DayOutOfRange { month: String, day: u32, days: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalendarSpec {
    /// Loads a calendar definition from a JSON document.
    pub fn load_from_json(path: impl AsRef<Path>) -> Result<Self, CalendarError> {
        let contents = std::fs::read_to_string(path)?;
        let spec: CalendarSpec = serde_json::from_str(&contents)?;
        if spec.months.is_empty() {
            return Err(CalendarError::EmptyCalendar);
        }
        Ok(spec)
    }
}

/// Tracks the current in-world date. Single owner, mutated only by the
/// explicit advance calls; no other state.
#[derive(Debug, Clone)]
pub struct CalendarTracker {
    spec: CalendarSpec,
    date: WorldDate,
}

impl CalendarTracker {
    /// Creates a tracker at `start`, validating it against the spec.
    pub fn new(spec: CalendarSpec, start: WorldDate) -> Result<Self, CalendarError> {
        if spec.months.is_empty() {
            return Err(CalendarError::EmptyCalendar);
        }
        let month = spec
            .months
            .get(start.month)
            .ok_or(CalendarError::MonthOutOfRange(start.month))?;
        if start.day == 0 || start.day > month.days {
            return Err(CalendarError::DayOutOfRange {
                month: month.name.clone(),
                day: start.day,
                days: month.days,
            });
        }
        Ok(CalendarTracker { spec, date: start })
    }

    pub fn date(&self) -> WorldDate {
        self.date
    }

    pub fn spec(&self) -> &CalendarSpec {
        &self.spec
    }

    /// The current month's definition.
    pub fn month(&self) -> &Month {
        &self.spec.months[self.date.month]
    }

    /// Advances the date by `days` single-day steps, rolling months and
    /// years as they overflow.
    pub fn advance_days(&mut self, days: u32) {
        for _ in 0..days {
            self.date.day += 1;
            if self.date.day > self.month().days {
                self.date.day = 1;
                self.date.month += 1;
                if self.date.month >= self.spec.months.len() {
                    self.date.month = 0;
                    self.date.year += 1;
                }
            }
        }
    }

    /// Advances the date by seven days.
    pub fn advance_week(&mut self) {
        self.advance_days(7);
    }

    /// Jumps to day 1 of the next month, incrementing the year on wrap.
    pub fn advance_month(&mut self) {
        self.date.day = 1;
        self.date.month += 1;
        if self.date.month >= self.spec.months.len() {
            self.date.month = 0;
            self.date.year += 1;
        }
    }

    /// Formats the current date, e.g. "Firstmonth 3, 1478 LD".
    pub fn date_string(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.month().name,
            self.date.day,
            self.date.year,
            self.spec.year_suffix
        )
    }
}
