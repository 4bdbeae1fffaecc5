use crate::error::{CalendarError, CalendarResult};
use crate::grid::{Week, month_grid};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month navigation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthNavigation {
    Next,
    Previous,
    Today,
}

impl MonthNavigation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Today => "today",
        }
    }
}

impl fmt::Display for MonthNavigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthNavigation {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            "today" => Ok(Self::Today),
            _ => Err(CalendarError::UnknownNavigation(s.to_string())),
        }
    }
}

/// The month currently shown in the calendar.
///
/// Held by the caller between requests; `navigate` takes today's date as an
/// argument so the view never consults a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub month: u32,
    pub year: i32,
}

impl CalendarView {
    /// Creates a view on `month`/`year`, rejecting months outside 1..=12.
    pub fn new(month: u32, year: i32) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { month, year })
    }

    /// The view containing `today`.
    #[must_use]
    pub fn current(today: NaiveDate) -> Self {
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    /// Moves the view one month forward or back, or back to `today`.
    ///
    /// Fails with [`CalendarError::YearOutOfRange`] when the move would leave
    /// the `i32` year range; the view is left where it was.
    pub fn navigate(&mut self, nav: MonthNavigation, today: NaiveDate) -> CalendarResult<()> {
        *self = match nav {
            MonthNavigation::Next if self.month >= 12 => Self {
                month: 1,
                year: self.shift_year(1)?,
            },
            MonthNavigation::Next => Self {
                month: self.month + 1,
                year: self.year,
            },
            MonthNavigation::Previous if self.month <= 1 => Self {
                month: 12,
                year: self.shift_year(-1)?,
            },
            MonthNavigation::Previous => Self {
                month: self.month - 1,
                year: self.year,
            },
            MonthNavigation::Today => Self::current(today),
        };
        Ok(())
    }

    fn shift_year(&self, by: i32) -> CalendarResult<i32> {
        self.year
            .checked_add(by)
            .ok_or(CalendarError::YearOutOfRange(self.year))
    }

    /// Day grid for the month on screen.
    pub fn grid(&self) -> CalendarResult<Vec<Week>> {
        month_grid(self.month, self.year)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
