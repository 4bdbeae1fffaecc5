use crate::error::{CalendarError, CalendarResult};
use chrono::{Datelike, NaiveDate};

/// One calendar row, Monday first. Cells outside the month are `None`.
pub type Week = [Option<u32>; 7];

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of days in `month` of `year`, or 0 when `month` is not in 1..=12.
#[must_use]
pub fn days_in_month(month: u32, year: i32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_IN_MONTH[month as usize - 1]
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Lays out a month as Monday-first weeks.
///
/// Day 1 sits in the column of its ISO weekday and only weeks that contain
/// at least one day of the month are returned, so the result has four to
/// six rows.
pub fn month_grid(month: u32, year: i32) -> CalendarResult<Vec<Week>> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))?;

    let mut weeks: Vec<Week> = Vec::with_capacity(6);
    let offset = first.weekday().num_days_from_monday() as usize;
    for (i, day) in (1..=days_in_month(month, year)).enumerate() {
        let cell = offset + i;
        let (row, col) = (cell / 7, cell % 7);
        if row == weeks.len() {
            weeks.push([None; 7]);
        }
        weeks[row][col] = Some(day);
    }
    Ok(weeks)
}
