//! Calendar helpers for the admin event listing.
//!
//! The view state (which month is on screen) belongs to the caller and is
//! passed in explicitly; nothing here reads the clock.

mod error;
mod grid;
mod view;

pub use error::{CalendarError, CalendarResult};
pub use grid::{Week, days_in_month, month_grid};
pub use view::{CalendarView, MonthNavigation};
