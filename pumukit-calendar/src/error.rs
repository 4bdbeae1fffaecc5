use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid month {0}, expected 1..=12")]
    InvalidMonth(u32),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),

    #[error("unknown navigation {0:?}, expected next, previous or today")]
    UnknownNavigation(String),
}
