//! Calendar-specific error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Index {index} out of range for window of {len} days")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid date format pattern: {0}")]
    InvalidPattern(String),

    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Unknown weekday: {0}")]
    InvalidWeekday(String),
}

impl CalendarError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::IndexOutOfRange { .. } => "That day is outside the visible weeks.".to_string(),
            Self::InvalidPattern(pattern) => format!("Invalid date format: {}", pattern),
            Self::InvalidTimeZone(name) => format!("Unknown time zone: {}", name),
            Self::InvalidWeekday(name) => format!("Unknown first day of week: {}", name),
        }
    }

    /// Whether the error is a caller bug rather than bad configuration.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}
