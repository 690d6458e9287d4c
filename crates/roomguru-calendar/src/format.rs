//! Day label formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::CalendarError;

/// Day-of-month label, e.g. `"29"`.
pub const DEFAULT_SHORT_PATTERN: &str = "%-d";
/// Full date label, e.g. `"Wednesday, 29 April 2015"`.
pub const DEFAULT_FULL_PATTERN: &str = "%A, %-d %B %Y";

/// Renders day labels for the carousel.
pub trait DayFormatter: Send + Sync {
    /// Compact label shown in every carousel cell.
    fn short_label(&self, date: &DateTime<Tz>) -> String;

    /// Long label used for headers.
    fn full_label(&self, date: &DateTime<Tz>) -> String;
}

/// [`DayFormatter`] driven by strftime patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    short: String,
    full: String,
}

impl PatternFormatter {
    /// Builds a formatter after checking both patterns parse.
    pub fn new(short: impl Into<String>, full: impl Into<String>) -> Result<Self, CalendarError> {
        let short = short.into();
        let full = full.into();
        validate_pattern(&short)?;
        validate_pattern(&full)?;
        Ok(Self { short, full })
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT_PATTERN.to_string(),
            full: DEFAULT_FULL_PATTERN.to_string(),
        }
    }
}

impl DayFormatter for PatternFormatter {
    fn short_label(&self, date: &DateTime<Tz>) -> String {
        date.format(&self.short).to_string()
    }

    fn full_label(&self, date: &DateTime<Tz>) -> String {
        date.format(&self.full).to_string()
    }
}

/// Rejects patterns chrono cannot parse.
pub fn validate_pattern(pattern: &str) -> Result<(), CalendarError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(CalendarError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}
