//! Rounding quanta and interpolation rules.

use serde::{Deserialize, Serialize};

/// Unit of time used as a rounding or stepping quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Second,
    Minute,
    Hour,
    Day,
}

impl Granularity {
    /// Length of one unit in seconds.
    pub fn duration_seconds(self) -> i64 {
        match self {
            Granularity::Second => 1,
            Granularity::Minute => 60,
            Granularity::Hour => 60 * 60,
            Granularity::Day => 60 * 60 * 24,
        }
    }
}

/// Rounding rule applied to the quotient of a timestamp and a granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Leave the quotient untouched.
    None,
    Floor,
    Ceil,
    /// Nearest integer, halves away from zero.
    #[default]
    Round,
}

impl Interpolation {
    /// Rounds `value` to a multiple of `step` (which must be positive).
    ///
    /// Works on integers so nanosecond timestamps keep their full precision.
    pub fn round_multiple(self, value: i128, step: i128) -> i128 {
        let remainder = value.rem_euclid(step);
        let floor = value - remainder;
        let up = match self {
            Interpolation::None => return value,
            Interpolation::Floor => false,
            Interpolation::Ceil => remainder > 0,
            Interpolation::Round if value >= 0 => remainder * 2 >= step,
            Interpolation::Round => remainder * 2 > step,
        };
        if up {
            floor + step
        } else {
            floor
        }
    }
}
