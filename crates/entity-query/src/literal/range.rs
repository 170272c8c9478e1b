//! Closed ranges with optional open ends.

use crate::error::{QueryError, QueryResult};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Range over an ordered value with at least one bound.
///
/// A missing bound means the range is open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ValueRange<T> {
    from: Option<T>,
    to: Option<T>,
}

#[derive(Deserialize)]
struct RawRange<T> {
    from: Option<T>,
    to: Option<T>,
}

impl<'de, T> Deserialize<'de> for ValueRange<T>
where
    T: Deserialize<'de> + PartialOrd + Copy + fmt::Debug,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawRange::<T>::deserialize(deserializer)?;
        Self::try_new(raw.from, raw.to).map_err(de::Error::custom)
    }
}

/// Range of whole numbers
pub type IntRange = ValueRange<i64>;

/// Range of exact decimals
pub type DecimalRange = ValueRange<Decimal>;

/// Range of offset-aware moments
pub type DateTimeRange = ValueRange<DateTime<FixedOffset>>;

impl<T> ValueRange<T>
where
    T: PartialOrd + Copy + fmt::Debug,
{
    /// Range including both bounds. Fails when `from > to`.
    pub fn between(from: T, to: T) -> QueryResult<Self> {
        Self::try_new(Some(from), Some(to))
    }

    /// Range open to the right
    pub fn at_least(from: T) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Range open to the left
    pub fn at_most(to: T) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    pub(crate) fn try_new(from: Option<T>, to: Option<T>) -> QueryResult<Self> {
        match (from, to) {
            (None, None) => Err(QueryError::InvalidLiteral {
                kind: "range",
                text: "[,]".to_string(),
                reason: "at least one bound is required".to_string(),
            }),
            (Some(lower), Some(upper)) if lower > upper => Err(QueryError::InvalidLiteral {
                kind: "range",
                text: format!("[{:?},{:?}]", lower, upper),
                reason: "lower bound exceeds upper bound".to_string(),
            }),
            _ => Ok(Self { from, to }),
        }
    }

    /// Lower bound, if any
    pub fn lower(&self) -> Option<T> {
        self.from
    }

    /// Upper bound, if any
    pub fn upper(&self) -> Option<T> {
        self.to
    }

    /// Whether `value` falls inside the range (bounds inclusive)
    pub fn contains(&self, value: T) -> bool {
        self.from.map_or(true, |lower| lower <= value) && self.to.map_or(true, |upper| value <= upper)
    }
}

impl IntRange {
    /// Widens an integer range into a decimal one
    pub fn to_decimal(self) -> DecimalRange {
        ValueRange {
            from: self.from.map(Decimal::from),
            to: self.to.map(Decimal::from),
        }
    }
}
