//! Domain primitives for movie searches.
//!
//! Newtypes and small value types shared by the search, pagination and
//! logging layers. Validation lives on the constructors so an invalid year
//! range cannot reach a query builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of one CLI run, recorded with every logged search.
///
/// # Examples
///
/// ```rust
/// use reelsearch::domain::SessionId;
///
/// let a = SessionId::new();
/// let b = SessionId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Smallest and largest release year present in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl fmt::Display for YearBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Why a year range was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum YearRangeError {
    #[error("start year {from} cannot be greater than end year {to}")]
    Inverted { from: i32, to: i32 },

    #[error("year {year} is outside the catalog range {bounds}")]
    OutOfBounds { year: i32, bounds: YearBounds },
}

/// Inclusive release-year range. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    pub const fn new(from: i32, to: i32) -> Result<Self, YearRangeError> {
        if from > to {
            return Err(YearRangeError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn single(year: i32) -> Self {
        Self {
            from: year,
            to: year,
        }
    }

    /// Builds a range and checks both ends against the catalog bounds.
    pub const fn within(from: i32, to: i32, bounds: YearBounds) -> Result<Self, YearRangeError> {
        if !bounds.contains(from) {
            return Err(YearRangeError::OutOfBounds { year: from, bounds });
        }
        if !bounds.contains(to) {
            return Err(YearRangeError::OutOfBounds { year: to, bounds });
        }
        Self::new(from, to)
    }

    #[must_use]
    pub const fn from(&self) -> i32 {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> i32 {
        self.to
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }

    #[must_use]
    pub const fn is_single_year(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_year() {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

/// Which search produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Title,
    GenreYear,
}

impl SearchKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::GenreYear => "genre_year",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: YearBounds = YearBounds {
        min: 1990,
        max: 2010,
    };

    #[test]
    fn year_range_rejects_inverted() {
        let err = YearRange::new(2005, 2000).unwrap_err();
        assert_eq!(
            err,
            YearRangeError::Inverted {
                from: 2005,
                to: 2000
            }
        );
    }

    #[test]
    fn year_range_within_bounds() {
        let range = YearRange::within(1995, 2000, BOUNDS).unwrap();
        assert_eq!(range.from(), 1995);
        assert_eq!(range.to(), 2000);
        assert!(range.contains(1997));
        assert!(!range.contains(2001));
    }

    #[test]
    fn year_range_out_of_bounds_reports_offending_year() {
        let err = YearRange::within(1980, 2000, BOUNDS).unwrap_err();
        assert_eq!(
            err,
            YearRangeError::OutOfBounds {
                year: 1980,
                bounds: BOUNDS
            }
        );

        let err = YearRange::within(2000, 2020, BOUNDS).unwrap_err();
        assert!(matches!(err, YearRangeError::OutOfBounds { year: 2020, .. }));
    }

    #[test]
    fn year_range_errors_read_as_messages() {
        let inverted = YearRange::new(2005, 2000).unwrap_err();
        assert_eq!(
            inverted.to_string(),
            "start year 2005 cannot be greater than end year 2000"
        );

        let outside = YearRange::within(1980, 2000, BOUNDS).unwrap_err();
        assert_eq!(
            outside.to_string(),
            "year 1980 is outside the catalog range 1990-2010"
        );

        let source: &dyn std::error::Error = &outside;
        assert!(source.source().is_none());
    }

    #[test]
    fn bounds_are_checked_before_inversion() {
        let err = YearRange::within(2020, 1980, BOUNDS).unwrap_err();
        assert!(matches!(err, YearRangeError::OutOfBounds { year: 2020, .. }));
    }

    #[test]
    fn year_range_display() {
        assert_eq!(YearRange::single(2006).to_string(), "2006");
        assert_eq!(YearRange::new(2001, 2003).unwrap().to_string(), "2001-2003");
    }

    #[test]
    fn search_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SearchKind::GenreYear).unwrap();
        assert_eq!(json, "\"genre_year\"");
        assert_eq!(SearchKind::Title.to_string(), "title");
    }

    #[test]
    fn session_id_serializes_as_plain_uuid() {
        let id = SessionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
