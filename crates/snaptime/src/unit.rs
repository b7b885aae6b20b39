//! Canonical time units and their accepted alias spellings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SnapError;

/// A canonical time unit.
///
/// Each unit accepts a fixed set of case-sensitive alias spellings
/// (singular, plural, and abbreviated forms). The alias sets are pairwise
/// disjoint, so resolution is always exact: `m` is a minute, `mon` is a
/// month, `ms` is a millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Unit {
    /// Resolve an alias spelling to its canonical unit.
    ///
    /// Matching is case-sensitive and exact; no fuzzy or prefix matching.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::UnknownUnit`] for any spelling not in the table.
    pub fn from_alias(alias: &str) -> Result<Self, SnapError> {
        match alias {
            "us" => Ok(Unit::Microsecond),
            "ms" => Ok(Unit::Millisecond),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(Unit::Second),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(Unit::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Unit::Hour),
            "d" | "day" | "days" => Ok(Unit::Day),
            "w" | "week" | "weeks" => Ok(Unit::Week),
            "mon" | "month" | "months" => Ok(Unit::Month),
            "q" | "qtr" | "qtrs" | "quarter" | "quarters" => Ok(Unit::Quarter),
            "y" | "yr" | "yrs" | "year" | "years" => Ok(Unit::Year),
            _ => Err(SnapError::UnknownUnit(alias.to_string())),
        }
    }

    /// Every accepted spelling for this unit, shortest first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Unit::Microsecond => &["us"],
            Unit::Millisecond => &["ms"],
            Unit::Second => &["s", "sec", "secs", "second", "seconds"],
            Unit::Minute => &["m", "min", "mins", "minute", "minutes"],
            Unit::Hour => &["h", "hr", "hrs", "hour", "hours"],
            Unit::Day => &["d", "day", "days"],
            Unit::Week => &["w", "week", "weeks"],
            Unit::Month => &["mon", "month", "months"],
            Unit::Quarter => &["q", "qtr", "qtrs", "quarter", "quarters"],
            Unit::Year => &["y", "yr", "yrs", "year", "years"],
        }
    }

    /// The primary abbreviation, used when formatting directives back to
    /// expression syntax.
    pub fn abbrev(self) -> &'static str {
        self.aliases()[0]
    }

    /// The canonical long name, used in error messages.
    pub fn canonical(self) -> &'static str {
        match self {
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Quarter => "quarter",
            Unit::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl FromStr for Unit {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_alias(s)
    }
}
