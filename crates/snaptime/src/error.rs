//! Error types for snaptime parsing and evaluation.
//!
//! Two kinds of failure exist: validation errors (the expression or a
//! directive built from it is malformed) and the timestamp type error
//! (a string input at the [`snap_str`](crate::snap_str) boundary is
//! neither of the two accepted shapes). Both are synchronous and surface
//! directly to the caller; nothing is retried and no partial result is
//! ever produced.

use thiserror::Error;

use crate::unit::Unit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapError {
    /// The expression could not be tokenized: empty input, a character
    /// where a directive marker was expected, or a digit run too large
    /// for an integer count.
    #[error("invalid snaptime expression: {0}")]
    InvalidExpression(String),

    /// A directive was built with no action at all.
    #[error("invalid snaptime directive: must provide either a snap or a time delta")]
    MissingAction,

    /// A snap directive carried an integer count.
    #[error("invalid snaptime directive: cannot use a time integer when snapping")]
    SnapWithInteger,

    /// A snap directive carried no unit.
    #[error("invalid snaptime directive: missing time unit when snapping")]
    SnapWithoutUnit,

    /// Snapping has no sub-second granularity.
    #[error("invalid snaptime directive: cannot snap to nearest {0}")]
    SnapBelowSecond(Unit),

    /// An add/sub directive carried no integer count.
    #[error("invalid snaptime directive: missing time integer for time addition or subtraction")]
    DeltaWithoutInteger,

    /// An add/sub directive carried no unit.
    #[error("invalid snaptime directive: missing time unit for time addition or subtraction")]
    DeltaWithoutUnit,

    /// An alias token resolved to no canonical unit.
    #[error("unknown time unit '{0}'")]
    UnknownUnit(String),

    /// A string timestamp was neither of the two accepted shapes.
    #[error(
        "invalid timestamp: must be a zoned datetime (RFC 3339 with UTC offset) \
         or a civil datetime (ISO 8601 without offset)"
    )]
    InvalidTimestampType,

    /// Arithmetic left the representable datetime range.
    #[error("snaptime result is out of range: {0}")]
    OutOfRange(String),

    /// Truncation produced a wall-clock time that does not exist in the
    /// timestamp's timezone (DST gap).
    #[error("local time {0} does not exist in the timestamp's timezone")]
    NonexistentLocalTime(String),
}

pub type Result<T> = std::result::Result<T, SnapError>;
