//! Caller-facing timestamp shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// A point in time in one of the two shapes accepted by
/// [`snap`](crate::snap).
///
/// The shape is preserved through evaluation: a zoned input produces a
/// zoned result in the same timezone, a civil input produces a civil
/// result. Civil values are evaluated under a fixed UTC reference, so
/// their arithmetic is pure calendar arithmetic with no DST behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Zone-aware: an IANA timezone always travels with the value.
    Zoned(DateTime<Tz>),
    /// Civil wall-clock value with no attached zone or offset.
    Civil(NaiveDateTime),
}

impl From<DateTime<Tz>> for Timestamp {
    fn from(dtm: DateTime<Tz>) -> Self {
        Timestamp::Zoned(dtm)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dtm: DateTime<Utc>) -> Self {
        Timestamp::Zoned(dtm.with_timezone(&Tz::UTC))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dtm: NaiveDateTime) -> Self {
        Timestamp::Civil(dtm)
    }
}
