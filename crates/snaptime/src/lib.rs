//! # snaptime
//!
//! Deterministic evaluation of compact relative-time expressions such as
//! `@d-2h+10m`: snap to the start of today, subtract two hours, add ten
//! minutes. Expressions are the config-writable shorthand used for log
//! query windows, scheduling boundaries, and cache buckets; this crate
//! turns one plus a starting timestamp into an absolute timestamp, with
//! no clock access and no ambient state.
//!
//! An expression is a sequence of directives applied left to right:
//!
//! ```text
//! @<unit>        snap: truncate to the start of the unit
//! +<n><unit>     add n units
//! -<n><unit>     subtract n units
//! ```
//!
//! Units range from microseconds to years, including quarters, and each
//! accepts its usual spellings (`s`/`sec`/`seconds`, `mon`/`months`,
//! `q`/`qtr`/`quarters`, ...). The whole expression is validated before
//! anything is evaluated, so either every directive applies or none does.
//! Week snapping uses the ISO 8601 Monday week start unless configured
//! otherwise via [`SnapOptions`].
//!
//! Timestamps come in two shapes and keep their shape: zoned
//! (`DateTime<chrono_tz::Tz>`, DST-aware) and civil (`NaiveDateTime`,
//! pure calendar arithmetic). Calendar behavior (month-length clamping,
//! DST transitions, the timezone database) comes from `chrono` and
//! `chrono-tz`.
//!
//! ## Modules
//!
//! - [`unit`] — canonical units and their alias table
//! - [`directive`] — validated directives
//! - [`parser`] — expression tokenizer and grammar validator
//! - [`eval`] — per-directive evaluation, the sequence fold, entry points
//! - [`timestamp`] — the two caller-facing timestamp shapes
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use chrono::TimeZone;
//! use chrono_tz::Tz;
//! use snaptime::{snap, snap_str, Timestamp};
//!
//! // Zoned: start of day in New York, minus one hour.
//! let dtm = Tz::America__New_York
//!     .with_ymd_and_hms(2024, 12, 30, 13, 1, 10)
//!     .unwrap();
//! let result = snap(dtm, "@d-1h").unwrap();
//! assert_eq!(
//!     result,
//!     Timestamp::Zoned(
//!         Tz::America__New_York
//!             .with_ymd_and_hms(2024, 12, 29, 23, 0, 0)
//!             .unwrap()
//!     )
//! );
//!
//! // Strings in, strings out.
//! let result = snap_str("2024-12-30T13:01:10.999999", "@q+1mon-750us").unwrap();
//! assert_eq!(result, "2024-10-31T23:59:59.999250");
//! ```

pub mod directive;
pub mod error;
pub mod eval;
pub mod parser;
pub mod timestamp;
pub mod unit;

pub use directive::{Action, Directive};
pub use error::{Result, SnapError};
pub use eval::{
    apply_directive, evaluate, snap, snap_civil, snap_str, snap_with_options, snap_zoned,
    SnapOptions, WeekStart,
};
pub use parser::parse;
pub use timestamp::Timestamp;
pub use unit::Unit;
