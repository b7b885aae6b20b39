//! Directive evaluation: snap truncation, delta arithmetic, and the
//! left-to-right fold over a directive sequence.
//!
//! All evaluation is generic over [`chrono::TimeZone`], so zoned
//! (`chrono_tz::Tz`), fixed-offset, and UTC datetimes share one code path.
//! Civil values are evaluated under a fixed UTC reference and converted
//! back, which keeps their arithmetic free of DST behavior.

use chrono::{
    DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime, SecondsFormat,
    TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use serde::Serialize;

use crate::directive::{Action, Directive};
use crate::error::{Result, SnapError};
use crate::parser::parse;
use crate::timestamp::Timestamp;
use crate::unit::Unit;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for `@w` snapping.
///
/// The default is the ISO 8601 Monday start; chrono has no ambient
/// week-start convention, so the choice is always explicit here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStart {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// Options for [`snap_with_options`].
#[derive(Debug, Clone, Default)]
pub struct SnapOptions {
    /// Which day starts the week for week snapping.
    pub week_start: WeekStart,
}

/// How many days `weekday` is past the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStart) -> u64 {
    match week_start {
        WeekStart::Monday => u64::from(weekday.num_days_from_monday()),
        WeekStart::Sunday => u64::from(weekday.num_days_from_sunday()),
    }
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Evaluate a snaptime expression against a timestamp.
///
/// The expression is parsed and fully validated before any evaluation
/// begins, so an invalid expression never applies partially: either every
/// directive is applied, in order, or none is. The result has the same
/// shape as the input: zoned in, zoned out; civil in, civil out.
///
/// Week snapping uses the Monday week start; use [`snap_with_options`] to
/// change that.
///
/// # Errors
///
/// Any validation error from [`parse`], or an evaluation-range error when
/// the result leaves the representable datetime range or falls in a DST
/// gap of a zoned input's timezone.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use snaptime::{snap, Timestamp};
///
/// let start: NaiveDateTime = "2024-12-30T13:01:10.999999".parse().unwrap();
/// let result = snap(start, "@d-2h+10m").unwrap();
/// assert_eq!(result, Timestamp::Civil("2024-12-29T22:10:00".parse().unwrap()));
/// ```
pub fn snap(timestamp: impl Into<Timestamp>, expression: &str) -> Result<Timestamp> {
    snap_with_options(timestamp, expression, &SnapOptions::default())
}

/// [`snap`] with explicit [`SnapOptions`].
pub fn snap_with_options(
    timestamp: impl Into<Timestamp>,
    expression: &str,
    options: &SnapOptions,
) -> Result<Timestamp> {
    let directives = parse(expression)?;
    match timestamp.into() {
        Timestamp::Zoned(dtm) => evaluate(&directives, dtm, options).map(Timestamp::Zoned),
        Timestamp::Civil(dtm) => {
            let zoned = Utc.from_utc_datetime(&dtm);
            evaluate(&directives, zoned, options).map(|result| Timestamp::Civil(result.naive_utc()))
        }
    }
}

/// Evaluate a snaptime expression against a zone-aware datetime.
///
/// Works for any [`TimeZone`]: `chrono_tz::Tz`, `Utc`, or a fixed offset.
pub fn snap_zoned<T: TimeZone>(dtm: DateTime<T>, expression: &str) -> Result<DateTime<T>> {
    evaluate(&parse(expression)?, dtm, &SnapOptions::default())
}

/// Evaluate a snaptime expression against a civil (zone-less) datetime.
pub fn snap_civil(dtm: NaiveDateTime, expression: &str) -> Result<NaiveDateTime> {
    snap_zoned(Utc.from_utc_datetime(&dtm), expression).map(|result| result.naive_utc())
}

/// Evaluate a snaptime expression against a timestamp in string form.
///
/// Accepts the two shapes as text: an RFC 3339 datetime with UTC offset
/// (zoned), or an ISO 8601 datetime without offset (civil). The result is
/// returned in the same textual shape, always with microsecond precision.
/// The shape check precedes expression parsing, so an unsupported
/// timestamp is rejected regardless of the directive string.
///
/// # Errors
///
/// [`SnapError::InvalidTimestampType`] when `timestamp` is neither
/// accepted shape, otherwise as [`snap`].
///
/// # Examples
///
/// ```
/// use snaptime::snap_str;
///
/// let result = snap_str("2024-12-30T13:01:10.999999-05:00", "@q+1mon-750us").unwrap();
/// assert_eq!(result, "2024-10-31T23:59:59.999250-05:00");
/// ```
pub fn snap_str(timestamp: &str, expression: &str) -> Result<String> {
    if let Ok(dtm) = DateTime::parse_from_rfc3339(timestamp) {
        let result = snap_zoned(dtm, expression)?;
        return Ok(result.to_rfc3339_opts(SecondsFormat::Micros, true));
    }
    if let Ok(dtm) = timestamp.parse::<NaiveDateTime>() {
        let result = snap_civil(dtm, expression)?;
        return Ok(result.format("%Y-%m-%dT%H:%M:%S%.6f").to_string());
    }
    Err(SnapError::InvalidTimestampType)
}

// ── Sequencer ───────────────────────────────────────────────────────────────

/// Fold a validated directive sequence over a starting datetime,
/// left to right.
///
/// Each directive consumes the previous directive's output; no directive
/// is skipped or reordered.
pub fn evaluate<T: TimeZone>(
    directives: &[Directive],
    dtm: DateTime<T>,
    options: &SnapOptions,
) -> Result<DateTime<T>> {
    directives
        .iter()
        .try_fold(dtm, |current, directive| apply_directive(directive, current, options))
}

/// Apply a single directive to a datetime.
pub fn apply_directive<T: TimeZone>(
    directive: &Directive,
    dtm: DateTime<T>,
    options: &SnapOptions,
) -> Result<DateTime<T>> {
    match directive.action() {
        Action::Snap => apply_snap(directive, dtm, options.week_start),
        Action::Add | Action::Sub => apply_delta(directive, dtm),
    }
}

// ── Snap truncation ─────────────────────────────────────────────────────────

fn apply_snap<T: TimeZone>(
    directive: &Directive,
    dtm: DateTime<T>,
    week_start: WeekStart,
) -> Result<DateTime<T>> {
    // Second line of defense; unreachable through `parse`.
    if directive.time_int().is_some() {
        return Err(SnapError::SnapWithInteger);
    }

    let local = dtm.naive_local();
    let date = local.date();
    let truncated = match directive.unit() {
        Unit::Second => local.with_nanosecond(0),
        Unit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
        Unit::Hour => date.and_hms_opt(local.hour(), 0, 0),
        Unit::Day => date.and_hms_opt(0, 0, 0),
        Unit::Week => {
            let back = days_from_week_start(date.weekday(), week_start);
            date.checked_sub_days(Days::new(back))
                .and_then(|start| start.and_hms_opt(0, 0, 0))
        }
        Unit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .and_then(|start| start.and_hms_opt(0, 0, 0)),
        Unit::Quarter => {
            // First month of the current 3-month group: 1, 4, 7, or 10.
            let month = ((date.month() - 1) / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1)
                .and_then(|start| start.and_hms_opt(0, 0, 0))
        }
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .and_then(|start| start.and_hms_opt(0, 0, 0)),
        Unit::Millisecond | Unit::Microsecond => {
            return Err(SnapError::SnapBelowSecond(directive.unit()));
        }
    };
    let truncated =
        truncated.ok_or_else(|| SnapError::OutOfRange(format!("cannot truncate {local}")))?;
    rezone(&dtm.timezone(), truncated)
}

/// Re-resolve a truncated wall-clock value in its original timezone.
///
/// Ambiguous local times (DST fall-back overlap) resolve to the earliest
/// candidate; nonexistent local times (DST gap) are an error.
fn rezone<T: TimeZone>(tz: &T, local: NaiveDateTime) -> Result<DateTime<T>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dtm) => Ok(dtm),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(SnapError::NonexistentLocalTime(local.to_string())),
    }
}

// ── Delta arithmetic ────────────────────────────────────────────────────────

fn apply_delta<T: TimeZone>(directive: &Directive, dtm: DateTime<T>) -> Result<DateTime<T>> {
    // Second line of defense; unreachable through `parse`.
    let Some(count) = directive.time_int() else {
        return Err(SnapError::DeltaWithoutInteger);
    };
    let unit = directive.unit();
    let count = match directive.action() {
        Action::Sub => count.checked_neg().ok_or_else(|| out_of_range(count, unit))?,
        _ => count,
    };

    match unit {
        // Sub-day units are exact instant arithmetic.
        Unit::Microsecond => add_signed(dtm, Some(TimeDelta::microseconds(count)), count, unit),
        Unit::Millisecond => add_signed(dtm, Some(TimeDelta::milliseconds(count)), count, unit),
        Unit::Second => add_signed(dtm, TimeDelta::try_seconds(count), count, unit),
        Unit::Minute => add_signed(dtm, TimeDelta::try_minutes(count), count, unit),
        Unit::Hour => add_signed(dtm, TimeDelta::try_hours(count), count, unit),
        // Day and week arithmetic preserves local wall-clock time.
        Unit::Day => shift_days(dtm, count, count, unit),
        Unit::Week => shift_days(dtm, checked_scale(count, 7, unit)?, count, unit),
        // Month-based arithmetic clamps day-of-month to the target month.
        Unit::Month => shift_months(dtm, count, count, unit),
        Unit::Quarter => shift_months(dtm, checked_scale(count, 3, unit)?, count, unit),
        Unit::Year => shift_months(dtm, checked_scale(count, 12, unit)?, count, unit),
    }
}

fn out_of_range(count: i64, unit: Unit) -> SnapError {
    SnapError::OutOfRange(format!("{count} {unit}s"))
}

fn checked_scale(count: i64, factor: i64, unit: Unit) -> Result<i64> {
    count.checked_mul(factor).ok_or_else(|| out_of_range(count, unit))
}

fn add_signed<T: TimeZone>(
    dtm: DateTime<T>,
    delta: Option<TimeDelta>,
    count: i64,
    unit: Unit,
) -> Result<DateTime<T>> {
    delta
        .and_then(|delta| dtm.checked_add_signed(delta))
        .ok_or_else(|| out_of_range(count, unit))
}

fn shift_days<T: TimeZone>(
    dtm: DateTime<T>,
    days: i64,
    count: i64,
    unit: Unit,
) -> Result<DateTime<T>> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        dtm.checked_add_days(magnitude)
    } else {
        dtm.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| out_of_range(count, unit))
}

fn shift_months<T: TimeZone>(
    dtm: DateTime<T>,
    months: i64,
    count: i64,
    unit: Unit,
) -> Result<DateTime<T>> {
    let magnitude =
        u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range(count, unit))?;
    let magnitude = Months::new(magnitude);
    let shifted = if months >= 0 {
        dtm.checked_add_months(magnitude)
    } else {
        dtm.checked_sub_months(magnitude)
    };
    shifted.ok_or_else(|| out_of_range(count, unit))
}

// ── Tests ───────────────────────────────────────────────────────────────────
