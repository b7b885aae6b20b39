//! Validated directives: the unit of snaptime evaluation.

use std::fmt;

use serde::Serialize;

use crate::error::SnapError;
use crate::unit::Unit;

/// What a directive does to a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Truncate to the start of the unit.
    Snap,
    /// Shift forward by N units.
    Add,
    /// Shift backward by N units.
    Sub,
}

impl Action {
    /// The action denoted by an expression marker character, if any.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '@' => Some(Action::Snap),
            '+' => Some(Action::Add),
            '-' => Some(Action::Sub),
            _ => None,
        }
    }
}

/// One validated unit of the grammar: a snap, an addition, or a subtraction.
///
/// A `Directive` can only be obtained through [`Directive::new`] (or the
/// [`snap`](Directive::snap) / [`add`](Directive::add) /
/// [`sub`](Directive::sub) shorthands), which enforce the construction
/// invariants eagerly: snaps carry a unit and no integer and cannot target
/// sub-second units; additions and subtractions carry both a unit and an
/// integer. Once constructed a directive is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive {
    action: Action,
    unit: Unit,
    time_int: Option<i64>,
}

impl Directive {
    /// Build a directive from its raw parts, validating every invariant.
    ///
    /// # Errors
    ///
    /// - [`SnapError::MissingAction`] when `action` is `None`.
    /// - [`SnapError::SnapWithInteger`] for a snap with an integer count.
    /// - [`SnapError::SnapWithoutUnit`] for a snap with no unit.
    /// - [`SnapError::SnapBelowSecond`] for a snap to millisecond or
    ///   microsecond granularity.
    /// - [`SnapError::DeltaWithoutInteger`] for an add/sub with no integer.
    /// - [`SnapError::DeltaWithoutUnit`] for an add/sub with no unit.
    pub fn new(
        action: Option<Action>,
        unit: Option<Unit>,
        time_int: Option<i64>,
    ) -> Result<Self, SnapError> {
        let action = action.ok_or(SnapError::MissingAction)?;
        match action {
            Action::Snap => {
                if time_int.is_some() {
                    return Err(SnapError::SnapWithInteger);
                }
                let unit = unit.ok_or(SnapError::SnapWithoutUnit)?;
                if matches!(unit, Unit::Millisecond | Unit::Microsecond) {
                    return Err(SnapError::SnapBelowSecond(unit));
                }
                Ok(Self { action, unit, time_int: None })
            }
            Action::Add | Action::Sub => {
                let time_int = time_int.ok_or(SnapError::DeltaWithoutInteger)?;
                let unit = unit.ok_or(SnapError::DeltaWithoutUnit)?;
                Ok(Self { action, unit, time_int: Some(time_int) })
            }
        }
    }

    /// A snap to the start of `unit`.
    pub fn snap(unit: Unit) -> Result<Self, SnapError> {
        Self::new(Some(Action::Snap), Some(unit), None)
    }

    /// An addition of `time_int` units.
    pub fn add(unit: Unit, time_int: i64) -> Result<Self, SnapError> {
        Self::new(Some(Action::Add), Some(unit), Some(time_int))
    }

    /// A subtraction of `time_int` units.
    pub fn sub(unit: Unit, time_int: i64) -> Result<Self, SnapError> {
        Self::new(Some(Action::Sub), Some(unit), Some(time_int))
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The integer count. `Some` for add/sub, `None` for snap.
    pub fn time_int(&self) -> Option<i64> {
        self.time_int
    }
}

impl fmt::Display for Directive {
    /// Formats the directive back to expression syntax with the unit's
    /// primary abbreviation: `@d`, `+10m`, `-2h`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.action, self.time_int) {
            (Action::Snap, _) => write!(f, "@{}", self.unit.abbrev()),
            (Action::Add, Some(n)) => write!(f, "+{}{}", n, self.unit.abbrev()),
            (Action::Sub, Some(n)) => write!(f, "-{}{}", n, self.unit.abbrev()),
            // Unreachable after validation; keep the output well-formed.
            (Action::Add | Action::Sub, None) => write!(f, "0{}", self.unit.abbrev()),
        }
    }
}
