//! Tokenizer and grammar validator for snaptime expressions.
//!
//! Grammar:
//!
//! ```text
//! snaptime   := directive+
//! directive  := snap_directive | delta_directive
//! snap_directive  := "@" unit_alias
//! delta_directive := sign digits unit_alias
//! sign       := "+" | "-"
//! digits     := one or more decimal digits
//! ```
//!
//! The whole string must be consumed by directives; any unmatched remainder
//! fails the parse. A unit alias is the maximal ASCII-alphabetic run at its
//! position and is resolved exactly against the alias table, so a shorter
//! alias never swallows input meant for a longer one (`mon` is a month,
//! never a minute followed by stray `on`).

use crate::directive::{Action, Directive};
use crate::error::SnapError;
use crate::unit::Unit;

/// Parse a snaptime expression into its ordered directive sequence.
///
/// Tokenization order is evaluation order. The parse is atomic: if any
/// directive in the string is invalid, the whole expression is rejected
/// and no directives are produced.
///
/// # Errors
///
/// [`SnapError::InvalidExpression`] for empty input, unparsed remainder, or
/// an integer count that overflows; [`SnapError::UnknownUnit`] for an alias
/// not in the unit table; and the directive construction errors of
/// [`Directive::new`] for grammatically well-formed but invalid directives.
///
/// # Examples
///
/// ```
/// use snaptime::{parse, Directive, Unit};
///
/// let directives = parse("@d-2h+10m").unwrap();
/// assert_eq!(
///     directives,
///     vec![
///         Directive::snap(Unit::Day).unwrap(),
///         Directive::sub(Unit::Hour, 2).unwrap(),
///         Directive::add(Unit::Minute, 10).unwrap(),
///     ]
/// );
/// ```
pub fn parse(expression: &str) -> Result<Vec<Directive>, SnapError> {
    if expression.is_empty() {
        return Err(SnapError::InvalidExpression("expression is empty".to_string()));
    }

    let mut directives = Vec::new();
    let mut rest = expression;

    while let Some(marker) = rest.chars().next() {
        let action = Action::from_marker(marker).ok_or_else(|| {
            SnapError::InvalidExpression(format!("unexpected input at '{rest}'"))
        })?;
        rest = &rest[marker.len_utf8()..];

        let time_int = match split_run(&mut rest, |b| b.is_ascii_digit()) {
            Some(digits) => Some(digits.parse::<i64>().map_err(|_| {
                SnapError::InvalidExpression(format!("time integer '{digits}' is out of range"))
            })?),
            None => None,
        };

        let unit = match split_run(&mut rest, |b| b.is_ascii_alphabetic()) {
            Some(alias) => Some(Unit::from_alias(alias)?),
            None => None,
        };

        directives.push(Directive::new(Some(action), unit, time_int)?);
    }

    Ok(directives)
}

/// Split the leading run of bytes matching `pred` off the front of `rest`.
/// Returns `None` for an empty run.
fn split_run<'a>(rest: &mut &'a str, pred: fn(&u8) -> bool) -> Option<&'a str> {
    let len = rest.bytes().take_while(|b| pred(b)).count();
    if len == 0 {
        return None;
    }
    let (run, tail) = rest.split_at(len);
    *rest = tail;
    Some(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_mixed_expression_in_order() {
        let directives = parse("@d-2h+10m").unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::snap(Unit::Day).unwrap(),
                Directive::sub(Unit::Hour, 2).unwrap(),
                Directive::add(Unit::Minute, 10).unwrap(),
            ]
        );
    }

    #[test]
    fn parses_long_aliases_without_prefix_capture() {
        let directives = parse("@mon-1mon+2quarters").unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::snap(Unit::Month).unwrap(),
                Directive::sub(Unit::Month, 1).unwrap(),
                Directive::add(Unit::Quarter, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn empty_expression_is_rejected() {
        assert_eq!(
            parse(""),
            Err(SnapError::InvalidExpression("expression is empty".to_string()))
        );
    }

    #[test]
    fn leading_garbage_is_rejected() {
        assert!(matches!(
            parse("tomorrow"),
            Err(SnapError::InvalidExpression(_))
        ));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(parse("@d "), Err(SnapError::InvalidExpression(_))));
        assert!(matches!(parse("@d,@h"), Err(SnapError::InvalidExpression(_))));
    }

    #[test]
    fn garbage_after_a_unit_alias_is_an_unknown_unit() {
        // The maximal alphabetic run is the alias token, so `dx` is one
        // unknown alias rather than `d` plus leftover `x`.
        assert_eq!(
            parse("@dx"),
            Err(SnapError::UnknownUnit("dx".to_string()))
        );
    }

    #[test]
    fn snap_with_integer_fails_the_whole_parse() {
        assert_eq!(parse("@2d"), Err(SnapError::SnapWithInteger));
    }

    #[test]
    fn snap_without_unit_fails_the_whole_parse() {
        assert_eq!(parse("@"), Err(SnapError::SnapWithoutUnit));
        assert_eq!(parse("@d@"), Err(SnapError::SnapWithoutUnit));
    }

    #[test]
    fn sub_second_snap_is_rejected() {
        assert_eq!(parse("@ms"), Err(SnapError::SnapBelowSecond(Unit::Millisecond)));
        assert_eq!(parse("@us"), Err(SnapError::SnapBelowSecond(Unit::Microsecond)));
    }

    #[test]
    fn delta_without_integer_is_rejected() {
        assert_eq!(parse("+d"), Err(SnapError::DeltaWithoutInteger));
        assert_eq!(parse("-h"), Err(SnapError::DeltaWithoutInteger));
    }

    #[test]
    fn delta_without_unit_is_rejected() {
        assert_eq!(parse("+2"), Err(SnapError::DeltaWithoutUnit));
        assert_eq!(parse("@d-2"), Err(SnapError::DeltaWithoutUnit));
    }

    #[test]
    fn oversized_integer_is_rejected() {
        assert!(matches!(
            parse("+99999999999999999999s"),
            Err(SnapError::InvalidExpression(_))
        ));
    }

    #[test]
    fn an_invalid_tail_directive_rejects_the_whole_expression() {
        // Atomicity: the valid leading directives are discarded too.
        assert_eq!(parse("@d-2h+10x"), Err(SnapError::UnknownUnit("x".to_string())));
    }

    #[test]
    fn every_alias_parses_in_delta_position() {
        for unit in [
            Unit::Microsecond,
            Unit::Millisecond,
            Unit::Second,
            Unit::Minute,
            Unit::Hour,
            Unit::Day,
            Unit::Week,
            Unit::Month,
            Unit::Quarter,
            Unit::Year,
        ] {
            for alias in unit.aliases() {
                let expression = format!("+3{alias}");
                assert_eq!(
                    parse(&expression),
                    Ok(vec![Directive::add(unit, 3).unwrap()]),
                    "expression {expression}"
                );
            }
        }
    }
}
