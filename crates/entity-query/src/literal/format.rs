//! Canonical text form of literals.
//!
//! Output is always accepted by the literal grammar and parses back to an
//! equal literal.

use super::{Literal, ValueRange, DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Renders a literal as query text
pub fn format(literal: &Literal) -> String {
    let mut out = String::new();
    write_literal(&mut out, literal);
    out
}

/// Appends the query text of a literal to `out`
pub fn write_literal(out: &mut String, literal: &Literal) {
    match literal {
        Literal::String(s) => write_string(out, s),
        Literal::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Literal::Decimal(d) => write_decimal(out, d),
        Literal::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Literal::Date(d) => {
            let _ = write!(out, "{}", d.format(DATE_FORMAT));
        }
        Literal::Time(t) => {
            let _ = write!(out, "{}", t.format(TIME_FORMAT));
        }
        Literal::DateTime(dt) => {
            let _ = write!(out, "{}", dt.format(DATE_TIME_FORMAT));
        }
        Literal::ZonedDateTime(dt) => write_zoned(out, dt),
        Literal::IntRange(range) => write_range(out, range, |out, n| {
            let _ = write!(out, "{}", n);
        }),
        Literal::DecimalRange(range) => write_range(out, range, write_decimal),
        Literal::DateTimeRange(range) => write_range(out, range, write_zoned),
        Literal::Enum(token) => out.push_str(token.as_str()),
        Literal::Locale(locale) => {
            out.push('`');
            out.push_str(locale.as_str());
            out.push('`');
        }
        Literal::Multiple(values) => {
            out.push('{');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_literal(out, value);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}

// A decimal always carries a dot so it never reads back as an int.
fn write_decimal(out: &mut String, value: &Decimal) {
    let text = value.to_string();
    out.push_str(&text);
    if !text.contains('.') {
        out.push_str(".0");
    }
}

// RFC 3339 offsets have no seconds. A sub-minute offset is rewritten to
// its whole minutes, which shifts the local time but keeps the instant.
fn write_zoned(out: &mut String, value: &DateTime<FixedOffset>) {
    let seconds = value.offset().local_minus_utc();
    let whole_minutes = seconds - seconds % 60;
    match FixedOffset::east_opt(whole_minutes) {
        Some(offset) if whole_minutes != seconds => {
            out.push_str(&value.with_timezone(&offset).to_rfc3339_opts(SecondsFormat::AutoSi, false));
        }
        _ => out.push_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
    }
}

fn write_range<T>(out: &mut String, range: &ValueRange<T>, write_bound: impl Fn(&mut String, &T))
where
    T: PartialOrd + Copy + std::fmt::Debug,
{
    out.push('[');
    if let Some(lower) = range.lower() {
        write_bound(out, &lower);
    }
    out.push(',');
    if let Some(upper) = range.upper() {
        write_bound(out, &upper);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::{DecimalRange, EnumLiteral, IntRange, LiteralKind, Locale};
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use std::str::FromStr;

    #[test]
    fn test_format_string_escapes_quote() {
        assert_eq!(format(&Literal::from("it's")), r"'it\'s'");
    }

    #[test]
    fn test_format_decimal_keeps_scale() {
        let d = Decimal::from_str("10.50").unwrap();
        assert_eq!(format(&Literal::Decimal(d)), "10.50");
    }

    #[test]
    fn test_format_whole_decimal_gets_dot() {
        assert_eq!(format(&Literal::Decimal(Decimal::from(10))), "10.0");
    }

    #[test]
    fn test_format_temporal() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap();
        let time = NaiveTime::from_hms_opt(13, 45, 0).unwrap();
        assert_eq!(format(&Literal::Date(date)), "2021-01-31");
        assert_eq!(format(&Literal::Time(time)), "13:45:00");
        assert_eq!(format(&Literal::DateTime(date.and_time(time))), "2021-01-31T13:45:00");

        let zoned = DateTime::parse_from_rfc3339("2021-01-31T13:45:00+01:00").unwrap();
        assert_eq!(format(&Literal::ZonedDateTime(zoned)), "2021-01-31T13:45:00+01:00");
    }

    #[test]
    fn test_format_offset_with_seconds_keeps_instant() {
        let offset = FixedOffset::east_opt(3661).unwrap();
        let zoned = offset.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let text = format(&Literal::ZonedDateTime(zoned));
        assert_eq!(text, "2020-12-31T23:59:59+01:01");
        assert_eq!(
            Literal::parse_token(&text, LiteralKind::ZonedDateTime).unwrap(),
            Literal::ZonedDateTime(zoned)
        );
    }

    #[test]
    fn test_format_ranges() {
        assert_eq!(format(&Literal::IntRange(IntRange::at_most(5))), "[,5]");
        let range = DecimalRange::between(Decimal::from(1), Decimal::from_str("2.5").unwrap()).unwrap();
        assert_eq!(format(&Literal::DecimalRange(range)), "[1.0,2.5]");
    }

    #[test]
    fn test_format_tokens() {
        let token = EnumLiteral::new("WITH_TAX").unwrap();
        assert_eq!(format(&Literal::Enum(token)), "WITH_TAX");
        let locale = Locale::parse("cs-CZ").unwrap();
        assert_eq!(format(&Literal::Locale(locale)), "`cs-CZ`");
    }

    #[test]
    fn test_format_nested_multiple() {
        let literal = Literal::Multiple(vec![
            Literal::Int(1),
            Literal::Multiple(vec![Literal::from("a"), Literal::Boolean(true)]),
        ]);
        assert_eq!(format(&literal), "{1,{'a',true}}");
    }
}
