//! Literal grammar.
//!
//! Token shapes are recognized by chumsky; the token text is then
//! classified into a [`LiteralKind`] and handed to [`Literal::parse_token`],
//! so the grammar and the formatter share one definition of each kind.

use super::common::{locale_token, range_token, scalar_token, string_token, word, Extra};
use crate::literal::{EnumLiteral, Literal, LiteralKind};
use chumsky::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d{4,}-\d{2}-\d{2}$").unwrap());

static OFFSET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(Z|[+-]\d{2}:\d{2})$").unwrap());

/// Kind of a numeric or temporal scalar token
pub(crate) fn scalar_kind(token: &str) -> LiteralKind {
    if token.contains('T') {
        if OFFSET_RE.is_match(token) {
            LiteralKind::ZonedDateTime
        } else {
            LiteralKind::DateTime
        }
    } else if DATE_RE.is_match(token) {
        LiteralKind::Date
    } else if token.contains(':') {
        LiteralKind::Time
    } else if token.contains('.') {
        LiteralKind::Decimal
    } else {
        LiteralKind::Int
    }
}

/// Kind of a `[from,to]` token, decided by its bounds
pub(crate) fn range_kind(token: &str) -> LiteralKind {
    if token.contains('T') {
        LiteralKind::DateTimeRange
    } else if token.contains('.') {
        LiteralKind::DecimalRange
    } else {
        LiteralKind::IntRange
    }
}

/// Bare words are booleans or enum tokens.
fn word_literal(word: &str) -> Result<Literal, String> {
    match word {
        "true" => Ok(Literal::Boolean(true)),
        "false" => Ok(Literal::Boolean(false)),
        _ => EnumLiteral::new(word)
            .map(Literal::Enum)
            .map_err(|_| format!("unexpected identifier `{}`", word)),
    }
}

fn classified<'src>(
    token: impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone,
    classify: fn(&str) -> LiteralKind,
) -> impl Parser<'src, &'src str, Literal, Extra<'src>> + Clone {
    token.try_map(move |text: &str, span| {
        Literal::parse_token(text, classify(text)).map_err(|e| Rich::custom(span, e))
    })
}

/// Parser for any literal, including nested `{...}` multiples
pub fn literal<'src>() -> impl Parser<'src, &'src str, Literal, Extra<'src>> + Clone {
    recursive(|literal| {
        let multiple = literal
            .separated_by(just(',').padded())
            .at_least(2)
            .collect::<Vec<_>>()
            .delimited_by(just('{').padded(), just('}').padded())
            .map(Literal::Multiple)
            .labelled("multiple literal like {1,2}");

        let bare = word().try_map(|text: &str, span| word_literal(text).map_err(|e| Rich::custom(span, e)));

        choice((
            classified(string_token(), |_| LiteralKind::String),
            classified(locale_token(), |_| LiteralKind::Locale),
            classified(range_token(), range_kind),
            multiple,
            classified(scalar_token(), scalar_kind),
            bare,
        ))
        .labelled("literal")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::{format, DecimalRange, IntRange, Locale};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use test_case::test_case;

    fn parse(input: &str) -> Literal {
        literal().then_ignore(end()).parse(input).into_result().unwrap()
    }

    #[test_case("-12", LiteralKind::Int)]
    #[test_case("12.50", LiteralKind::Decimal)]
    #[test_case("2021-01-31", LiteralKind::Date)]
    #[test_case("13:45:00", LiteralKind::Time)]
    #[test_case("2021-01-31T13:45:00", LiteralKind::DateTime)]
    #[test_case("2021-01-31T13:45:00+01:00", LiteralKind::ZonedDateTime)]
    #[test_case("2021-01-31T13:45:00Z", LiteralKind::ZonedDateTime)]
    fn test_scalar_kind(token: &str, kind: LiteralKind) {
        assert_eq!(scalar_kind(token), kind);
    }

    #[test_case("[1,5]", LiteralKind::IntRange)]
    #[test_case("[1,5.5]", LiteralKind::DecimalRange)]
    #[test_case("[2021-01-01T00:00:00+01:00,]", LiteralKind::DateTimeRange)]
    fn test_range_kind(token: &str, kind: LiteralKind) {
        assert_eq!(range_kind(token), kind);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("-12"), Literal::Int(-12));
        assert_eq!(parse("12.50"), Literal::Decimal(Decimal::from_str("12.5").unwrap()));
        assert_eq!(parse("2021-01-31"), Literal::Date(NaiveDate::from_ymd_opt(2021, 1, 31).unwrap()));
        assert_eq!(parse("13:45:00"), Literal::Time(NaiveTime::from_hms_opt(13, 45, 0).unwrap()));
    }

    #[test]
    fn test_words() {
        assert_eq!(parse("true"), Literal::Boolean(true));
        assert_eq!(parse("WITH_TAX"), Literal::Enum(EnumLiteral::new("WITH_TAX").unwrap()));
        assert!(literal().parse("withTax").into_result().is_err());
    }

    #[test]
    fn test_strings_and_locales() {
        assert_eq!(parse(r"'it\'s'"), Literal::from("it's"));
        assert_eq!(parse("\"abc\""), Literal::from("abc"));
        assert_eq!(parse("`cs-CZ`"), Literal::Locale(Locale::parse("cs-CZ").unwrap()));
    }

    #[test]
    fn test_ranges() {
        assert_eq!(parse("[1,5]"), Literal::IntRange(IntRange::between(1, 5).unwrap()));
        assert_eq!(parse("[,5]"), Literal::IntRange(IntRange::at_most(5)));
        assert_eq!(
            parse("[1,5.5]"),
            Literal::DecimalRange(
                DecimalRange::between(Decimal::from(1), Decimal::from_str("5.5").unwrap()).unwrap()
            )
        );
        assert!(literal().parse("[5,1]").into_result().is_err());
        assert!(literal().parse("[,]").into_result().is_err());
    }

    #[test]
    fn test_nested_multiple() {
        let parsed = parse("{1, 'a', {2, 3}}");
        assert_eq!(format(&parsed), "{1,'a',{2,3}}");
        assert!(literal().then_ignore(end()).parse("{1}").into_result().is_err());
    }

    #[test]
    fn test_formatted_literals_parse_back() {
        let samples = [
            Literal::from("quote ' and \\"),
            Literal::Decimal(Decimal::from(10)),
            Literal::IntRange(IntRange::at_least(3)),
            Literal::from(true),
        ];
        for sample in samples {
            assert_eq!(parse(&format(&sample)), sample);
        }
    }
}
