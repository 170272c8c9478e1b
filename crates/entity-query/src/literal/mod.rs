//! Literal values carried as constraint arguments.
//!
//! A [`Literal`] is one of thirteen scalar kinds or a `Multiple` list of
//! literals. Values enter through [`IntoArgument`] (typed factory input),
//! [`Literal::to_supported`] (dynamic JSON input) or
//! [`Literal::parse_token`] (query text), and leave through [`format`].

mod format;
mod range;

pub use format::{format, write_literal};
pub use range::{DateTimeRange, DecimalRange, IntRange, ValueRange};

use crate::error::{QueryError, QueryResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

static ENUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").unwrap());

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// ============================================================================
// Literal
// ============================================================================

/// Canonical constraint argument.
///
/// Equality is structural, except that decimals compare by value:
/// `10.0` and `10.00` are the same literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Int(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    ZonedDateTime(DateTime<FixedOffset>),
    IntRange(IntRange),
    DecimalRange(DecimalRange),
    DateTimeRange(DateTimeRange),
    Enum(EnumLiteral),
    Locale(Locale),
    /// Two or more literals, possibly nested
    Multiple(#[serde(deserialize_with = "deserialize_multiple")] Vec<Literal>),
}

/// Discriminant of [`Literal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    String,
    Int,
    Decimal,
    Boolean,
    Date,
    Time,
    DateTime,
    ZonedDateTime,
    IntRange,
    DecimalRange,
    DateTimeRange,
    Enum,
    Locale,
    Multiple,
}

impl LiteralKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::ZonedDateTime => "zoned date-time",
            Self::IntRange => "int range",
            Self::DecimalRange => "decimal range",
            Self::DateTimeRange => "date-time range",
            Self::Enum => "enum",
            Self::Locale => "locale",
            Self::Multiple => "multiple",
        }
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Self::String(_) => LiteralKind::String,
            Self::Int(_) => LiteralKind::Int,
            Self::Decimal(_) => LiteralKind::Decimal,
            Self::Boolean(_) => LiteralKind::Boolean,
            Self::Date(_) => LiteralKind::Date,
            Self::Time(_) => LiteralKind::Time,
            Self::DateTime(_) => LiteralKind::DateTime,
            Self::ZonedDateTime(_) => LiteralKind::ZonedDateTime,
            Self::IntRange(_) => LiteralKind::IntRange,
            Self::DecimalRange(_) => LiteralKind::DecimalRange,
            Self::DateTimeRange(_) => LiteralKind::DateTimeRange,
            Self::Enum(_) => LiteralKind::Enum,
            Self::Locale(_) => LiteralKind::Locale,
            Self::Multiple(_) => LiteralKind::Multiple,
        }
    }

    /// Builds a `Multiple` literal. Needs at least two values.
    pub fn multiple(values: Vec<Literal>) -> QueryResult<Self> {
        check_multiple(&values)?;
        Ok(Self::Multiple(values))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Int(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumLiteral> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Maps a dynamic JSON value onto a supported literal kind.
    ///
    /// Integral numbers become `Int`, other numbers `Decimal`, arrays of
    /// two or more supported values `Multiple`. Anything else fails with
    /// [`QueryError::UnsupportedValueType`].
    pub fn to_supported(value: &serde_json::Value) -> QueryResult<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => {
                    let text = n.to_string();
                    Decimal::from_str(&text)
                        .or_else(|_| Decimal::from_scientific(&text))
                        .map(Self::Decimal)
                        .map_err(|_| QueryError::UnsupportedValueType { value: text })
                }
            },
            Value::Array(items) if items.len() >= 2 => items
                .iter()
                .map(Self::to_supported)
                .collect::<QueryResult<Vec<_>>>()
                .map(Self::Multiple),
            other => Err(QueryError::UnsupportedValueType {
                value: other.to_string(),
            }),
        }
    }

    /// Parses the textual form of a single literal of the given kind.
    ///
    /// This is the inverse of [`format`] for every kind except `Multiple`,
    /// whose list syntax belongs to the query grammar.
    pub fn parse_token(text: &str, kind: LiteralKind) -> QueryResult<Self> {
        let invalid = |reason: String| QueryError::InvalidLiteral {
            kind: kind.name(),
            text: text.to_string(),
            reason,
        };

        match kind {
            LiteralKind::String => unquote(text).map(Self::String).ok_or_else(|| {
                invalid("expected a quoted string".to_string())
            }),
            LiteralKind::Int => text
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::Decimal => Decimal::from_str(text)
                .map(Self::Decimal)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::Boolean => match text {
                "true" => Ok(Self::Boolean(true)),
                "false" => Ok(Self::Boolean(false)),
                _ => Err(invalid("expected `true` or `false`".to_string())),
            },
            LiteralKind::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Self::Date)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::Time => NaiveTime::parse_from_str(text, TIME_FORMAT)
                .map(Self::Time)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::DateTime => NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
                .map(Self::DateTime)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::ZonedDateTime => DateTime::parse_from_rfc3339(text)
                .map(Self::ZonedDateTime)
                .map_err(|e| invalid(e.to_string())),
            LiteralKind::IntRange => {
                let (from, to) = split_range(text).ok_or_else(|| invalid("expected [from,to]".to_string()))?;
                let from = from.map(str::parse::<i64>).transpose().map_err(|e| invalid(e.to_string()))?;
                let to = to.map(str::parse::<i64>).transpose().map_err(|e| invalid(e.to_string()))?;
                IntRange::try_new(from, to).map(Self::IntRange)
            }
            LiteralKind::DecimalRange => {
                let (from, to) = split_range(text).ok_or_else(|| invalid("expected [from,to]".to_string()))?;
                let from = from.map(Decimal::from_str).transpose().map_err(|e| invalid(e.to_string()))?;
                let to = to.map(Decimal::from_str).transpose().map_err(|e| invalid(e.to_string()))?;
                DecimalRange::try_new(from, to).map(Self::DecimalRange)
            }
            LiteralKind::DateTimeRange => {
                let (from, to) = split_range(text).ok_or_else(|| invalid("expected [from,to]".to_string()))?;
                let from = from
                    .map(DateTime::parse_from_rfc3339)
                    .transpose()
                    .map_err(|e| invalid(e.to_string()))?;
                let to = to
                    .map(DateTime::parse_from_rfc3339)
                    .transpose()
                    .map_err(|e| invalid(e.to_string()))?;
                DateTimeRange::try_new(from, to).map(Self::DateTimeRange)
            }
            LiteralKind::Enum => EnumLiteral::new(text).map(Self::Enum),
            LiteralKind::Locale => text
                .strip_prefix('`')
                .and_then(|rest| rest.strip_suffix('`'))
                .ok_or_else(|| invalid("expected a backtick-quoted language tag".to_string()))
                .and_then(Locale::parse)
                .map(Self::Locale),
            LiteralKind::Multiple => Err(invalid(
                "multiple literals are only accepted inside query text".to_string(),
            )),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

fn check_multiple(values: &[Literal]) -> QueryResult<()> {
    if values.len() < 2 {
        return Err(QueryError::InvalidLiteral {
            kind: LiteralKind::Multiple.name(),
            text: format!("{} value(s)", values.len()),
            reason: "a multiple literal holds at least two values".to_string(),
        });
    }
    Ok(())
}

fn deserialize_multiple<'de, D>(deserializer: D) -> Result<Vec<Literal>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Literal>::deserialize(deserializer)?;
    check_multiple(&values).map_err(de::Error::custom)?;
    Ok(values)
}

/// Strips matching quotes and resolves `\` escapes.
fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            c if c == quote => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

/// Splits `[from,to]` into its optional bounds.
fn split_range(text: &str) -> Option<(Option<&str>, Option<&str>)> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (from, to) = inner.split_once(',')?;
    fn bound(s: &str) -> Option<&str> {
        let s = s.trim();
        (!s.is_empty()).then_some(s)
    }
    Some((bound(from), bound(to)))
}

// ============================================================================
// Enum and locale tokens
// ============================================================================

/// Bare upper-snake-case token such as `WITH_TAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnumLiteral(String);

impl EnumLiteral {
    pub fn new(token: impl Into<String>) -> QueryResult<Self> {
        let token = token.into();
        if ENUM_RE.is_match(&token) {
            Ok(Self(token))
        } else {
            Err(QueryError::InvalidLiteral {
                kind: LiteralKind::Enum.name(),
                text: token,
                reason: "expected an UPPER_SNAKE_CASE token".to_string(),
            })
        }
    }

    /// Token known to be valid at compile time
    pub(crate) fn from_static(token: &'static str) -> Self {
        debug_assert!(ENUM_RE.is_match(token), "invalid enum token {token}");
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EnumLiteral {
    type Error = QueryError;

    fn try_from(token: String) -> QueryResult<Self> {
        Self::new(token)
    }
}

impl From<EnumLiteral> for String {
    fn from(token: EnumLiteral) -> Self {
        token.0
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language tag such as `cs-CZ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn parse(tag: &str) -> QueryResult<Self> {
        if LOCALE_RE.is_match(tag) {
            Ok(Self(tag.to_string()))
        } else {
            Err(QueryError::InvalidLiteral {
                kind: LiteralKind::Locale.name(),
                text: tag.to_string(),
                reason: "expected a language tag like `en-US`".to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Locale {
    type Error = QueryError;

    fn try_from(tag: String) -> QueryResult<Self> {
        Self::parse(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

literal_from! {
    String => String,
    &str => String,
    i64 => Int,
    i32 => Int,
    i16 => Int,
    u32 => Int,
    u16 => Int,
    u8 => Int,
    Decimal => Decimal,
    bool => Boolean,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => ZonedDateTime,
    IntRange => IntRange,
    DecimalRange => DecimalRange,
    DateTimeRange => DateTimeRange,
    EnumLiteral => Enum,
    Locale => Locale,
}

// Floats go through their shortest decimal text, so `0.1_f64` becomes
// exactly `0.1`. NaN and infinities have no decimal form.
macro_rules! literal_try_from_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<$ty> for Literal {
                type Error = QueryError;

                fn try_from(value: $ty) -> QueryResult<Self> {
                    let text = value.to_string();
                    Decimal::from_str(&text)
                        .map(Self::Decimal)
                        .map_err(|_| QueryError::UnsupportedValueType { value: text })
                }
            }
        )*
    };
}

literal_try_from_float! { f64, f32 }

macro_rules! literal_try_from_wide_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<$ty> for Literal {
                type Error = QueryError;

                fn try_from(value: $ty) -> QueryResult<Self> {
                    i64::try_from(value)
                        .map(Self::Int)
                        .map_err(|_| QueryError::UnsupportedValueType { value: value.to_string() })
                }
            }
        )*
    };
}

literal_try_from_wide_int! { u64, usize, isize, i128, u128 }

/// Factory input that may be absent.
///
/// Plain values always produce a literal; `Option`s produce nothing when
/// `None`, which is how factory functions detect a missing argument.
/// Values without a literal form (a NaN, a `u64` beyond `i64::MAX`) are
/// absent as well.
pub trait IntoArgument {
    fn into_argument(self) -> Option<Literal>;
}

macro_rules! into_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoArgument for $ty {
                fn into_argument(self) -> Option<Literal> {
                    Some(Literal::from(self))
                }
            }

            impl IntoArgument for Option<$ty> {
                fn into_argument(self) -> Option<Literal> {
                    self.map(Literal::from)
                }
            }
        )*
    };
}

into_argument! {
    Literal,
    String,
    &str,
    i64,
    i32,
    i16,
    u32,
    u16,
    u8,
    Decimal,
    bool,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<FixedOffset>,
    IntRange,
    DecimalRange,
    DateTimeRange,
    EnumLiteral,
    Locale,
}

macro_rules! fallible_into_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoArgument for $ty {
                fn into_argument(self) -> Option<Literal> {
                    match Literal::try_from(self) {
                        Ok(literal) => Some(literal),
                        Err(err) => {
                            warn!(error = %err, "dropping argument without a literal form");
                            None
                        }
                    }
                }
            }

            impl IntoArgument for Option<$ty> {
                fn into_argument(self) -> Option<Literal> {
                    self.and_then(IntoArgument::into_argument)
                }
            }
        )*
    };
}

fallible_into_argument! { f64, f32, u64, usize, isize, i128, u128 }

/// Converts variadic input, silently dropping absent values.
pub(crate) fn collect_arguments<V: IntoArgument>(values: impl IntoIterator<Item = V>) -> Vec<Literal> {
    values.into_iter().filter_map(IntoArgument::into_argument).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    // =========================================================================
    // Canonicalization
    // =========================================================================

    #[test]
    fn test_to_supported_scalars() {
        assert_eq!(Literal::to_supported(&json!("abc")).unwrap(), Literal::from("abc"));
        assert_eq!(Literal::to_supported(&json!(5)).unwrap(), Literal::Int(5));
        assert_eq!(Literal::to_supported(&json!(true)).unwrap(), Literal::Boolean(true));
        assert_eq!(
            Literal::to_supported(&json!(10.5)).unwrap(),
            Literal::Decimal(Decimal::from_str("10.5").unwrap())
        );
    }

    #[test]
    fn test_to_supported_array_becomes_multiple() {
        let literal = Literal::to_supported(&json!([1, "a", [2, 3]])).unwrap();
        assert_eq!(
            literal,
            Literal::Multiple(vec![
                Literal::Int(1),
                Literal::from("a"),
                Literal::Multiple(vec![Literal::Int(2), Literal::Int(3)]),
            ])
        );
    }

    #[test_case(json!(null) ; "null")]
    #[test_case(json!({"a": 1}) ; "object")]
    #[test_case(json!([1]) ; "single element array")]
    fn test_to_supported_rejects(value: serde_json::Value) {
        assert!(matches!(
            Literal::to_supported(&value),
            Err(QueryError::UnsupportedValueType { .. })
        ));
    }

    #[test]
    fn test_multiple_needs_two_values() {
        assert!(Literal::multiple(vec![Literal::Int(1)]).is_err());
        assert!(Literal::multiple(vec![Literal::Int(1), Literal::Int(2)]).is_ok());
    }

    // =========================================================================
    // Equality
    // =========================================================================

    #[test]
    fn test_decimal_equality_ignores_representation() {
        let a = Literal::Decimal(Decimal::from_str("10.0").unwrap());
        let b = Literal::Decimal(Decimal::from_str("10.00").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_int_and_decimal_are_distinct() {
        assert_ne!(Literal::Int(10), Literal::Decimal(Decimal::from(10)));
    }

    // =========================================================================
    // Token parsing
    // =========================================================================

    #[test_case("'it\\'s'", LiteralKind::String, Literal::from("it's") ; "escaped string")]
    #[test_case("\"plain\"", LiteralKind::String, Literal::from("plain") ; "double quoted string")]
    #[test_case("-42", LiteralKind::Int, Literal::Int(-42) ; "negative int")]
    #[test_case("false", LiteralKind::Boolean, Literal::Boolean(false) ; "boolean")]
    #[test_case("WITH_TAX", LiteralKind::Enum, Literal::Enum(EnumLiteral::new("WITH_TAX").unwrap()) ; "enum")]
    #[test_case("`cs-CZ`", LiteralKind::Locale, Literal::Locale(Locale::parse("cs-CZ").unwrap()) ; "locale")]
    #[test_case("[1,]", LiteralKind::IntRange, Literal::IntRange(IntRange::at_least(1)) ; "open int range")]
    fn test_parse_token(text: &str, kind: LiteralKind, expected: Literal) {
        assert_eq!(Literal::parse_token(text, kind).unwrap(), expected);
    }

    #[test]
    fn test_parse_token_temporal() {
        let date = Literal::parse_token("2021-01-31", LiteralKind::Date).unwrap();
        assert_eq!(date, Literal::Date(NaiveDate::from_ymd_opt(2021, 1, 31).unwrap()));

        let zoned = Literal::parse_token("2021-01-31T10:00:00+01:00", LiteralKind::ZonedDateTime).unwrap();
        let utc = Literal::parse_token("2021-01-31T09:00:00Z", LiteralKind::ZonedDateTime).unwrap();
        assert_eq!(zoned, utc);
    }

    #[test_case("abc", LiteralKind::String ; "unquoted string")]
    #[test_case("1.5", LiteralKind::Int ; "decimal as int")]
    #[test_case("2021-13-01", LiteralKind::Date ; "bad month")]
    #[test_case("with_tax", LiteralKind::Enum ; "lowercase enum")]
    #[test_case("[5,1]", LiteralKind::IntRange ; "inverted range")]
    #[test_case("[,]", LiteralKind::IntRange ; "unbounded range")]
    fn test_parse_token_rejects(text: &str, kind: LiteralKind) {
        assert!(Literal::parse_token(text, kind).is_err());
    }

    // =========================================================================
    // Serde
    // =========================================================================

    #[test]
    fn test_serde_round_trip() {
        let literal = Literal::Multiple(vec![
            Literal::Enum(EnumLiteral::new("WITH_TAX").unwrap()),
            Literal::Locale(Locale::parse("cs-CZ").unwrap()),
            Literal::IntRange(IntRange::at_most(5)),
        ]);
        let json = serde_json::to_string(&literal).unwrap();
        assert_eq!(serde_json::from_str::<Literal>(&json).unwrap(), literal);
    }

    #[test_case(json!({"kind": "multiple", "value": [{"kind": "int", "value": 1}]}) ; "single value multiple")]
    #[test_case(json!({"kind": "int_range", "value": {"from": null, "to": null}}) ; "unbounded range")]
    #[test_case(json!({"kind": "int_range", "value": {"from": 5, "to": 1}}) ; "inverted range")]
    #[test_case(json!({"kind": "enum", "value": "with_tax"}) ; "lowercase enum")]
    #[test_case(json!({"kind": "locale", "value": "not a tag"}) ; "bad locale")]
    fn test_deserialize_rejects(value: serde_json::Value) {
        assert!(serde_json::from_value::<Literal>(value).is_err());
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    #[test]
    fn test_floats_become_shortest_decimals() {
        assert_eq!(Literal::try_from(0.1_f64).unwrap(), Literal::Decimal(Decimal::from_str("0.1").unwrap()));
        assert_eq!(Literal::try_from(0.1_f32).unwrap(), Literal::Decimal(Decimal::from_str("0.1").unwrap()));
        assert_eq!(Literal::try_from(10.0_f64).unwrap(), Literal::Decimal(Decimal::from_str("10.00").unwrap()));
        assert_eq!(format(&Literal::try_from(-2.5_f64).unwrap()), "-2.5");
    }

    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinity")]
    #[test_case(1e300 ; "beyond decimal range")]
    fn test_float_without_decimal_form(value: f64) {
        assert!(matches!(Literal::try_from(value), Err(QueryError::UnsupportedValueType { .. })));
        assert_eq!(value.into_argument(), None);
    }

    #[test]
    fn test_wide_ints_are_checked() {
        assert_eq!(Literal::try_from(7_u64).unwrap(), Literal::Int(7));
        assert_eq!(3_usize.into_argument(), Some(Literal::Int(3)));
        assert!(Literal::try_from(u64::MAX).is_err());
        assert_eq!(i128::MAX.into_argument(), None);
        assert_eq!(Some(2_u64).into_argument(), Some(Literal::Int(2)));
    }

    #[test]
    fn test_collect_arguments_drops_absent_values() {
        let values = vec![Some(1), None, Some(3)];
        assert_eq!(collect_arguments(values), vec![Literal::Int(1), Literal::Int(3)]);
    }

    #[test]
    fn test_absent_option_yields_no_argument() {
        let missing: Option<&str> = None;
        assert_eq!(missing.into_argument(), None);
        assert_eq!("x".into_argument(), Some(Literal::from("x")));
    }
}
