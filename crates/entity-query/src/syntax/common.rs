//! Shared parser primitives and error mapping.

use crate::error::ParseError;
use chumsky::extra;
use chumsky::prelude::*;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

// ============================================================================
// Primitive parsers
// ============================================================================

/// Bare word: keywords, booleans and enum tokens
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .labelled("identifier")
}

/// Quoted text including its quotes, with `\` escaping the next character
fn quoted<'src>(quote: char) -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    let plain = any().filter(move |c: &char| *c != quote && *c != '\\').ignored();
    let escaped = just('\\').then(any()).ignored();

    just(quote)
        .then(plain.or(escaped).repeated())
        .then(just(quote))
        .to_slice()
}

/// Single- or double-quoted string, quotes included
pub fn string_token<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    quoted('\'').or(quoted('"')).labelled("string literal")
}

/// Numeric and temporal scalars such as `-12`, `1.5`, `2021-01-31T13:45:00+01:00`
pub fn scalar_token<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_digit() || *c == '-' || *c == '+')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_digit() || "-+:.TZ".contains(*c))
                .repeated(),
        )
        .to_slice()
        .labelled("number or date")
}

/// `[from,to]` with either bound optional, brackets included
pub fn range_token<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    just('[')
        .then(none_of("[]").repeated())
        .then(just(']'))
        .to_slice()
        .labelled("range")
}

/// `` `cs-CZ` ``, backticks included
pub fn locale_token<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    just('`')
        .then(none_of("`").repeated())
        .then(just('`'))
        .to_slice()
        .labelled("locale")
}

// ============================================================================
// Error mapping
// ============================================================================

/// 1-based line and column of a byte offset
pub fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Converts the first chumsky error into a [`ParseError`].
pub fn syntax_error(errs: Vec<Rich<'_, char>>, input: &str) -> ParseError {
    let Some(err) = errs.into_iter().next() else {
        return ParseError::Syntax {
            line: 1,
            column: 1,
            found: "end of input".to_string(),
            message: "unparseable input".to_string(),
        };
    };

    let (line, column) = line_col(input, err.span().start);
    let found = err
        .found()
        .map_or("end of input".to_string(), |c| format!("'{}'", c));

    ParseError::Syntax {
        line,
        column,
        found,
        message: format!("{}", err.reason()),
    }
}
