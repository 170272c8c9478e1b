//! Query text parser.
//!
//! Input is one of three root productions, chosen by its first token:
//!
//! - a full query: `query(entities('PRODUCT'), filterBy(...))`
//! - a single constraint: `equals('code', 'abc')`
//! - a single literal: `'abc'`, `2021-01-31`, `{1,2}`
//!
//! Parsing is fail-fast: the first problem aborts with a [`ParseError`]
//! carrying its line and column.

mod common;
mod constraint;
mod literal;

use crate::error::ParseError;
use crate::ir::{AnyConstraint, Constraint, ConstraintKind, Query};
use crate::literal::Literal;
use chumsky::prelude::*;
use constraint::{raw_node, Lowering, RawNode, QUERY_KEYWORD};
use tracing::{debug, trace};

/// Result of parsing text of unknown root production
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Query(Query),
    Constraint(AnyConstraint),
    Literal(Literal),
}

impl Parsed {
    fn production(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Constraint(_) => "constraint",
            Self::Literal(_) => "literal",
        }
    }
}

/// Parses a query, a constraint or a literal.
pub fn parse(input: &str) -> Result<Parsed, ParseError> {
    let root = raw_node()
        .then_ignore(end())
        .parse(input)
        .into_result()
        .map_err(|errs| common::syntax_error(errs, input))?;

    let lowering = Lowering::new(input);
    let parsed = match root {
        RawNode::Call { keyword, offset, args } if keyword == QUERY_KEYWORD => {
            trace!(production = "query", "dispatching root");
            Parsed::Query(lowering.query(offset, args)?)
        }
        RawNode::Call { keyword, offset, args } => {
            trace!(production = "constraint", keyword = %keyword, "dispatching root");
            Parsed::Constraint(lowering.constraint(&keyword, offset, args)?)
        }
        RawNode::Literal(literal) => {
            trace!(production = "literal", "dispatching root");
            Parsed::Literal(literal)
        }
    };

    debug!(production = parsed.production(), length = input.len(), "parsed query text");
    Ok(parsed)
}

/// Parses text that must be a full query.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    match parse(input)? {
        Parsed::Query(query) => Ok(query),
        other => Err(unexpected_root("query", &other, input)),
    }
}

/// Parses text that must be a single constraint of any category.
pub fn parse_constraint(input: &str) -> Result<AnyConstraint, ParseError> {
    match parse(input)? {
        Parsed::Constraint(constraint) => Ok(constraint),
        other => Err(unexpected_root("constraint", &other, input)),
    }
}

/// Parses text that must be a single constraint of category `K`.
///
/// ```
/// use entity_query::ir::FilterConstraint;
/// use entity_query::syntax::parse_constraint_as;
///
/// let filter: FilterConstraint = parse_constraint_as("isNotNull('code')").unwrap();
/// assert_eq!(filter.attribute_name(), Some("code"));
/// ```
pub fn parse_constraint_as<K: ConstraintKind>(input: &str) -> Result<Constraint<K>, ParseError> {
    let constraint = parse_constraint(input)?;
    K::unwrap(constraint).map_err(|other| {
        let (line, column) = first_token(input);
        ParseError::UnexpectedRoot {
            expected: K::CATEGORY.name(),
            found: format!("{} constraint `{}`", other.category(), other.name()),
            line,
            column,
        }
    })
}

/// Parses text that must be a single literal.
pub fn parse_literal(input: &str) -> Result<Literal, ParseError> {
    match parse(input)? {
        Parsed::Literal(literal) => Ok(literal),
        other => Err(unexpected_root("literal", &other, input)),
    }
}

fn unexpected_root(expected: &'static str, found: &Parsed, input: &str) -> ParseError {
    let (line, column) = first_token(input);
    ParseError::UnexpectedRoot {
        expected,
        found: found.production().to_string(),
        line,
        column,
    }
}

fn first_token(input: &str) -> (usize, usize) {
    let offset = input.len() - input.trim_start().len();
    common::line_col(input, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{and, eq, is_not_null, or, starts_with};
    use crate::ir::{FilterConstraint, FilterKind};

    // =========================================================================
    // Dispatch
    // =========================================================================

    #[test]
    fn test_dispatch_by_first_token() {
        assert!(matches!(parse("query(entities('A'))"), Ok(Parsed::Query(_))));
        assert!(matches!(parse("isNull('a')"), Ok(Parsed::Constraint(_))));
        assert!(matches!(parse("  42  "), Ok(Parsed::Literal(Literal::Int(42)))));
    }

    #[test]
    fn test_unexpected_root() {
        let err = parse_query("isNull('a')").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { expected: "query", .. }));
        let err = parse_literal("\n isNull('a')").unwrap_err();
        assert_eq!(err.position(), (2, 2));
    }

    #[test]
    fn test_wrong_category() {
        let err = parse_constraint_as::<FilterKind>("ascending('code')").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { expected: "filter", .. }));
    }

    // =========================================================================
    // Syntax errors
    // =========================================================================

    #[test]
    fn test_syntax_error_position() {
        let err = parse("equals('code' 'abc')").unwrap_err();
        let ParseError::Syntax { line, column, .. } = err else {
            panic!("expected a syntax error, got {err:?}");
        };
        assert_eq!((line, column), (1, 15));
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert!(matches!(parse("isNull('a') x"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(matches!(parse("IsNull('a')"), Err(ParseError::UnknownKeyword { .. })));
    }

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn test_child_order_preserved() {
        let parsed: FilterConstraint = parse_constraint_as(
            "and(isNotNull('code'), or(equals('code','ABCD'), startsWith('title','Knife')))",
        )
        .unwrap();
        let expected = and([
            Some(is_not_null("code")),
            or([eq("code", "ABCD"), starts_with("title", "Knife")]),
        ])
        .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_query_parts_in_any_order() {
        let a = parse_query("query(entities('A'), orderBy(random()), filterBy(isNull('x')))").unwrap();
        let b = parse_query("query(filterBy(isNull('x')), entities('A'), orderBy(random()))").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_rejects_duplicates_and_missing_head() {
        assert!(matches!(
            parse_query("query(entities('A'), entities('B'))"),
            Err(ParseError::InvalidArguments { .. })
        ));
        assert!(matches!(
            parse_query("query(filterBy(isNull('x')))"),
            Err(ParseError::InvalidArguments { .. })
        ));
        assert!(matches!(
            parse_query("query(entities('A'), isNull('x'))"),
            Err(ParseError::InvalidArguments { .. })
        ));
    }
}
