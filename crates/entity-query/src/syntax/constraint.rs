//! Constraint grammar and lowering.
//!
//! Parsing happens in two stages. Chumsky first builds a raw tree of
//! keyword calls and literals without knowing any keyword. Lowering then
//! walks that tree bottom-up, resolves each keyword against the catalog
//! and checks its arguments against the kind's accepted shapes. Keeping
//! the catalog out of the grammar lets unknown keywords and bad argument
//! lists be reported with the keyword's own position.

use super::common::{line_col, word, Extra};
use super::literal::literal;
use crate::error::ParseError;
use crate::ir::{
    AnyConstraint, Argument, Constraint, ConstraintKind, FilterKind, HeadKind, OrderKind, Query,
    RequireKind,
};
use crate::literal::Literal;
use chumsky::prelude::*;
use tracing::trace;

/// Keyword of the query root
pub const QUERY_KEYWORD: &str = "query";

/// Parsed but not yet resolved node
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Call {
        keyword: String,
        offset: usize,
        args: Vec<RawNode>,
    },
    Literal(Literal),
}

/// Parser for one raw node: a keyword call or a literal
pub fn raw_node<'src>() -> impl Parser<'src, &'src str, RawNode, Extra<'src>> + Clone {
    recursive(|node| {
        let args = node
            .separated_by(just(',').padded())
            .collect::<Vec<_>>()
            .delimited_by(just('(').padded(), just(')').padded())
            .labelled("argument list");

        let call = word()
            .map_with(|keyword: &str, e| (keyword.to_string(), e.span().start))
            .then(args)
            .map(|((keyword, offset), args)| RawNode::Call { keyword, offset, args })
            .labelled("constraint like equals('code', 'abc')");

        choice((call, literal().map(RawNode::Literal))).padded()
    })
}

// ============================================================================
// Lowering
// ============================================================================

pub(crate) struct Lowering<'a> {
    input: &'a str,
}

impl<'a> Lowering<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Resolves a raw node that is known not to be the query root.
    pub(crate) fn argument(&self, node: RawNode) -> Result<Argument, ParseError> {
        match node {
            RawNode::Literal(literal) => Ok(Argument::Literal(literal)),
            RawNode::Call { keyword, offset, args } => {
                self.constraint(&keyword, offset, args).map(Argument::Constraint)
            }
        }
    }

    pub(crate) fn constraint(
        &self,
        keyword: &str,
        offset: usize,
        args: Vec<RawNode>,
    ) -> Result<AnyConstraint, ParseError> {
        let arguments = args
            .into_iter()
            .map(|arg| self.argument(arg))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(kind) = HeadKind::from_name(keyword) {
            self.build(kind, offset, arguments)
        } else if let Some(kind) = FilterKind::from_name(keyword) {
            self.build(kind, offset, arguments)
        } else if let Some(kind) = OrderKind::from_name(keyword) {
            self.build(kind, offset, arguments)
        } else if let Some(kind) = RequireKind::from_name(keyword) {
            self.build(kind, offset, arguments)
        } else {
            let (line, column) = line_col(self.input, offset);
            let keyword = keyword.to_string();
            Err(if keyword == QUERY_KEYWORD {
                ParseError::Syntax {
                    line,
                    column,
                    found: keyword,
                    message: "`query` is only allowed as the outermost constraint".to_string(),
                }
            } else {
                ParseError::UnknownKeyword { keyword, line, column }
            })
        }
    }

    fn build<K: ConstraintKind>(
        &self,
        kind: K,
        offset: usize,
        arguments: Vec<Argument>,
    ) -> Result<AnyConstraint, ParseError> {
        let shapes = kind.shapes();
        let Some(shape) = shapes.iter().find(|shape| shape.matches(&arguments)) else {
            return Err(self.invalid_arguments(
                kind.name(),
                offset,
                shapes
                    .iter()
                    .map(|shape| shape.describe())
                    .collect::<Vec<_>>()
                    .join(" or "),
            ));
        };
        trace!(keyword = kind.name(), shape = ?shape, "matched argument shape");

        Constraint::try_from_arguments(kind, arguments)
            .map(AnyConstraint::from)
            .map_err(|e| self.invalid_arguments(kind.name(), offset, e.to_string()))
    }

    /// Resolves the arguments of `query(...)` into a [`Query`].
    pub(crate) fn query(&self, offset: usize, args: Vec<RawNode>) -> Result<Query, ParseError> {
        let mut head = None;
        let mut filter_by = None;
        let mut order_by = None;
        let mut require = None;

        for arg in args {
            let duplicate = match self.argument(arg)? {
                Argument::Constraint(AnyConstraint::Head(c)) => head.replace(c).is_some(),
                Argument::Constraint(AnyConstraint::Filter(c)) if c.kind() == FilterKind::FilterBy => {
                    filter_by.replace(c).is_some()
                }
                Argument::Constraint(AnyConstraint::Order(c)) if c.kind() == OrderKind::OrderBy => {
                    order_by.replace(c).is_some()
                }
                Argument::Constraint(AnyConstraint::Require(c)) if c.kind() == RequireKind::Require => {
                    require.replace(c).is_some()
                }
                _ => true,
            };
            if duplicate {
                return Err(self.query_shape_error(offset));
            }
        }

        let head = head.ok_or_else(|| self.query_shape_error(offset))?;
        Query::try_new(head, filter_by, order_by, require)
            .map_err(|e| self.invalid_arguments(QUERY_KEYWORD, offset, e.to_string()))
    }

    fn query_shape_error(&self, offset: usize) -> ParseError {
        self.invalid_arguments(
            QUERY_KEYWORD,
            offset,
            "(entities, filterBy?, orderBy?, require?) with each part at most once".to_string(),
        )
    }

    fn invalid_arguments(&self, keyword: &str, offset: usize, expected: String) -> ParseError {
        let (line, column) = line_col(self.input, offset);
        ParseError::InvalidArguments {
            keyword: keyword.to_string(),
            line,
            column,
            expected,
        }
    }
}
