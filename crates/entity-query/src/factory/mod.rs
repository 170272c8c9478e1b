//! Lenient constraint factory.
//!
//! Every keyword has a builder function named after it. Builders that need
//! external values return `Option`: a missing required value, or a variadic
//! list that is empty once absent entries are dropped, yields `None` instead
//! of an error. Callers compose optional query fragments this way and the
//! fragments that end up empty simply vanish:
//!
//! ```
//! use entity_query::factory::{and, eq, filter_by};
//!
//! let code: Option<&str> = None;
//! let filter = filter_by([and([eq("code", code), eq("visible", true)])]).unwrap();
//! assert_eq!(filter.to_string(), "filterBy(and(equals('visible',true)))");
//! ```
//!
//! Builders whose arguments are all fixed (names, no-argument modifiers)
//! return the constraint directly.

mod filter;
mod order;
mod require;

pub use filter::*;
pub use order::*;
pub use require::*;

use crate::error::{QueryError, QueryResult};
use crate::ir::{
    Constraint, ConstraintKind, FilterConstraint, HeadConstraint, HeadKind, OrderConstraint, Query,
    RequireConstraint,
};
use crate::literal::{collect_arguments, IntoArgument, Literal};

/// `entities(entityType)`
pub fn entities(entity_type: impl IntoArgument) -> Option<HeadConstraint> {
    Some(HeadConstraint::leaf(HeadKind::Entities, vec![entity_type.into_argument()?]))
}

/// Assembles a query. The head is the one part that cannot be absent.
pub fn query(
    head: impl Into<Option<HeadConstraint>>,
    filter_by: impl Into<Option<FilterConstraint>>,
    order_by: impl Into<Option<OrderConstraint>>,
    require: impl Into<Option<RequireConstraint>>,
) -> QueryResult<Query> {
    let head = head
        .into()
        .ok_or_else(|| QueryError::invalid_construction("query", "missing entities head"))?;
    Query::try_new(head, filter_by.into(), order_by.into(), require.into())
}

// ============================================================================
// Shared builders
// ============================================================================

/// Keeps the present children, in order.
fn present<K, C>(children: impl IntoIterator<Item = C>) -> Vec<Constraint<K>>
where
    C: Into<Option<Constraint<K>>>,
{
    children.into_iter().filter_map(Into::into).collect()
}

/// Container that vanishes when no child is present
fn container<K, C>(kind: K, arguments: Vec<Literal>, children: impl IntoIterator<Item = C>) -> Option<Constraint<K>>
where
    K: ConstraintKind,
    C: Into<Option<Constraint<K>>>,
{
    let children = present(children);
    if children.is_empty() {
        None
    } else {
        Some(Constraint::container(kind, arguments, children))
    }
}

/// Leaf built from a variadic list that must keep at least one value
fn variadic<K, V>(kind: K, mut leading: Vec<Literal>, values: impl IntoIterator<Item = V>) -> Option<Constraint<K>>
where
    K: ConstraintKind,
    V: IntoArgument,
{
    let values = collect_arguments(values);
    if values.is_empty() {
        return None;
    }
    leading.extend(values);
    Some(Constraint::leaf(kind, leading))
}

fn name_literal(name: impl Into<String>) -> Literal {
    Literal::String(name.into())
}
