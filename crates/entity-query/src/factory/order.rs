use super::{container, name_literal};
use crate::ir::{OrderConstraint, OrderKind};
use crate::literal::IntoArgument;

pub fn order_by<C>(children: impl IntoIterator<Item = C>) -> Option<OrderConstraint>
where
    C: Into<Option<OrderConstraint>>,
{
    container(OrderKind::OrderBy, Vec::new(), children)
}

pub fn ascending(name: impl Into<String>) -> OrderConstraint {
    OrderConstraint::leaf(OrderKind::Ascending, vec![name_literal(name)])
}

pub fn descending(name: impl Into<String>) -> OrderConstraint {
    OrderConstraint::leaf(OrderKind::Descending, vec![name_literal(name)])
}

pub fn price_ascending() -> OrderConstraint {
    OrderConstraint::leaf(OrderKind::PriceAscending, Vec::new())
}

pub fn price_descending() -> OrderConstraint {
    OrderConstraint::leaf(OrderKind::PriceDescending, Vec::new())
}

pub fn random() -> OrderConstraint {
    OrderConstraint::leaf(OrderKind::Random, Vec::new())
}

/// Orders by attributes of the reference to `entity_type`
pub fn reference_attribute<C>(entity_type: impl IntoArgument, children: impl IntoIterator<Item = C>) -> Option<OrderConstraint>
where
    C: Into<Option<OrderConstraint>>,
{
    container(OrderKind::ReferenceAttribute, vec![entity_type.into_argument()?], children)
}
