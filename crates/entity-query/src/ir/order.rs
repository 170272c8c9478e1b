//! Order constraints sort the returned entities.

use super::{AnyConstraint, ArgShape, Category, Constraint, ConstraintKind};
use crate::literal::Literal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderKind {
    OrderBy,
    Ascending,
    Descending,
    PriceAscending,
    PriceDescending,
    Random,
    ReferenceAttribute,
}

pub type OrderConstraint = Constraint<OrderKind>;

const ALL: [OrderKind; 7] = [
    OrderKind::OrderBy,
    OrderKind::Ascending,
    OrderKind::Descending,
    OrderKind::PriceAscending,
    OrderKind::PriceDescending,
    OrderKind::Random,
    OrderKind::ReferenceAttribute,
];

impl ConstraintKind for OrderKind {
    const CATEGORY: Category = Category::Order;

    fn all() -> &'static [Self] {
        &ALL
    }

    fn name(self) -> &'static str {
        match self {
            Self::OrderBy => "orderBy",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::PriceAscending => "priceAscending",
            Self::PriceDescending => "priceDescending",
            Self::Random => "random",
            Self::ReferenceAttribute => "referenceAttribute",
        }
    }

    fn is_container(self) -> bool {
        matches!(self, Self::OrderBy | Self::ReferenceAttribute)
    }

    fn requires_children(self) -> bool {
        self.is_container()
    }

    fn required_arguments(self) -> usize {
        match self {
            Self::Ascending | Self::Descending | Self::ReferenceAttribute => 1,
            Self::OrderBy | Self::PriceAscending | Self::PriceDescending | Self::Random => 0,
        }
    }

    fn shapes(self) -> &'static [ArgShape] {
        match self {
            Self::OrderBy => &[ArgShape::OrderList],
            Self::Ascending | Self::Descending => &[ArgShape::Name],
            Self::PriceAscending | Self::PriceDescending | Self::Random => &[ArgShape::Empty],
            Self::ReferenceAttribute => &[ArgShape::EntityTypeWithOrderList],
        }
    }

    fn wrap(constraint: Constraint<Self>) -> AnyConstraint {
        AnyConstraint::Order(constraint)
    }

    fn unwrap(constraint: AnyConstraint) -> Result<Constraint<Self>, AnyConstraint> {
        match constraint {
            AnyConstraint::Order(c) => Ok(c),
            other => Err(other),
        }
    }
}

impl OrderConstraint {
    /// Sorted attribute of `ascending` / `descending`
    pub fn attribute_name(&self) -> Option<&str> {
        match self.kind() {
            OrderKind::Ascending | OrderKind::Descending => self.string_argument(0),
            _ => None,
        }
    }

    /// Referenced entity type of `referenceAttribute`
    pub fn entity_type(&self) -> Option<&Literal> {
        match self.kind() {
            OrderKind::ReferenceAttribute => self.argument(0),
            _ => None,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self.kind(), OrderKind::Descending | OrderKind::PriceDescending)
    }
}
