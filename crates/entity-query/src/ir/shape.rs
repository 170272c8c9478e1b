//! Argument shapes accepted by constraint keywords.

use super::{Argument, Category};
use crate::literal::Literal;

/// Layout of a keyword's argument list.
///
/// Literals always precede nested constraints. Each kind lists the shapes
/// it accepts, richest first; the first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgShape {
    /// `()`
    Empty,
    /// `('name')`
    Name,
    /// `('name', value)`
    NameWithValue,
    /// `('name', value, ...)`
    NameWithValueList,
    /// `('name', from, to)`
    NameWithBetweenValues,
    /// `(value)`
    Value,
    /// `(value, ...)`
    ValueList,
    /// `(from, to)`
    BetweenValues,
    /// `('name', ...)`
    NameList,
    /// `(value, 'name', ...)`
    ValueWithNameList,
    /// `(entityType, value, ...)`
    EntityTypeWithValueList,
    /// `(entityType, filter)`
    EntityTypeWithFilter,
    /// `(entityType, order, ...)`
    EntityTypeWithOrderList,
    /// `(entityType, require, ...)`
    EntityTypeWithRequireList,
    /// `(entityType, ..., require...)`
    EntityTypesWithRequireList,
    /// `(filter, ...)`
    FilterList,
    /// `(filter)`
    SingleFilter,
    /// `(order, ...)`
    OrderList,
    /// `(require, ...)`
    RequireList,
    /// `([entityType,] primaryKey, filter...)`
    HierarchyWithin,
    /// `([entityType,] filter...)`
    HierarchyWithinRoot,
}

impl ArgShape {
    /// Human readable form used in error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::Empty => "no arguments",
            Self::Name => "(name)",
            Self::NameWithValue => "(name, value)",
            Self::NameWithValueList => "(name, value, ...)",
            Self::NameWithBetweenValues => "(name, from, to)",
            Self::Value => "(value)",
            Self::ValueList => "(value, ...)",
            Self::BetweenValues => "(from, to)",
            Self::NameList => "(name, ...)",
            Self::ValueWithNameList => "(value, name, ...)",
            Self::EntityTypeWithValueList => "(entityType, value, ...)",
            Self::EntityTypeWithFilter => "(entityType, filterConstraint)",
            Self::EntityTypeWithOrderList => "(entityType, orderConstraint, ...)",
            Self::EntityTypeWithRequireList => "(entityType, requireConstraint, ...)",
            Self::EntityTypesWithRequireList => "(entityType, ..., requireConstraint, ...)",
            Self::FilterList => "(filterConstraint, ...)",
            Self::SingleFilter => "(filterConstraint)",
            Self::OrderList => "(orderConstraint, ...)",
            Self::RequireList => "(requireConstraint, ...)",
            Self::HierarchyWithin => "([entityType,] primaryKey, filterConstraint, ...)",
            Self::HierarchyWithinRoot => "([entityType,] filterConstraint, ...)",
        }
    }

    /// Whether `items` fits this shape
    pub fn matches(self, items: &[Argument]) -> bool {
        let slots: Vec<Slot<'_>> = items.iter().map(Slot::from).collect();
        self.matches_slots(&slots)
    }

    /// Whether a built node, its literal `arguments` followed by
    /// `children` constraints of `category`, fits this shape
    pub fn matches_node(self, arguments: &[Literal], children: usize, category: Category) -> bool {
        let slots: Vec<Slot<'_>> = arguments
            .iter()
            .map(Slot::Literal)
            .chain(std::iter::repeat(Slot::Constraint(category)).take(children))
            .collect();
        self.matches_slots(&slots)
    }

    fn matches_slots(self, items: &[Slot<'_>]) -> bool {
        match self {
            Self::Empty => items.is_empty(),
            Self::Name => matches!(items, [n] if is_name(n)),
            Self::NameWithValue => matches!(items, [n, v] if is_name(n) && is_value(v)),
            Self::NameWithValueList => {
                matches!(items, [n, rest @ ..] if is_name(n) && all_of(rest, is_value))
            }
            Self::NameWithBetweenValues => {
                matches!(items, [n, a, b] if is_name(n) && is_value(a) && is_value(b))
            }
            Self::Value => matches!(items, [v] if is_value(v)),
            Self::ValueList => all_of(items, is_value),
            Self::BetweenValues => matches!(items, [a, b] if is_value(a) && is_value(b)),
            Self::NameList => all_of(items, is_name),
            Self::ValueWithNameList => {
                matches!(items, [v, rest @ ..] if is_value(v) && all_of(rest, is_name))
            }
            Self::EntityTypeWithValueList => {
                matches!(items, [t, rest @ ..] if is_value(t) && all_of(rest, is_value))
            }
            Self::EntityTypeWithFilter => {
                matches!(items, [t, f] if is_value(t) && is_filter(f))
            }
            Self::EntityTypeWithOrderList => {
                matches!(items, [t, rest @ ..] if is_value(t) && all_of(rest, is_order))
            }
            Self::EntityTypeWithRequireList => {
                matches!(items, [t, rest @ ..] if is_value(t) && all_of(rest, is_require))
            }
            Self::EntityTypesWithRequireList => {
                let literals = leading_literals(items);
                literals >= 1 && items[literals..].iter().all(is_require)
            }
            Self::FilterList => all_of(items, is_filter),
            Self::SingleFilter => matches!(items, [f] if is_filter(f)),
            Self::OrderList => all_of(items, is_order),
            Self::RequireList => all_of(items, is_require),
            // A leading literal is the entity type only when another
            // literal (the primary key) follows it. The primary key is
            // always an int.
            Self::HierarchyWithin => {
                let literals = leading_literals(items);
                let key_fits = match literals {
                    1 => is_int(&items[0]),
                    2 => is_int(&items[1]),
                    _ => false,
                };
                key_fits && items[literals..].iter().all(is_filter)
            }
            Self::HierarchyWithinRoot => {
                let literals = leading_literals(items);
                literals <= 1 && items[literals..].iter().all(is_filter)
            }
        }
    }
}

/// What a shape sees of one argument
#[derive(Debug, Clone, Copy)]
enum Slot<'a> {
    Literal(&'a Literal),
    Constraint(Category),
}

impl<'a> From<&'a Argument> for Slot<'a> {
    fn from(item: &'a Argument) -> Self {
        match item {
            Argument::Literal(literal) => Self::Literal(literal),
            Argument::Constraint(constraint) => Self::Constraint(constraint.category()),
        }
    }
}

/// Non-empty and every item satisfies `pred`
fn all_of(items: &[Slot<'_>], pred: fn(&Slot<'_>) -> bool) -> bool {
    !items.is_empty() && items.iter().all(pred)
}

fn leading_literals(items: &[Slot<'_>]) -> usize {
    items.iter().take_while(|item| is_value(item)).count()
}

fn is_value(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Literal(_))
}

fn is_name(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Literal(Literal::String(_)))
}

fn is_int(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Literal(Literal::Int(_)))
}

fn is_filter(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Constraint(Category::Filter))
}

fn is_order(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Constraint(Category::Order))
}

fn is_require(item: &Slot<'_>) -> bool {
    matches!(item, Slot::Constraint(Category::Require))
}
