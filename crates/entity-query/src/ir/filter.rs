//! Filter constraints restrict which entities a query returns.

use super::{AnyConstraint, ArgShape, Category, Constraint, ConstraintKind};
use crate::literal::Literal;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    FilterBy,
    And,
    Or,
    Not,
    UserFilter,
    Equals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    Between,
    InSet,
    Contains,
    StartsWith,
    EndsWith,
    InRange,
    IsTrue,
    IsFalse,
    IsNull,
    IsNotNull,
    Language,
    PrimaryKey,
    PriceInCurrency,
    PriceInPriceLists,
    PriceValidIn,
    PriceBetween,
    Facet,
    ReferenceHavingAttribute,
    WithinHierarchy,
    WithinRootHierarchy,
    DirectRelation,
    ExcludingRoot,
    Excluding,
}

pub type FilterConstraint = Constraint<FilterKind>;

const ALL: [FilterKind; 33] = [
    FilterKind::FilterBy,
    FilterKind::And,
    FilterKind::Or,
    FilterKind::Not,
    FilterKind::UserFilter,
    FilterKind::Equals,
    FilterKind::GreaterThan,
    FilterKind::GreaterThanEquals,
    FilterKind::LessThan,
    FilterKind::LessThanEquals,
    FilterKind::Between,
    FilterKind::InSet,
    FilterKind::Contains,
    FilterKind::StartsWith,
    FilterKind::EndsWith,
    FilterKind::InRange,
    FilterKind::IsTrue,
    FilterKind::IsFalse,
    FilterKind::IsNull,
    FilterKind::IsNotNull,
    FilterKind::Language,
    FilterKind::PrimaryKey,
    FilterKind::PriceInCurrency,
    FilterKind::PriceInPriceLists,
    FilterKind::PriceValidIn,
    FilterKind::PriceBetween,
    FilterKind::Facet,
    FilterKind::ReferenceHavingAttribute,
    FilterKind::WithinHierarchy,
    FilterKind::WithinRootHierarchy,
    FilterKind::DirectRelation,
    FilterKind::ExcludingRoot,
    FilterKind::Excluding,
];

impl FilterKind {
    /// Kinds whose first argument names an attribute
    pub fn is_attribute_constraint(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::GreaterThan
                | Self::GreaterThanEquals
                | Self::LessThan
                | Self::LessThanEquals
                | Self::Between
                | Self::InSet
                | Self::Contains
                | Self::StartsWith
                | Self::EndsWith
                | Self::InRange
                | Self::IsTrue
                | Self::IsFalse
                | Self::IsNull
                | Self::IsNotNull
        )
    }
}

impl ConstraintKind for FilterKind {
    const CATEGORY: Category = Category::Filter;

    fn all() -> &'static [Self] {
        &ALL
    }

    fn name(self) -> &'static str {
        match self {
            Self::FilterBy => "filterBy",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::UserFilter => "userFilter",
            Self::Equals => "equals",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanEquals => "greaterThanEquals",
            Self::LessThan => "lessThan",
            Self::LessThanEquals => "lessThanEquals",
            Self::Between => "between",
            Self::InSet => "inSet",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::InRange => "inRange",
            Self::IsTrue => "isTrue",
            Self::IsFalse => "isFalse",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::Language => "language",
            Self::PrimaryKey => "primaryKey",
            Self::PriceInCurrency => "priceInCurrency",
            Self::PriceInPriceLists => "priceInPriceLists",
            Self::PriceValidIn => "priceValidIn",
            Self::PriceBetween => "priceBetween",
            Self::Facet => "facet",
            Self::ReferenceHavingAttribute => "referenceHavingAttribute",
            Self::WithinHierarchy => "withinHierarchy",
            Self::WithinRootHierarchy => "withinRootHierarchy",
            Self::DirectRelation => "directRelation",
            Self::ExcludingRoot => "excludingRoot",
            Self::Excluding => "excluding",
        }
    }

    fn is_container(self) -> bool {
        matches!(
            self,
            Self::FilterBy
                | Self::And
                | Self::Or
                | Self::Not
                | Self::UserFilter
                | Self::ReferenceHavingAttribute
                | Self::WithinHierarchy
                | Self::WithinRootHierarchy
        )
    }

    fn is_collapsible(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::UserFilter)
    }

    fn requires_children(self) -> bool {
        matches!(
            self,
            Self::FilterBy
                | Self::And
                | Self::Or
                | Self::Not
                | Self::UserFilter
                | Self::ReferenceHavingAttribute
        )
    }

    fn required_arguments(self) -> usize {
        match self {
            Self::Between => 3,
            Self::Equals
            | Self::GreaterThan
            | Self::GreaterThanEquals
            | Self::LessThan
            | Self::LessThanEquals
            | Self::InSet
            | Self::Contains
            | Self::StartsWith
            | Self::EndsWith
            | Self::InRange
            | Self::PriceBetween
            | Self::Facet => 2,
            Self::IsTrue
            | Self::IsFalse
            | Self::IsNull
            | Self::IsNotNull
            | Self::Language
            | Self::PrimaryKey
            | Self::PriceInCurrency
            | Self::PriceInPriceLists
            | Self::ReferenceHavingAttribute
            | Self::WithinHierarchy
            | Self::Excluding => 1,
            Self::FilterBy
            | Self::And
            | Self::Or
            | Self::Not
            | Self::UserFilter
            | Self::PriceValidIn
            | Self::WithinRootHierarchy
            | Self::DirectRelation
            | Self::ExcludingRoot => 0,
        }
    }

    fn shapes(self) -> &'static [ArgShape] {
        match self {
            Self::FilterBy | Self::And | Self::Or | Self::UserFilter => &[ArgShape::FilterList],
            Self::Not => &[ArgShape::SingleFilter],
            Self::Equals
            | Self::GreaterThan
            | Self::GreaterThanEquals
            | Self::LessThan
            | Self::LessThanEquals
            | Self::Contains
            | Self::StartsWith
            | Self::EndsWith
            | Self::InRange => &[ArgShape::NameWithValue],
            Self::Between => &[ArgShape::NameWithBetweenValues],
            Self::InSet => &[ArgShape::NameWithValueList],
            Self::IsTrue | Self::IsFalse | Self::IsNull | Self::IsNotNull => &[ArgShape::Name],
            Self::Language | Self::PriceInCurrency => &[ArgShape::Value],
            Self::PrimaryKey | Self::PriceInPriceLists | Self::Excluding => &[ArgShape::ValueList],
            Self::PriceValidIn => &[ArgShape::Value, ArgShape::Empty],
            Self::PriceBetween => &[ArgShape::BetweenValues],
            Self::Facet => &[ArgShape::EntityTypeWithValueList],
            Self::ReferenceHavingAttribute => &[ArgShape::EntityTypeWithFilter],
            Self::WithinHierarchy => &[ArgShape::HierarchyWithin],
            Self::WithinRootHierarchy => &[ArgShape::HierarchyWithinRoot],
            Self::DirectRelation | Self::ExcludingRoot => &[ArgShape::Empty],
        }
    }

    fn wrap(constraint: Constraint<Self>) -> AnyConstraint {
        AnyConstraint::Filter(constraint)
    }

    fn unwrap(constraint: AnyConstraint) -> Result<Constraint<Self>, AnyConstraint> {
        match constraint {
            AnyConstraint::Filter(c) => Ok(c),
            other => Err(other),
        }
    }
}

// ============================================================================
// Typed accessors
// ============================================================================

impl FilterConstraint {
    /// Attribute the constraint tests, for attribute constraints
    pub fn attribute_name(&self) -> Option<&str> {
        if self.kind().is_attribute_constraint() {
            self.string_argument(0)
        } else {
            None
        }
    }

    /// Compared value of single-value attribute constraints
    pub fn attribute_value(&self) -> Option<&Literal> {
        match self.kind() {
            FilterKind::Equals
            | FilterKind::GreaterThan
            | FilterKind::GreaterThanEquals
            | FilterKind::LessThan
            | FilterKind::LessThanEquals
            | FilterKind::Contains
            | FilterKind::StartsWith
            | FilterKind::EndsWith
            | FilterKind::InRange => self.argument(1),
            _ => None,
        }
    }

    /// Values of `inSet`
    pub fn attribute_values(&self) -> &[Literal] {
        match self.kind() {
            FilterKind::InSet => self.arguments().get(1..).unwrap_or_default(),
            _ => &[],
        }
    }

    /// Lower and upper bound of `between` and `priceBetween`
    pub fn bounds(&self) -> Option<(&Literal, &Literal)> {
        let offset = match self.kind() {
            FilterKind::Between => 1,
            FilterKind::PriceBetween => 0,
            _ => return None,
        };
        Some((self.argument(offset)?, self.argument(offset + 1)?))
    }

    /// Entity type targeted by hierarchy, facet and reference constraints.
    ///
    /// Absent for hierarchy constraints that filter the queried entity's own
    /// hierarchy.
    pub fn entity_type(&self) -> Option<&Literal> {
        match self.kind() {
            FilterKind::Facet | FilterKind::ReferenceHavingAttribute => self.argument(0),
            FilterKind::WithinHierarchy if self.arguments().len() == 2 => self.argument(0),
            FilterKind::WithinRootHierarchy => self.argument(0),
            _ => None,
        }
    }

    /// Parent node of `withinHierarchy`
    pub fn hierarchy_primary_key(&self) -> Option<i64> {
        match self.kind() {
            FilterKind::WithinHierarchy => self.arguments().last().and_then(Literal::as_int),
            _ => None,
        }
    }

    /// Ids listed by `primaryKey`, `excluding` and `facet`
    pub fn ids(&self) -> Vec<i64> {
        match self.kind() {
            FilterKind::PrimaryKey | FilterKind::Excluding => self.int_arguments(0),
            FilterKind::Facet => self.int_arguments(1),
            _ => Vec::new(),
        }
    }

    /// Price lists of `priceInPriceLists`, most preferred first
    pub fn price_lists(&self) -> &[Literal] {
        match self.kind() {
            FilterKind::PriceInPriceLists => self.arguments(),
            _ => &[],
        }
    }

    /// Moment of `priceValidIn`; `None` means the time of evaluation
    pub fn valid_in(&self) -> Option<DateTime<FixedOffset>> {
        match (self.kind(), self.argument(0)) {
            (FilterKind::PriceValidIn, Some(Literal::ZonedDateTime(moment))) => Some(*moment),
            _ => None,
        }
    }

    /// Price bounds of `priceBetween` as decimals
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        match self.kind() {
            FilterKind::PriceBetween => {
                let (from, to) = self.bounds()?;
                Some((from.as_decimal()?, to.as_decimal()?))
            }
            _ => None,
        }
    }
}
