use super::{container, name_literal, present, variadic};
use crate::ir::{FilterConstraint, FilterKind};
use crate::literal::{IntoArgument, Literal};

// ============================================================================
// Logical containers
// ============================================================================

pub fn filter_by<C>(children: impl IntoIterator<Item = C>) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    container(FilterKind::FilterBy, Vec::new(), children)
}

pub fn and<C>(children: impl IntoIterator<Item = C>) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    container(FilterKind::And, Vec::new(), children)
}

pub fn or<C>(children: impl IntoIterator<Item = C>) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    container(FilterKind::Or, Vec::new(), children)
}

/// Negates exactly one constraint
pub fn not(child: impl Into<Option<FilterConstraint>>) -> Option<FilterConstraint> {
    child
        .into()
        .map(|child| FilterConstraint::container(FilterKind::Not, Vec::new(), vec![child]))
}

/// Marks the part of the filter that came from end-user input
pub fn user_filter<C>(children: impl IntoIterator<Item = C>) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    container(FilterKind::UserFilter, Vec::new(), children)
}

// ============================================================================
// Attribute comparisons
// ============================================================================

fn compare(kind: FilterKind, name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    let value = value.into_argument()?;
    Some(FilterConstraint::leaf(kind, vec![name_literal(name), value]))
}

pub fn eq(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::Equals, name, value)
}

pub fn greater_than(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::GreaterThan, name, value)
}

pub fn greater_than_equals(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::GreaterThanEquals, name, value)
}

pub fn less_than(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::LessThan, name, value)
}

pub fn less_than_equals(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::LessThanEquals, name, value)
}

pub fn contains(name: impl Into<String>, text: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::Contains, name, text)
}

pub fn starts_with(name: impl Into<String>, text: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::StartsWith, name, text)
}

pub fn ends_with(name: impl Into<String>, text: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::EndsWith, name, text)
}

/// Range attribute containing `value`
pub fn in_range(name: impl Into<String>, value: impl IntoArgument) -> Option<FilterConstraint> {
    compare(FilterKind::InRange, name, value)
}

/// Both bounds are required.
pub fn between(
    name: impl Into<String>,
    from: impl IntoArgument,
    to: impl IntoArgument,
) -> Option<FilterConstraint> {
    let from = from.into_argument()?;
    let to = to.into_argument()?;
    Some(FilterConstraint::leaf(FilterKind::Between, vec![name_literal(name), from, to]))
}

pub fn in_set<V: IntoArgument>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Option<FilterConstraint> {
    variadic(FilterKind::InSet, vec![name_literal(name)], values)
}

pub fn is_true(name: impl Into<String>) -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::IsTrue, vec![name_literal(name)])
}

pub fn is_false(name: impl Into<String>) -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::IsFalse, vec![name_literal(name)])
}

pub fn is_null(name: impl Into<String>) -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::IsNull, vec![name_literal(name)])
}

pub fn is_not_null(name: impl Into<String>) -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::IsNotNull, vec![name_literal(name)])
}

// ============================================================================
// Entity, language and price
// ============================================================================

pub fn language(locale: impl IntoArgument) -> Option<FilterConstraint> {
    Some(FilterConstraint::leaf(FilterKind::Language, vec![locale.into_argument()?]))
}

pub fn primary_key<V: IntoArgument>(ids: impl IntoIterator<Item = V>) -> Option<FilterConstraint> {
    variadic(FilterKind::PrimaryKey, Vec::new(), ids)
}

pub fn price_in_currency(currency: impl IntoArgument) -> Option<FilterConstraint> {
    Some(FilterConstraint::leaf(
        FilterKind::PriceInCurrency,
        vec![currency.into_argument()?],
    ))
}

/// Price lists in order of preference: an entity priced in several lists
/// takes its price from the first one listed.
pub fn price_in_price_lists<V: IntoArgument>(price_lists: impl IntoIterator<Item = V>) -> Option<FilterConstraint> {
    variadic(FilterKind::PriceInPriceLists, Vec::new(), price_lists)
}

/// Prices valid at `moment`
pub fn price_valid_in(moment: impl IntoArgument) -> Option<FilterConstraint> {
    Some(FilterConstraint::leaf(FilterKind::PriceValidIn, vec![moment.into_argument()?]))
}

/// Prices valid when the query is evaluated
pub fn price_valid_in_now() -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::PriceValidIn, Vec::new())
}

pub fn price_between(from: impl IntoArgument, to: impl IntoArgument) -> Option<FilterConstraint> {
    let from = from.into_argument()?;
    let to = to.into_argument()?;
    Some(FilterConstraint::leaf(FilterKind::PriceBetween, vec![from, to]))
}

// ============================================================================
// Facets and references
// ============================================================================

pub fn facet<V: IntoArgument>(entity_type: impl IntoArgument, ids: impl IntoIterator<Item = V>) -> Option<FilterConstraint> {
    variadic(FilterKind::Facet, vec![entity_type.into_argument()?], ids)
}

/// Entities referencing `entity_type` whose reference attributes pass `filter`
pub fn reference_having_attribute(
    entity_type: impl IntoArgument,
    filter: impl Into<Option<FilterConstraint>>,
) -> Option<FilterConstraint> {
    let entity_type = entity_type.into_argument()?;
    let filter = filter.into()?;
    Some(FilterConstraint::container(
        FilterKind::ReferenceHavingAttribute,
        vec![entity_type],
        vec![filter],
    ))
}

// ============================================================================
// Hierarchy
// ============================================================================

/// Entities placed under the node `primary_key` of the queried entity's
/// own hierarchy. `with` takes the hierarchy modifiers.
pub fn within_hierarchy<C>(primary_key: impl IntoArgument, with: impl IntoIterator<Item = C>) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    let primary_key = node_key(primary_key)?;
    Some(FilterConstraint::container(
        FilterKind::WithinHierarchy,
        vec![primary_key],
        present(with),
    ))
}

/// Like [`within_hierarchy`] over the hierarchy of `entity_type`. An absent
/// entity type falls back to the queried entity's hierarchy.
pub fn within_hierarchy_of_type<C>(
    entity_type: impl IntoArgument,
    primary_key: impl IntoArgument,
    with: impl IntoIterator<Item = C>,
) -> Option<FilterConstraint>
where
    C: Into<Option<FilterConstraint>>,
{
    let primary_key = node_key(primary_key)?;
    let arguments = match entity_type.into_argument() {
        Some(entity_type) => vec![entity_type, primary_key],
        None => vec![primary_key],
    };
    Some(FilterConstraint::container(
        FilterKind::WithinHierarchy,
        arguments,
        present(with),
    ))
}

/// Hierarchy node keys are ints; any other literal counts as missing
fn node_key(primary_key: impl IntoArgument) -> Option<Literal> {
    primary_key.into_argument().filter(|key| key.as_int().is_some())
}

pub fn within_root_hierarchy<C>(with: impl IntoIterator<Item = C>) -> FilterConstraint
where
    C: Into<Option<FilterConstraint>>,
{
    FilterConstraint::container(FilterKind::WithinRootHierarchy, Vec::new(), present(with))
}

pub fn within_root_hierarchy_of_type<C>(entity_type: impl IntoArgument, with: impl IntoIterator<Item = C>) -> FilterConstraint
where
    C: Into<Option<FilterConstraint>>,
{
    let arguments: Vec<Literal> = entity_type.into_argument().into_iter().collect();
    FilterConstraint::container(FilterKind::WithinRootHierarchy, arguments, present(with))
}

/// Only direct children of the hierarchy node
pub fn direct_relation() -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::DirectRelation, Vec::new())
}

pub fn excluding_root() -> FilterConstraint {
    FilterConstraint::leaf(FilterKind::ExcludingRoot, Vec::new())
}

/// Excludes the listed hierarchy nodes and their subtrees
pub fn excluding<V: IntoArgument>(ids: impl IntoIterator<Item = V>) -> Option<FilterConstraint> {
    variadic(FilterKind::Excluding, Vec::new(), ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_absent_value_yields_none() {
        let missing: Option<&str> = None;
        assert!(eq("attr", missing).is_none());
        assert!(between("age", 1, Option::<i64>::None).is_none());
        assert!(price_valid_in(Option::<chrono::DateTime<chrono::FixedOffset>>::None).is_none());
    }

    #[test]
    fn test_empty_variadic_yields_none() {
        assert!(in_set("attr", Vec::<i64>::new()).is_none());
        assert!(in_set("attr", [None::<i64>, None]).is_none());
        assert!(primary_key(Vec::<i64>::new()).is_none());
        assert!(facet("brand", Vec::<i64>::new()).is_none());
    }

    #[test]
    fn test_variadic_keeps_present_values_in_order() {
        let pk = primary_key([Some(3), None, Some(1)]).unwrap();
        assert_eq!(pk.arguments(), &[Literal::Int(3), Literal::Int(1)]);
    }

    #[test]
    fn test_not_takes_one_child() {
        assert!(not(None).is_none());
        let negated = not(is_null("code")).unwrap();
        assert_eq!(negated.children().len(), 1);
    }

    #[test]
    fn test_price_between_equality_ignores_scale() {
        let a = price_between(Decimal::from_str("10.0").unwrap(), Decimal::from_str("20.0").unwrap());
        let b = price_between(Decimal::from_str("10.00").unwrap(), Decimal::from_str("20").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_price_between_accepts_floats() {
        let floats = price_between(10.0, 20.0);
        let decimals = price_between(Decimal::from_str("10.00").unwrap(), Decimal::from_str("20.0").unwrap());
        assert_eq!(floats, decimals);
        assert!(price_between(f64::NAN, 20.0).is_none());
    }

    #[test]
    fn test_hierarchy_entity_type_fallback() {
        let missing: Option<&str> = None;
        assert_eq!(
            within_hierarchy_of_type(missing, 5, [direct_relation()]),
            within_hierarchy(5, [direct_relation()])
        );
        assert!(within_hierarchy(Option::<i64>::None, [direct_relation()]).is_none());
        assert!(within_hierarchy("5", [direct_relation()]).is_none());
        assert!(within_hierarchy_of_type("CATEGORY", "root", [direct_relation()]).is_none());
    }

    #[test]
    fn test_reference_having_attribute_requires_filter() {
        assert!(reference_having_attribute("brand", None).is_none());
        assert!(reference_having_attribute("brand", eq("market", "EU")).is_some());
    }
}
