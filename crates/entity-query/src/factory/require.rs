use super::{container, name_literal, present, variadic};
use crate::ir::{FacetStatisticsDepth, PriceFetchMode, QueryPriceMode, RequireConstraint, RequireKind};
use crate::literal::{collect_arguments, IntoArgument, Literal};

pub fn require<C>(children: impl IntoIterator<Item = C>) -> Option<RequireConstraint>
where
    C: Into<Option<RequireConstraint>>,
{
    container(RequireKind::Require, Vec::new(), children)
}

// ============================================================================
// Paging
// ============================================================================

/// 1-based page number and page size
pub fn page(number: impl IntoArgument, size: impl IntoArgument) -> Option<RequireConstraint> {
    let number = number.into_argument()?;
    let size = size.into_argument()?;
    Some(RequireConstraint::leaf(RequireKind::Page, vec![number, size]))
}

pub fn strip(offset: impl IntoArgument, limit: impl IntoArgument) -> Option<RequireConstraint> {
    let offset = offset.into_argument()?;
    let limit = limit.into_argument()?;
    Some(RequireConstraint::leaf(RequireKind::Strip, vec![offset, limit]))
}

// ============================================================================
// Entity content
// ============================================================================

pub fn entity_body() -> RequireConstraint {
    RequireConstraint::leaf(RequireKind::EntityBody, Vec::new())
}

pub fn attributes() -> RequireConstraint {
    RequireConstraint::leaf(RequireKind::Attributes, Vec::new())
}

/// Without a mode the prices matching the price filter are fetched.
pub fn prices(mode: impl Into<Option<PriceFetchMode>>) -> RequireConstraint {
    let arguments = mode.into().map(Literal::from).into_iter().collect();
    RequireConstraint::leaf(RequireKind::Prices, arguments)
}

pub fn all_prices() -> RequireConstraint {
    prices(PriceFetchMode::All)
}

/// Named associated data; no names fetches all of it.
pub fn associated_data<N: AsRef<str>>(names: impl IntoIterator<Item = N>) -> RequireConstraint {
    let arguments = names.into_iter().map(|name| name_literal(name.as_ref())).collect();
    RequireConstraint::leaf(RequireKind::AssociatedData, arguments)
}

/// References to the listed entity types; no types fetches all references.
pub fn references<V: IntoArgument>(entity_types: impl IntoIterator<Item = V>) -> RequireConstraint {
    RequireConstraint::leaf(RequireKind::References, collect_arguments(entity_types))
}

pub fn use_of_price(mode: impl Into<Option<QueryPriceMode>>) -> Option<RequireConstraint> {
    let mode = mode.into()?;
    Some(RequireConstraint::leaf(RequireKind::UseOfPrice, vec![mode.into()]))
}

/// Localized data in the listed locales; no locales fetches every language.
pub fn data_in_language<V: IntoArgument>(locales: impl IntoIterator<Item = V>) -> RequireConstraint {
    RequireConstraint::leaf(RequireKind::DataInLanguage, collect_arguments(locales))
}

/// Canonical content of a fully loaded entity followed by `extras`
pub fn full_entity_and<C>(extras: impl IntoIterator<Item = C>) -> Vec<RequireConstraint>
where
    C: Into<Option<RequireConstraint>>,
{
    let mut requires = vec![
        entity_body(),
        attributes(),
        associated_data(Vec::<&str>::new()),
        all_prices(),
        references(Vec::<Literal>::new()),
        data_in_language(Vec::<Literal>::new()),
    ];
    requires.extend(present(extras));
    requires
}

pub fn full_entity() -> Vec<RequireConstraint> {
    full_entity_and(Vec::<RequireConstraint>::new())
}

// ============================================================================
// Hierarchy
// ============================================================================

/// Parent chain of each entity, with `requirements` applied to the parents
pub fn parents<C>(requirements: impl IntoIterator<Item = C>) -> RequireConstraint
where
    C: Into<Option<RequireConstraint>>,
{
    RequireConstraint::container(RequireKind::Parents, Vec::new(), present(requirements))
}

pub fn parents_of_type<V, C>(
    entity_types: impl IntoIterator<Item = V>,
    requirements: impl IntoIterator<Item = C>,
) -> Option<RequireConstraint>
where
    V: IntoArgument,
    C: Into<Option<RequireConstraint>>,
{
    let entity_types = collect_arguments(entity_types);
    if entity_types.is_empty() {
        return None;
    }
    Some(RequireConstraint::container(
        RequireKind::ParentsOfType,
        entity_types,
        present(requirements),
    ))
}

pub fn hierarchy_statistics<C>(
    entity_type: impl IntoArgument,
    requirements: impl IntoIterator<Item = C>,
) -> Option<RequireConstraint>
where
    C: Into<Option<RequireConstraint>>,
{
    Some(RequireConstraint::container(
        RequireKind::HierarchyStatistics,
        vec![entity_type.into_argument()?],
        present(requirements),
    ))
}

// ============================================================================
// Facets and histograms
// ============================================================================

/// Without a depth only counts are computed.
pub fn facet_summary(depth: impl Into<Option<FacetStatisticsDepth>>) -> RequireConstraint {
    let arguments = depth.into().map(Literal::from).into_iter().collect();
    RequireConstraint::leaf(RequireKind::FacetSummary, arguments)
}

pub fn facet_groups_conjunction<V: IntoArgument>(
    entity_type: impl IntoArgument,
    group_ids: impl IntoIterator<Item = V>,
) -> Option<RequireConstraint> {
    variadic(RequireKind::FacetGroupsConjunction, vec![entity_type.into_argument()?], group_ids)
}

pub fn facet_groups_disjunction<V: IntoArgument>(
    entity_type: impl IntoArgument,
    group_ids: impl IntoIterator<Item = V>,
) -> Option<RequireConstraint> {
    variadic(RequireKind::FacetGroupsDisjunction, vec![entity_type.into_argument()?], group_ids)
}

pub fn facet_groups_negation<V: IntoArgument>(
    entity_type: impl IntoArgument,
    group_ids: impl IntoIterator<Item = V>,
) -> Option<RequireConstraint> {
    variadic(RequireKind::FacetGroupsNegation, vec![entity_type.into_argument()?], group_ids)
}

pub fn attribute_histogram<N: AsRef<str>>(
    bucket_count: impl IntoArgument,
    names: impl IntoIterator<Item = N>,
) -> Option<RequireConstraint> {
    let names = names.into_iter().map(|name| name_literal(name.as_ref()));
    variadic(RequireKind::AttributeHistogram, vec![bucket_count.into_argument()?], names)
}

pub fn price_histogram(bucket_count: impl IntoArgument) -> Option<RequireConstraint> {
    Some(RequireConstraint::leaf(
        RequireKind::PriceHistogram,
        vec![bucket_count.into_argument()?],
    ))
}
