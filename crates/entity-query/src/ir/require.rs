//! Require constraints shape what is fetched with each returned entity.

use super::mode::{FacetStatisticsDepth, PriceFetchMode, QueryPriceMode};
use super::{AnyConstraint, ArgShape, Category, Constraint, ConstraintKind};
use crate::literal::{Literal, Locale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequireKind {
    Require,
    Page,
    Strip,
    EntityBody,
    Attributes,
    Prices,
    AssociatedData,
    References,
    UseOfPrice,
    DataInLanguage,
    Parents,
    ParentsOfType,
    FacetSummary,
    FacetGroupsConjunction,
    FacetGroupsDisjunction,
    FacetGroupsNegation,
    AttributeHistogram,
    PriceHistogram,
    HierarchyStatistics,
}

pub type RequireConstraint = Constraint<RequireKind>;

const ALL: [RequireKind; 19] = [
    RequireKind::Require,
    RequireKind::Page,
    RequireKind::Strip,
    RequireKind::EntityBody,
    RequireKind::Attributes,
    RequireKind::Prices,
    RequireKind::AssociatedData,
    RequireKind::References,
    RequireKind::UseOfPrice,
    RequireKind::DataInLanguage,
    RequireKind::Parents,
    RequireKind::ParentsOfType,
    RequireKind::FacetSummary,
    RequireKind::FacetGroupsConjunction,
    RequireKind::FacetGroupsDisjunction,
    RequireKind::FacetGroupsNegation,
    RequireKind::AttributeHistogram,
    RequireKind::PriceHistogram,
    RequireKind::HierarchyStatistics,
];

impl RequireKind {
    fn is_facet_groups(self) -> bool {
        matches!(
            self,
            Self::FacetGroupsConjunction | Self::FacetGroupsDisjunction | Self::FacetGroupsNegation
        )
    }
}

impl ConstraintKind for RequireKind {
    const CATEGORY: Category = Category::Require;

    fn all() -> &'static [Self] {
        &ALL
    }

    fn name(self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Page => "page",
            Self::Strip => "strip",
            Self::EntityBody => "entityBody",
            Self::Attributes => "attributes",
            Self::Prices => "prices",
            Self::AssociatedData => "associatedData",
            Self::References => "references",
            Self::UseOfPrice => "useOfPrice",
            Self::DataInLanguage => "dataInLanguage",
            Self::Parents => "parents",
            Self::ParentsOfType => "parentsOfType",
            Self::FacetSummary => "facetSummary",
            Self::FacetGroupsConjunction => "facetGroupsConjunction",
            Self::FacetGroupsDisjunction => "facetGroupsDisjunction",
            Self::FacetGroupsNegation => "facetGroupsNegation",
            Self::AttributeHistogram => "attributeHistogram",
            Self::PriceHistogram => "priceHistogram",
            Self::HierarchyStatistics => "hierarchyStatistics",
        }
    }

    fn is_container(self) -> bool {
        matches!(
            self,
            Self::Require | Self::Parents | Self::ParentsOfType | Self::HierarchyStatistics
        )
    }

    fn requires_children(self) -> bool {
        matches!(self, Self::Require)
    }

    fn required_arguments(self) -> usize {
        match self {
            Self::Page
            | Self::Strip
            | Self::FacetGroupsConjunction
            | Self::FacetGroupsDisjunction
            | Self::FacetGroupsNegation
            | Self::AttributeHistogram => 2,
            Self::UseOfPrice | Self::PriceHistogram | Self::ParentsOfType | Self::HierarchyStatistics => 1,
            Self::Require
            | Self::EntityBody
            | Self::Attributes
            | Self::Prices
            | Self::AssociatedData
            | Self::References
            | Self::DataInLanguage
            | Self::Parents
            | Self::FacetSummary => 0,
        }
    }

    fn shapes(self) -> &'static [ArgShape] {
        match self {
            Self::Require => &[ArgShape::RequireList],
            Self::Page | Self::Strip => &[ArgShape::BetweenValues],
            Self::EntityBody | Self::Attributes => &[ArgShape::Empty],
            Self::Prices | Self::FacetSummary => &[ArgShape::Value, ArgShape::Empty],
            Self::AssociatedData => &[ArgShape::NameList, ArgShape::Empty],
            Self::References | Self::DataInLanguage => &[ArgShape::ValueList, ArgShape::Empty],
            Self::UseOfPrice | Self::PriceHistogram => &[ArgShape::Value],
            Self::Parents => &[ArgShape::RequireList, ArgShape::Empty],
            Self::ParentsOfType => &[ArgShape::EntityTypesWithRequireList],
            Self::FacetGroupsConjunction | Self::FacetGroupsDisjunction | Self::FacetGroupsNegation => {
                &[ArgShape::EntityTypeWithValueList]
            }
            Self::AttributeHistogram => &[ArgShape::ValueWithNameList],
            Self::HierarchyStatistics => &[ArgShape::EntityTypeWithRequireList, ArgShape::Value],
        }
    }

    fn wrap(constraint: Constraint<Self>) -> AnyConstraint {
        AnyConstraint::Require(constraint)
    }

    fn unwrap(constraint: AnyConstraint) -> Result<Constraint<Self>, AnyConstraint> {
        match constraint {
            AnyConstraint::Require(c) => Ok(c),
            other => Err(other),
        }
    }
}

// ============================================================================
// Typed accessors
// ============================================================================

impl RequireConstraint {
    /// 1-based page number and page size of `page`
    pub fn page(&self) -> Option<(i64, i64)> {
        self.int_pair(RequireKind::Page)
    }

    /// Offset and limit of `strip`
    pub fn strip(&self) -> Option<(i64, i64)> {
        self.int_pair(RequireKind::Strip)
    }

    fn int_pair(&self, kind: RequireKind) -> Option<(i64, i64)> {
        if self.kind() != kind {
            return None;
        }
        Some((self.argument(0)?.as_int()?, self.argument(1)?.as_int()?))
    }

    /// Fetch mode of `prices`, defaulting when written without one
    pub fn fetch_mode(&self) -> Option<PriceFetchMode> {
        match self.kind() {
            RequireKind::Prices => match self.argument(0) {
                Some(literal) => PriceFetchMode::from_literal(literal),
                None => Some(PriceFetchMode::default()),
            },
            _ => None,
        }
    }

    /// Statistics depth of `facetSummary`, defaulting when written without one
    pub fn statistics_depth(&self) -> Option<FacetStatisticsDepth> {
        match self.kind() {
            RequireKind::FacetSummary => match self.argument(0) {
                Some(literal) => FacetStatisticsDepth::from_literal(literal),
                None => Some(FacetStatisticsDepth::default()),
            },
            _ => None,
        }
    }

    pub fn price_mode(&self) -> Option<QueryPriceMode> {
        match self.kind() {
            RequireKind::UseOfPrice => self.argument(0).and_then(QueryPriceMode::from_literal),
            _ => None,
        }
    }

    /// Bucket count of both histogram kinds
    pub fn bucket_count(&self) -> Option<i64> {
        match self.kind() {
            RequireKind::AttributeHistogram | RequireKind::PriceHistogram => {
                self.argument(0).and_then(Literal::as_int)
            }
            _ => None,
        }
    }

    /// Named attributes of `attributeHistogram` or associated data of
    /// `associatedData`
    pub fn names(&self) -> Vec<&str> {
        let skip = match self.kind() {
            RequireKind::AttributeHistogram => 1,
            RequireKind::AssociatedData => 0,
            _ => return Vec::new(),
        };
        self.arguments().iter().skip(skip).filter_map(Literal::as_str).collect()
    }

    /// Entity type of facet group, statistics and reference kinds
    pub fn entity_type(&self) -> Option<&Literal> {
        let kind = self.kind();
        if kind.is_facet_groups() || kind == RequireKind::HierarchyStatistics {
            self.argument(0)
        } else {
            None
        }
    }

    /// Entity types listed by `references` and `parentsOfType`
    pub fn entity_types(&self) -> &[Literal] {
        match self.kind() {
            RequireKind::References | RequireKind::ParentsOfType => self.arguments(),
            _ => &[],
        }
    }

    /// Group ids of the facet group kinds
    pub fn group_ids(&self) -> Vec<i64> {
        if self.kind().is_facet_groups() {
            self.int_arguments(1)
        } else {
            Vec::new()
        }
    }

    /// Locales of `dataInLanguage`
    pub fn languages(&self) -> Vec<&Locale> {
        match self.kind() {
            RequireKind::DataInLanguage => self
                .arguments()
                .iter()
                .filter_map(|literal| match literal {
                    Literal::Locale(locale) => Some(locale),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a list-valued require was written without a list and so
    /// fetches everything
    pub fn is_all_requested(&self) -> bool {
        matches!(
            self.kind(),
            RequireKind::AssociatedData | RequireKind::References | RequireKind::DataInLanguage
        ) && self.arguments().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{
        associated_data, attribute_histogram, data_in_language, facet_groups_conjunction,
        facet_summary, page, prices, use_of_price,
    };

    #[test]
    fn test_page() {
        assert_eq!(page(2, 20).unwrap().page(), Some((2, 20)));
        assert_eq!(page(2, 20).unwrap().strip(), None);
    }

    #[test]
    fn test_defaults_apply_without_arguments() {
        assert_eq!(prices(None).fetch_mode(), Some(PriceFetchMode::RespectingFilter));
        assert_eq!(facet_summary(None).statistics_depth(), Some(FacetStatisticsDepth::Counts));
        assert_eq!(
            prices(PriceFetchMode::All).fetch_mode(),
            Some(PriceFetchMode::All)
        );
    }

    #[test]
    fn test_price_mode() {
        let require = use_of_price(QueryPriceMode::WithoutTax).unwrap();
        assert_eq!(require.price_mode(), Some(QueryPriceMode::WithoutTax));
    }

    #[test]
    fn test_histogram() {
        let histogram = attribute_histogram(20, ["width", "height"]).unwrap();
        assert_eq!(histogram.bucket_count(), Some(20));
        assert_eq!(histogram.names(), vec!["width", "height"]);
    }

    #[test]
    fn test_facet_groups() {
        let groups = facet_groups_conjunction("parameterType", [1, 8, 15]).unwrap();
        assert_eq!(groups.entity_type(), Some(&Literal::from("parameterType")));
        assert_eq!(groups.group_ids(), vec![1, 8, 15]);
    }

    #[test]
    fn test_all_requested() {
        assert!(associated_data(Vec::<&str>::new()).is_all_requested());
        assert!(!associated_data(["gallery"]).is_all_requested());
        let locales = [Locale::parse("cs-CZ").unwrap()];
        assert_eq!(data_in_language(locales).languages().len(), 1);
    }
}
