//! Constraint AST.
//!
//! Every node is a [`Constraint<K>`] whose kind `K` belongs to one closed
//! category enum ([`HeadKind`], [`FilterKind`], [`OrderKind`],
//! [`RequireKind`]). Children share the parent's kind type, so a filter
//! container can only ever hold filter constraints. The dynamic entry
//! points ([`Constraint::try_new`], [`Constraint::try_from_arguments`])
//! enforce the same discipline at runtime for input of unknown category.

mod filter;
mod head;
mod mode;
mod order;
mod query;
mod require;
mod shape;

pub use filter::{FilterConstraint, FilterKind};
pub use head::{HeadConstraint, HeadKind};
pub use mode::{FacetStatisticsDepth, PriceFetchMode, QueryPriceMode};
pub use order::{OrderConstraint, OrderKind};
pub use query::Query;
pub use require::{RequireConstraint, RequireKind};
pub use shape::ArgShape;

use crate::error::{QueryError, QueryResult};
use crate::literal::Literal;
use crate::render::{CompactRenderer, QueryRenderer};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::Hash;

// ============================================================================
// Category and kind contract
// ============================================================================

/// Disjoint constraint families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Head,
    Filter,
    Order,
    Require,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Filter => "filter",
            Self::Order => "order",
            Self::Require => "require",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static metadata of one constraint kind.
///
/// The keyword `name()` is the lower-camel-case form of the variant
/// identifier (`GreaterThanEquals` -> `greaterThanEquals`).
pub trait ConstraintKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    const CATEGORY: Category;

    /// Every kind of the category, in catalog order
    fn all() -> &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }

    /// Whether nodes of this kind hold child constraints
    fn is_container(self) -> bool;

    /// Whether a single-child node may be replaced by its child
    fn is_collapsible(self) -> bool {
        false
    }

    /// Whether a node without children is inapplicable
    fn requires_children(self) -> bool {
        false
    }

    /// Literal arguments needed for the node to be applicable
    fn required_arguments(self) -> usize {
        0
    }

    /// Accepted argument layouts in the textual grammar, richest first
    fn shapes(self) -> &'static [ArgShape];

    fn wrap(constraint: Constraint<Self>) -> AnyConstraint;

    /// Gives the constraint back untouched when it is of another category
    fn unwrap(constraint: AnyConstraint) -> Result<Constraint<Self>, AnyConstraint>;
}

// ============================================================================
// Constraint node
// ============================================================================

/// One node of a constraint tree.
///
/// Leaves carry only literal arguments. Containers carry ordered children
/// of the same category and may carry literal arguments of their own
/// (hierarchy and reference constraints do).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Constraint<K> {
    kind: K,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<Literal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Constraint<K>>,
}

/// Wire form of a constraint before validation
#[derive(Deserialize)]
#[serde(bound(deserialize = "K: ConstraintKind + Deserialize<'de>"))]
struct RawConstraint<K> {
    kind: K,
    #[serde(default = "Vec::new")]
    arguments: Vec<Literal>,
    #[serde(default = "Vec::new")]
    children: Vec<Constraint<K>>,
}

/// Deserialized trees go through the same checks as parsed ones: leaves
/// hold no children and the node must fit one of the kind's shapes.
impl<'de, K> Deserialize<'de> for Constraint<K>
where
    K: ConstraintKind + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConstraint::<K>::deserialize(deserializer)?;
        Constraint::checked(raw.kind, raw.arguments, raw.children).map_err(de::Error::custom)
    }
}

impl<K: ConstraintKind> Constraint<K> {
    pub(crate) fn leaf(kind: K, arguments: Vec<Literal>) -> Self {
        debug_assert!(!kind.is_container(), "{} is a container", kind.name());
        Self {
            kind,
            arguments,
            children: Vec::new(),
        }
    }

    pub(crate) fn container(kind: K, arguments: Vec<Literal>, children: Vec<Self>) -> Self {
        debug_assert!(kind.is_container(), "{} is a leaf", kind.name());
        Self {
            kind,
            arguments,
            children,
        }
    }

    /// Builds a leaf, failing if `kind` is a container kind.
    pub fn new_leaf(kind: K, arguments: Vec<Literal>) -> QueryResult<Self> {
        if kind.is_container() {
            return Err(QueryError::invalid_construction(
                kind.name(),
                "container constraint built as a leaf",
            ));
        }
        Ok(Self::leaf(kind, arguments))
    }

    /// Builds a container of same-category children, failing if `kind` is
    /// a leaf kind.
    pub fn new_container(kind: K, arguments: Vec<Literal>, children: Vec<Self>) -> QueryResult<Self> {
        if !kind.is_container() {
            return Err(QueryError::invalid_construction(
                kind.name(),
                "leaf constraint cannot hold child constraints",
            ));
        }
        Ok(Self::container(kind, arguments, children))
    }

    /// Builds a node that also fits one of the kind's textual shapes, so
    /// it renders to text the parser accepts.
    pub fn checked(kind: K, arguments: Vec<Literal>, children: Vec<Self>) -> QueryResult<Self> {
        let node = if children.is_empty() && !kind.is_container() {
            Self::new_leaf(kind, arguments)?
        } else {
            Self::new_container(kind, arguments, children)?
        };
        let shapes = kind.shapes();
        if shapes
            .iter()
            .any(|shape| shape.matches_node(&node.arguments, node.children.len(), K::CATEGORY))
        {
            return Ok(node);
        }
        Err(QueryError::invalid_construction(
            kind.name(),
            format!(
                "arguments do not fit {}",
                shapes.iter().map(|shape| shape.describe()).collect::<Vec<_>>().join(" or ")
            ),
        ))
    }

    /// Builds a node from children of unknown category.
    ///
    /// Fails when a leaf kind receives children or when any child belongs
    /// to another category.
    pub fn try_new(kind: K, arguments: Vec<Literal>, children: Vec<AnyConstraint>) -> QueryResult<Self> {
        if !kind.is_container() {
            if let Some(child) = children.first() {
                return Err(QueryError::invalid_construction(
                    kind.name(),
                    format!("leaf constraint cannot hold nested constraint `{}`", child.name()),
                ));
            }
            return Ok(Self::leaf(kind, arguments));
        }

        let children = children
            .into_iter()
            .map(|child| {
                K::unwrap(child).map_err(|other| {
                    QueryError::invalid_construction(
                        kind.name(),
                        format!(
                            "child `{}` is a {} constraint, expected {}",
                            other.name(),
                            other.category(),
                            K::CATEGORY
                        ),
                    )
                })
            })
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self::container(kind, arguments, children))
    }

    /// Builds a node from a mixed argument list.
    ///
    /// Literals become arguments and constraints become children, both in
    /// their original order.
    pub fn try_from_arguments(kind: K, items: Vec<Argument>) -> QueryResult<Self> {
        let mut arguments = Vec::new();
        let mut children = Vec::new();
        for item in items {
            match item {
                Argument::Literal(literal) => arguments.push(literal),
                Argument::Constraint(constraint) => children.push(constraint),
            }
        }
        Self::try_new(kind, arguments, children)
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn category(&self) -> Category {
        K::CATEGORY
    }

    pub fn arguments(&self) -> &[Literal] {
        &self.arguments
    }

    pub fn argument(&self, index: usize) -> Option<&Literal> {
        self.arguments.get(index)
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Whether the node still constrains anything
    pub fn is_applicable(&self) -> bool {
        let enough_arguments = self.arguments.len() >= self.kind.required_arguments();
        if self.kind.requires_children() {
            enough_arguments && !self.children.is_empty()
        } else {
            enough_arguments
        }
    }

    /// Whether the node adds structure beyond its children
    pub fn is_necessary(&self) -> bool {
        !self.is_container() || self.children.len() > 1
    }

    /// Copy of this node with other children
    pub(crate) fn with_children(&self, children: Vec<Self>) -> Self {
        Self {
            kind: self.kind,
            arguments: self.arguments.clone(),
            children,
        }
    }

    pub(crate) fn into_children(self) -> Vec<Self> {
        self.children
    }

    /// First argument as a string (attribute name of attribute constraints)
    pub(crate) fn string_argument(&self, index: usize) -> Option<&str> {
        self.argument(index).and_then(Literal::as_str)
    }

    pub(crate) fn int_arguments(&self, skip: usize) -> Vec<i64> {
        self.arguments.iter().skip(skip).filter_map(Literal::as_int).collect()
    }
}

impl<K: ConstraintKind> fmt::Display for Constraint<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CompactRenderer.render_constraint(self))
    }
}

// ============================================================================
// Category-erased views
// ============================================================================

/// A constraint of any category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "constraint", rename_all = "snake_case")]
pub enum AnyConstraint {
    Head(HeadConstraint),
    Filter(FilterConstraint),
    Order(OrderConstraint),
    Require(RequireConstraint),
}

impl AnyConstraint {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head(c) => c.name(),
            Self::Filter(c) => c.name(),
            Self::Order(c) => c.name(),
            Self::Require(c) => c.name(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Head(_) => Category::Head,
            Self::Filter(_) => Category::Filter,
            Self::Order(_) => Category::Order,
            Self::Require(_) => Category::Require,
        }
    }

    pub fn arguments(&self) -> &[Literal] {
        match self {
            Self::Head(c) => c.arguments(),
            Self::Filter(c) => c.arguments(),
            Self::Order(c) => c.arguments(),
            Self::Require(c) => c.arguments(),
        }
    }

    pub fn as_filter(&self) -> Option<&FilterConstraint> {
        match self {
            Self::Filter(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<&OrderConstraint> {
        match self {
            Self::Order(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_require(&self) -> Option<&RequireConstraint> {
        match self {
            Self::Require(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for AnyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head(c) => c.fmt(f),
            Self::Filter(c) => c.fmt(f),
            Self::Order(c) => c.fmt(f),
            Self::Require(c) => c.fmt(f),
        }
    }
}

impl<K: ConstraintKind> From<Constraint<K>> for AnyConstraint {
    fn from(constraint: Constraint<K>) -> Self {
        K::wrap(constraint)
    }
}

/// One item of a textual argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Literal(Literal),
    Constraint(AnyConstraint),
}

impl From<Literal> for Argument {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<AnyConstraint> for Argument {
    fn from(constraint: AnyConstraint) -> Self {
        Self::Constraint(constraint)
    }
}

impl<K: ConstraintKind> From<Constraint<K>> for Argument {
    fn from(constraint: Constraint<K>) -> Self {
        Self::Constraint(K::wrap(constraint))
    }
}
