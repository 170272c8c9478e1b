//! Purification: removal of inapplicable and redundant nodes.
//!
//! Each of the three trees of a query is rewritten bottom-up. For every
//! node, its children are purified first, then the optional hook of the
//! node's category runs, then the node is dropped if it no longer
//! constrains anything, and finally a collapsible container left with a
//! single child is replaced by that child.
//!
//! Nothing is mutated. A subtree that needs no rewrite comes back as
//! `Cow::Borrowed` of the very same node, so purifying an already pure
//! query returns the input reference.

use super::QueryTransform;
use crate::config::PurifyConfig;
use crate::ir::{Category, Constraint, ConstraintKind, FilterKind, OrderKind, Query, RequireKind};
use std::any::Any;
use std::borrow::Cow;
use std::ptr;
use tracing::{debug, trace};

/// Outcome of a rewrite hook for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite<K> {
    Keep,
    Replace(Constraint<K>),
    Remove,
}

/// Host-supplied rewrite of nodes of one category
pub type RewriteHook<K> = Box<dyn Fn(&Constraint<K>) -> Rewrite<K> + Send + Sync>;

/// Configurable purification pass.
#[derive(Default)]
pub struct Purifier {
    config: PurifyConfig,
    filter_hook: Option<RewriteHook<FilterKind>>,
    order_hook: Option<RewriteHook<OrderKind>>,
    require_hook: Option<RewriteHook<RequireKind>>,
}

impl Purifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: PurifyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_filter_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Constraint<FilterKind>) -> Rewrite<FilterKind> + Send + Sync + 'static,
    {
        self.filter_hook = Some(Box::new(hook));
        self
    }

    pub fn with_order_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Constraint<OrderKind>) -> Rewrite<OrderKind> + Send + Sync + 'static,
    {
        self.order_hook = Some(Box::new(hook));
        self
    }

    pub fn with_require_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Constraint<RequireKind>) -> Rewrite<RequireKind> + Send + Sync + 'static,
    {
        self.require_hook = Some(Box::new(hook));
        self
    }

    /// Purifies all three trees of `query`.
    pub fn purify<'q>(&self, query: &'q Query) -> Cow<'q, Query> {
        let filter_by = query.filter_by().map(|root| (root, self.purify_constraint(root)));
        let order_by = query.order_by().map(|root| (root, self.purify_constraint(root)));
        let require = query.require().map(|root| (root, self.purify_constraint(root)));

        let unchanged = filter_by.as_ref().map_or(true, |(root, result)| is_unchanged(result, root))
            && order_by.as_ref().map_or(true, |(root, result)| is_unchanged(result, root))
            && require.as_ref().map_or(true, |(root, result)| is_unchanged(result, root));
        if unchanged {
            return Cow::Borrowed(query);
        }

        let purified = Query::from_parts(
            query.head().clone(),
            filter_by.and_then(|(_, result)| result).map(Cow::into_owned),
            order_by.and_then(|(_, result)| result).map(Cow::into_owned),
            require.and_then(|(_, result)| result).map(Cow::into_owned),
        );
        debug!(query = %purified, "purified query");
        Cow::Owned(purified)
    }

    /// Purifies one subtree. `None` means the whole subtree vanished.
    pub fn purify_constraint<'c, K: ConstraintKind>(
        &self,
        constraint: &'c Constraint<K>,
    ) -> Option<Cow<'c, Constraint<K>>> {
        self.purify_node(constraint, self.hook::<K>())
    }

    fn hook<K: ConstraintKind>(&self) -> Option<&RewriteHook<K>> {
        let hook: &dyn Any = match K::CATEGORY {
            Category::Filter => self.filter_hook.as_ref()?,
            Category::Order => self.order_hook.as_ref()?,
            Category::Require => self.require_hook.as_ref()?,
            Category::Head => return None,
        };
        hook.downcast_ref::<RewriteHook<K>>()
    }

    fn purify_node<'c, K: ConstraintKind>(
        &self,
        constraint: &'c Constraint<K>,
        hook: Option<&RewriteHook<K>>,
    ) -> Option<Cow<'c, Constraint<K>>> {
        let mut node = Cow::Borrowed(constraint);

        if constraint.is_container() {
            let results: Vec<_> = constraint
                .children()
                .iter()
                .map(|child| self.purify_node(child, hook))
                .collect();
            let changed = results
                .iter()
                .zip(constraint.children())
                .any(|(result, child)| !is_unchanged(result, child));
            if changed {
                let children = results.into_iter().flatten().map(Cow::into_owned).collect();
                node = Cow::Owned(constraint.with_children(children));
            }
        }

        if let Some(hook) = hook {
            match hook(&*node) {
                Rewrite::Keep => {}
                Rewrite::Replace(replacement) => node = Cow::Owned(replacement),
                Rewrite::Remove => {
                    trace!(constraint = node.name(), "removed by hook");
                    return None;
                }
            }
        }

        if !node.is_applicable() {
            trace!(constraint = node.name(), "dropped inapplicable constraint");
            return None;
        }

        if self.config.collapse_single_child
            && node.kind().is_collapsible()
            && node.children().len() == 1
            && node.arguments().is_empty()
        {
            trace!(constraint = node.name(), "collapsed single-child container");
            return match node {
                Cow::Borrowed(node) => node.children().first().map(Cow::Borrowed),
                Cow::Owned(node) => node.into_children().pop().map(Cow::Owned),
            };
        }

        Some(node)
    }
}

impl QueryTransform for Purifier {
    fn name(&self) -> &'static str {
        "purify"
    }

    fn transform(&self, query: Query) -> Query {
        let purified = match self.purify(&query) {
            Cow::Owned(purified) => Some(purified),
            Cow::Borrowed(_) => None,
        };
        purified.unwrap_or(query)
    }
}

/// Whether purification handed back the original node itself
fn is_unchanged<K: ConstraintKind>(result: &Option<Cow<'_, Constraint<K>>>, original: &Constraint<K>) -> bool {
    matches!(result, Some(Cow::Borrowed(node)) if ptr::eq(*node, original))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{
        and, ascending, entities, eq, filter_by, is_null, not, or, order_by, parents, query, require,
        user_filter,
    };
    use crate::ir::{FilterConstraint, RequireConstraint};
    use crate::syntax::parse_query;

    fn purify_text(input: &str) -> String {
        let q = parse_query(input).unwrap();
        Purifier::default().purify(&q).to_string()
    }

    // =========================================================================
    // Collapse
    // =========================================================================

    #[test]
    fn test_single_child_and_collapses() {
        let and = and([eq("a", 1)]).unwrap();
        let purified = Purifier::default().purify_constraint(&and).unwrap();
        assert_eq!(purified.into_owned(), eq("a", 1).unwrap());
    }

    #[test]
    fn test_two_child_and_is_unchanged() {
        let and = and([eq("a", 1), eq("b", 2)]).unwrap();
        let purified = Purifier::default().purify_constraint(&and).unwrap();
        assert!(matches!(purified, Cow::Borrowed(node) if ptr::eq(node, &and)));
    }

    #[test]
    fn test_not_and_roots_keep_single_child() {
        insta::assert_snapshot!(
            purify_text("query(entities('A'),filterBy(not(or(isNull('a')))))"),
            @"query(entities('A'),filterBy(not(isNull('a'))))"
        );
    }

    #[test]
    fn test_nested_collapse() {
        insta::assert_snapshot!(
            purify_text("query(entities('A'),filterBy(and(or(userFilter(isNull('a'))),isNull('b'))))"),
            @"query(entities('A'),filterBy(and(isNull('a'),isNull('b'))))"
        );
    }

    #[test]
    fn test_collapse_can_be_disabled() {
        let purifier = Purifier::from_config(PurifyConfig {
            collapse_single_child: false,
        });
        let and = and([eq("a", 1)]).unwrap();
        assert!(matches!(purifier.purify_constraint(&and), Some(Cow::Borrowed(_))));
    }

    // =========================================================================
    // Dropping
    // =========================================================================

    #[test]
    fn test_empty_containers_vanish() {
        let hollow = and_of_empty_or();
        let q = query(entities("A"), filter_by([hollow]), None, None).unwrap();
        let purified = Purifier::default().purify(&q);
        assert!(purified.filter_by().is_none());
    }

    #[test]
    fn test_childless_parents_survive() {
        let q = query(
            entities("A"),
            None,
            None,
            require([parents(Vec::<RequireConstraint>::new())]),
        )
        .unwrap();
        assert!(matches!(Purifier::default().purify(&q), Cow::Borrowed(_)));
    }

    // =========================================================================
    // Idempotence
    // =========================================================================

    #[test]
    fn test_purify_is_idempotent() {
        let q = parse_query("query(entities('A'),filterBy(and(or(isNull('a')),not(isNull('b')))),orderBy(ascending('c')))")
            .unwrap();
        let purifier = Purifier::default();
        let once = purifier.purify(&q);
        assert!(matches!(once, Cow::Owned(_)));
        let twice = purifier.purify(&once);
        assert!(matches!(twice, Cow::Borrowed(same) if ptr::eq(same, &*once)));
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    #[test]
    fn test_hook_removes_nodes() {
        let purifier = Purifier::new().with_filter_hook(|node| match node.attribute_name() {
            Some("internal") => Rewrite::Remove,
            _ => Rewrite::Keep,
        });
        let q = query(
            entities("A"),
            filter_by([and([eq("internal", 1), eq("code", "x")])]),
            order_by([ascending("code")]),
            None,
        )
        .unwrap();
        insta::assert_snapshot!(
            purifier.purify(&q).to_string(),
            @"query(entities('A'),filterBy(equals('code','x')),orderBy(ascending('code')))"
        );
    }

    #[test]
    fn test_hook_replacement_is_checked_for_applicability() {
        let purifier = Purifier::new().with_filter_hook(|node| {
            if node.kind() == FilterKind::UserFilter {
                Rewrite::Replace(node.with_children(Vec::new()))
            } else {
                Rewrite::Keep
            }
        });
        let q = query(
            entities("A"),
            filter_by([user_filter([eq("a", 1)]), Some(is_null("b"))]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            purifier.purify(&q).filter_by().map(|f| f.to_string()),
            Some("filterBy(isNull('b'))".to_string())
        );
    }

    #[test]
    fn test_hooks_only_see_their_category() {
        let purifier = Purifier::new().with_order_hook(|_| Rewrite::Remove);
        let not_b = not(is_null("b")).unwrap();
        assert!(matches!(purifier.purify_constraint(&not_b), Some(Cow::Borrowed(_))));
    }

    /// `and(or())`, which factories never produce
    fn and_of_empty_or() -> FilterConstraint {
        let or = FilterConstraint::container(FilterKind::Or, Vec::new(), Vec::new());
        FilterConstraint::container(FilterKind::And, Vec::new(), vec![or])
    }
}
