//! Predicate search over constraint trees.
//!
//! All searches are depth-first and pre-order, so results come in the
//! order the constraints are written. The `_until` variants take a stop
//! predicate: a matching node is still tested itself, but the search does
//! not descend into its children. The stop predicate is never applied to
//! the search root.

use crate::ir::{Constraint, ConstraintKind};

/// First node under `root` (inclusive) matching `predicate`
pub fn find_first<'a, K, P>(root: &'a Constraint<K>, predicate: P) -> Option<&'a Constraint<K>>
where
    K: ConstraintKind,
    P: Fn(&Constraint<K>) -> bool,
{
    find_first_until(root, predicate, |_: &Constraint<K>| false)
}

/// All nodes under `root` (inclusive) matching `predicate`
pub fn find_all<'a, K, P>(root: &'a Constraint<K>, predicate: P) -> Vec<&'a Constraint<K>>
where
    K: ConstraintKind,
    P: Fn(&Constraint<K>) -> bool,
{
    find_all_until(root, predicate, |_: &Constraint<K>| false)
}

pub fn find_first_until<'a, K, P, S>(root: &'a Constraint<K>, predicate: P, stop: S) -> Option<&'a Constraint<K>>
where
    K: ConstraintKind,
    P: Fn(&Constraint<K>) -> bool,
    S: Fn(&Constraint<K>) -> bool,
{
    PreOrder::new(root, stop).find(|&node| predicate(node))
}

pub fn find_all_until<'a, K, P, S>(root: &'a Constraint<K>, predicate: P, stop: S) -> Vec<&'a Constraint<K>>
where
    K: ConstraintKind,
    P: Fn(&Constraint<K>) -> bool,
    S: Fn(&Constraint<K>) -> bool,
{
    PreOrder::new(root, stop).filter(|&node| predicate(node)).collect()
}

/// Pre-order walk that skips the children of stopped nodes
struct PreOrder<'a, K, S> {
    root: &'a Constraint<K>,
    stack: Vec<&'a Constraint<K>>,
    stop: S,
}

impl<'a, K, S> PreOrder<'a, K, S>
where
    K: ConstraintKind,
    S: Fn(&Constraint<K>) -> bool,
{
    fn new(root: &'a Constraint<K>, stop: S) -> Self {
        Self {
            root,
            stack: vec![root],
            stop,
        }
    }
}

impl<'a, K, S> Iterator for PreOrder<'a, K, S>
where
    K: ConstraintKind,
    S: Fn(&Constraint<K>) -> bool,
{
    type Item = &'a Constraint<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if std::ptr::eq(node, self.root) || !(self.stop)(node) {
            self.stack.extend(node.children().iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{attributes, entity_body, parents, require};
    use crate::ir::{FilterConstraint, FilterKind, RequireConstraint, RequireKind};
    use crate::syntax::parse_constraint_as;

    fn tree() -> FilterConstraint {
        parse_constraint_as(
            "filterBy(and(isNull('a'),or(isNull('b'),not(isNull('c')))),isNull('d'))",
        )
        .unwrap()
    }

    fn attribute_names<'a>(nodes: &[&'a FilterConstraint]) -> Vec<&'a str> {
        nodes.iter().filter_map(|node| node.attribute_name()).collect()
    }

    #[test]
    fn test_find_all_is_pre_order() {
        let tree = tree();
        let nulls = find_all(&tree, |c| c.kind() == FilterKind::IsNull);
        assert_eq!(attribute_names(&nulls), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_first() {
        let tree = tree();
        let or = find_first(&tree, |c| c.kind() == FilterKind::Or).unwrap();
        assert_eq!(or.children().len(), 2);
        assert!(find_first(&tree, |c| c.kind() == FilterKind::Equals).is_none());
    }

    #[test]
    fn test_stop_prevents_descent() {
        let tree = tree();
        let nulls = find_all_until(
            &tree,
            |c| c.kind() == FilterKind::IsNull,
            |c| c.kind() == FilterKind::Or,
        );
        assert_eq!(attribute_names(&nulls), vec!["a", "d"]);
    }

    #[test]
    fn test_stopped_node_is_still_tested() {
        let tree = tree();
        let found = find_first_until(&tree, |c| c.kind() == FilterKind::Not, |c| c.kind() == FilterKind::Not);
        assert!(found.is_some());
    }

    #[test]
    fn test_stop_ignores_root() {
        let root: RequireConstraint = require([Some(entity_body()), Some(parents([attributes()]))]).unwrap();
        let stop = |c: &RequireConstraint| c.is_container();

        let found: Vec<_> = find_all_until(&root, |_| true, stop)
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(found, vec![RequireKind::Require, RequireKind::EntityBody, RequireKind::Parents]);
    }
}
