//! Query root.

use super::{
    ConstraintKind, FilterConstraint, FilterKind, HeadConstraint, OrderConstraint, OrderKind,
    RequireConstraint, RequireKind,
};
use crate::error::{QueryError, QueryResult};
use crate::finder;
use crate::literal::Literal;
use crate::render::{CompactRenderer, QueryRenderer};
use once_cell::sync::OnceCell;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A complete query: one head plus optional filter, order and require
/// trees.
///
/// The structural hash is computed on first use and cached, so repeated
/// equality checks between large queries stay cheap.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    head: HeadConstraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_by: Option<FilterConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    require: Option<RequireConstraint>,
    #[serde(skip)]
    hash: OnceCell<u64>,
}

/// Wire form of a query before its roots are checked
#[derive(Deserialize)]
struct RawQuery {
    head: HeadConstraint,
    #[serde(default)]
    filter_by: Option<FilterConstraint>,
    #[serde(default)]
    order_by: Option<OrderConstraint>,
    #[serde(default)]
    require: Option<RequireConstraint>,
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawQuery::deserialize(deserializer)?;
        Query::try_new(raw.head, raw.filter_by, raw.order_by, raw.require).map_err(de::Error::custom)
    }
}

impl Query {
    /// Builds a query, checking that each tree is rooted in its category's
    /// top-level container.
    pub fn try_new(
        head: HeadConstraint,
        filter_by: Option<FilterConstraint>,
        order_by: Option<OrderConstraint>,
        require: Option<RequireConstraint>,
    ) -> QueryResult<Self> {
        check_root(filter_by.as_ref().map(|c| c.kind()), FilterKind::FilterBy)?;
        check_root(order_by.as_ref().map(|c| c.kind()), OrderKind::OrderBy)?;
        check_root(require.as_ref().map(|c| c.kind()), RequireKind::Require)?;
        Ok(Self::from_parts(head, filter_by, order_by, require))
    }

    pub(crate) fn from_parts(
        head: HeadConstraint,
        filter_by: Option<FilterConstraint>,
        order_by: Option<OrderConstraint>,
        require: Option<RequireConstraint>,
    ) -> Self {
        Self {
            head,
            filter_by,
            order_by,
            require,
            hash: OnceCell::new(),
        }
    }

    pub fn head(&self) -> &HeadConstraint {
        &self.head
    }

    /// Entity type named by the head
    pub fn entity_type(&self) -> Option<&Literal> {
        self.head.entity_type()
    }

    pub fn filter_by(&self) -> Option<&FilterConstraint> {
        self.filter_by.as_ref()
    }

    pub fn order_by(&self) -> Option<&OrderConstraint> {
        self.order_by.as_ref()
    }

    pub fn require(&self) -> Option<&RequireConstraint> {
        self.require.as_ref()
    }

    /// First filter node matching `predicate`, in depth-first pre-order
    pub fn find_in_filter<P>(&self, predicate: P) -> Option<&FilterConstraint>
    where
        P: Fn(&FilterConstraint) -> bool,
    {
        self.filter_by
            .as_ref()
            .and_then(|root| finder::find_first(root, predicate))
    }

    pub fn find_in_order<P>(&self, predicate: P) -> Option<&OrderConstraint>
    where
        P: Fn(&OrderConstraint) -> bool,
    {
        self.order_by
            .as_ref()
            .and_then(|root| finder::find_first(root, predicate))
    }

    /// First require node matching `predicate`, not descending into
    /// nested require scopes such as `parents` or `hierarchyStatistics`.
    pub fn find_in_require<P>(&self, predicate: P) -> Option<&RequireConstraint>
    where
        P: Fn(&RequireConstraint) -> bool,
    {
        self.require.as_ref().and_then(|root| {
            finder::find_first_until(root, predicate, |node: &RequireConstraint| node.is_container())
        })
    }

    fn structural_hash(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.head.hash(&mut hasher);
            self.filter_by.hash(&mut hasher);
            self.order_by.hash(&mut hasher);
            self.require.hash(&mut hasher);
            hasher.finish()
        })
    }
}

fn check_root<K: ConstraintKind>(actual: Option<K>, expected: K) -> QueryResult<()> {
    match actual {
        Some(kind) if kind != expected => Err(QueryError::invalid_construction(
            "query",
            format!("{} tree must be rooted in `{}`, found `{}`", K::CATEGORY, expected.name(), kind.name()),
        )),
        _ => Ok(()),
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if let (Some(a), Some(b)) = (self.hash.get(), other.hash.get()) {
            if a != b {
                return false;
            }
        }
        self.head == other.head
            && self.filter_by == other.filter_by
            && self.order_by == other.order_by
            && self.require == other.require
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CompactRenderer.render_query(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{and, ascending, entities, eq, filter_by, order_by};
    use std::collections::HashSet;

    fn sample() -> Query {
        Query::try_new(
            entities("PRODUCT").unwrap(),
            filter_by([eq("code", "abc")]),
            order_by([ascending("code")]),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_unrooted_filter() {
        let result = Query::try_new(entities("PRODUCT").unwrap(), and([eq("code", "abc")]), None, None);
        assert!(matches!(result, Err(QueryError::InvalidConstruction { .. })));
    }

    #[test]
    fn test_equality_and_hash_cache() {
        let a = sample();
        let b = sample();
        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert_eq!(a, b);

        let other = Query::try_new(entities("CATEGORY").unwrap(), None, None, None).unwrap();
        set.insert(other.clone());
        assert_ne!(a, other);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_find_in_filter() {
        let query = sample();
        let found = query.find_in_filter(|c| c.kind() == FilterKind::Equals).unwrap();
        assert_eq!(found.attribute_name(), Some("code"));
        assert!(query.find_in_require(|_| true).is_none());
    }

    #[test]
    fn test_query_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Query>();
    }

    #[test]
    fn test_hash_cache_under_concurrent_reads() {
        let query = sample();
        let expected = sample();
        let hashes: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        assert_eq!(query, expected);
                        query.structural_hash()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });
        assert!(hashes.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(hashes[0], expected.structural_hash());
    }

    // ========================================================================
    // Serde
    // ========================================================================

    #[test]
    fn test_serde_round_trip() {
        let query = sample();
        let json = serde_json::to_string(&query).unwrap();
        assert!(!json.contains("hash"));
        let back: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
        assert_eq!(back.to_string(), query.to_string());
    }

    #[test]
    fn test_deserialize_rejects_unrooted_filter() {
        let json = r#"{
            "head": {"kind": "entities", "arguments": [{"kind": "string", "value": "A"}]},
            "filter_by": {"kind": "and", "children": [
                {"kind": "isNull", "arguments": [{"kind": "string", "value": "b"}]}
            ]}
        }"#;
        let err = serde_json::from_str::<Query>(json).unwrap_err();
        assert!(err.to_string().contains("filterBy"), "{err}");
    }

    #[test]
    fn test_display_is_compact() {
        insta::assert_snapshot!(
            sample().to_string(),
            @"query(entities('PRODUCT'),filterBy(equals('code','abc')),orderBy(ascending('code')))"
        );
    }
}
