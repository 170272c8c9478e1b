//! Entity Query
//!
//! Query language front end of an entity database. This crate provides:
//! - a typed constraint tree with filter, order and require categories
//! - lenient factory functions where missing input silently drops a fragment
//! - a parser for the textual query syntax
//! - purification of inapplicable and redundant nodes
//! - compact and indented renderers whose output parses back
//! - predicate search over constraint trees
//!
//! ```
//! use entity_query::factory::{and, entities, eq, filter_by, query};
//! use entity_query::{parse_query, Purifier};
//!
//! let q = query(entities("PRODUCT"), filter_by([and([eq("code", "abc")])]), None, None).unwrap();
//! let pure = Purifier::default().purify(&q).into_owned();
//! assert_eq!(pure.to_string(), "query(entities('PRODUCT'),filterBy(equals('code','abc')))");
//! assert_eq!(parse_query(&pure.to_string()).unwrap(), pure);
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod finder;
pub mod ir;
pub mod literal;
pub mod render;
pub mod syntax;
pub mod transform;

// Re-export main types for convenience
pub use config::{PurifyConfig, RenderConfig};
pub use error::{ParseError, QueryError, QueryResult};
pub use finder::{find_all, find_all_until, find_first, find_first_until};
pub use ir::{
    AnyConstraint, Argument, Category, Constraint, ConstraintKind, FilterConstraint, FilterKind,
    HeadConstraint, HeadKind, OrderConstraint, OrderKind, Query, RequireConstraint, RequireKind,
};
pub use literal::{IntoArgument, Literal, LiteralKind};
pub use render::{CompactRenderer, PrettyRenderer, QueryRenderer};
pub use syntax::{parse, parse_constraint, parse_constraint_as, parse_literal, parse_query, Parsed};
pub use transform::{Purifier, QueryTransform, Rewrite};
