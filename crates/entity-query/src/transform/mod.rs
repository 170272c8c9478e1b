//! Query-to-query transforms.

mod purify;

pub use purify::{Purifier, Rewrite, RewriteHook};

use crate::ir::Query;
use tracing::trace;

/// A rewrite pass over a whole query.
pub trait QueryTransform: Send + Sync {
    /// Unique name for this transform
    fn name(&self) -> &'static str;

    fn transform(&self, query: Query) -> Query;
}

/// Runs `transforms` in order, each on the previous one's output.
pub fn apply_all(transforms: &[&dyn QueryTransform], query: Query) -> Query {
    transforms.iter().fold(query, |query, transform| {
        trace!(transform = transform.name(), "applying transform");
        transform.transform(query)
    })
}
