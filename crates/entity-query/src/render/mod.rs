//! Canonical text renderers.
//!
//! Both renderers share one tree walk; they differ only in the layout
//! hooks of [`QueryRenderer`], called around argument lists that contain
//! nested constraints. Lists of plain literals are always written inline.

mod compact;
mod pretty;

pub use compact::CompactRenderer;
pub use pretty::PrettyRenderer;

use crate::ir::{Constraint, ConstraintKind, Query};
use crate::literal::write_literal;

/// Layout strategy plus the shared walk.
pub trait QueryRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &'static str;

    /// Written after `(` of a list holding nested constraints
    fn open_nested(&self, _out: &mut String, _depth: usize) {}

    /// Written between items of a list holding nested constraints
    fn separate_nested(&self, out: &mut String, _depth: usize) {
        out.push(',');
    }

    /// Written before `)` of a list holding nested constraints
    fn close_nested(&self, _out: &mut String, _depth: usize) {}

    fn render_query(&self, query: &Query) -> String {
        let mut out = String::from("query(");
        self.open_nested(&mut out, 0);
        write_constraint(self, &mut out, query.head(), 1);
        if let Some(filter_by) = query.filter_by() {
            self.separate_nested(&mut out, 0);
            write_constraint(self, &mut out, filter_by, 1);
        }
        if let Some(order_by) = query.order_by() {
            self.separate_nested(&mut out, 0);
            write_constraint(self, &mut out, order_by, 1);
        }
        if let Some(require) = query.require() {
            self.separate_nested(&mut out, 0);
            write_constraint(self, &mut out, require, 1);
        }
        self.close_nested(&mut out, 0);
        out.push(')');
        out
    }

    fn render_constraint<K: ConstraintKind>(&self, constraint: &Constraint<K>) -> String
    where
        Self: Sized,
    {
        let mut out = String::new();
        write_constraint(self, &mut out, constraint, 0);
        out
    }
}

fn write_constraint<R, K>(renderer: &R, out: &mut String, constraint: &Constraint<K>, depth: usize)
where
    R: QueryRenderer + ?Sized,
    K: ConstraintKind,
{
    out.push_str(constraint.name());
    out.push('(');

    if constraint.children().is_empty() {
        for (i, argument) in constraint.arguments().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_literal(out, argument);
        }
    } else {
        renderer.open_nested(out, depth);
        let mut first = true;
        for argument in constraint.arguments() {
            if !first {
                renderer.separate_nested(out, depth);
            }
            write_literal(out, argument);
            first = false;
        }
        for child in constraint.children() {
            if !first {
                renderer.separate_nested(out, depth);
            }
            write_constraint(renderer, out, child, depth + 1);
            first = false;
        }
        renderer.close_nested(out, depth);
    }

    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{and, entities, eq, filter_by, is_null, query};

    /// Writes nested lists with ` | ` to make the hook calls visible
    struct MarkerRenderer;

    impl QueryRenderer for MarkerRenderer {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn open_nested(&self, out: &mut String, depth: usize) {
            out.push_str(&format!("<{}", depth));
        }

        fn separate_nested(&self, out: &mut String, _depth: usize) {
            out.push_str(" | ");
        }

        fn close_nested(&self, out: &mut String, depth: usize) {
            out.push_str(&format!("{}>", depth));
        }
    }

    #[test]
    fn test_hooks_wrap_only_nested_lists() {
        let and = and([eq("a", 1), Some(is_null("b"))]).unwrap();
        insta::assert_snapshot!(
            MarkerRenderer.render_constraint(&and),
            @"and(<0equals('a',1) | isNull('b')0>)"
        );
    }

    #[test]
    fn test_query_parts_are_one_level_deep() {
        let q = query(entities("A"), filter_by([Some(is_null("b"))]), None, None).unwrap();
        insta::assert_snapshot!(
            MarkerRenderer.render_query(&q),
            @"query(<0entities('A') | filterBy(<1isNull('b')1>)0>)"
        );
    }

    #[test]
    fn test_renderer_is_object_safe() {
        let renderers: Vec<Box<dyn QueryRenderer>> = vec![Box::new(CompactRenderer), Box::new(PrettyRenderer::default())];
        let q = query(entities("A"), None, None, None).unwrap();
        let names: Vec<_> = renderers.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["compact", "pretty"]);
        assert_eq!(renderers[0].render_query(&q), "query(entities('A'))");
    }
}
