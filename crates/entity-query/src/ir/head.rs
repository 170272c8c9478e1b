//! Head constraints select the queried entity collection.

use super::{AnyConstraint, ArgShape, Category, Constraint, ConstraintKind};
use crate::literal::Literal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadKind {
    Entities,
}

pub type HeadConstraint = Constraint<HeadKind>;

impl ConstraintKind for HeadKind {
    const CATEGORY: Category = Category::Head;

    fn all() -> &'static [Self] {
        &[Self::Entities]
    }

    fn name(self) -> &'static str {
        match self {
            Self::Entities => "entities",
        }
    }

    fn is_container(self) -> bool {
        false
    }

    fn required_arguments(self) -> usize {
        1
    }

    fn shapes(self) -> &'static [ArgShape] {
        &[ArgShape::Value]
    }

    fn wrap(constraint: Constraint<Self>) -> AnyConstraint {
        AnyConstraint::Head(constraint)
    }

    fn unwrap(constraint: AnyConstraint) -> Result<Constraint<Self>, AnyConstraint> {
        match constraint {
            AnyConstraint::Head(c) => Ok(c),
            other => Err(other),
        }
    }
}

impl HeadConstraint {
    /// Entity type the query targets
    pub fn entity_type(&self) -> Option<&Literal> {
        self.argument(0)
    }
}
