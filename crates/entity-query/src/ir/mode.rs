//! Enumerations carried as enum literals in require constraints.

use crate::literal::{EnumLiteral, IntoArgument, Literal};
use serde::{Deserialize, Serialize};

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Token as written in query text
            pub fn token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }

            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Reads the mode back from an enum literal argument
            pub fn from_literal(literal: &Literal) -> Option<Self> {
                literal.as_enum().and_then(|token| Self::from_token(token.as_str()))
            }
        }

        impl From<$name> for Literal {
            fn from(mode: $name) -> Self {
                Literal::Enum(EnumLiteral::from_static(mode.token()))
            }
        }

        impl IntoArgument for $name {
            fn into_argument(self) -> Option<Literal> {
                Some(self.into())
            }
        }

        impl IntoArgument for Option<$name> {
            fn into_argument(self) -> Option<Literal> {
                self.map(Literal::from)
            }
        }
    };
}

token_enum! {
    /// Which prices are fetched with an entity
    PriceFetchMode {
        None => "NONE",
        /// Only prices matching the price filter
        RespectingFilter => "RESPECTING_FILTER",
        All => "ALL",
    }
}

token_enum! {
    /// How much detail a facet summary computes
    FacetStatisticsDepth {
        /// Counts of matching entities only
        Counts => "COUNTS",
        /// Counts plus the impact of selecting each facet
        Impact => "IMPACT",
    }
}

token_enum! {
    /// Whether prices are compared with or without tax
    QueryPriceMode {
        WithTax => "WITH_TAX",
        WithoutTax => "WITHOUT_TAX",
    }
}

impl Default for PriceFetchMode {
    fn default() -> Self {
        Self::RespectingFilter
    }
}

impl Default for FacetStatisticsDepth {
    fn default() -> Self {
        Self::Counts
    }
}
