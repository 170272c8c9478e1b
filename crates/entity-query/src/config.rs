//! Host-tunable settings for rendering and purification.
//!
//! Both structs deserialize with defaults for every missing field, so
//! they can be embedded as a section of a larger configuration file.

use serde::{Deserialize, Serialize};

/// Settings for the indented renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// One indentation unit, repeated once per nesting level
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

impl RenderConfig {
    /// Config indenting with `width` spaces per level
    pub fn with_spaces(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }
}

/// Settings for the purifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurifyConfig {
    /// Replace collapsible containers holding a single child by that child
    pub collapse_single_child: bool,
}

impl Default for PurifyConfig {
    fn default() -> Self {
        Self {
            collapse_single_child: true,
        }
    }
}
