use super::QueryRenderer;
use crate::config::RenderConfig;

/// Indented multi-line form.
///
/// Every item of a list holding nested constraints goes on its own line,
/// one indentation unit deeper than its parent. Leaves and containers
/// without children stay on one line.
#[derive(Debug, Clone)]
pub struct PrettyRenderer {
    indent: String,
}

impl Default for PrettyRenderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl PrettyRenderer {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            indent: config.indent.clone(),
        }
    }

    fn new_line(&self, out: &mut String, depth: usize) {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
    }
}

impl QueryRenderer for PrettyRenderer {
    fn name(&self) -> &'static str {
        "pretty"
    }

    fn open_nested(&self, out: &mut String, depth: usize) {
        self.new_line(out, depth + 1);
    }

    fn separate_nested(&self, out: &mut String, depth: usize) {
        out.push(',');
        self.new_line(out, depth + 1);
    }

    fn close_nested(&self, out: &mut String, depth: usize) {
        self.new_line(out, depth);
    }
}
