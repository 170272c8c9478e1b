use super::QueryRenderer;

/// Canonical single-line form: `name(arg,arg,...)`, no whitespace.
///
/// This is the form `Display` produces and the parser reads back.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactRenderer;

impl QueryRenderer for CompactRenderer {
    fn name(&self) -> &'static str {
        "compact"
    }
}
