//! ludoteca-report — progress report rendering.
//!
//! Renders a child's [`ChildSummary`] (plus the AI-generated narrative from
//! the backend, when available) as markdown or a self-contained HTML page.

pub mod html;
pub mod markdown;

use ludoteca_core::stats::ChildSummary;

/// Everything a rendered report needs.
pub struct ReportInput<'a> {
    /// Child display name (ids make for poor headings).
    pub child_name: &'a str,
    pub summary: &'a ChildSummary,
    /// Narrative from the AI-report endpoint, if one was generated.
    pub narrative: Option<&'a str>,
}

/// Human label for a score trend delta.
pub(crate) fn trend_label(trend: f64) -> &'static str {
    if trend > 0.5 {
        "melhorando"
    } else if trend < -0.5 {
        "precisa de atenção"
    } else {
        "estável"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_labels() {
        assert_eq!(trend_label(2.0), "melhorando");
        assert_eq!(trend_label(0.0), "estável");
        assert_eq!(trend_label(-1.0), "precisa de atenção");
    }
}
