//! Markdown report generator.

use std::path::Path;

use anyhow::Result;

use crate::{trend_label, ReportInput};

/// Render a progress report as markdown.
pub fn generate_markdown(input: &ReportInput<'_>) -> String {
    let summary = input.summary;
    let mut md = String::new();

    md.push_str(&format!("# Relatório de progresso — {}\n\n", input.child_name));
    md.push_str(&format!(
        "Gerado em {}\n\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str(&format!(
        "**Resumo:** {} sessões | média {:.1} | melhor {:.1} | conclusão {:.0}% | tendência: {}\n\n",
        summary.sessions,
        summary.average_score,
        summary.best_score,
        summary.completion_rate * 100.0,
        trend_label(summary.trend),
    ));

    if !summary.per_category.is_empty() {
        md.push_str("## Por categoria\n\n");
        md.push_str("| Categoria | Sessões | Média | Movimentos |\n");
        md.push_str("|-----------|---------|-------|------------|\n");

        let mut categories: Vec<_> = summary.per_category.values().collect();
        categories.sort_by(|a, b| a.category.cmp(&b.category));
        for stats in categories {
            let moves = stats
                .average_moves
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {:.1} | {} |\n",
                stats.category, stats.sessions, stats.average_score, moves
            ));
        }
        md.push('\n');
    }

    if let Some(narrative) = input.narrative {
        md.push_str("## Análise\n\n");
        md.push_str(narrative);
        md.push('\n');
    }

    md
}

/// Write a markdown report to a file.
pub fn write_markdown_report(input: &ReportInput<'_>, path: &Path) -> Result<()> {
    let md = generate_markdown(input);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}
