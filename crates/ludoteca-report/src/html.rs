//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined so it can be
//! shared with families without any server.

use std::path::Path;

use anyhow::Result;

use crate::{trend_label, ReportInput};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report.
pub fn generate_html(input: &ReportInput<'_>) -> String {
    let summary = input.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Relatório — {}</title>\n",
        html_escape(input.child_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>Relatório de progresso — {}</h1>\n",
        html_escape(input.child_name)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} sessões | gerado em {}</p>\n",
        summary.sessions,
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n<h2>Resumo</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Média</th><th>Melhor</th><th>Conclusão</th><th>Tendência</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td>{:.1}</td><td>{:.1}</td><td>{:.0}%</td><td>{}</td></tr></tbody>\n",
        summary.average_score,
        summary.best_score,
        summary.completion_rate * 100.0,
        trend_label(summary.trend),
    ));
    html.push_str("</table>\n");

    if !summary.per_category.is_empty() {
        html.push_str(&generate_category_bars(summary));
    }
    html.push_str("</section>\n");

    if !summary.per_category.is_empty() {
        html.push_str("<section class=\"results\">\n<h2>Por categoria</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Categoria</th><th>Sessões</th><th>Média</th><th>Movimentos</th></tr></thead>\n<tbody>\n");

        let mut categories: Vec<_> = summary.per_category.values().collect();
        categories.sort_by(|a, b| a.category.cmp(&b.category));
        for stats in categories {
            let moves = stats
                .average_moves
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "-".to_string());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td></tr>\n",
                html_escape(&stats.category),
                stats.sessions,
                stats.average_score,
                moves
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    if let Some(narrative) = input.narrative {
        html.push_str("<section class=\"narrative\">\n<h2>Análise</h2>\n");
        html.push_str(&format!("<p>{}</p>\n", html_escape(narrative)));
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(input: &ReportInput<'_>, path: &Path) -> Result<()> {
    let html = generate_html(input);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_category_bars(summary: &ludoteca_core::stats::ChildSummary) -> String {
    let bar_height = 26;
    let max_width = 360;
    let padding = 8;
    let label_width = 180;

    let mut categories: Vec<_> = summary.per_category.values().collect();
    categories.sort_by(|a, b| a.category.cmp(&b.category));

    let total_height = categories.len() * (bar_height + padding) + padding;
    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, stats) in categories.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = stats.average_score / 10.0;
        let width = (fraction * max_width as f64) as usize;
        let color = if stats.average_score >= 8.0 {
            "#22c55e"
        } else if stats.average_score >= 5.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&stats.category)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            stats.average_score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.narrative p { max-width: 60ch; line-height: 1.6; }
svg { margin: 1rem 0; }
"#;
